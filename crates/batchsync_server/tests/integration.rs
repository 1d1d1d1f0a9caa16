//! End-to-end tests: JSON bodies in, JSON bodies out, with fault
//! injection at the store seam.

use batchsync_server::{
    BatchServer, ServerConfig, ServerError, StaticAccountProvider, CLIENT_VIEW_PATH, PUSH_PATH,
};
use batchsync_store::{AccountId, ClientStateStore, StoreError};
use batchsync_testkit::{complete_todo, create_batch, create_todo, delete_todo, FlakyStore};
use serde_json::{json, Value};
use std::sync::Arc;

fn flaky_server() -> (Arc<FlakyStore>, BatchServer) {
    let store = Arc::new(FlakyStore::new());
    let server = BatchServer::new(
        ServerConfig::default(),
        Arc::new(StaticAccountProvider::new(AccountId::new("acct-1"))),
        store.clone(),
        store.clone(),
    );
    (store, server)
}

fn push(server: &BatchServer, body: &Value) -> Result<Value, ServerError> {
    let bytes = server.handle_post(PUSH_PATH, None, &serde_json::to_vec(body).unwrap())?;
    Ok(serde_json::from_slice(&bytes).unwrap())
}

fn client_view(server: &BatchServer, client_id: &str) -> Result<Value, ServerError> {
    let bytes = server.handle_post(
        CLIENT_VIEW_PATH,
        None,
        &serde_json::to_vec(&json!({"clientID": client_id})).unwrap(),
    )?;
    Ok(serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn full_todo_lifecycle() {
    let server = BatchServer::in_memory();

    let body = serde_json::to_value(&batchsync_protocol::BatchRequest::new(
        "c1",
        vec![
            create_todo(1, "/todo/1", "milk"),
            create_todo(2, "/todo/2", "bread"),
            complete_todo(3, "/todo/1"),
            delete_todo(4, "/todo/2"),
        ],
    ))
    .unwrap();

    let response = push(&server, &body).unwrap();
    assert_eq!(response["mutationInfos"], json!([]));

    let view = client_view(&server, "c1").unwrap();
    assert_eq!(view["lastMutationID"], 4);
    assert_eq!(view["clientView"]["/todo/1"]["complete"], true);
    assert!(view["clientView"].get("/todo/2").is_none());
}

#[test]
fn duplicate_batch_converges_over_wire() {
    let server = BatchServer::in_memory();
    let body = serde_json::to_value(&create_batch("c1", 3)).unwrap();

    push(&server, &body).unwrap();
    let response = push(&server, &body).unwrap();

    let infos = response["mutationInfos"].as_array().unwrap();
    assert_eq!(infos.len(), 3);
    for (i, info) in infos.iter().enumerate() {
        assert_eq!(info["id"], i as u64 + 1);
        assert!(info["error"]
            .as_str()
            .unwrap()
            .contains("already been processed"));
    }

    let view = client_view(&server, "c1").unwrap();
    assert_eq!(view["lastMutationID"], 3);
    assert_eq!(view["clientView"].as_object().unwrap().len(), 3);
}

#[test]
fn outage_mid_batch_then_retry_converges() {
    let (store, server) = flaky_server();
    let body = serde_json::to_value(&create_batch("c1", 3)).unwrap();

    // Let mutation 1 commit, then cut the store. Each applied mutation
    // costs three calls (cursor read, create, cursor CAS).
    store.fail_from(4);
    let err = push(&server, &body).unwrap_err();
    assert!(matches!(err, ServerError::Store(StoreError::Unavailable(_))));
    assert!(err.is_server_error());

    let account = AccountId::new("acct-1");
    assert_eq!(store.inner().last_mutation_id(&account, "c1").unwrap(), 1);

    // Store recovers; the client retries the same batch.
    store.heal();
    let response = push(&server, &body).unwrap();

    let infos = response["mutationInfos"].as_array().unwrap();
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0]["id"], 1);

    let view = client_view(&server, "c1").unwrap();
    assert_eq!(view["lastMutationID"], 3);
    assert_eq!(view["clientView"].as_object().unwrap().len(), 3);
}

#[test]
fn permanent_failure_reported_once_then_skipped() {
    let server = BatchServer::in_memory();

    let bad = json!({
        "clientID": "c1",
        "mutations": [{"id": 1, "name": "frobnicate", "args": {}}]
    });

    let response = push(&server, &bad).unwrap();
    let infos = response["mutationInfos"].as_array().unwrap();
    assert_eq!(infos[0]["error"], "Unknown mutation: frobnicate");

    let response = push(&server, &bad).unwrap();
    let infos = response["mutationInfos"].as_array().unwrap();
    assert_eq!(
        infos[0]["error"],
        "Mutation ID 1 has already been processed. Skipping."
    );

    let view = client_view(&server, "c1").unwrap();
    assert_eq!(view["lastMutationID"], 1);
}

#[test]
fn gap_rejected_with_exact_message() {
    let server = BatchServer::in_memory();

    let body = json!({
        "clientID": "c1",
        "mutations": [{"id": 3, "name": "createTodo", "args": {}}]
    });
    let err = push(&server, &body).unwrap_err();

    assert!(err.is_client_error());
    assert_eq!(
        err.to_string(),
        "Mutation ID 3 is too high - next expected mutation is 1"
    );

    let view = client_view(&server, "c1").unwrap();
    assert_eq!(view["lastMutationID"], 0);
}

#[test]
fn clients_interleave_on_shared_view() {
    let server = BatchServer::in_memory();

    let c1 = serde_json::to_value(&batchsync_protocol::BatchRequest::new(
        "c1",
        vec![create_todo(1, "/todo/a", "from c1")],
    ))
    .unwrap();
    let c2 = serde_json::to_value(&batchsync_protocol::BatchRequest::new(
        "c2",
        vec![create_todo(1, "/todo/b", "from c2")],
    ))
    .unwrap();

    push(&server, &c1).unwrap();
    push(&server, &c2).unwrap();

    // Both clients see both todos, each with its own cursor.
    let view1 = client_view(&server, "c1").unwrap();
    let view2 = client_view(&server, "c2").unwrap();
    assert_eq!(view1["clientView"], view2["clientView"]);
    assert_eq!(view1["clientView"].as_object().unwrap().len(), 2);
    assert_eq!(view1["lastMutationID"], 1);
    assert_eq!(view2["lastMutationID"], 1);
}

#[test]
fn view_read_during_outage_fails_retryably() {
    let (store, server) = flaky_server();
    push(&server, &serde_json::to_value(&create_batch("c1", 1)).unwrap()).unwrap();

    store.fail_from(1);
    let err = client_view(&server, "c1").unwrap_err();
    assert!(err.is_server_error());

    store.heal();
    let view = client_view(&server, "c1").unwrap();
    assert_eq!(view["lastMutationID"], 1);
}
