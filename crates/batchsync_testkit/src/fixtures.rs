//! Fixture builders for todo mutations and batches.

use batchsync_protocol::{BatchRequest, Mutation};
use serde_json::json;

/// Builds a `createTodo` mutation with deterministic filler fields.
pub fn create_todo(id: u64, todo_id: &str, title: &str) -> Mutation {
    Mutation::new(
        id,
        "createTodo",
        json!({
            "id": todo_id,
            "title": title,
            "order": format!("a{id}"),
            "complete": false,
        }),
    )
}

/// Builds an `updateTodo` mutation that toggles completion.
pub fn complete_todo(id: u64, todo_id: &str) -> Mutation {
    Mutation::new(id, "updateTodo", json!({"id": todo_id, "complete": true}))
}

/// Builds a `deleteTodo` mutation.
pub fn delete_todo(id: u64, todo_id: &str) -> Mutation {
    Mutation::new(id, "deleteTodo", json!({"id": todo_id}))
}

/// Builds a contiguous batch of `createTodo` mutations with ids
/// `1..=count`, each creating `/todo/<id>`.
pub fn create_batch(client_id: &str, count: u64) -> BatchRequest {
    let mutations = (1..=count)
        .map(|id| create_todo(id, &format!("/todo/{id}"), &format!("todo {id}")))
        .collect();
    BatchRequest::new(client_id, mutations)
}
