//! Push endpoint types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A client-submitted unit of work.
///
/// Mutation ids are assigned by the client: strictly positive,
/// monotonically increasing from 1 per client, with no client-side
/// gaps. The `args` payload is opaque at this layer and is only
/// interpreted by the mutation handler registered under `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    /// Client-assigned sequence number (must be non-zero).
    pub id: u64,
    /// Name of the operation to apply.
    pub name: String,
    /// Opaque structured payload for the handler.
    pub args: Value,
}

impl Mutation {
    /// Creates a new mutation.
    pub fn new(id: u64, name: impl Into<String>, args: Value) -> Self {
        Self {
            id,
            name: name.into(),
            args,
        }
    }
}

/// An ordered batch of mutations pushed by one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest {
    /// The submitting client's id.
    #[serde(rename = "clientID")]
    pub client_id: String,
    /// Mutations in client-assigned order.
    pub mutations: Vec<Mutation>,
}

impl BatchRequest {
    /// Creates a new batch request.
    pub fn new(client_id: impl Into<String>, mutations: Vec<Mutation>) -> Self {
        Self {
            client_id: client_id.into(),
            mutations,
        }
    }
}

/// A per-mutation note in the push response.
///
/// Only mutations that were not applied cleanly produce an info
/// record: permanent failures and duplicate skips. Mutations applied
/// without error are omitted from the report entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationInfo {
    /// The mutation id the note refers to.
    pub id: u64,
    /// Human-readable description of what happened.
    pub error: String,
}

/// The push endpoint's response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BatchResponse {
    /// Notes for mutations that were not applied cleanly.
    #[serde(rename = "mutationInfos")]
    pub mutation_infos: Vec<MutationInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn batch_request_wire_names() {
        let request = BatchRequest::new(
            "c1",
            vec![Mutation::new(1, "createTodo", json!({"id": "/todo/1"}))],
        );

        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(encoded["clientID"], "c1");
        assert_eq!(encoded["mutations"][0]["id"], 1);
        assert_eq!(encoded["mutations"][0]["name"], "createTodo");
    }

    #[test]
    fn batch_request_roundtrip() {
        let request = BatchRequest::new(
            "client-7",
            vec![
                Mutation::new(1, "createTodo", json!({"id": "/todo/1", "title": "a"})),
                Mutation::new(2, "deleteTodo", json!({"id": "/todo/1"})),
            ],
        );

        let bytes = serde_json::to_vec(&request).unwrap();
        let decoded: BatchRequest = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn mutation_info_shape() {
        let info = MutationInfo {
            id: 3,
            error: "unknown mutation: frobnicate".into(),
        };

        let encoded = serde_json::to_value(&info).unwrap();
        assert_eq!(encoded["id"], 3);
        assert!(encoded["error"].as_str().unwrap().contains("frobnicate"));
    }
}
