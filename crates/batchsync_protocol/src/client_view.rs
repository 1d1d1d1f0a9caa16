//! Read-path types.
//!
//! The client view is how a client reconciles local state after a
//! sync: the freshest cursor for that client paired with a snapshot of
//! the account's materialized view.

use crate::todo::Todo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-path request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientViewRequest {
    /// The requesting client's id.
    #[serde(rename = "clientID")]
    pub client_id: String,
}

impl ClientViewRequest {
    /// Creates a new client view request.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
        }
    }
}

/// Read-path response: cursor plus materialized view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientViewResponse {
    /// Id of the last mutation processed for the requesting client.
    #[serde(rename = "lastMutationID")]
    pub last_mutation_id: u64,
    /// All todo documents for the account, keyed by document id.
    #[serde(rename = "clientView")]
    pub client_view: BTreeMap<String, Todo>,
}
