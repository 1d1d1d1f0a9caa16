//! Todo document shapes interpreted by the mutation handlers.

use serde::{Deserialize, Serialize};

/// Prefix every todo document id must carry.
///
/// Todo documents share an id space with the per-client state records,
/// so the prefix is load-bearing: it both namespaces the documents and
/// drives the client view's range query.
pub const TODO_ID_PREFIX: &str = "/todo/";

/// A todo item as it appears on the wire and in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Document id, `"/todo/<n>"`.
    pub id: String,
    /// Display text.
    pub title: String,
    /// Client-side sort key.
    pub order: String,
    /// Completion flag.
    pub complete: bool,
}

impl Todo {
    /// Returns true if the id carries the required todo prefix.
    pub fn has_valid_id(&self) -> bool {
        self.id.starts_with(TODO_ID_PREFIX)
    }
}

/// Arguments for a partial-field todo update.
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoUpdate {
    /// Id of the todo to update.
    pub id: String,
    /// New title, if changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New sort key, if changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    /// New completion flag, if changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
}

/// Arguments for a todo deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDelete {
    /// Id of the todo to delete.
    pub id: String,
}
