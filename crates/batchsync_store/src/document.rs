//! Account-partitioned document storage.

use crate::error::StoreResult;
use serde_json::Value;

/// Opaque account identifier; the partition key for all state.
///
/// Accounts are supplied by an external auth collaborator. This core
/// never creates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(String);

impl AccountId {
    /// Creates an account id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A stored document: an id plus an opaque JSON body.
///
/// The account partition is implicit in every store call rather than
/// stored in the body, so handlers cannot forget to scope a write.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document id, unique within the account partition.
    pub id: String,
    /// The JSON body.
    pub body: Value,
}

impl Document {
    /// Creates a new document.
    pub fn new(id: impl Into<String>, body: Value) -> Self {
        Self {
            id: id.into(),
            body,
        }
    }
}

/// Account-partitioned document operations.
///
/// This is the collaborator interface the mutation handlers write
/// through: point lookups, ordered prefix queries, and upserts, all
/// implicitly scoped to the calling account.
pub trait DocumentStore: Send + Sync {
    /// Creates a document; fails with `AlreadyExists` if the id is taken.
    fn create(&self, account: &AccountId, doc: Document) -> StoreResult<()>;

    /// Creates or replaces a document.
    fn upsert(&self, account: &AccountId, doc: Document) -> StoreResult<()>;

    /// Deletes a document if present. Deleting an absent id is a no-op.
    fn delete(&self, account: &AccountId, id: &str) -> StoreResult<()>;

    /// Point lookup by id.
    fn get(&self, account: &AccountId, id: &str) -> StoreResult<Option<Document>>;

    /// Returns all documents whose id starts with `prefix`, in id order.
    fn query_prefix(&self, account: &AccountId, prefix: &str) -> StoreResult<Vec<Document>>;
}
