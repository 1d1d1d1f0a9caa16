//! Per-client mutation cursor storage.

use crate::document::AccountId;
use crate::error::StoreResult;

/// Prefix for the per-client state records.
///
/// Client state lives in the same id space and partition as the
/// account's documents, so a store that orders writes within one
/// partition orders the cursor with the data it guards.
pub const CLIENT_STATE_PREFIX: &str = "/client-state/";

/// Returns the document id holding a client's cursor record.
pub fn client_state_doc_id(client_id: &str) -> String {
    format!("{CLIENT_STATE_PREFIX}{client_id}")
}

/// Storage for the per-(account, client) mutation cursor.
///
/// The cursor is the id of the last mutation successfully processed
/// for a client; 0 means none. It is created implicitly at 0 for
/// unknown clients and only ever advanced by the batch processor.
///
/// Implementations must provide read-your-writes consistency on the
/// same handle: a `last_mutation_id` following a completed write for
/// the same (account, client) must observe that write.
pub trait ClientStateStore: Send + Sync {
    /// Returns the cursor, or 0 if the client is unknown.
    fn last_mutation_id(&self, account: &AccountId, client_id: &str) -> StoreResult<u64>;

    /// Unconditionally upserts the cursor. Last writer wins.
    fn set_last_mutation_id(
        &self,
        account: &AccountId,
        client_id: &str,
        value: u64,
    ) -> StoreResult<()>;

    /// Conditionally advances the cursor.
    ///
    /// Writes `value` only if the stored cursor still equals
    /// `expected` (an absent record counts as 0). Returns false
    /// without writing when another writer got there first.
    fn compare_and_set_mutation_id(
        &self,
        account: &AccountId,
        client_id: &str,
        expected: u64,
        value: u64,
    ) -> StoreResult<bool>;
}
