//! Fault-injecting store wrapper.

use batchsync_store::{
    AccountId, ClientStateStore, Document, DocumentStore, MemoryStore, StoreError, StoreResult,
};
use parking_lot::Mutex;

/// A store wrapper that starts failing after a set number of calls.
///
/// Every trait call (reads and writes alike) counts against the
/// threshold. Once the threshold is reached, all calls fail with
/// [`StoreError::Unavailable`] until [`FlakyStore::heal`] is called.
/// Used to test that an outage mid-batch leaves the cursor at its last
/// committed value and that a post-recovery retry converges.
pub struct FlakyStore {
    inner: MemoryStore,
    state: Mutex<FaultState>,
}

struct FaultState {
    calls: u64,
    fail_from: Option<u64>,
}

impl FlakyStore {
    /// Creates a healthy wrapper over a fresh in-memory store.
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            state: Mutex::new(FaultState {
                calls: 0,
                fail_from: None,
            }),
        }
    }

    /// Starts failing at the `n`th store call from now (1-based).
    pub fn fail_from(&self, n: u64) {
        let mut state = self.state.lock();
        let calls = state.calls;
        state.fail_from = Some(calls + n);
    }

    /// Clears the fault; subsequent calls succeed again.
    pub fn heal(&self) {
        self.state.lock().fail_from = None;
    }

    /// Number of store calls observed so far.
    pub fn calls(&self) -> u64 {
        self.state.lock().calls
    }

    /// Read access to the wrapped store, bypassing fault injection.
    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn tick(&self) -> StoreResult<()> {
        let mut state = self.state.lock();
        state.calls += 1;
        match state.fail_from {
            Some(threshold) if state.calls >= threshold => Err(StoreError::Unavailable(
                "injected store outage".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl Default for FlakyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for FlakyStore {
    fn create(&self, account: &AccountId, doc: Document) -> StoreResult<()> {
        self.tick()?;
        self.inner.create(account, doc)
    }

    fn upsert(&self, account: &AccountId, doc: Document) -> StoreResult<()> {
        self.tick()?;
        self.inner.upsert(account, doc)
    }

    fn delete(&self, account: &AccountId, id: &str) -> StoreResult<()> {
        self.tick()?;
        self.inner.delete(account, id)
    }

    fn get(&self, account: &AccountId, id: &str) -> StoreResult<Option<Document>> {
        self.tick()?;
        self.inner.get(account, id)
    }

    fn query_prefix(&self, account: &AccountId, prefix: &str) -> StoreResult<Vec<Document>> {
        self.tick()?;
        self.inner.query_prefix(account, prefix)
    }
}

impl ClientStateStore for FlakyStore {
    fn last_mutation_id(&self, account: &AccountId, client_id: &str) -> StoreResult<u64> {
        self.tick()?;
        self.inner.last_mutation_id(account, client_id)
    }

    fn set_last_mutation_id(
        &self,
        account: &AccountId,
        client_id: &str,
        value: u64,
    ) -> StoreResult<()> {
        self.tick()?;
        self.inner.set_last_mutation_id(account, client_id, value)
    }

    fn compare_and_set_mutation_id(
        &self,
        account: &AccountId,
        client_id: &str,
        expected: u64,
        value: u64,
    ) -> StoreResult<bool> {
        self.tick()?;
        self.inner
            .compare_and_set_mutation_id(account, client_id, expected, value)
    }
}
