//! In-memory store implementation.

use crate::client_state::{client_state_doc_id, ClientStateStore};
use crate::document::{AccountId, Document, DocumentStore};
use crate::error::{StoreError, StoreResult};
use parking_lot::RwLock;
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// An in-memory document store.
///
/// All documents for all accounts live in one ordered map keyed by
/// (account, document id), mimicking a single container partitioned by
/// account. Client state records are ordinary documents under
/// `/client-state/`, colocated with the data they guard.
///
/// The map is guarded by a single `RwLock`, which also makes the
/// conditional cursor write atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<BTreeMap<(AccountId, String), Value>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(BTreeMap::new()),
        }
    }

    /// Returns the number of documents across all accounts.
    ///
    /// Client state records count too; this is a testing convenience.
    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    /// Returns true if no documents are stored.
    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }

    fn read_cursor(map: &BTreeMap<(AccountId, String), Value>, key: &(AccountId, String)) -> u64 {
        map.get(key)
            .and_then(|body| body.get("lastMutationID"))
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }
}

impl DocumentStore for MemoryStore {
    fn create(&self, account: &AccountId, doc: Document) -> StoreResult<()> {
        let mut docs = self.docs.write();
        let key = (account.clone(), doc.id.clone());
        if docs.contains_key(&key) {
            return Err(StoreError::AlreadyExists { id: doc.id });
        }
        docs.insert(key, doc.body);
        Ok(())
    }

    fn upsert(&self, account: &AccountId, doc: Document) -> StoreResult<()> {
        self.docs
            .write()
            .insert((account.clone(), doc.id), doc.body);
        Ok(())
    }

    fn delete(&self, account: &AccountId, id: &str) -> StoreResult<()> {
        self.docs
            .write()
            .remove(&(account.clone(), id.to_string()));
        Ok(())
    }

    fn get(&self, account: &AccountId, id: &str) -> StoreResult<Option<Document>> {
        Ok(self
            .docs
            .read()
            .get(&(account.clone(), id.to_string()))
            .map(|body| Document::new(id, body.clone())))
    }

    fn query_prefix(&self, account: &AccountId, prefix: &str) -> StoreResult<Vec<Document>> {
        let docs = self.docs.read();
        let start = (account.clone(), prefix.to_string());
        Ok(docs
            .range(start..)
            .take_while(|((acct, id), _)| acct == account && id.starts_with(prefix))
            .map(|((_, id), body)| Document::new(id.clone(), body.clone()))
            .collect())
    }
}

impl ClientStateStore for MemoryStore {
    fn last_mutation_id(&self, account: &AccountId, client_id: &str) -> StoreResult<u64> {
        let key = (account.clone(), client_state_doc_id(client_id));
        Ok(Self::read_cursor(&self.docs.read(), &key))
    }

    fn set_last_mutation_id(
        &self,
        account: &AccountId,
        client_id: &str,
        value: u64,
    ) -> StoreResult<()> {
        let key = (account.clone(), client_state_doc_id(client_id));
        self.docs
            .write()
            .insert(key, json!({ "lastMutationID": value }));
        Ok(())
    }

    fn compare_and_set_mutation_id(
        &self,
        account: &AccountId,
        client_id: &str,
        expected: u64,
        value: u64,
    ) -> StoreResult<bool> {
        let key = (account.clone(), client_state_doc_id(client_id));
        let mut docs = self.docs.write();
        if Self::read_cursor(&docs, &key) != expected {
            return Ok(false);
        }
        docs.insert(key, json!({ "lastMutationID": value }));
        Ok(true)
    }
}
