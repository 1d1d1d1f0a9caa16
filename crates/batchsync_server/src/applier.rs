//! Mutation dispatch.
//!
//! Mutations carry an operation name; the registry maps names to
//! handlers. The error split here is the heart of the protocol's
//! retry story: a `Permanent` failure is something the server can
//! never process (the batch processor records it and moves past it),
//! while a `Store` failure is temporary and must propagate so the
//! client retries the whole batch.

use batchsync_store::{AccountId, DocumentStore, StoreError};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error from applying a single mutation.
#[derive(Error, Debug)]
pub enum ApplyError {
    /// The server can never process this mutation. Consumes the
    /// mutation id; reported to the client in-band; never retried.
    #[error("{0}")]
    Permanent(String),

    /// The backing store failed. Retrying the batch is correct, so
    /// this propagates out of the processor uncaught.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApplyError {
    /// Creates a permanent failure with the given message.
    pub fn permanent(message: impl Into<String>) -> Self {
        ApplyError::Permanent(message.into())
    }
}

/// A handler for one named mutation.
///
/// Handlers receive the store handle explicitly; there is no ambient
/// database context. Each handler deserializes its own `args` shape
/// (a mismatch is a permanent failure, not a crash) and performs
/// exactly one domain effect scoped to `account`.
pub trait Mutator: Send + Sync {
    /// Applies the mutation's domain effect.
    fn apply(
        &self,
        store: &dyn DocumentStore,
        account: &AccountId,
        args: &Value,
    ) -> Result<(), ApplyError>;
}

impl<F> Mutator for F
where
    F: Fn(&dyn DocumentStore, &AccountId, &Value) -> Result<(), ApplyError> + Send + Sync,
{
    fn apply(
        &self,
        store: &dyn DocumentStore,
        account: &AccountId,
        args: &Value,
    ) -> Result<(), ApplyError> {
        self(store, account, args)
    }
}

/// A registered mapping from mutation name to handler.
#[derive(Default)]
pub struct MutatorRegistry {
    handlers: HashMap<&'static str, Box<dyn Mutator>>,
}

impl MutatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers a handler under a mutation name.
    pub fn register(mut self, name: &'static str, mutator: impl Mutator + 'static) -> Self {
        self.handlers.insert(name, Box::new(mutator));
        self
    }

    /// Returns true if a handler is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Dispatches a mutation to its handler.
    ///
    /// An unrecognized name is itself a permanent failure: the client
    /// sent an operation this server will never understand.
    pub fn apply(
        &self,
        store: &dyn DocumentStore,
        account: &AccountId,
        name: &str,
        args: &Value,
    ) -> Result<(), ApplyError> {
        match self.handlers.get(name) {
            Some(handler) => handler.apply(store, account, args),
            None => Err(ApplyError::permanent(format!("Unknown mutation: {name}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchsync_store::MemoryStore;
    use serde_json::json;

    #[test]
    fn unknown_name_is_permanent() {
        let registry = MutatorRegistry::new();
        let store = MemoryStore::new();
        let account = AccountId::new("a");

        let err = registry
            .apply(&store, &account, "frobnicate", &json!({}))
            .unwrap_err();

        match err {
            ApplyError::Permanent(message) => {
                assert_eq!(message, "Unknown mutation: frobnicate");
            }
            other => panic!("expected permanent failure, got {other:?}"),
        }
    }

    #[test]
    fn dispatch_reaches_registered_handler() {
        let registry = MutatorRegistry::new().register(
            "touch",
            |store: &dyn DocumentStore, account: &AccountId, _args: &Value| {
                store.upsert(
                    account,
                    batchsync_store::Document::new("/touched", json!(true)),
                )?;
                Ok(())
            },
        );

        let store = MemoryStore::new();
        let account = AccountId::new("a");
        registry
            .apply(&store, &account, "touch", &json!({}))
            .unwrap();

        assert!(store.get(&account, "/touched").unwrap().is_some());
    }

    #[test]
    fn store_errors_pass_through() {
        let registry = MutatorRegistry::new().register(
            "explode",
            |_store: &dyn DocumentStore, _account: &AccountId, _args: &Value| {
                Err(ApplyError::Store(StoreError::Unavailable("down".into())))
            },
        );

        let store = MemoryStore::new();
        let account = AccountId::new("a");
        let err = registry
            .apply(&store, &account, "explode", &json!({}))
            .unwrap_err();
        assert!(matches!(err, ApplyError::Store(_)));
    }
}
