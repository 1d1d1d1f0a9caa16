//! # BatchSync Store
//!
//! Storage seam for the BatchSync server.
//!
//! This crate provides:
//! - `DocumentStore`: account-partitioned document CRUD and range
//!   queries, the collaborator the mutation handlers write through
//! - `ClientStateStore`: the per-(account, client) mutation cursor
//! - `MemoryStore`: an in-memory implementation of both
//!
//! The server core never assumes a storage provider. Any store with
//! per-account partitioned reads/writes and at least read-your-writes
//! consistency on one handle can implement these traits.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client_state;
mod document;
mod error;
mod memory;

pub use client_state::{client_state_doc_id, ClientStateStore, CLIENT_STATE_PREFIX};
pub use document::{AccountId, Document, DocumentStore};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
