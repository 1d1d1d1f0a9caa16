//! # BatchSync Server
//!
//! Server side of the BatchSync offline-first replication protocol:
//! accepts ordered mutation batches from clients, applies each exactly
//! once against a document store, and serves the materialized client
//! view back.
//!
//! The load-bearing piece is the [`BatchProcessor`]: a per-client
//! cursor (last applied mutation id) makes batch pushes idempotent, so
//! clients can retry a whole batch after any failure without risk of
//! double application.
//!
//! ## Architecture
//!
//! - [`BatchServer`] — transport facade, JSON in and out
//! - [`RequestHandler`] — validation, auth resolution, response shaping
//! - [`BatchProcessor`] — ordering and idempotency engine
//! - [`MutatorRegistry`] — name-keyed mutation dispatch
//! - [`mutators`] — the todo domain handlers
//!
//! Storage is pluggable through the traits in `batchsync_store`.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod applier;
mod auth;
mod config;
mod error;
mod handler;
pub mod mutators;
mod processor;
mod server;

pub use applier::{ApplyError, Mutator, MutatorRegistry};
pub use auth::{AccountProvider, DenyAllProvider, StaticAccountProvider};
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::RequestHandler;
pub use processor::BatchProcessor;
pub use server::{BatchServer, CLIENT_VIEW_PATH, PUSH_PATH};
