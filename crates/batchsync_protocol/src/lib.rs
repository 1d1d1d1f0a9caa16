//! # BatchSync Protocol
//!
//! Wire types for the BatchSync offline-first replication protocol.
//!
//! This crate provides:
//! - `Mutation`, `BatchRequest`, and `BatchResponse` for the push endpoint
//! - `MutationInfo` and the `MutationOutcome` reporting model
//! - `ClientViewRequest`/`ClientViewResponse` for the read path
//! - The todo document shapes interpreted by the mutation handlers
//!
//! This is a pure protocol crate with no I/O operations. All types
//! serialize to the JSON field names the deployed clients expect
//! (camelCase, `clientID`, `lastMutationID`).

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client_view;
mod mutation;
mod outcome;
mod todo;

pub use client_view::{ClientViewRequest, ClientViewResponse};
pub use mutation::{BatchRequest, BatchResponse, Mutation, MutationInfo};
pub use outcome::MutationOutcome;
pub use todo::{Todo, TodoDelete, TodoUpdate, TODO_ID_PREFIX};
