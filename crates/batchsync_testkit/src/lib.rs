//! # BatchSync Testkit
//!
//! Test utilities shared across the BatchSync crates.
//!
//! This crate provides:
//! - Fixture builders for todo mutations and batches
//! - A fault-injecting store wrapper for outage and retry tests

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod flaky;

pub use fixtures::*;
pub use flaky::FlakyStore;
