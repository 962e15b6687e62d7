//! In-memory store backend.
//!
//! Implements the remote client contract against process-local tables.
//! Intended for tests and local development; data is not persisted.

mod client;
mod filter;
mod store;

pub use client::InMemoryCredentials;
pub use filter::{matches, matches_all};
pub use store::{InMemoryStore, KeySchema};
