//! Record Store Infrastructure
//!
//! This crate provides the durable entity collections shared by every
//! role-facing operation: a generic, id-keyed store with load-all,
//! get-by-id and atomic per-id upsert, persisted as a JSON file.
//!
//! # Concurrency discipline
//!
//! `upsert` is the mutation primitive: it is scoped to a single id and either
//! fully persists or rolls back. For read-modify-write sequences (load,
//! validate, write back) callers take the per-id lock via
//! [`JsonStore::lock`] so that two concurrent writers on the same entity
//! serialize. Locking is always per-id, never global, so unrelated entities
//! proceed concurrently.

pub mod error;
pub mod json_store;
pub mod record;

pub use error::StoreError;
pub use json_store::{JsonStore, StoreConfig};
pub use record::Record;
