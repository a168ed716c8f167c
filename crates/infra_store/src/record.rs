//! The record contract implemented by every stored entity

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use std::hash::Hash;

/// A durable entity addressable by id
///
/// The store is role-agnostic: users, claims and activity entries all
/// implement this trait and share the same collection contract. Entities are
/// addressed by id, never by position in the collection.
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// The identifier type for this entity
    type Id: Copy + Eq + Ord + Hash + Display + Send + Sync + 'static;

    /// Entity kind name used in error messages ("user", "claim", ...)
    const KIND: &'static str;

    /// Returns this record's identifier
    fn id(&self) -> Self::Id;
}
