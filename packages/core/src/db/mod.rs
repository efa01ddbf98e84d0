//! Store Layer
//!
//! This module ships the in-memory document store the resolver queries:
//!
//! - [`Store`] - registry mapping collection name to collection handle
//! - [`Collection`] - named node set with a chain query API
//!   (find, sort, offset, limit) and an unconditional count
//! - [`StoreQuery`] - the flat, operator-keyed predicate form the store
//!   executes
//!
//! The store is a collaborator of the connection resolver, not part of it:
//! the resolver only depends on the chain interface and the query shape.

mod collection;
mod error;
mod query;
mod store;

pub use collection::{Chain, Collection};
pub use error::DatabaseError;
pub use query::{ConditionValue, FieldCondition, StoreQuery};
pub use store::Store;
