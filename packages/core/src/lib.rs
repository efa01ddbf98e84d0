//! Sitegraph Content Graph Query Core
//!
//! This crate provides the read-side query core of the Sitegraph content
//! graph: paginated, filterable, sorted connections over named collections
//! of content nodes.
//!
//! # Architecture
//!
//! - **Nodes and collections**: structured records with reserved root
//!   fields and a `fields` namespace for user data, owned by in-memory
//!   collections that support concurrent readers
//! - **Schema boundary**: per-collection filter capability descriptors
//!   (leaf / reference / nested) declare what a filter may reference
//! - **Flat store queries**: a recursive translator turns nested filter
//!   input into the flat, operator-keyed predicate form the store executes
//! - **Connections**: every resolution returns a fresh page of edges with
//!   positional neighbors plus derived page metadata
//!
//! # Modules
//!
//! - [`models`] - data structures (Node, Connection, Edge, PageInfo, args)
//! - [`schema`] - filter capability descriptors and the schema registry
//! - [`db`] - the in-memory store, collections, and the store query form
//! - [`services`] - filter translation, pagination, connection resolution

pub mod db;
pub mod models;
pub mod schema;
pub mod services;

// Re-export commonly used types
pub use db::*;
pub use models::*;
pub use schema::*;
pub use services::*;
