//! Data Models
//!
//! Core data structures shared across the crate:
//!
//! - [`Node`] - a structured content record owned by a collection
//! - [`Connection`] / [`Edge`] / [`PageInfo`] - the resolved page view
//! - [`ConnectionArgs`] - caller-facing query arguments with defaults

pub mod connection;
pub mod node;

pub use connection::{
    ArgumentSpec, Connection, ConnectionArgs, Edge, PageInfo, SortOrder, CONNECTION_ARGUMENTS,
};
pub use node::{Node, ValidationError, RESERVED_FIELDS};
