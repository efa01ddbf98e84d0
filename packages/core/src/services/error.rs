//! Service Layer Error Types
//!
//! Errors surfaced by connection resolution. All of them are terminal for
//! the request: a malformed filter rejects the whole query rather than
//! partially applying, and store failures propagate without retries.

use thiserror::Error;

use crate::db::DatabaseError;

/// Connection resolution errors
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// The filter references a field or capability the schema does not
    /// declare, or an operator/operand the field does not support
    #[error("Filter does not match the collection schema at '{path}': {reason}")]
    SchemaMismatch { path: String, reason: String },

    /// No collection is registered under the requested name
    #[error("Unknown collection: {name}")]
    UnknownCollection { name: String },

    /// The store failed while executing the query
    #[error("Store query failed for collection '{collection}'")]
    StoreExecution {
        collection: String,
        #[source]
        source: DatabaseError,
    },
}

impl ConnectionError {
    /// Create a schema mismatch error for a dotted filter path
    pub fn schema_mismatch(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown collection error
    pub fn unknown_collection(name: impl Into<String>) -> Self {
        Self::UnknownCollection { name: name.into() }
    }

    /// Wrap a store execution failure with its collection context
    pub fn store_execution(collection: impl Into<String>, source: DatabaseError) -> Self {
        Self::StoreExecution {
            collection: collection.into(),
            source,
        }
    }
}
