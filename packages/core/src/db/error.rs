//! Store Layer Error Types

use thiserror::Error;

/// Errors raised by store query evaluation
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The query contained an operator the store does not implement
    #[error("Unsupported query operator '{op}' at '{path}'")]
    UnsupportedOperator { op: String, path: String },

    /// The operand shape does not fit the operator (e.g. `$in` without an array)
    #[error("Invalid operand for '{op}' at '{path}': {reason}")]
    InvalidOperand {
        op: String,
        path: String,
        reason: String,
    },
}

impl DatabaseError {
    pub fn unsupported_operator(op: impl Into<String>, path: impl Into<String>) -> Self {
        Self::UnsupportedOperator {
            op: op.into(),
            path: path.into(),
        }
    }

    pub fn invalid_operand(
        op: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOperand {
            op: op.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }
}
