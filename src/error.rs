//! # Error Types
//!
//! Structured error handling for scope resolution and filter compilation,
//! using thiserror for typed variants instead of `Box<dyn Error>` patterns.

use crate::store::StoreError;
use thiserror::Error;

/// Errors produced by the coordinator core.
///
/// Format and arity errors are detected eagerly at the first offending token or
/// filter entry and abort the whole call; no partial results are returned.
#[derive(Error, Debug)]
pub enum CoordinatorError {
    /// Malformed scope text: bad range syntax, unparsable action number or
    /// date, inverted range, or an empty scope/token. Carries the offending
    /// text so the caller can surface it as a bad-request condition.
    #[error("invalid scope format: {message}")]
    InvalidScopeFormat { message: String },

    /// A filter entry named a field with no known column mapping.
    #[error("invalid filter field: {field}")]
    InvalidFilterField { field: String },

    /// A relational comparator was given more than one value.
    #[error("filter on {field} with comparator {comparator} accepts exactly one value, got {count}")]
    InvalidComparatorArity {
        field: String,
        comparator: String,
        count: usize,
    },

    /// A store lookup failed for a reason other than "no such action".
    #[error("action lookup failed: {0}")]
    Lookup(#[from] StoreError),

    /// An action that must exist (the materialized action for a parsed nominal
    /// time) was not found. This signals a defect elsewhere, not bad user
    /// input, and is never downgraded to a skip.
    #[error("internal inconsistency: {message}")]
    InternalInconsistency { message: String },

    /// Malformed configuration value.
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl CoordinatorError {
    pub(crate) fn invalid_scope(message: impl Into<String>) -> Self {
        CoordinatorError::InvalidScopeFormat {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoordinatorError>;
