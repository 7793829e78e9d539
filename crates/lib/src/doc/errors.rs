//! Error conditions raised by document proxies.
//!
//! These cover the ways an operation can fail against document *content*:
//! absent keys, bad indices, mismatched slice assignments, and values of
//! the wrong type. Failures of the store itself are
//! [`StoreError`](crate::store::StoreError)s and never appear here, so
//! callers can always tell "the key is gone" apart from "the store is
//! down".

use thiserror::Error;

use super::path::PathError;

/// Errors raised by operations on document proxies.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DocError {
    /// A mapping lookup addressed a key with no value.
    #[error("key not found: '{key}'")]
    KeyNotFound {
        /// The missing key, or the rendered path when a whole container
        /// turned out to be gone.
        key: String,
    },

    /// A sequence access addressed a position outside the sequence.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The position as given by the caller, before tail translation.
        index: i64,
        /// Sequence length at the time of the access.
        len: usize,
    },

    /// A strided slice assignment received the wrong number of values.
    #[error("cannot assign {actual} values to a selection of {expected} positions")]
    SliceLengthMismatch {
        /// Number of positions the slice selects.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// A slice used a step of zero.
    #[error("slice step cannot be zero")]
    ZeroStep,

    /// A value had a different type than the operation requires.
    #[error("type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        /// What the operation needed.
        expected: String,
        /// What was actually there.
        actual: String,
    },

    /// A textual path expression could not be parsed.
    #[error(transparent)]
    Path(#[from] PathError),
}

impl DocError {
    /// Check if this error is a missing-key condition
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, DocError::KeyNotFound { .. })
    }

    /// Check if this error is an out-of-range sequence access
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, DocError::IndexOutOfRange { .. })
    }

    /// Check if this error is a slice assignment length conflict
    pub fn is_length_mismatch(&self) -> bool {
        matches!(self, DocError::SliceLengthMismatch { .. })
    }

    /// Check if this error is a type conflict
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, DocError::TypeMismatch { .. })
    }

    /// Check if this error is a zero slice step
    pub fn is_zero_step(&self) -> bool {
        matches!(self, DocError::ZeroStep)
    }

    /// Check if this error is a path parse failure
    pub fn is_path_error(&self) -> bool {
        matches!(self, DocError::Path(_))
    }

    /// Returns the missing key for `KeyNotFound` errors
    pub fn key(&self) -> Option<&str> {
        match self {
            DocError::KeyNotFound { key } => Some(key),
            _ => None,
        }
    }

    /// Returns the offending index for `IndexOutOfRange` errors
    pub fn index(&self) -> Option<i64> {
        match self {
            DocError::IndexOutOfRange { index, .. } => Some(*index),
            _ => None,
        }
    }
}

// Convert DocError to the main crate Error type
impl From<DocError> for crate::Error {
    fn from(err: DocError) -> Self {
        crate::Error::Doc(err)
    }
}
