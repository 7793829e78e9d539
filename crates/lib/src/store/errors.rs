//! Errors raised by document store backends.
//!
//! Store errors describe failures on the remote side: the store could not
//! be reached, or it rejected a primitive because the document content
//! does not support it. They are deliberately separate from the
//! [`DocError`](crate::doc::DocError) conditions the proxies raise, so a
//! lost connection is never mistaken for a missing key.

use thiserror::Error;

/// Errors originating in a document store backend.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or refused to serve the call.
    #[error("document store unavailable: {reason}")]
    Unavailable {
        /// Description of the underlying transport failure.
        reason: String,
    },

    /// A primitive was applied to a location of the wrong container kind.
    #[error("{operation} at '{path}' requires {expected}, found {actual}")]
    WrongKind {
        /// The store primitive that was attempted.
        operation: String,
        /// Rendered path of the offending location.
        path: String,
        /// Container kind the primitive requires.
        expected: String,
        /// Type tag actually present at the location.
        actual: String,
    },

    /// An array primitive addressed a position the array does not have.
    #[error("index {index} out of bounds at '{path}' (length {len})")]
    OutOfBounds {
        /// Rendered path of the array.
        path: String,
        /// Position that was addressed.
        index: usize,
        /// Length the array had at the time.
        len: usize,
    },

    /// A primitive that requires an existing target found nothing at the path.
    #[error("no value at '{path}'")]
    MissingTarget {
        /// Rendered path of the absent location.
        path: String,
    },

    /// Stored document content could not be interpreted.
    #[error("document store content is corrupt: {reason}")]
    Corrupt {
        /// Description of the malformed content.
        reason: String,
    },
}

impl StoreError {
    /// Check if this error means the store itself was unreachable
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }

    /// Check if this error was caused by a container kind conflict
    pub fn is_wrong_kind(&self) -> bool {
        matches!(self, StoreError::WrongKind { .. })
    }

    /// Check if this error was caused by an out-of-bounds array position
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, StoreError::OutOfBounds { .. })
    }

    /// Check if this error was caused by addressing an absent location
    pub fn is_missing_target(&self) -> bool {
        matches!(self, StoreError::MissingTarget { .. })
    }

    /// Check if this error is related to data integrity
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }

    /// Returns the rendered path this error refers to, when it has one
    pub fn path(&self) -> Option<&str> {
        match self {
            StoreError::WrongKind { path, .. }
            | StoreError::OutOfBounds { path, .. }
            | StoreError::MissingTarget { path } => Some(path),
            _ => None,
        }
    }
}

// Convert StoreError to the main crate Error type
impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
