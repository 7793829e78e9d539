//!
//! Docnest: nested remote JSON documents behind ordinary map and list interfaces.
//! This library lets several processes share hierarchically structured state by
//! keeping the data in a document store and handing out stateless proxies onto it.
//!
//! ## Core Concepts
//!
//! * **Documents (`doc::Doc`)**: A named JSON tree held by a store. A `Doc` is a
//!   cheap handle binding the name to a store and a type registry.
//! * **Proxies (`doc::Map`, `doc::List`)**: Map- and list-shaped views onto one
//!   container inside a document. Proxies hold only a path; every operation
//!   reads or writes the store directly, so all holders of a handle see the
//!   same live data.
//! * **Values (`doc::Value`)**: What reads produce. Scalars arrive decoded;
//!   nested containers arrive as further proxies instead of being transferred.
//! * **Paths (`doc::Path`)**: Addresses within a document, built from key and
//!   index segments below a root marker.
//! * **Stores (`store::DocumentStore`)**: The pluggable persistence layer,
//!   providing a small set of path-addressed primitives the proxies are built
//!   from. `store::InMemoryStore` is the bundled implementation.
//! * **Type registry (`doc::TypeRegistry`)**: Decides which store type tags
//!   surface as mappings, sequences, or plain scalars.

pub mod doc;
pub mod store;

/// Re-export the central document and proxy types for easier access.
pub use doc::{Cursor, Doc, DocError, List, Map, Path, ProxyKind, Slice, TypeRegistry, Value};
/// Re-export the store trait and the bundled backend.
pub use store::{DocumentStore, InMemoryStore, StoreError};

/// Result type used throughout the docnest library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the docnest library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured document and proxy errors from the doc module
    #[error(transparent)]
    Doc(doc::DocError),

    /// Structured backend errors from the store module
    #[error(transparent)]
    Store(store::StoreError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
            Error::Doc(_) => "doc",
            Error::Store(_) => "store",
        }
    }

    /// Check if this error indicates something addressed was not there,
    /// either a missing key or an out-of-range index.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Doc(doc_err) => doc_err.is_key_not_found() || doc_err.is_index_out_of_range(),
            _ => false,
        }
    }

    /// Check if this error is a missing-key condition.
    pub fn is_key_not_found(&self) -> bool {
        match self {
            Error::Doc(doc_err) => doc_err.is_key_not_found(),
            _ => false,
        }
    }

    /// Check if this error is an out-of-range sequence access.
    pub fn is_index_out_of_range(&self) -> bool {
        match self {
            Error::Doc(doc_err) => doc_err.is_index_out_of_range(),
            _ => false,
        }
    }

    /// Check if this error is a type mismatch.
    pub fn is_type_mismatch(&self) -> bool {
        match self {
            Error::Doc(doc_err) => doc_err.is_type_mismatch(),
            _ => false,
        }
    }

    /// Check if this error is a slice assignment length conflict.
    pub fn is_length_mismatch(&self) -> bool {
        match self {
            Error::Doc(doc_err) => doc_err.is_length_mismatch(),
            _ => false,
        }
    }

    /// Check if this error is a zero slice step.
    pub fn is_zero_step(&self) -> bool {
        match self {
            Error::Doc(doc_err) => doc_err.is_zero_step(),
            _ => false,
        }
    }

    /// Check if this error is a path parse failure.
    pub fn is_path_error(&self) -> bool {
        match self {
            Error::Doc(doc_err) => doc_err.is_path_error(),
            _ => false,
        }
    }

    /// Check if this error originated in the store backend rather than in
    /// document content.
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }

    /// Check if this error means the store was unreachable.
    pub fn is_store_unavailable(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_unavailable(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}
