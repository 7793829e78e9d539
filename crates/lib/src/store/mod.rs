//! Document store backends.
//!
//! A document store keeps named JSON documents and exposes the small set
//! of path-addressed primitives the proxies are built from. Every proxy
//! operation turns into one or more of these primitives; nothing is cached
//! on the client side, so the store is always the single source of truth.
//!
//! The bundled [`InMemoryStore`] keeps documents in process memory and can
//! snapshot itself to a file. Other backends implement [`DocumentStore`]
//! against whatever remote actually holds the documents.

use std::any::Any;

use serde_json::Value as JsonValue;

use crate::Result;
use crate::doc::Path;

mod errors;
pub use errors::StoreError;

mod memory;
pub use memory::InMemoryStore;

/// The primitives a document store must provide.
///
/// All methods address a location as a document name plus a [`Path`] from
/// the document root. Implementations are responsible for their own
/// locking; the trait is object-safe and shared behind an `Arc`.
///
/// Failures of the store itself surface as [`StoreError`]. Absence of a
/// value is not a failure: lookups report it through `Option`, and
/// [`delete`](Self::delete) reports it through its return value. The
/// container-shaped queries (`object_keys`, `object_len`, `array_len`)
/// return `Ok(None)` for an absent path but fail with
/// [`StoreError::WrongKind`] when the path holds the wrong kind of value.
pub trait DocumentStore: Send + Sync + Any {
    /// Reports the type tag of the value at a path.
    ///
    /// Tags name the stored representation: `"object"`, `"array"`,
    /// `"string"`, `"integer"`, `"number"`, `"boolean"` or `"null"`.
    ///
    /// # Arguments
    /// * `doc` - Name of the document.
    /// * `path` - Location within the document.
    ///
    /// # Returns
    /// A `Result` containing the tag, or `None` if nothing exists at the
    /// path.
    fn kind_of(&self, doc: &str, path: &Path) -> Result<Option<String>>;

    /// Reads the value at a path.
    ///
    /// # Arguments
    /// * `doc` - Name of the document.
    /// * `path` - Location within the document.
    ///
    /// # Returns
    /// A `Result` containing the decoded value, or `None` if nothing
    /// exists at the path.
    fn get(&self, doc: &str, path: &Path) -> Result<Option<JsonValue>>;

    /// Writes a value at a path, replacing any existing value.
    ///
    /// Missing intermediate mappings along the path are created; a missing
    /// array element cannot be vivified and fails with
    /// [`StoreError::OutOfBounds`]. A rejected set leaves the document
    /// unchanged, never a partially created path.
    ///
    /// # Arguments
    /// * `doc` - Name of the document; created if it does not exist.
    /// * `path` - Location within the document.
    /// * `value` - Value to store.
    fn set(&self, doc: &str, path: &Path, value: &JsonValue) -> Result<()>;

    /// Removes the value at a path.
    ///
    /// # Arguments
    /// * `doc` - Name of the document.
    /// * `path` - Location within the document.
    ///
    /// # Returns
    /// A `Result` containing `true` if a value was removed, `false` if
    /// nothing existed at the path.
    fn delete(&self, doc: &str, path: &Path) -> Result<bool>;

    /// Enumerates the keys of the mapping at a path.
    ///
    /// The order is stable for an unchanged mapping; the bundled store
    /// reports keys in sorted order.
    ///
    /// # Returns
    /// A `Result` containing the keys, or `None` if nothing exists at the
    /// path. Fails with [`StoreError::WrongKind`] if the path holds a
    /// non-mapping.
    fn object_keys(&self, doc: &str, path: &Path) -> Result<Option<Vec<String>>>;

    /// Reports the number of entries in the mapping at a path.
    ///
    /// # Returns
    /// A `Result` containing the entry count, or `None` if nothing exists
    /// at the path. Fails with [`StoreError::WrongKind`] if the path holds
    /// a non-mapping.
    fn object_len(&self, doc: &str, path: &Path) -> Result<Option<usize>>;

    /// Reports the number of elements in the sequence at a path.
    ///
    /// # Returns
    /// A `Result` containing the element count, or `None` if nothing
    /// exists at the path. Fails with [`StoreError::WrongKind`] if the
    /// path holds a non-sequence.
    fn array_len(&self, doc: &str, path: &Path) -> Result<Option<usize>>;

    /// Appends a value to the sequence at a path.
    ///
    /// # Arguments
    /// * `doc` - Name of the document.
    /// * `path` - Location of the sequence.
    /// * `value` - Value to append.
    ///
    /// # Returns
    /// A `Result` containing the length of the sequence after the append.
    /// Fails with [`StoreError::MissingTarget`] if nothing exists at the
    /// path, or [`StoreError::WrongKind`] if it holds a non-sequence.
    fn array_append(&self, doc: &str, path: &Path, value: &JsonValue) -> Result<usize>;

    /// Inserts a value into the sequence at a path, shifting later
    /// elements.
    ///
    /// Positions past the end append; the insert never fails for a
    /// too-large index.
    ///
    /// # Arguments
    /// * `doc` - Name of the document.
    /// * `path` - Location of the sequence.
    /// * `index` - Position the new element should occupy.
    /// * `value` - Value to insert.
    ///
    /// # Returns
    /// A `Result` containing the length of the sequence after the insert.
    /// Fails with [`StoreError::MissingTarget`] if nothing exists at the
    /// path, or [`StoreError::WrongKind`] if it holds a non-sequence.
    fn array_insert(&self, doc: &str, path: &Path, index: usize, value: &JsonValue)
    -> Result<usize>;

    /// Checks whether any value exists at a path.
    fn exists(&self, doc: &str, path: &Path) -> Result<bool> {
        Ok(self.kind_of(doc, path)?.is_some())
    }

    /// Returns self as Any for downcasting to a concrete backend type.
    fn as_any(&self) -> &dyn Any;
}
