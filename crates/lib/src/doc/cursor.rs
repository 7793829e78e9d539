//! Path-building cursor for one-shot access deep inside a document.

use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::DocContext;
use super::dispatch;
use super::errors::DocError;
use super::path::Path;
use super::value::Value;

/// A chainable address into a document.
///
/// Where [`Map`](super::Map) and [`List`](super::List) issue store calls
/// per operation, a cursor only extends a path locally; the store is
/// first contacted by the terminal call. Useful when one deep value is
/// wanted and the intermediate proxies would be noise.
///
/// ```rust
/// # use std::sync::Arc;
/// # use docnest::{Doc, store::InMemoryStore};
/// # use serde_json::json;
/// let doc = Doc::new(Arc::new(InMemoryStore::new()), "profiles");
/// doc.root_with(json!({"users": [{"name": "ada"}]}))?;
/// let name = doc.cursor().key("users").index(0).key("name").get()?;
/// assert_eq!(name, "ada");
/// # Ok::<(), docnest::Error>(())
/// ```
#[derive(Clone)]
pub struct Cursor {
    ctx: Arc<DocContext>,
    path: Path,
}

impl Cursor {
    pub(crate) fn new(ctx: Arc<DocContext>) -> Self {
        Self {
            ctx,
            path: Path::root(),
        }
    }

    /// Extends the address by a mapping key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.path = self.path.child_key(key);
        self
    }

    /// Extends the address by a sequence position.
    pub fn index(mut self, index: usize) -> Self {
        self.path = self.path.child_index(index);
        self
    }

    /// The path built so far.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the value at the built path.
    ///
    /// Fails with a missing-key error naming the full path when nothing
    /// is stored there.
    pub fn get(&self) -> crate::Result<Value> {
        dispatch::resolve(&self.ctx, &self.path)?.ok_or_else(|| {
            DocError::KeyNotFound {
                key: self.path.to_string(),
            }
            .into()
        })
    }

    /// Writes `value` at the built path, replacing any previous value.
    ///
    /// Missing intermediate mappings are created by the store.
    pub fn set(&self, value: impl Into<JsonValue>) -> crate::Result<()> {
        dispatch::write(&self.ctx, &self.path, &value.into())
    }

    /// Removes the value at the built path.
    ///
    /// Fails with a missing-key error naming the full path when nothing
    /// is stored there.
    pub fn delete(&self) -> crate::Result<()> {
        if self.ctx.store.delete(&self.ctx.name, &self.path)? {
            Ok(())
        } else {
            Err(DocError::KeyNotFound {
                key: self.path.to_string(),
            }
            .into())
        }
    }

    /// Checks whether any value exists at the built path.
    pub fn exists(&self) -> crate::Result<bool> {
        self.ctx.store.exists(&self.ctx.name, &self.path)
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("document", &self.ctx.name)
            .field("path", &self.path.to_string())
            .finish()
    }
}
