//! Documents and the stateless proxies that view them.
//!
//! A [`Doc`] binds a document name to a
//! [`DocumentStore`](crate::store::DocumentStore) and hands out [`Map`]
//! and [`List`] proxies onto the JSON tree the store holds under that
//! name. Proxies carry only an address, never data: reads and writes go
//! to the store call by call, so any number of handles across any number
//! of processes stay consistent without coordination.
//!
//! Containers nest. Reading a key that holds an object produces another
//! [`Map`]; reading one that holds an array produces a [`List`]. Scalars
//! are decoded into [`Value`] variants on the way out. The mapping from
//! the store's type tags to this behavior is configurable through
//! [`TypeRegistry`].
//!
//! Single-path operations are as atomic as the store makes them.
//! Operations that touch several paths (`pop`, `clear`, slice writes and
//! deletes, iteration) issue their store calls sequentially and can
//! interleave with concurrent writers.

use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::store::DocumentStore;

mod cursor;
mod dispatch;
mod errors;
mod list;
mod map;
mod path;
mod registry;
mod slice;
mod value;

pub use cursor::Cursor;
pub use errors::DocError;
pub use list::{List, ListIter};
pub use map::{Map, MapIter};
pub use path::{Path, PathError, Segment};
pub use registry::{ProxyKind, TypeRegistry};
pub use slice::Slice;
pub use value::Value;

use value::json_type_name;

/// Shared addressing state behind every proxy created from one [`Doc`].
pub(crate) struct DocContext {
    pub(crate) store: Arc<dyn DocumentStore>,
    pub(crate) name: String,
    pub(crate) registry: TypeRegistry,
}

/// A named document in a store.
///
/// Constructing a `Doc` makes no store calls; the document itself is
/// first created when a root proxy is requested. Handles are cheap to
/// clone and share one registry and store reference.
///
/// ```rust
/// # use std::sync::Arc;
/// # use docnest::{Doc, store::InMemoryStore};
/// # use serde_json::json;
/// let store = Arc::new(InMemoryStore::new());
/// let doc = Doc::new(store.clone(), "inventory");
/// let root = doc.root()?;
/// root.set("fruit", json!(["apple", "plum"]))?;
///
/// // A second handle to the same document sees the same data.
/// let again = Doc::new(store, "inventory");
/// let fruit = again.root()?.get_list("fruit")?;
/// assert_eq!(fruit.len()?, 2);
/// # Ok::<(), docnest::Error>(())
/// ```
#[derive(Clone)]
pub struct Doc {
    ctx: Arc<DocContext>,
}

impl Doc {
    /// Creates a handle onto the document `name` with the standard type
    /// registry.
    pub fn new(store: Arc<dyn DocumentStore>, name: impl Into<String>) -> Self {
        Self::with_registry(store, name, TypeRegistry::default())
    }

    /// Creates a handle with a custom [`TypeRegistry`], for stores whose
    /// type vocabulary goes beyond plain JSON.
    pub fn with_registry(
        store: Arc<dyn DocumentStore>,
        name: impl Into<String>,
        registry: TypeRegistry,
    ) -> Self {
        Self {
            ctx: Arc::new(DocContext {
                store,
                name: name.into(),
                registry,
            }),
        }
    }

    /// Name of this document.
    pub fn name(&self) -> &str {
        &self.ctx.name
    }

    /// The store this document lives in.
    pub fn store(&self) -> &dyn DocumentStore {
        self.ctx.store.as_ref()
    }

    /// Ensures `path` holds a container of `kind`, writing an empty shell
    /// when nothing exists there. An existing value of a different kind
    /// is a type mismatch, never overwritten.
    fn ensure_container(&self, path: &Path, kind: ProxyKind) -> crate::Result<()> {
        match self.ctx.store.kind_of(&self.ctx.name, path)? {
            None => {
                let Some(shell) = self.ctx.registry.shell(kind) else {
                    // Initializers only ever request container kinds.
                    return Ok(());
                };
                self.ctx.store.set(&self.ctx.name, path, &shell)?;
                debug!(
                    document = %self.ctx.name,
                    path = %path,
                    kind = kind.name(),
                    "initialized container"
                );
                Ok(())
            }
            Some(tag) => {
                if self.ctx.registry.kind_of(&tag) == kind {
                    Ok(())
                } else {
                    Err(DocError::TypeMismatch {
                        expected: kind.name().to_string(),
                        actual: tag,
                    }
                    .into())
                }
            }
        }
    }

    /// Ensures the document root exists before a sub-path container is
    /// initialized. An absent root becomes a mapping, or a sequence when
    /// the sub-path starts with an index.
    fn ensure_root_for(&self, path: &Path) -> crate::Result<()> {
        if self.ctx.store.exists(&self.ctx.name, &Path::root())? {
            return Ok(());
        }
        let kind = match path.segments().first() {
            Some(Segment::Index(_)) => ProxyKind::Sequence,
            _ => ProxyKind::Mapping,
        };
        let Some(shell) = self.ctx.registry.shell(kind) else {
            return Ok(());
        };
        self.ctx.store.set(&self.ctx.name, &Path::root(), &shell)?;
        debug!(
            document = %self.ctx.name,
            kind = kind.name(),
            "initialized document root"
        );
        Ok(())
    }

    /// The root mapping of this document, created empty if the document
    /// does not exist yet.
    ///
    /// Fails with a type mismatch if the document root holds anything
    /// other than a mapping.
    pub fn root(&self) -> crate::Result<Map> {
        self.ensure_container(&Path::root(), ProxyKind::Mapping)?;
        Ok(Map::new(self.ctx.clone(), Path::root()))
    }

    /// The root sequence of this document, created empty if the document
    /// does not exist yet.
    ///
    /// Fails with a type mismatch if the document root holds anything
    /// other than a sequence.
    pub fn root_list(&self) -> crate::Result<List> {
        self.ensure_container(&Path::root(), ProxyKind::Sequence)?;
        Ok(List::new(self.ctx.clone(), Path::root()))
    }

    /// Replaces the document root with `initial` and returns the root
    /// mapping.
    ///
    /// Fails with a type mismatch if `initial` is not an object; nothing
    /// is written in that case.
    pub fn root_with(&self, initial: impl Into<JsonValue>) -> crate::Result<Map> {
        let initial = initial.into();
        if !initial.is_object() {
            return Err(DocError::TypeMismatch {
                expected: "object".to_string(),
                actual: json_type_name(&initial).to_string(),
            }
            .into());
        }
        dispatch::write(&self.ctx, &Path::root(), &initial)?;
        Ok(Map::new(self.ctx.clone(), Path::root()))
    }

    /// Replaces the document root with `initial` and returns the root
    /// sequence.
    ///
    /// Fails with a type mismatch if `initial` is not an array; nothing
    /// is written in that case.
    pub fn root_list_with(&self, initial: impl Into<JsonValue>) -> crate::Result<List> {
        let initial = initial.into();
        if !initial.is_array() {
            return Err(DocError::TypeMismatch {
                expected: "array".to_string(),
                actual: json_type_name(&initial).to_string(),
            }
            .into());
        }
        dispatch::write(&self.ctx, &Path::root(), &initial)?;
        Ok(List::new(self.ctx.clone(), Path::root()))
    }

    /// A mapping proxy at `path`, initializing an empty mapping there
    /// (and the document root above it) when nothing exists yet.
    pub fn map_at(&self, path: Path) -> crate::Result<Map> {
        if path.is_root() {
            return self.root();
        }
        self.ensure_root_for(&path)?;
        self.ensure_container(&path, ProxyKind::Mapping)?;
        Ok(Map::new(self.ctx.clone(), path))
    }

    /// A sequence proxy at `path`, initializing an empty sequence there
    /// (and the document root above it) when nothing exists yet.
    pub fn list_at(&self, path: Path) -> crate::Result<List> {
        if path.is_root() {
            return self.root_list();
        }
        self.ensure_root_for(&path)?;
        self.ensure_container(&path, ProxyKind::Sequence)?;
        Ok(List::new(self.ctx.clone(), path))
    }

    /// A cursor addressing the document root.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.ctx.clone())
    }
}

impl fmt::Debug for Doc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Doc").field("name", &self.ctx.name).finish()
    }
}
