//! Mapping proxy over an object nested in a remote document.

use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::debug;

use super::DocContext;
use super::dispatch;
use super::errors::DocError;
use super::list::List;
use super::path::Path;
use super::value::Value;

/// A key-addressed view onto one object inside a remote document.
///
/// The proxy holds only the document name and a [`Path`]; it caches
/// nothing. Every call reads or writes the store directly, so concurrent
/// users of the same document observe each other's changes immediately.
///
/// ```rust
/// # use std::sync::Arc;
/// # use docnest::{Doc, store::InMemoryStore};
/// let doc = Doc::new(Arc::new(InMemoryStore::new()), "settings");
/// let root = doc.root()?;
/// root.set("theme", "dark")?;
/// assert_eq!(root.get("theme")?, "dark");
/// # Ok::<(), docnest::Error>(())
/// ```
#[derive(Clone)]
pub struct Map {
    ctx: Arc<DocContext>,
    path: Path,
}

impl Map {
    pub(crate) fn new(ctx: Arc<DocContext>, path: Path) -> Self {
        Self { ctx, path }
    }

    /// Name of the document this proxy reads from.
    pub fn document(&self) -> &str {
        &self.ctx.name
    }

    /// Location of this mapping within the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The missing-container condition, reported with the rendered path.
    fn gone(&self) -> crate::Error {
        DocError::KeyNotFound {
            key: self.path.to_string(),
        }
        .into()
    }

    /// Gets the value stored under `key`.
    ///
    /// Scalars come back decoded; nested containers come back as fresh
    /// proxies. Fails with a missing-key error when nothing is stored
    /// under the key.
    pub fn get(&self, key: impl AsRef<str>) -> crate::Result<Value> {
        let key = key.as_ref();
        dispatch::resolve(&self.ctx, &self.path.child_key(key))?.ok_or_else(|| {
            DocError::KeyNotFound {
                key: key.to_string(),
            }
            .into()
        })
    }

    /// Gets the nested mapping stored under `key`.
    ///
    /// Fails with a type mismatch if the key holds anything else.
    pub fn get_map(&self, key: impl AsRef<str>) -> crate::Result<Map> {
        match self.get(key)? {
            Value::Map(map) => Ok(map),
            other => Err(DocError::TypeMismatch {
                expected: "map".to_string(),
                actual: other.type_name().to_string(),
            }
            .into()),
        }
    }

    /// Gets the nested sequence stored under `key`.
    ///
    /// Fails with a type mismatch if the key holds anything else.
    pub fn get_list(&self, key: impl AsRef<str>) -> crate::Result<List> {
        match self.get(key)? {
            Value::List(list) => Ok(list),
            other => Err(DocError::TypeMismatch {
                expected: "list".to_string(),
                actual: other.type_name().to_string(),
            }
            .into()),
        }
    }

    /// Gets the value under `key` converted to a concrete type.
    ///
    /// Works with any type implementing `TryFrom<&Value>`, so callers can
    /// write `let port: i64 = config.get_as("port")?`.
    pub fn get_as<T>(&self, key: impl AsRef<str>) -> crate::Result<T>
    where
        T: for<'a> TryFrom<&'a Value, Error = DocError>,
    {
        let value = self.get(key)?;
        T::try_from(&value).map_err(Into::into)
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// Plain JSON containers are written structurally, so after
    /// `set("a", json!({"b": 1}))` the nested object is itself addressable
    /// through a proxy.
    pub fn set(&self, key: impl Into<String>, value: impl Into<JsonValue>) -> crate::Result<()> {
        let key = key.into();
        dispatch::write(&self.ctx, &self.path.child_key(key), &value.into())
    }

    /// Removes the value under `key`.
    ///
    /// Fails with a missing-key error when nothing is stored under the
    /// key.
    pub fn delete(&self, key: impl AsRef<str>) -> crate::Result<()> {
        let key = key.as_ref();
        if self.ctx.store.delete(&self.ctx.name, &self.path.child_key(key))? {
            Ok(())
        } else {
            Err(DocError::KeyNotFound {
                key: key.to_string(),
            }
            .into())
        }
    }

    /// Checks whether `key` currently holds a value.
    pub fn contains_key(&self, key: impl AsRef<str>) -> crate::Result<bool> {
        self.ctx
            .store
            .exists(&self.ctx.name, &self.path.child_key(key.as_ref()))
    }

    /// The keys of this mapping at the moment of the call.
    pub fn keys(&self) -> crate::Result<Vec<String>> {
        self.ctx
            .store
            .object_keys(&self.ctx.name, &self.path)?
            .ok_or_else(|| self.gone())
    }

    /// Number of entries in this mapping.
    pub fn len(&self) -> crate::Result<usize> {
        self.ctx
            .store
            .object_len(&self.ctx.name, &self.path)?
            .ok_or_else(|| self.gone())
    }

    /// Checks whether this mapping has no entries.
    pub fn is_empty(&self) -> crate::Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Iterates over `(key, value)` pairs.
    ///
    /// Keys are enumerated once up front; each value is read lazily as the
    /// iterator advances, so entries removed concurrently surface as
    /// missing-key errors.
    pub fn iter(&self) -> crate::Result<MapIter> {
        Ok(MapIter {
            map: self.clone(),
            keys: self.keys()?.into_iter(),
        })
    }

    /// Removes `key` and returns its materialized value, or `None` if the
    /// key held nothing.
    pub fn pop(&self, key: impl AsRef<str>) -> crate::Result<Option<JsonValue>> {
        let key = key.as_ref();
        let child = self.path.child_key(key);
        let Some(value) = dispatch::resolve(&self.ctx, &child)? else {
            return Ok(None);
        };
        let json = value.to_json()?;
        self.ctx.store.delete(&self.ctx.name, &child)?;
        Ok(Some(json))
    }

    /// Removes and returns the last entry in key enumeration order, or
    /// `None` if the mapping is empty.
    pub fn pop_last(&self) -> crate::Result<Option<(String, JsonValue)>> {
        let keys = self.keys()?;
        let Some(key) = keys.last() else {
            return Ok(None);
        };
        Ok(self.pop(key)?.map(|value| (key.clone(), value)))
    }

    /// Materializes this mapping as a plain JSON object.
    ///
    /// Every entry is read out of the store recursively; the result is a
    /// detached copy that no longer reflects later document changes.
    pub fn to_json(&self) -> crate::Result<JsonValue> {
        let mut members = serde_json::Map::new();
        for key in self.keys()? {
            if let Some(value) = dispatch::resolve(&self.ctx, &self.path.child_key(&key))? {
                members.insert(key, value.to_json()?);
            }
        }
        Ok(JsonValue::Object(members))
    }

    /// Serializes this mapping to a JSON string.
    pub fn to_json_string(&self) -> crate::Result<String> {
        let json = self.to_json()?;
        Ok(serde_json::to_string(&json)?)
    }

    /// Removes every entry from this mapping.
    ///
    /// Keys are enumerated once and deleted one call at a time.
    pub fn clear(&self) -> crate::Result<()> {
        let keys = self.keys()?;
        let entries = keys.len();
        for key in keys {
            self.ctx
                .store
                .delete(&self.ctx.name, &self.path.child_key(&key))?;
        }
        debug!(
            document = %self.ctx.name,
            path = %self.path,
            entries,
            "cleared mapping"
        );
        Ok(())
    }

    /// Compares this mapping's current content against plain JSON.
    ///
    /// Nested containers compare structurally; anything other than an
    /// object on the right-hand side compares unequal. To compare two
    /// proxies, materialize one: `a.content_eq(&b.to_json()?)`.
    pub fn content_eq(&self, other: &JsonValue) -> crate::Result<bool> {
        let Some(expected) = other.as_object() else {
            return Ok(false);
        };
        let keys = self.keys()?;
        if keys.len() != expected.len() {
            return Ok(false);
        }
        for key in keys {
            let Some(expected_value) = expected.get(&key) else {
                return Ok(false);
            };
            let Some(value) = dispatch::resolve(&self.ctx, &self.path.child_key(&key))? else {
                return Ok(false);
            };
            if !value.content_eq(expected_value)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("document", &self.ctx.name)
            .field("path", &self.path.to_string())
            .finish()
    }
}

/// Handles are equal when they address the same document and path.
/// Content comparison goes through [`Map::content_eq`].
impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.ctx.name == other.ctx.name && self.path == other.path
    }
}

/// Iterator over the entries of a [`Map`].
pub struct MapIter {
    map: Map,
    keys: std::vec::IntoIter<String>,
}

impl Iterator for MapIter {
    type Item = crate::Result<(String, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        Some(self.map.get(&key).map(|value| (key, value)))
    }
}
