//! In-memory document store.
//!
//! Keeps every document as a `serde_json::Value` tree inside a `RwLock`ed
//! hash map. Useful for tests and for small tools that want the proxy
//! surface without a remote server; the whole store can be snapshotted to
//! a file and loaded back.

use std::any::Any;
use std::collections::HashMap;
use std::fs;
use std::sync::RwLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Value as JsonValue, json};
use tracing::debug;

use super::{DocumentStore, StoreError};
use crate::Result;
use crate::doc::{Path, Segment};

/// Type tag reported for a stored JSON value.
fn tag_for(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Object(_) => "object",
        JsonValue::Array(_) => "array",
        JsonValue::String(_) => "string",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Null => "null",
        JsonValue::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
    }
}

/// Empty container whose shape fits the given segment kind.
fn shell_for(segment: &Segment) -> JsonValue {
    match segment {
        Segment::Key(_) => json!({}),
        Segment::Index(_) => json!([]),
    }
}

fn lookup<'a>(root: &'a JsonValue, segments: &[Segment]) -> Option<&'a JsonValue> {
    let mut current = root;
    for segment in segments {
        current = match segment {
            Segment::Key(key) => current.as_object()?.get(key)?,
            Segment::Index(index) => current.as_array()?.get(*index)?,
        };
    }
    Some(current)
}

fn lookup_mut<'a>(root: &'a mut JsonValue, segments: &[Segment]) -> Option<&'a mut JsonValue> {
    let mut current = root;
    for segment in segments {
        current = match segment {
            Segment::Key(key) => current.as_object_mut()?.get_mut(key)?,
            Segment::Index(index) => current.as_array_mut()?.get_mut(*index)?,
        };
    }
    Some(current)
}

fn wrong_kind(operation: &str, path: &Path, expected: &str, actual: &'static str) -> StoreError {
    StoreError::WrongKind {
        operation: operation.to_string(),
        path: path.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}

/// An in-memory document store.
///
/// Documents live in a `HashMap` keyed by name, each one a plain JSON
/// tree. All trait primitives take the lock for the duration of a single
/// call, so concurrent callers interleave at primitive granularity, the
/// same consistency a remote store gives.
#[derive(Debug)]
pub struct InMemoryStore {
    documents: RwLock<HashMap<String, JsonValue>>,
}

impl InMemoryStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Names of all documents currently held, in sorted order.
    pub fn document_names(&self) -> Vec<String> {
        let documents = self.documents.read().unwrap();
        let mut names: Vec<String> = documents.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of documents currently held.
    pub fn document_count(&self) -> usize {
        self.documents.read().unwrap().len()
    }

    /// Saves the store state to a JSON file.
    ///
    /// # Arguments
    /// * `path` - The file path where the store state will be saved.
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            crate::Error::Io(std::io::Error::other(format!(
                "Failed to serialize store: {e}"
            )))
        })?;
        fs::write(path.as_ref(), json).map_err(crate::Error::Io)?;
        debug!(path = %path.as_ref().display(), "wrote store snapshot");
        Ok(())
    }

    /// Loads a store from a JSON file.
    ///
    /// Returns an empty store if the file does not exist.
    ///
    /// # Arguments
    /// * `path` - The file path from which to load the store state.
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            return Ok(Self::new());
        }
        let json = fs::read_to_string(path.as_ref()).map_err(crate::Error::Io)?;
        let store: Self = serde_json::from_str(&json).map_err(|e| {
            crate::Error::Io(std::io::Error::other(format!(
                "Failed to deserialize store: {e}"
            )))
        })?;
        debug!(
            path = %path.as_ref().display(),
            documents = store.document_count(),
            "loaded store snapshot"
        );
        Ok(store)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

// Intermediary struct for serialization, mirroring the locked state.
#[derive(Serialize, Deserialize)]
struct SerializableStore {
    documents: HashMap<String, JsonValue>,
}

impl Serialize for InMemoryStore {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let documents = self.documents.read().unwrap();
        let serializable = SerializableStore {
            documents: documents.clone(),
        };
        serializable.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for InMemoryStore {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let serializable = SerializableStore::deserialize(deserializer)?;
        Ok(Self {
            documents: RwLock::new(serializable.documents),
        })
    }
}

impl DocumentStore for InMemoryStore {
    /// Reports the tag of the value at the path by walking the JSON tree.
    fn kind_of(&self, doc: &str, path: &Path) -> Result<Option<String>> {
        let documents = self.documents.read().unwrap();
        Ok(documents
            .get(doc)
            .and_then(|root| lookup(root, path.segments()))
            .map(|value| tag_for(value).to_string()))
    }

    /// Clones the value at the path out of the tree.
    fn get(&self, doc: &str, path: &Path) -> Result<Option<JsonValue>> {
        let documents = self.documents.read().unwrap();
        Ok(documents
            .get(doc)
            .and_then(|root| lookup(root, path.segments()))
            .cloned())
    }

    /// Writes the value, creating the document and any missing
    /// intermediate mappings along the way. A rejected set leaves the
    /// stored tree untouched: the walk runs on a staged copy, committed
    /// only when every segment lands.
    fn set(&self, doc: &str, path: &Path, value: &JsonValue) -> Result<()> {
        let mut documents = self.documents.write().unwrap();
        let segments = path.segments();
        let Some((terminal, intermediates)) = segments.split_last() else {
            documents.insert(doc.to_string(), value.clone());
            return Ok(());
        };

        let first = &segments[0];
        let mut root = match documents.get(doc) {
            Some(existing) => existing.clone(),
            None => shell_for(first),
        };

        let mut current = &mut root;
        for (position, segment) in intermediates.iter().enumerate() {
            let next = intermediates.get(position + 1).unwrap_or(terminal);
            let actual = tag_for(current);
            current = match segment {
                Segment::Key(key) => match current.as_object_mut() {
                    Some(object) => object.entry(key.clone()).or_insert_with(|| shell_for(next)),
                    None => return Err(wrong_kind("set", path, "an object", actual).into()),
                },
                Segment::Index(index) => {
                    let Some(array) = current.as_array_mut() else {
                        return Err(wrong_kind("set", path, "an array", actual).into());
                    };
                    let len = array.len();
                    match array.get_mut(*index) {
                        Some(slot) => slot,
                        None => {
                            return Err(StoreError::OutOfBounds {
                                path: path.to_string(),
                                index: *index,
                                len,
                            }
                            .into());
                        }
                    }
                }
            };
        }

        let actual = tag_for(current);
        match terminal {
            Segment::Key(key) => match current.as_object_mut() {
                Some(object) => {
                    object.insert(key.clone(), value.clone());
                }
                None => return Err(wrong_kind("set", path, "an object", actual).into()),
            },
            Segment::Index(index) => {
                let Some(array) = current.as_array_mut() else {
                    return Err(wrong_kind("set", path, "an array", actual).into());
                };
                let len = array.len();
                match array.get_mut(*index) {
                    Some(slot) => *slot = value.clone(),
                    None => {
                        return Err(StoreError::OutOfBounds {
                            path: path.to_string(),
                            index: *index,
                            len,
                        }
                        .into());
                    }
                }
            }
        }
        documents.insert(doc.to_string(), root);
        Ok(())
    }

    /// Removes the value; absence anywhere along the path reports `false`.
    fn delete(&self, doc: &str, path: &Path) -> Result<bool> {
        let mut documents = self.documents.write().unwrap();
        let Some((terminal, intermediates)) = path.segments().split_last() else {
            return Ok(documents.remove(doc).is_some());
        };
        let Some(root) = documents.get_mut(doc) else {
            return Ok(false);
        };
        let Some(parent) = lookup_mut(root, intermediates) else {
            return Ok(false);
        };
        Ok(match terminal {
            Segment::Key(key) => parent
                .as_object_mut()
                .is_some_and(|object| object.remove(key).is_some()),
            Segment::Index(index) => match parent.as_array_mut() {
                Some(array) if *index < array.len() => {
                    array.remove(*index);
                    true
                }
                _ => false,
            },
        })
    }

    /// Lists the mapping's keys in sorted order.
    fn object_keys(&self, doc: &str, path: &Path) -> Result<Option<Vec<String>>> {
        let documents = self.documents.read().unwrap();
        let Some(value) = documents
            .get(doc)
            .and_then(|root| lookup(root, path.segments()))
        else {
            return Ok(None);
        };
        match value.as_object() {
            Some(object) => Ok(Some(object.keys().cloned().collect())),
            None => Err(wrong_kind("object_keys", path, "an object", tag_for(value)).into()),
        }
    }

    /// Counts the mapping's entries.
    fn object_len(&self, doc: &str, path: &Path) -> Result<Option<usize>> {
        let documents = self.documents.read().unwrap();
        let Some(value) = documents
            .get(doc)
            .and_then(|root| lookup(root, path.segments()))
        else {
            return Ok(None);
        };
        match value.as_object() {
            Some(object) => Ok(Some(object.len())),
            None => Err(wrong_kind("object_len", path, "an object", tag_for(value)).into()),
        }
    }

    /// Counts the sequence's elements.
    fn array_len(&self, doc: &str, path: &Path) -> Result<Option<usize>> {
        let documents = self.documents.read().unwrap();
        let Some(value) = documents
            .get(doc)
            .and_then(|root| lookup(root, path.segments()))
        else {
            return Ok(None);
        };
        match value.as_array() {
            Some(array) => Ok(Some(array.len())),
            None => Err(wrong_kind("array_len", path, "an array", tag_for(value)).into()),
        }
    }

    /// Pushes onto the array in place and reports the new length.
    fn array_append(&self, doc: &str, path: &Path, value: &JsonValue) -> Result<usize> {
        let mut documents = self.documents.write().unwrap();
        let Some(target) = documents
            .get_mut(doc)
            .and_then(|root| lookup_mut(root, path.segments()))
        else {
            return Err(StoreError::MissingTarget {
                path: path.to_string(),
            }
            .into());
        };
        let actual = tag_for(target);
        match target.as_array_mut() {
            Some(array) => {
                array.push(value.clone());
                Ok(array.len())
            }
            None => Err(wrong_kind("array_append", path, "an array", actual).into()),
        }
    }

    /// Inserts into the array, clamping a past-the-end index to an append.
    fn array_insert(
        &self,
        doc: &str,
        path: &Path,
        index: usize,
        value: &JsonValue,
    ) -> Result<usize> {
        let mut documents = self.documents.write().unwrap();
        let Some(target) = documents
            .get_mut(doc)
            .and_then(|root| lookup_mut(root, path.segments()))
        else {
            return Err(StoreError::MissingTarget {
                path: path.to_string(),
            }
            .into());
        };
        let actual = tag_for(target);
        match target.as_array_mut() {
            Some(array) => {
                let position = index.min(array.len());
                array.insert(position, value.clone());
                Ok(array.len())
            }
            None => Err(wrong_kind("array_insert", path, "an array", actual).into()),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
