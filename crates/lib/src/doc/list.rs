//! Sequence proxy over an array nested in a remote document.

use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::DocContext;
use super::dispatch;
use super::errors::DocError;
use super::map::Map;
use super::path::Path;
use super::slice::Slice;
use super::value::Value;

/// Translates a possibly negative index against `len`, requiring the
/// result to address an existing element.
fn translate(index: i64, len: usize) -> Result<usize, DocError> {
    let position = if index < 0 {
        index + len as i64
    } else {
        index
    };
    if position < 0 || position >= len as i64 {
        Err(DocError::IndexOutOfRange { index, len })
    } else {
        Ok(position as usize)
    }
}

/// An index-addressed view onto one array inside a remote document.
///
/// Indices are signed and count from the tail when negative, so `get(-1)`
/// reads the last element. Slicing follows the Python rules, including
/// strides; see [`Slice`]. Like [`Map`](super::Map), the proxy holds only
/// an address and reads the store on every call.
///
/// ```rust
/// # use std::sync::Arc;
/// # use docnest::{Doc, store::InMemoryStore};
/// let doc = Doc::new(Arc::new(InMemoryStore::new()), "queue");
/// let items = doc.root_list()?;
/// items.append("first")?;
/// items.append(2)?;
/// assert_eq!(items.len()?, 2);
/// assert_eq!(items.get(-1)?, 2);
/// # Ok::<(), docnest::Error>(())
/// ```
#[derive(Clone)]
pub struct List {
    ctx: Arc<DocContext>,
    path: Path,
}

impl List {
    pub(crate) fn new(ctx: Arc<DocContext>, path: Path) -> Self {
        Self { ctx, path }
    }

    /// Name of the document this proxy reads from.
    pub fn document(&self) -> &str {
        &self.ctx.name
    }

    /// Location of this sequence within the document.
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

    /// Number of elements in this sequence.
    pub fn len(&self) -> crate::Result<usize> {
        self.ctx
            .store
            .array_len(&self.ctx.name, &self.path)?
            .ok_or_else(|| self.gone())
    }

    /// Checks whether this sequence has no elements.
    pub fn is_empty(&self) -> crate::Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Position for `index`, fetching the length only when the index is
    /// negative; out-of-range non-negative indices are caught by the
    /// access itself.
    fn position_of(&self, index: i64) -> crate::Result<usize> {
        if index >= 0 {
            Ok(index as usize)
        } else {
            let len = self.len()?;
            Ok(translate(index, len)?)
        }
    }

    /// Gets the element at `index`.
    ///
    /// Scalars come back decoded; nested containers come back as fresh
    /// proxies. Fails with an out-of-range error when the position does
    /// not exist.
    pub fn get(&self, index: i64) -> crate::Result<Value> {
        let position = self.position_of(index)?;
        match dispatch::resolve(&self.ctx, &self.path.child_index(position))? {
            Some(value) => Ok(value),
            None => {
                let len = self.len()?;
                Err(DocError::IndexOutOfRange { index, len }.into())
            }
        }
    }

    /// Gets the nested mapping at `index`.
    ///
    /// Fails with a type mismatch if the position holds anything else.
    pub fn get_map(&self, index: i64) -> crate::Result<Map> {
        match self.get(index)? {
            Value::Map(map) => Ok(map),
            other => Err(DocError::TypeMismatch {
                expected: "map".to_string(),
                actual: other.type_name().to_string(),
            }
            .into()),
        }
    }

    /// Gets the nested sequence at `index`.
    ///
    /// Fails with a type mismatch if the position holds anything else.
    pub fn get_list(&self, index: i64) -> crate::Result<List> {
        match self.get(index)? {
            Value::List(list) => Ok(list),
            other => Err(DocError::TypeMismatch {
                expected: "list".to_string(),
                actual: other.type_name().to_string(),
            }
            .into()),
        }
    }

    /// Reads the elements a slice selects, in traversal order.
    ///
    /// `slice(1..3)` reads positions 1 and 2; `Slice::full().with_step(-1)`
    /// reads the whole sequence backwards. Out-of-range bounds clamp, so
    /// slicing never fails for a too-wide selection.
    pub fn slice(&self, slice: impl Into<Slice>) -> crate::Result<Vec<Value>> {
        let len = self.len()?;
        let resolved = slice.into().indices(len)?;
        let mut values = Vec::with_capacity(resolved.count());
        for position in resolved.positions() {
            match dispatch::resolve(&self.ctx, &self.path.child_index(position))? {
                Some(value) => values.push(value),
                None => {
                    return Err(DocError::IndexOutOfRange {
                        index: position as i64,
                        len,
                    }
                    .into());
                }
            }
        }
        Ok(values)
    }

    /// Replaces the element at `index` with `value`.
    ///
    /// Fails with an out-of-range error when the position does not exist;
    /// assignment never grows the sequence.
    pub fn set(&self, index: i64, value: impl Into<JsonValue>) -> crate::Result<()> {
        let len = self.len()?;
        let position = translate(index, len)?;
        dispatch::write(&self.ctx, &self.path.child_index(position), &value.into())
    }

    /// Assigns `values` to the positions a slice selects.
    ///
    /// With a unit step the selected run is overwritten pairwise and any
    /// surplus values are spliced in after it, growing the sequence; a
    /// shorter assignment leaves the unpaired tail of the selection in
    /// place. With any other step the value count must match the
    /// selection exactly, else the assignment fails with a length
    /// mismatch before anything is written.
    pub fn set_slice<I, V>(&self, slice: impl Into<Slice>, values: I) -> crate::Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<JsonValue>,
    {
        let values: Vec<JsonValue> = values.into_iter().map(Into::into).collect();
        let len = self.len()?;
        let resolved = slice.into().indices(len)?;
        let positions = resolved.positions();

        if resolved.step() == 1 {
            for (position, value) in positions.iter().zip(&values) {
                dispatch::write(&self.ctx, &self.path.child_index(*position), value)?;
            }
            let common = positions.len().min(values.len());
            for (offset, value) in values[common..].iter().enumerate() {
                let at = resolved.stop() as usize + offset;
                dispatch::insert(&self.ctx, &self.path, at, value)?;
            }
            Ok(())
        } else {
            if values.len() != positions.len() {
                return Err(DocError::SliceLengthMismatch {
                    expected: positions.len(),
                    actual: values.len(),
                }
                .into());
            }
            for (position, value) in positions.iter().zip(&values) {
                dispatch::write(&self.ctx, &self.path.child_index(*position), value)?;
            }
            Ok(())
        }
    }

    /// Removes the element at `index`, shifting later elements down.
    ///
    /// Fails with an out-of-range error when the position does not exist.
    pub fn delete(&self, index: i64) -> crate::Result<()> {
        let position = self.position_of(index)?;
        if self
            .ctx
            .store
            .delete(&self.ctx.name, &self.path.child_index(position))?
        {
            Ok(())
        } else {
            let len = self.len()?;
            Err(DocError::IndexOutOfRange { index, len }.into())
        }
    }

    /// Removes every element a slice selects.
    ///
    /// Positions are deleted from highest to lowest so that each deletion
    /// leaves the remaining selected positions valid.
    pub fn delete_slice(&self, slice: impl Into<Slice>) -> crate::Result<()> {
        let len = self.len()?;
        let resolved = slice.into().indices(len)?;
        let mut positions = resolved.positions();
        positions.sort_unstable();
        for position in positions.into_iter().rev() {
            if !self
                .ctx
                .store
                .delete(&self.ctx.name, &self.path.child_index(position))?
            {
                return Err(DocError::IndexOutOfRange {
                    index: position as i64,
                    len,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Appends `value` to the end of this sequence.
    pub fn append(&self, value: impl Into<JsonValue>) -> crate::Result<()> {
        dispatch::append(&self.ctx, &self.path, &value.into())?;
        Ok(())
    }

    /// Inserts `value` at `index`, shifting later elements up.
    ///
    /// The position clamps like Python's `list.insert`: past-the-end
    /// indices append, and negative indices count from the tail, clamping
    /// at the front.
    pub fn insert(&self, index: i64, value: impl Into<JsonValue>) -> crate::Result<()> {
        let len = self.len()?;
        let position = if index < 0 {
            (index + len as i64).max(0) as usize
        } else {
            (index as usize).min(len)
        };
        dispatch::insert(&self.ctx, &self.path, position, &value.into())?;
        Ok(())
    }

    /// Removes and returns the last element as materialized JSON, or
    /// `None` if the sequence is empty.
    pub fn pop(&self) -> crate::Result<Option<JsonValue>> {
        let len = self.len()?;
        if len == 0 {
            return Ok(None);
        }
        let child = self.path.child_index(len - 1);
        let Some(value) = dispatch::resolve(&self.ctx, &child)? else {
            return Ok(None);
        };
        let json = value.to_json()?;
        self.ctx.store.delete(&self.ctx.name, &child)?;
        Ok(Some(json))
    }

    /// Removes the element at `index` and returns it as materialized
    /// JSON.
    ///
    /// Fails with an out-of-range error when the position does not exist.
    pub fn remove(&self, index: i64) -> crate::Result<JsonValue> {
        let len = self.len()?;
        let position = translate(index, len)?;
        let child = self.path.child_index(position);
        let Some(value) = dispatch::resolve(&self.ctx, &child)? else {
            return Err(DocError::IndexOutOfRange { index, len }.into());
        };
        let json = value.to_json()?;
        self.ctx.store.delete(&self.ctx.name, &child)?;
        Ok(json)
    }

    /// Checks whether any element equals `value`, comparing nested
    /// containers structurally.
    pub fn contains(&self, value: &JsonValue) -> crate::Result<bool> {
        let len = self.len()?;
        for position in 0..len {
            if let Some(current) =
                dispatch::resolve(&self.ctx, &self.path.child_index(position))?
                && current.content_eq(value)?
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Iterates over the elements.
    ///
    /// The length is read once up front; each element is read lazily as
    /// the iterator advances, so elements removed concurrently surface as
    /// out-of-range errors.
    pub fn iter(&self) -> crate::Result<ListIter> {
        Ok(ListIter {
            list: self.clone(),
            len: self.len()?,
            position: 0,
        })
    }

    /// Materializes this sequence as a plain JSON array.
    ///
    /// Every element is read out of the store recursively; the result is
    /// a detached copy that no longer reflects later document changes.
    pub fn to_json(&self) -> crate::Result<JsonValue> {
        let len = self.len()?;
        let mut items = Vec::with_capacity(len);
        for position in 0..len {
            match dispatch::resolve(&self.ctx, &self.path.child_index(position))? {
                Some(value) => items.push(value.to_json()?),
                None => {
                    return Err(DocError::IndexOutOfRange {
                        index: position as i64,
                        len,
                    }
                    .into());
                }
            }
        }
        Ok(JsonValue::Array(items))
    }

    /// Serializes this sequence to a JSON string.
    pub fn to_json_string(&self) -> crate::Result<String> {
        let json = self.to_json()?;
        Ok(serde_json::to_string(&json)?)
    }

    /// Compares this sequence's current content against plain JSON.
    ///
    /// Nested containers compare structurally; anything other than an
    /// array on the right-hand side compares unequal.
    pub fn content_eq(&self, other: &JsonValue) -> crate::Result<bool> {
        let Some(expected) = other.as_array() else {
            return Ok(false);
        };
        let len = self.len()?;
        if len != expected.len() {
            return Ok(false);
        }
        for (position, expected_value) in expected.iter().enumerate() {
            let Some(value) = dispatch::resolve(&self.ctx, &self.path.child_index(position))?
            else {
                return Ok(false);
            };
            if !value.content_eq(expected_value)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("document", &self.ctx.name)
            .field("path", &self.path.to_string())
            .finish()
    }
}

/// Handles are equal when they address the same document and path.
/// Content comparison goes through [`List::content_eq`].
impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.ctx.name == other.ctx.name && self.path == other.path
    }
}

/// Iterator over the elements of a [`List`].
pub struct ListIter {
    list: List,
    len: usize,
    position: usize,
}

impl Iterator for ListIter {
    type Item = crate::Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.len {
            return None;
        }
        let position = self.position;
        self.position += 1;
        Some(self.list.get(position as i64))
    }
}
