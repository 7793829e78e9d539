//! Path types for addressing locations inside a stored document.
//!
//! A [`Path`] is an ordered sequence of accessors rooted at the document
//! root, rendered in the store's textual grammar: `$` for the root, `.name`
//! for a mapping key, `[n]` for a sequence index. Paths are immutable
//! values; composing a child accessor produces a new path.
//!
//! # Usage
//!
//! ```rust
//! use docnest::doc::Path;
//!
//! let path = Path::root().child_key("users").child_index(0).child_key("name");
//! assert_eq!(path.to_string(), "$.users[0].name");
//!
//! // Parse the textual form back
//! let parsed: Path = "$.users[0].name".parse()?;
//! assert_eq!(parsed, path);
//! # Ok::<(), docnest::doc::PathError>(())
//! ```

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Error type for textual path parsing failures.
///
/// Construction by composition (`child_key`/`child_index`) is infallible;
/// only [`Path::from_str`] can fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// The expression does not start with the `$` root marker.
    #[error("path expression must start with '$': '{input}'")]
    MissingRoot { input: String },

    /// A segment could not be parsed at the given byte offset.
    #[error("invalid path segment at byte {offset} in '{input}'")]
    InvalidSegment { input: String, offset: usize },

    /// An index segment was not a valid non-negative integer.
    #[error("invalid index segment in '{input}': {reason}")]
    InvalidIndex { input: String, reason: String },
}

/// A single accessor within a [`Path`].
///
/// Rendered indices are always non-negative: negative indexing is resolved
/// against the current length by the sequence proxy before a path is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Mapping key access, rendered `.name`.
    Key(String),
    /// Sequence index access, rendered `[n]`.
    Index(usize),
}

impl Segment {
    /// Returns the key name if this is a key segment.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Segment::Key(key) => Some(key),
            Segment::Index(_) => None,
        }
    }

    /// Returns the index if this is an index segment.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Key(_) => None,
            Segment::Index(index) => Some(*index),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, ".{key}"),
            Segment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// An immutable address inside a document.
///
/// The empty path addresses the document root itself. Child accessors
/// extend a path without mutating it, so a proxy can hand out sub-paths
/// freely while keeping its own binding stable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Creates the root path, rendered as `$`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path extended by a mapping key accessor.
    pub fn child_key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Key(key.into()));
        Self { segments }
    }

    /// Returns a new path extended by a sequence index accessor.
    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }

    /// Returns the accessors in root-to-leaf order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of accessors below the root.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if this path addresses the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the parent path, or `None` when already at the root.
    pub fn parent(&self) -> Option<Path> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Path {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the final accessor, or `None` for the root path.
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix('$').ok_or_else(|| PathError::MissingRoot {
            input: s.to_string(),
        })?;

        let mut segments = Vec::new();
        let mut offset = 1;
        let mut remaining = rest;

        while !remaining.is_empty() {
            if let Some(after_dot) = remaining.strip_prefix('.') {
                let end = after_dot
                    .find(['.', '['])
                    .unwrap_or(after_dot.len());
                let key = &after_dot[..end];
                if key.is_empty() {
                    return Err(PathError::InvalidSegment {
                        input: s.to_string(),
                        offset,
                    });
                }
                segments.push(Segment::Key(key.to_string()));
                offset += 1 + end;
                remaining = &after_dot[end..];
            } else if let Some(after_bracket) = remaining.strip_prefix('[') {
                let end = after_bracket.find(']').ok_or(PathError::InvalidSegment {
                    input: s.to_string(),
                    offset,
                })?;
                let index: usize =
                    after_bracket[..end]
                        .parse()
                        .map_err(|e| PathError::InvalidIndex {
                            input: s.to_string(),
                            reason: format!("'{}': {e}", &after_bracket[..end]),
                        })?;
                segments.push(Segment::Index(index));
                offset += end + 2;
                remaining = &after_bracket[end + 1..];
            } else {
                return Err(PathError::InvalidSegment {
                    input: s.to_string(),
                    offset,
                });
            }
        }

        Ok(Path { segments })
    }
}

impl From<PathError> for crate::Error {
    fn from(err: PathError) -> Self {
        crate::doc::DocError::from(err).into()
    }
}
