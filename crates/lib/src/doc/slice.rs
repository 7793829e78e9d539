//! Slice expressions for sequence proxies.
//!
//! A [`Slice`] carries optional `start`, `stop` and `step` bounds and is
//! normalized against a concrete length right before use, following the
//! Python slicing rules: negative endpoints count from the tail,
//! out-of-range endpoints clamp to the nearest boundary, and a negative
//! step walks the selection backwards. Rust range types convert directly:
//!
//! ```rust
//! use docnest::doc::Slice;
//!
//! let tail = Slice::from(2..);
//! let reversed = Slice::full().with_step(-1);
//! let strided = Slice::from(1..9).with_step(3);
//! # let _ = (tail, reversed, strided);
//! ```

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use super::errors::DocError;

/// A possibly open-ended `(start, stop, step)` selection over a sequence.
///
/// Unset bounds take their Python defaults at normalization time: the whole
/// sequence for a positive step, the reversed whole sequence for a negative
/// one. A step of zero is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slice {
    /// First selected position; negative values count from the tail.
    pub start: Option<i64>,
    /// Exclusive upper bound; negative values count from the tail.
    pub stop: Option<i64>,
    /// Stride between selected positions; defaults to 1.
    pub step: Option<i64>,
}

impl Slice {
    /// Creates a slice from explicit bounds.
    pub fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Self { start, stop, step }
    }

    /// The full-sequence slice, equivalent to `..`.
    pub fn full() -> Self {
        Self::default()
    }

    /// Returns this slice with the given stride.
    pub fn with_step(mut self, step: i64) -> Self {
        self.step = Some(step);
        self
    }

    /// Normalizes the bounds against a sequence of `len` elements.
    ///
    /// Clamping matches Python's `slice.indices`: endpoints are translated
    /// and clamped so that every produced position is in `0..len`, and the
    /// selection may be empty.
    pub(crate) fn indices(&self, len: usize) -> Result<ResolvedSlice, DocError> {
        let len = len as i64;
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(DocError::ZeroStep);
        }

        let mut start = match self.start {
            Some(start) => start,
            None if step > 0 => 0,
            None => len - 1,
        };
        if start < 0 {
            start += len;
            if start < 0 {
                start = if step < 0 { -1 } else { 0 };
            }
        } else if start >= len {
            start = if step < 0 { len - 1 } else { len };
        }

        let mut stop = match self.stop {
            Some(stop) => stop,
            None if step > 0 => len,
            None => -1,
        };
        if self.stop.is_some() {
            if stop < 0 {
                stop += len;
                if stop < 0 {
                    stop = if step < 0 { -1 } else { 0 };
                }
            } else if stop >= len {
                stop = if step < 0 { len - 1 } else { len };
            }
        }

        let count = if step > 0 {
            if stop > start {
                ((stop - start - 1) / step + 1) as usize
            } else {
                0
            }
        } else if start > stop {
            ((start - stop - 1) / (-step) + 1) as usize
        } else {
            0
        };

        Ok(ResolvedSlice {
            start,
            stop,
            step,
            count,
        })
    }
}

impl From<Range<i64>> for Slice {
    fn from(range: Range<i64>) -> Self {
        Self {
            start: Some(range.start),
            stop: Some(range.end),
            step: None,
        }
    }
}

impl From<RangeFrom<i64>> for Slice {
    fn from(range: RangeFrom<i64>) -> Self {
        Self {
            start: Some(range.start),
            stop: None,
            step: None,
        }
    }
}

impl From<RangeTo<i64>> for Slice {
    fn from(range: RangeTo<i64>) -> Self {
        Self {
            start: None,
            stop: Some(range.end),
            step: None,
        }
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}

/// A slice pinned to a concrete length.
///
/// `stop` may be `-1` when a negative step runs off the front of the
/// sequence; every position actually produced is a valid `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedSlice {
    start: i64,
    stop: i64,
    step: i64,
    count: usize,
}

impl ResolvedSlice {
    /// Number of positions selected.
    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn step(&self) -> i64 {
        self.step
    }

    /// Exclusive end of a forward unit-step selection, used as the point
    /// where surplus assigned values are spliced in.
    pub(crate) fn stop(&self) -> i64 {
        self.stop
    }

    /// The selected positions in traversal order.
    pub(crate) fn positions(&self) -> Vec<usize> {
        let mut positions = Vec::with_capacity(self.count);
        let mut current = self.start;
        if self.step > 0 {
            while current < self.stop {
                positions.push(current as usize);
                current += self.step;
            }
        } else {
            while current > self.stop {
                positions.push(current as usize);
                current += self.step;
            }
        }
        positions
    }
}
