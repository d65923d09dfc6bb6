//! Break-boundary oracles.
//!
//! A match must start and end on a boundary. The search always keeps an
//! internal [`GraphemeBreaks`] so matches never split a combining sequence;
//! callers can install an additional oracle (for example [`WordBreaks`]) to
//! restrict matches further.
//!
//! Oracles follow the break-iterator model: `set_text` binds the text once,
//! queries then take plain offsets. Offset 0 and the text length are always
//! boundaries.

use std::fmt;
use std::sync::Arc;
use unicode_segmentation::{GraphemeCursor, UnicodeSegmentation};

use super::floor_char_boundary;

/// Boundary queries over one bound text.
pub trait BreakOracle: Send {
    /// Binds the text subsequent queries refer to.
    fn set_text(&mut self, text: Arc<str>);

    /// True if `index` is a boundary of the bound text.
    fn is_boundary(&self, index: usize) -> bool;

    /// First boundary strictly after `index`, or `None` at or past the end.
    fn following(&self, index: usize) -> Option<usize>;
}

/// Extended grapheme cluster boundaries.
#[derive(Clone)]
pub struct GraphemeBreaks {
    text: Arc<str>,
}

impl GraphemeBreaks {
    pub fn new() -> Self {
        Self {
            text: Arc::from(""),
        }
    }

    /// Last boundary strictly before `index`, or `None` at the start.
    pub fn preceding(&self, index: usize) -> Option<usize> {
        if index == 0 {
            return None;
        }
        let len = self.text.len();
        let floor = floor_char_boundary(&self.text, index.min(len));
        if floor < index && self.is_boundary(floor) {
            return Some(floor);
        }
        let mut cursor = GraphemeCursor::new(floor, len, true);
        cursor.prev_boundary(&self.text, 0).ok().flatten()
    }
}

impl Default for GraphemeBreaks {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GraphemeBreaks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphemeBreaks")
            .field("text_len", &self.text.len())
            .finish()
    }
}

impl BreakOracle for GraphemeBreaks {
    fn set_text(&mut self, text: Arc<str>) {
        self.text = text;
    }

    fn is_boundary(&self, index: usize) -> bool {
        let len = self.text.len();
        if index == 0 || index == len {
            return true;
        }
        if index > len || !self.text.is_char_boundary(index) {
            return false;
        }
        let mut cursor = GraphemeCursor::new(index, len, true);
        cursor.is_boundary(&self.text, 0).unwrap_or(false)
    }

    fn following(&self, index: usize) -> Option<usize> {
        let len = self.text.len();
        if index >= len {
            return None;
        }
        let mut cursor = GraphemeCursor::new(floor_char_boundary(&self.text, index), len, true);
        cursor.next_boundary(&self.text, 0).ok().flatten()
    }
}

/// Word boundaries (UAX #29), for whole-word search.
#[derive(Clone, Debug, Default)]
pub struct WordBreaks {
    // Sorted, includes 0 and the text length.
    boundaries: Vec<usize>,
}

impl WordBreaks {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BreakOracle for WordBreaks {
    fn set_text(&mut self, text: Arc<str>) {
        self.boundaries.clear();
        self.boundaries
            .extend(text.split_word_bound_indices().map(|(i, _)| i));
        self.boundaries.push(text.len());
    }

    fn is_boundary(&self, index: usize) -> bool {
        self.boundaries.binary_search(&index).is_ok()
    }

    fn following(&self, index: usize) -> Option<usize> {
        let next = self.boundaries.partition_point(|&b| b <= index);
        self.boundaries.get(next).copied()
    }
}
