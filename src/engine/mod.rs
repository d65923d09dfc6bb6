//! Match engine over processed collation elements.
//!
//! Purpose: find the first acceptable match of a compiled pattern at or
//! after (forward) or at or before (backward) a text offset, comparing
//! processed elements rather than characters.
//!
//! Invariants / safety rules:
//! - The target element stream, the grapheme oracle and the optional
//!   external oracle are always bound to the same text.
//! - The pattern and the target stream were built with the same
//!   [`CollationParams`]; callers recompile the pattern whenever they change
//!   the params.
//! - Target elements are only accessed through [`TargetBuffer`], in
//!   sequential order, and never further back than its capacity.
//!
//! High-level algorithm:
//! 1. Position the target stream at the start offset.
//! 2. For each target element index, walk the pattern elements against the
//!    target elements from there, skipping zero-weight elements in the
//!    wildcard modes.
//! 3. Map a complete walk back to a byte range and validate it: the range
//!    must not split an expansion or a grapheme cluster (with a narrow
//!    exception for prefix search in scripts whose clusters span several
//!    characters), and at identical strength its NFD form must equal the
//!    pattern's.
//! 4. A rejected candidate moves on by one target element, so no match that
//!    starts later is ever skipped.
//!
//! Design choices:
//! - Not finding a match is `None`. A failed candidate logs its rejection
//!   reason at `trace` level under the `collsearch::engine` target.
//! - The engine holds no match state; the cursor protocol in
//!   [`crate::search`] owns it.

mod backward;
mod bounds;
mod buffer;
mod compare;
mod forward;
mod pattern;
mod pce;

pub(crate) use self::pattern::CompiledPattern;
pub(crate) use self::pce::{CollationParams, ProcessedElements};

use self::buffer::{window_capacity, TargetBuffer};
use self::pce::IndexedPce;
use crate::api::{ElementComparison, Match};
use crate::collation::CollationElements;
use crate::text::{BreakOracle, GraphemeBreaks};
use std::sync::Arc;


/// Result of walking the pattern against the target from one start index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Walk {
    /// Every pattern element matched; the value is the first target index
    /// past the walk.
    Matched(usize),
    /// No match from this start index.
    Mismatch,
    /// The walk ran into the end of the target.
    Exhausted,
}

/// Searches one target text for one compiled pattern.
pub(crate) struct MatchEngine<E> {
    target: Arc<str>,
    pattern: CompiledPattern,
    elements: ProcessedElements<E>,
    graphemes: GraphemeBreaks,
    breaks: Option<Box<dyn BreakOracle>>,
    window: TargetBuffer,
}

impl<E: CollationElements> MatchEngine<E> {
    pub(crate) fn new(
        target: Arc<str>,
        pattern: CompiledPattern,
        elements: E,
        params: CollationParams,
        breaks: Option<Box<dyn BreakOracle>>,
    ) -> Self {
        let capacity = window_capacity(pattern.text(), pattern.len(), ElementComparison::Standard);
        let mut engine = Self {
            target: Arc::clone(&target),
            pattern,
            elements: ProcessedElements::new(elements, params),
            graphemes: GraphemeBreaks::new(),
            breaks: None,
            window: TargetBuffer::with_capacity(capacity),
        };
        engine.graphemes.set_text(target);
        engine.set_breaks(breaks);
        engine
    }

    #[inline]
    pub(crate) fn target(&self) -> &str {
        &self.target
    }

    #[inline]
    pub(crate) fn target_len(&self) -> usize {
        self.target.len()
    }

    #[inline]
    pub(crate) fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    #[inline]
    pub(crate) fn params(&self) -> CollationParams {
        self.elements.params()
    }

    #[inline]
    pub(crate) fn has_breaks(&self) -> bool {
        self.breaks.is_some()
    }

    /// Rebinds every text consumer to a new target.
    pub(crate) fn set_target(&mut self, target: Arc<str>, elements: E) {
        self.elements.replace_elements(elements);
        self.graphemes.set_text(Arc::clone(&target));
        if let Some(breaks) = self.breaks.as_mut() {
            breaks.set_text(Arc::clone(&target));
        }
        self.target = target;
    }

    pub(crate) fn set_pattern(&mut self, pattern: CompiledPattern) {
        self.pattern = pattern;
    }

    /// Installs or removes the external break oracle.
    pub(crate) fn set_breaks(&mut self, breaks: Option<Box<dyn BreakOracle>>) {
        self.breaks = breaks.map(|mut oracle| {
            oracle.set_text(Arc::clone(&self.target));
            oracle
        });
    }

    /// Switches the target stream to new params. The pattern must be
    /// recompiled separately.
    pub(crate) fn set_params(&mut self, params: CollationParams) {
        self.elements.set_params(params);
    }

    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.elements.offset()
    }

    #[inline]
    pub(crate) fn set_offset(&mut self, offset: usize) {
        self.elements.set_offset(offset);
    }

    /// Moves forward over up to `count` processed elements from `offset` and
    /// returns the resulting offset.
    pub(crate) fn advance_processed(&mut self, offset: usize, count: usize) -> usize {
        self.elements.set_offset(offset);
        for _ in 0..count {
            if self.elements.next_processed().is_end() {
                break;
            }
        }
        self.elements.offset()
    }

    /// Start of the last grapheme cluster inside `found`.
    pub(crate) fn last_cluster_start(&self, found: Match) -> usize {
        self.graphemes
            .preceding(found.limit)
            .unwrap_or(0)
            .max(found.start)
    }

    /// Empties the window, resizing it for `mode` if needed.
    fn prepare_window(&mut self, mode: ElementComparison) {
        let capacity = window_capacity(self.pattern.text(), self.pattern.len(), mode);
        if self.window.capacity() == capacity {
            self.window.reset();
        } else {
            self.window = TargetBuffer::with_capacity(capacity);
        }
    }

    /// Forward element `ix`, or `None` if fetching it would evict `anchor`
    /// together with the element before it.
    fn fetch(&mut self, anchor: usize, ix: usize) -> Option<IndexedPce> {
        debug_assert!(ix + 1 >= anchor, "element {ix} lies before anchor {anchor}");
        if ix + 1 - anchor >= self.window.capacity() {
            return None;
        }
        Some(self.window.get(ix, &mut self.elements))
    }

    /// Backward counterpart of [`fetch`](Self::fetch).
    fn fetch_previous(&mut self, anchor: usize, ix: usize) -> Option<IndexedPce> {
        debug_assert!(ix + 1 >= anchor, "element {ix} lies before anchor {anchor}");
        if ix + 1 - anchor >= self.window.capacity() {
            return None;
        }
        Some(self.window.get_previous(ix, &mut self.elements))
    }
}
