//! Target-side element window.
//!
//! A search walks the target's processed elements by logical index: index
//! `0` is the first element fetched after positioning the stream, and each
//! later index is one element further in the search direction. The window
//! keeps the most recent elements so the outer loop can restart the pattern
//! walk one element later without re-reading the text.
//!
//! # Sizing
//! The walk for one candidate consumes one target element per pattern
//! element in standard comparison mode, plus one lookahead. Wildcard modes
//! can skip target elements with a zero level, so they get extra room per
//! pattern character: a conjoining Jamo L may sit in front of several
//! skippable vowel and trailing-consonant elements.

use super::pce::{IndexedPce, ProcessedElements};
use crate::api::ElementComparison;
use crate::collation::CollationElements;
use crate::stdx::IndexRing;

/// Fixed slack on top of the pattern length.
const WINDOW_SLACK: usize = 32;
/// Extra target elements per pattern char that may start a Jamo syllable.
const MAX_SKIPPED_PER_JAMO_L: usize = 8;
/// Extra target elements per other pattern char.
const MAX_SKIPPED_PER_OTHER: usize = 3;

fn might_be_jamo_l(c: char) -> bool {
    matches!(c as u32, 0x1100..=0x115E | 0x3131..=0x314E | 0x3165..=0x3186)
}

/// Window capacity for a pattern with `pattern_len` processed elements.
pub(crate) fn window_capacity(
    pattern_text: &str,
    pattern_len: usize,
    mode: ElementComparison,
) -> usize {
    let mut capacity = pattern_len + WINDOW_SLACK;
    if mode != ElementComparison::Standard {
        capacity += pattern_text
            .chars()
            .map(|c| {
                if might_be_jamo_l(c) {
                    MAX_SKIPPED_PER_JAMO_L
                } else {
                    MAX_SKIPPED_PER_OTHER
                }
            })
            .sum::<usize>();
    }
    capacity
}

/// Ring of indexed target elements for one search call.
pub(crate) struct TargetBuffer {
    ring: IndexRing<IndexedPce>,
}

impl TargetBuffer {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            ring: IndexRing::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Forgets every element; the next access must be index 0.
    pub(crate) fn reset(&mut self) {
        self.ring.reset();
    }

    /// Forward access: element `ix` counting from the stream position.
    #[inline]
    pub(crate) fn get<E: CollationElements>(
        &mut self,
        ix: usize,
        elements: &mut ProcessedElements<E>,
    ) -> IndexedPce {
        self.ring.get_or_fetch(ix, || elements.next_processed())
    }

    /// Backward access: element `ix` counting leftward from the stream
    /// position.
    #[inline]
    pub(crate) fn get_previous<E: CollationElements>(
        &mut self,
        ix: usize,
        elements: &mut ProcessedElements<E>,
    ) -> IndexedPce {
        self.ring.get_or_fetch(ix, || elements.previous_processed())
    }
}
