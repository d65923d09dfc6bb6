//! Candidate validation shared by both search directions.

use super::pce::IndexedPce;
use super::MatchEngine;
use crate::api::Strength;
use crate::collation::CollationElements;
use crate::text::normalize::{has_boundary_after, has_boundary_before, to_nfd};
use crate::text::BreakOracle;

/// Why a candidate walk was not reported as a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Reject {
    /// The element after the candidate continues the expansion it ends in.
    EndsMidExpansion,
    /// A trailing zero-primary element does not fit the last pattern element.
    TrailingMismatch,
    /// The start is not on a break boundary.
    StartNotBoundary,
    /// The first element is a trailing part of an expansion.
    StartsMidExpansion,
    /// Extending the limit to a boundary passed the next element.
    LimitPastElements,
    /// The limit is not on a break boundary.
    LimitNotBoundary,
    /// Identical strength and the text differs from the pattern.
    NotIdentical,
    /// The candidate needs more lookahead than the window holds.
    WindowExhausted,
}

impl<E: CollationElements> MatchEngine<E> {
    /// Boundary test against the external oracle if installed, else the
    /// grapheme oracle.
    pub(super) fn is_break_boundary(&self, index: usize) -> bool {
        match self.breaks.as_deref() {
            Some(breaks) => breaks.is_boundary(index),
            None => self.graphemes.is_boundary(index),
        }
    }

    /// First boundary after `index`, from the same oracle as
    /// [`is_break_boundary`](Self::is_break_boundary).
    pub(super) fn next_boundary_after(&self, index: usize) -> Option<usize> {
        match self.breaks.as_deref() {
            Some(breaks) => breaks.following(index),
            None => self.graphemes.following(index),
        }
    }

    /// Whether a candidate may end inside a grapheme cluster.
    ///
    /// Only without an external oracle, when the element after the
    /// candidate has a primary weight and starts a new character at
    /// `max_limit`, and `max_limit` is a normalization boundary.
    pub(super) fn allow_mid_cluster(
        &self,
        next: IndexedPce,
        last_high: usize,
        max_limit: usize,
    ) -> bool {
        if self.breaks.is_some()
            || next.is_end()
            || next.pce.primary() == 0
            || max_limit < last_high
            || next.high <= max_limit
        {
            return false;
        }
        let text = self.target();
        let Some(head) = text.get(..max_limit) else {
            return false;
        };
        let after = text[max_limit..].chars().next();
        let before = head.chars().next_back();
        after.is_some_and(has_boundary_before) || before.is_some_and(has_boundary_after)
    }

    /// At identical strength, the text in `start..limit` must equal the
    /// pattern after NFD.
    pub(super) fn check_identical(&self, start: usize, limit: usize) -> bool {
        if self.params().strength != Strength::Identical {
            return true;
        }
        match self.target().get(start..limit) {
            Some(slice) => to_nfd(slice) == to_nfd(self.pattern.text()),
            None => false,
        }
    }
}
