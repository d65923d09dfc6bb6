//! Backward search.
//!
//! Target indices grow toward the start of the text: index 0 is the element
//! just before the stream position. The pattern is walked from its last
//! element to its first.

use super::bounds::Reject;
use super::compare::{compare_pce, CeMatch};
use super::{MatchEngine, Walk};
use crate::api::{ElementComparison, Match, SearchOptions};
use crate::collation::CollationElements;
use crate::text::BreakOracle;
use tracing::trace;

impl<E: CollationElements> MatchEngine<E> {
    /// Last acceptable match whose elements start before `start`.
    ///
    /// The pattern must not be degenerate and `start` must be a char
    /// boundary within the target.
    pub(crate) fn search_backward(
        &mut self,
        start: usize,
        options: &SearchOptions,
    ) -> Option<Match> {
        debug_assert!(!self.pattern.is_degenerate());
        let mode = options.element_comparison;
        self.prepare_window(mode);

        // Start reading after the whole cluster containing `start` so the
        // element following a candidate is always available, then skip the
        // elements that begin at or after `start`. A zero-width trailing
        // element at `start` belongs to the unit ending there and stays.
        let mut limit_ix = 0;
        let read_limit = if start < self.target_len() {
            self.graphemes
                .following(start)
                .unwrap_or(self.target_len())
        } else {
            start
        };
        self.elements.set_offset(read_limit);
        if start < read_limit {
            loop {
                let element = self.window.get_previous(limit_ix, &mut self.elements);
                if element.is_end()
                    || element.low < start
                    || (element.is_mid_expansion() && element.low == start)
                {
                    break;
                }
                limit_ix += 1;
            }
        }

        let mut target_ix = limit_ix;
        loop {
            match self.walk_backward(target_ix, mode) {
                Walk::Exhausted => return None,
                Walk::Mismatch => {}
                Walk::Matched(end) => match self.bound_backward(target_ix, end, start, read_limit) {
                    Ok(found) => return Some(found),
                    Err(reason) => trace!(
                        target: "collsearch::engine",
                        target_ix,
                        ?reason,
                        "backward candidate rejected"
                    ),
                },
            }
            target_ix += 1;
        }
    }

    fn walk_backward(&mut self, target_ix: usize, mode: ElementComparison) -> Walk {
        let mut tpos = target_ix;
        let mut remaining = self.pattern.len();
        while remaining > 0 {
            let Some(target) = self.fetch_previous(target_ix, tpos) else {
                return Walk::Mismatch;
            };
            match compare_pce(target.pce, self.pattern.pces()[remaining - 1], mode) {
                CeMatch::Match => {
                    tpos += 1;
                    remaining -= 1;
                }
                CeMatch::SkipTarget => tpos += 1,
                CeMatch::SkipPattern => remaining -= 1,
                CeMatch::NoMatch if target.is_end() => return Walk::Exhausted,
                CeMatch::NoMatch => return Walk::Mismatch,
            }
        }
        if tpos == target_ix {
            Walk::Mismatch
        } else {
            Walk::Matched(tpos)
        }
    }

    /// Maps the walk over `[target_ix, end)` (rightmost element first) to a
    /// validated byte range.
    fn bound_backward(
        &mut self,
        target_ix: usize,
        end: usize,
        start: usize,
        read_limit: usize,
    ) -> Result<Match, Reject> {
        let last = self.window.get_previous(target_ix, &mut self.elements);
        let first = self.window.get_previous(end - 1, &mut self.elements);
        let m_start = first.low;

        if !self.is_break_boundary(m_start) {
            return Err(Reject::StartNotBoundary);
        }
        if m_start == first.high {
            return Err(Reject::StartsMidExpansion);
        }

        let min_limit = last.low;
        let m_limit = if target_ix > 0 {
            let next = self
                .fetch_previous(target_ix, target_ix - 1)
                .ok_or(Reject::WindowExhausted)?;
            if next.is_mid_expansion() {
                return Err(Reject::EndsMidExpansion);
            }
            let max_limit = next.low;
            let allow_mid = self.allow_mid_cluster(next, last.high, max_limit);

            let mut m_limit = max_limit;
            if min_limit < max_limit {
                if let Some(nba) = self.next_boundary_after(min_limit) {
                    if nba >= last.high && (!allow_mid || nba < max_limit) {
                        m_limit = nba;
                    }
                }
            }
            if !allow_mid {
                if m_limit > max_limit {
                    return Err(Reject::LimitPastElements);
                }
                if !self.is_break_boundary(m_limit) {
                    return Err(Reject::LimitNotBoundary);
                }
            }
            m_limit
        } else {
            // Nothing was read past the candidate; the search start caps it.
            let capped = match self.next_boundary_after(min_limit) {
                Some(nba) if nba > 0 && start > nba => nba,
                _ => start,
            };
            if self.is_break_boundary(capped) {
                capped
            } else {
                // Only ignorable elements lie between the candidate and
                // `read_limit`, so the limit may run on to the cluster end.
                match self.next_boundary_after(capped) {
                    Some(limit) if limit <= read_limit && limit >= last.high => limit,
                    _ => return Err(Reject::LimitNotBoundary),
                }
            }
        };

        if !self.check_identical(m_start, m_limit) {
            return Err(Reject::NotIdentical);
        }
        Ok(Match {
            start: m_start,
            limit: m_limit,
        })
    }
}
