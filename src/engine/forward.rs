//! Forward search.

use super::bounds::Reject;
use super::compare::{compare_pce, CeMatch};
use super::{MatchEngine, Walk};
use crate::api::{ElementComparison, Match, SearchOptions};
use crate::collation::CollationElements;
use tracing::trace;

impl<E: CollationElements> MatchEngine<E> {
    /// First acceptable match starting at or after `start`.
    ///
    /// The pattern must not be degenerate and `start` must be a char
    /// boundary within the target.
    pub(crate) fn search_forward(&mut self, start: usize, options: &SearchOptions) -> Option<Match> {
        debug_assert!(!self.pattern.is_degenerate());
        let mode = options.element_comparison;
        self.prepare_window(mode);
        self.elements.set_offset(start);

        let mut target_ix = 0;
        loop {
            match self.walk_forward(target_ix, mode) {
                Walk::Exhausted => return None,
                Walk::Mismatch => {}
                Walk::Matched(end) => match self.bound_forward(target_ix, end, options) {
                    Ok(found) => return Some(found),
                    Err(reason) => trace!(
                        target: "collsearch::engine",
                        target_ix,
                        ?reason,
                        "forward candidate rejected"
                    ),
                },
            }
            target_ix += 1;
        }
    }

    fn walk_forward(&mut self, target_ix: usize, mode: ElementComparison) -> Walk {
        let pattern_len = self.pattern.len();
        let mut tpos = target_ix;
        let mut pat_ix = 0;
        while pat_ix < pattern_len {
            let Some(target) = self.fetch(target_ix, tpos) else {
                return Walk::Mismatch;
            };
            match compare_pce(target.pce, self.pattern.pces()[pat_ix], mode) {
                CeMatch::Match => {
                    tpos += 1;
                    pat_ix += 1;
                }
                CeMatch::SkipTarget => tpos += 1,
                CeMatch::SkipPattern => pat_ix += 1,
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

    /// Maps the walk over `[target_ix, end)` to a validated byte range.
    fn bound_forward(
        &mut self,
        target_ix: usize,
        end: usize,
        options: &SearchOptions,
    ) -> Result<Match, Reject> {
        let mode = options.element_comparison;
        let first = self.window.get(target_ix, &mut self.elements);
        let last = self.window.get(end - 1, &mut self.elements);
        let m_start = first.low;
        let min_limit = last.low;

        let next = if mode == ElementComparison::Standard {
            let next = self.fetch(target_ix, end).ok_or(Reject::WindowExhausted)?;
            if next.is_mid_expansion() {
                return Err(Reject::EndsMidExpansion);
            }
            next
        } else {
            // Absorb trailing zero-primary elements that still fit the last
            // pattern element.
            let last_pattern = self.pattern.pces()[self.pattern.len() - 1];
            let mut ix = end;
            loop {
                let next = self.fetch(target_ix, ix).ok_or(Reject::WindowExhausted)?;
                if next.is_end() {
                    break next;
                }
                if next.pce.primary() == 0 {
                    match compare_pce(next.pce, last_pattern, mode) {
                        CeMatch::NoMatch | CeMatch::SkipPattern => {
                            return Err(Reject::TrailingMismatch)
                        }
                        CeMatch::Match | CeMatch::SkipTarget => ix += 1,
                    }
                } else if next.is_mid_expansion() {
                    return Err(Reject::EndsMidExpansion);
                } else {
                    break next;
                }
            }
        };
        let max_limit = next.low;

        if !self.is_break_boundary(m_start) {
            return Err(Reject::StartNotBoundary);
        }
        if m_start == first.high {
            return Err(Reject::StartsMidExpansion);
        }

        let allow_mid = self.allow_mid_cluster(next, last.high, max_limit);
        let mut m_limit = max_limit;
        if min_limit < max_limit {
            if min_limit == last.high && self.is_break_boundary(min_limit) {
                // The last element closes an expansion right at a boundary;
                // ignorables after it stay outside the match.
                m_limit = min_limit;
            } else if let Some(nba) = self.next_boundary_after(min_limit) {
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
        if !self.check_identical(m_start, m_limit) {
            return Err(Reject::NotIdentical);
        }
        Ok(Match {
            start: m_start,
            limit: m_limit,
        })
    }
}
