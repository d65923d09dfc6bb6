//! Element comparator.
//!
//! Standard comparison is plain equality. The wildcard modes relax the
//! secondary and tertiary levels so a pattern written with base (unmarked)
//! weights can match marked text, and let the walk absorb zero-weight
//! elements on either side.

use super::pce::Pce;
use crate::api::ElementComparison;
use crate::collation::COMMON_WEIGHT;

/// Outcome of comparing one target element against one pattern element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CeMatch {
    Match,
    NoMatch,
    /// Consume the target element, keep the pattern element.
    SkipTarget,
    /// Consume the pattern element, keep the target element.
    SkipPattern,
}

pub(crate) fn compare_pce(target: Pce, pattern: Pce, mode: ElementComparison) -> CeMatch {
    if target == pattern {
        return CeMatch::Match;
    }
    if target.is_end() || mode == ElementComparison::Standard {
        return CeMatch::NoMatch;
    }
    let any_base = mode == ElementComparison::AnyBaseWeightIsWildcard;

    let (t1, p1) = (target.primary(), pattern.primary());
    if t1 != p1 {
        if t1 == 0 {
            return CeMatch::SkipTarget;
        }
        if p1 == 0 && any_base {
            return CeMatch::SkipPattern;
        }
        return CeMatch::NoMatch;
    }

    let (t2, p2) = (target.secondary(), pattern.secondary());
    if t2 != p2 {
        if t2 == 0 {
            return CeMatch::SkipTarget;
        }
        if p2 == 0 && any_base {
            return CeMatch::SkipPattern;
        }
        return base_wildcard(t2, p2, any_base);
    }

    let (t3, p3) = (target.tertiary(), pattern.tertiary());
    if t3 != p3 {
        return base_wildcard(t3, p3, any_base);
    }
    CeMatch::Match
}

#[inline]
fn base_wildcard(target: u32, pattern: u32, any_base: bool) -> CeMatch {
    if pattern == COMMON_WEIGHT || (any_base && target == COMMON_WEIGHT) {
        CeMatch::Match
    } else {
        CeMatch::NoMatch
    }
}
