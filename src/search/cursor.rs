//! Stepping protocol.
//!
//! Every function here takes the mutable [`SearchState`] and the engine
//! explicitly, so the order of state reads and writes is visible at each
//! call site. The engine's element cursor doubles as the search position:
//! after a forward or backward match it is parked at the match start, after
//! an exhausted search at the end (forward) or start (backward) of the
//! text.

use super::SearchState;
use crate::api::Match;
use crate::collation::CollationElements;
use crate::engine::MatchEngine;
use crate::error::SearchError;
use crate::text::{next_char_boundary, prev_char_boundary};
use tracing::trace;

/// Moves the cursor to `index` and forgets the current match.
pub(crate) fn set_index<E: CollationElements>(
    state: &mut SearchState,
    engine: &mut MatchEngine<E>,
    index: usize,
) -> Result<(), SearchError> {
    let len = engine.target_len();
    if index > len {
        return Err(SearchError::IndexOutOfBounds { index, len });
    }
    if !engine.target().is_char_boundary(index) {
        return Err(SearchError::NotCharBoundary { index });
    }
    move_to(state, engine, index);
    Ok(())
}

/// [`set_index`] for offsets already known to be valid.
pub(crate) fn move_to<E: CollationElements>(
    state: &mut SearchState,
    engine: &mut MatchEngine<E>,
    index: usize,
) {
    engine.set_offset(index);
    state.clear_match();
    state.reset = false;
}

pub(crate) fn next<E: CollationElements>(
    state: &mut SearchState,
    engine: &mut MatchEngine<E>,
) -> Option<Match> {
    let len = engine.target_len();
    let mut index = engine.offset();
    state.reset = false;

    if state.forward {
        let at_end = index == len
            || state
                .matched
                .is_some_and(|start| start == len || start + state.matched_length >= len);
        if at_end {
            return not_found(state, engine);
        }
    } else {
        // Turning around reports the current match once more.
        state.forward = true;
        if let Some(current) = state.current() {
            return Some(current);
        }
    }

    if state.matched_length > 0 {
        index = if state.options.overlap {
            next_char_boundary(engine.target(), index)
        } else {
            index + state.matched_length
        };
    }
    handle_next(state, engine, index)
}

pub(crate) fn previous<E: CollationElements>(
    state: &mut SearchState,
    engine: &mut MatchEngine<E>,
) -> Option<Match> {
    let index = if state.reset {
        let len = engine.target_len();
        state.forward = false;
        move_to(state, engine, len);
        len
    } else {
        engine.offset()
    };

    if state.forward {
        state.forward = false;
        if let Some(current) = state.current() {
            return Some(current);
        }
    } else if index == 0 || state.matched == Some(0) {
        return not_found(state, engine);
    }

    let from = state.matched.unwrap_or(index);
    handle_previous(state, engine, from)
}

/// Forgets the match and parks the cursor at the end of the text in the
/// search direction.
fn not_found<E: CollationElements>(
    state: &mut SearchState,
    engine: &mut MatchEngine<E>,
) -> Option<Match> {
    state.clear_match();
    let park = if state.forward { engine.target_len() } else { 0 };
    engine.set_offset(park);
    None
}

fn handle_next<E: CollationElements>(
    state: &mut SearchState,
    engine: &mut MatchEngine<E>,
    position: usize,
) -> Option<Match> {
    let len = engine.target_len();
    if engine.pattern().is_degenerate() {
        // Zero-width matches, one char at a time.
        let start = match state.matched {
            None => engine.offset(),
            Some(start) => next_char_boundary(engine.target(), start),
        };
        if start == len {
            return not_found(state, engine);
        }
        engine.set_offset(start);
        let found = Match { start, limit: start };
        state.set_match(found);
        return Some(found);
    }

    engine.set_offset(position);
    match engine.search_forward(position, &state.options) {
        Some(found) => {
            trace!(
                target: "collsearch::search",
                start = found.start,
                limit = found.limit,
                "forward match"
            );
            state.set_match(found);
            engine.set_offset(found.start);
            Some(found)
        }
        None => not_found(state, engine),
    }
}

fn handle_previous<E: CollationElements>(
    state: &mut SearchState,
    engine: &mut MatchEngine<E>,
    position: usize,
) -> Option<Match> {
    if engine.pattern().is_degenerate() {
        let start = state.matched.unwrap_or_else(|| engine.offset());
        if start == 0 {
            return not_found(state, engine);
        }
        let start = prev_char_boundary(engine.target(), start);
        engine.set_offset(start);
        let found = Match { start, limit: start };
        state.set_match(found);
        return Some(found);
    }

    let search_start = if state.options.overlap {
        match state.current() {
            // Matches may overlap the current one; they just have to start
            // before its last grapheme cluster.
            Some(current) => engine.last_cluster_start(current),
            None => {
                let skip = engine.pattern().len() - 1;
                engine.advance_processed(position, skip)
            }
        }
    } else {
        position
    };

    match engine.search_backward(search_start, &state.options) {
        Some(found) => {
            trace!(
                target: "collsearch::search",
                start = found.start,
                limit = found.limit,
                "backward match"
            );
            state.set_match(found);
            engine.set_offset(found.start);
            Some(found)
        }
        None => not_found(state, engine),
    }
}
