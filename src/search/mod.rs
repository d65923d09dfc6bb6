//! Incremental collation-aware search.
//!
//! [`StringSearch`] finds occurrences of a pattern in a target text that
//! are equal under a collator, stepping through them in either direction.
//!
//! # Positions
//! All positions are UTF-8 byte offsets on `char` boundaries. The search
//! keeps one cursor. A successful step parks it at the match start; a failed
//! forward step parks it at the end of the text, a failed backward step at
//! the start.
//!
//! # Reconfiguration
//! `set_pattern`, `set_target` and `set_collator` validate their input
//! before touching any state. Changes made through
//! [`collator_mut`](StringSearch::collator_mut) are picked up by the next
//! step or [`reset`](StringSearch::reset); the pattern is only recompiled
//! if they change which elements the collator produces.

mod cursor;

use crate::api::{ElementComparison, Match, SearchOptions};
use crate::collation::{Collation, RuleCollator};
use crate::engine::{CollationParams, CompiledPattern, MatchEngine};
use crate::error::SearchError;
use crate::text::BreakOracle;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Match and direction state threaded through the stepping protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SearchState {
    /// Start of the current match.
    pub(crate) matched: Option<usize>,
    pub(crate) matched_length: usize,
    pub(crate) forward: bool,
    /// Set by construction, `set_target` and `reset`: the next backward
    /// step starts from the end of the text.
    pub(crate) reset: bool,
    pub(crate) options: SearchOptions,
}

impl SearchState {
    fn new() -> Self {
        Self {
            matched: None,
            matched_length: 0,
            forward: true,
            reset: true,
            options: SearchOptions::default(),
        }
    }

    pub(crate) fn current(&self) -> Option<Match> {
        self.matched.map(|start| Match {
            start,
            limit: start + self.matched_length,
        })
    }

    pub(crate) fn set_match(&mut self, found: Match) {
        self.matched = Some(found.start);
        self.matched_length = found.len();
    }

    pub(crate) fn clear_match(&mut self) {
        self.matched = None;
        self.matched_length = 0;
    }
}

/// Collation-aware search of one pattern in one target text.
///
/// ```
/// use collsearch::{RuleCollator, StringSearch, Strength};
///
/// let collator = RuleCollator::root().with_strength(Strength::Primary);
/// let mut search = StringSearch::new("cat", "The CAT sat", collator)?;
/// let found = search.first().expect("match");
/// assert_eq!((found.start, found.limit), (4, 7));
/// # Ok::<(), collsearch::SearchError>(())
/// ```
pub struct StringSearch<C: Collation = RuleCollator> {
    collator: C,
    engine: MatchEngine<C::Elements>,
    state: SearchState,
    // The collator was handed out mutably since params were last derived.
    stale: bool,
}

impl<C: Collation> StringSearch<C> {
    /// Creates a search positioned at the start of `target`.
    ///
    /// # Errors
    /// [`SearchError::EmptyPattern`], [`SearchError::EmptyTarget`], or
    /// [`SearchError::NumericCollation`] if `collator` sorts digits
    /// numerically.
    pub fn new(pattern: &str, target: &str, collator: C) -> Result<Self, SearchError> {
        Self::build(pattern, target, collator, None)
    }

    /// Like [`new`](Self::new), with an external break oracle that match
    /// boundaries must satisfy instead of grapheme cluster boundaries.
    pub fn with_break_oracle(
        pattern: &str,
        target: &str,
        collator: C,
        oracle: Box<dyn BreakOracle>,
    ) -> Result<Self, SearchError> {
        Self::build(pattern, target, collator, Some(oracle))
    }

    fn build(
        pattern: &str,
        target: &str,
        collator: C,
        oracle: Option<Box<dyn BreakOracle>>,
    ) -> Result<Self, SearchError> {
        if pattern.is_empty() {
            return Err(SearchError::EmptyPattern);
        }
        if target.is_empty() {
            return Err(SearchError::EmptyTarget);
        }
        if collator.is_numeric() {
            return Err(SearchError::NumericCollation);
        }
        let params = CollationParams::of(&collator);
        let target: Arc<str> = Arc::from(target);
        let compiled = CompiledPattern::compile(Arc::from(pattern), &collator, params);
        let elements = collator.elements(Arc::clone(&target));
        let engine = MatchEngine::new(target, compiled, elements, params, oracle);
        Ok(Self {
            collator,
            engine,
            state: SearchState::new(),
            stale: false,
        })
    }

    // --------------------------
    // Reconfiguration
    // --------------------------

    pub fn pattern(&self) -> &str {
        self.engine.pattern().text()
    }

    pub fn target(&self) -> &str {
        self.engine.target()
    }

    /// Replaces the pattern. The position is unchanged.
    pub fn set_pattern(&mut self, pattern: &str) -> Result<(), SearchError> {
        if pattern.is_empty() {
            return Err(SearchError::EmptyPattern);
        }
        self.refresh_params();
        let compiled = CompiledPattern::compile(Arc::from(pattern), &self.collator, self.engine.params());
        self.engine.set_pattern(compiled);
        Ok(())
    }

    /// Replaces the target text and moves to its start.
    pub fn set_target(&mut self, target: &str) -> Result<(), SearchError> {
        if target.is_empty() {
            return Err(SearchError::EmptyTarget);
        }
        let target: Arc<str> = Arc::from(target);
        let elements = self.collator.elements(Arc::clone(&target));
        self.engine.set_target(target, elements);
        self.state.clear_match();
        self.state.reset = true;
        self.state.forward = true;
        Ok(())
    }

    /// Replaces the collator and recompiles the pattern. The position is
    /// unchanged.
    pub fn set_collator(&mut self, collator: C) -> Result<(), SearchError> {
        if collator.is_numeric() {
            return Err(SearchError::NumericCollation);
        }
        let offset = self.engine.offset();
        self.collator = collator;
        let params = CollationParams::of(&self.collator);
        let target: Arc<str> = Arc::from(self.engine.target());
        let elements = self.collator.elements(Arc::clone(&target));
        self.engine.set_target(target, elements);
        self.engine.set_params(params);
        self.recompile();
        self.engine.set_offset(offset);
        self.stale = false;
        Ok(())
    }

    /// Installs (`Some`) or removes (`None`) the external break oracle.
    pub fn set_break_oracle(&mut self, oracle: Option<Box<dyn BreakOracle>>) {
        self.engine.set_breaks(oracle);
    }

    pub fn has_break_oracle(&self) -> bool {
        self.engine.has_breaks()
    }

    pub fn collator(&self) -> &C {
        &self.collator
    }

    /// Mutable access to the collator. Attribute changes take effect at the
    /// next step or [`reset`](Self::reset).
    pub fn collator_mut(&mut self) -> &mut C {
        self.stale = true;
        &mut self.collator
    }

    /// Re-derives the comparison params from the collator, moves to the
    /// start of the text, forgets the current match and restores the
    /// default options.
    pub fn reset(&mut self) {
        self.apply_params();
        self.engine.set_offset(0);
        self.state = SearchState::new();
    }

    fn refresh_params(&mut self) {
        if self.stale {
            self.apply_params();
        }
    }

    fn apply_params(&mut self) {
        let params = CollationParams::of(&self.collator);
        let current = self.engine.params();
        if params != current {
            let offset = self.engine.offset();
            self.engine.set_params(params);
            self.engine.set_offset(offset);
            if !params.same_elements(current) {
                debug!(
                    target: "collsearch::search",
                    from = ?current.strength,
                    to = ?params.strength,
                    shifted = params.shifted,
                    "collator attributes changed"
                );
                self.recompile();
            }
        }
        self.stale = false;
    }

    fn recompile(&mut self) {
        let text: Arc<str> = Arc::from(self.engine.pattern().text());
        let compiled = CompiledPattern::compile(text, &self.collator, self.engine.params());
        self.engine.set_pattern(compiled);
    }

    // --------------------------
    // Options
    // --------------------------

    pub fn options(&self) -> SearchOptions {
        self.state.options
    }

    pub fn set_options(&mut self, options: SearchOptions) {
        self.state.options = options;
    }

    pub fn set_overlap(&mut self, overlap: bool) {
        self.state.options.overlap = overlap;
    }

    pub fn set_canonical(&mut self, canonical: bool) {
        self.state.options.canonical = canonical;
    }

    pub fn set_element_comparison(&mut self, mode: ElementComparison) {
        self.state.options.element_comparison = mode;
    }

    // --------------------------
    // Stepping
    // --------------------------

    /// First match in the text.
    pub fn first(&mut self) -> Option<Match> {
        self.refresh_params();
        cursor::move_to(&mut self.state, &mut self.engine, 0);
        cursor::next(&mut self.state, &mut self.engine)
    }

    /// Last match in the text.
    pub fn last(&mut self) -> Option<Match> {
        self.refresh_params();
        let len = self.engine.target_len();
        cursor::move_to(&mut self.state, &mut self.engine, len);
        cursor::previous(&mut self.state, &mut self.engine)
    }

    /// Next match after the current position. Turning around from a
    /// backward step reports the current match again.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Match> {
        self.refresh_params();
        cursor::next(&mut self.state, &mut self.engine)
    }

    /// Previous match before the current position. Turning around from a
    /// forward step reports the current match again.
    pub fn previous(&mut self) -> Option<Match> {
        self.refresh_params();
        cursor::previous(&mut self.state, &mut self.engine)
    }

    /// First match at or after `index`.
    pub fn following(&mut self, index: usize) -> Result<Option<Match>, SearchError> {
        self.set_index(index)?;
        Ok(self.next())
    }

    /// Last match before `index`.
    pub fn preceding(&mut self, index: usize) -> Result<Option<Match>, SearchError> {
        self.set_index(index)?;
        Ok(self.previous())
    }

    /// Moves the cursor and forgets the current match.
    ///
    /// # Errors
    /// [`SearchError::IndexOutOfBounds`] past the end of the text,
    /// [`SearchError::NotCharBoundary`] inside a multi-byte `char`.
    pub fn set_index(&mut self, index: usize) -> Result<(), SearchError> {
        cursor::set_index(&mut self.state, &mut self.engine, index)
    }

    /// Current cursor position.
    pub fn index(&self) -> usize {
        self.engine.offset()
    }

    // --------------------------
    // Current match
    // --------------------------

    pub fn current_match(&self) -> Option<Match> {
        self.state.current()
    }

    pub fn match_start(&self) -> Option<usize> {
        self.state.matched
    }

    /// Length of the current match in bytes, 0 without one.
    pub fn match_length(&self) -> usize {
        self.state.matched_length
    }

    pub fn matched_text(&self) -> Option<&str> {
        let found = self.state.current()?;
        self.engine.target().get(found.range())
    }

    /// All matches from the start of the text, in order.
    pub fn matches(&mut self) -> Matches<'_, C> {
        Matches {
            search: self,
            started: false,
        }
    }
}

impl<C: Collation + fmt::Debug> fmt::Debug for StringSearch<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringSearch")
            .field("pattern", &self.pattern())
            .field("target_len", &self.engine.target_len())
            .field("collator", &self.collator)
            .field("state", &self.state)
            .finish()
    }
}

/// Iterator returned by [`StringSearch::matches`].
pub struct Matches<'a, C: Collation> {
    search: &'a mut StringSearch<C>,
    started: bool,
}

impl<C: Collation> Iterator for Matches<'_, C> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        if self.started {
            self.search.next()
        } else {
            self.started = true;
            self.search.first()
        }
    }
}
