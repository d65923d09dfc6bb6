//! Collation-aware incremental string search.
//!
//! ## Scope
//! This crate finds a pattern in a target text where "equal" means equal
//! under a collator at a chosen strength: case-insensitive, accent-insensitive,
//! punctuation-insensitive, or exact. Matching happens on collation
//! elements, so expansions (`ß` against `ss`), contractions and canonically
//! equivalent spellings are handled without rewriting the text.
//!
//! ## Key invariants
//! - Reported matches never split an expansion or a contraction. They never
//!   split a grapheme cluster either, except that without a break oracle a
//!   match may end before a character that starts a new normalization
//!   segment (prefix search in scripts such as Devanagari).
//! - All positions are UTF-8 byte offsets on `char` boundaries.
//! - Not finding a match is `None`; errors only signal invalid arguments.
//! - Target elements are read lazily through a bounded window, so work per
//!   step is proportional to the distance moved.
//!
//! ## Search flow (one step)
//! 1) Position the target's collation element cursor.
//! 2) Fold raw elements into processed elements for the active strength and
//!    alternate handling.
//! 3) Walk the compiled pattern against the target elements.
//! 4) Map a candidate back to text offsets and validate its boundaries.
//!
//! ## Notable entry points
//! - [`StringSearch`]: construction, stepping (`first`/`next`/`previous`/
//!   `last`), reconfiguration and options.
//! - [`RuleCollator`]: the bundled reference collator with rule tailoring.
//! - [`Collation`] / [`CollationElements`]: the seam for other collators.
//! - [`BreakOracle`]: restrict match boundaries, e.g. to whole words with
//!   [`WordBreaks`].
//!
//! ## Design trade-offs
//! The engine restarts its pattern walk one element after every failed
//! candidate instead of using a skip table. That keeps expansions and
//! ignorable elements correct at the cost of `O(target × pattern)` element
//! comparisons in the worst case.

pub mod collation;
pub mod stdx;
#[cfg(test)]
pub mod test_utils;
pub mod text;

mod api;
mod demo;
mod engine;
mod error;
mod search;

pub use api::{AlternateHandling, ElementComparison, Match, SearchOptions, Strength};
pub use collation::{Collation, CollationElements, RuleCollator, RuleElements};
pub use demo::{demo_search, german_collator, root_collator, GERMAN_RULES};
pub use error::{RuleError, RuleErrorKind, SearchError};
pub use search::{Matches, StringSearch};
pub use text::{BreakOracle, GraphemeBreaks, WordBreaks};
