//! Collation element seam.
//!
//! The search engine never computes collation weights itself. It consumes
//! two narrow interfaces:
//!
//! - [`Collation`]: a ruleset with its comparison attributes (strength,
//!   alternate handling, variable top, numeric mode) that can open an
//!   element cursor over any text.
//! - [`CollationElements`]: a bidirectional cursor producing 32-bit
//!   collation elements (CEs) and reporting its position as a UTF-8 byte
//!   offset into the text.
//!
//! # CE layout
//! `primary (16) | secondary (8) | tertiary (8)`. The two high bits of the
//! tertiary byte form the continuation marker: a CE whose low byte has both
//! bits set continues the previous CE (for example the second half of an
//! implicit weight). A CE of `0` is completely ignorable.
//!
//! # Offset contract
//! While iterating forward, the offset after fetching the first CE of a unit
//! is the unit's end; later CEs of the same unit report that same end.
//! Iterating backward, the offset stays at the unit's end until its last
//! (leftmost) CE has been returned, then drops to the unit's start. This is
//! what lets the search engine flag elements that lie in the middle of an
//! expansion.
//!
//! [`RuleCollator`] is the implementation shipped with the crate.

mod elements;
mod rules;

pub use elements::RuleElements;
pub use rules::RuleCollator;

use crate::api::{AlternateHandling, Strength};
use std::sync::Arc;

/// Completely ignorable collation element.
pub const IGNORABLE: u32 = 0;

/// Low-byte bits marking a continuation CE.
pub const CONTINUATION_MARKER: u32 = 0xC0;

/// Common (unmarked) secondary and tertiary weight.
pub const COMMON_WEIGHT: u32 = 0x05;

#[inline]
pub fn primary_order(ce: u32) -> u32 {
    ce >> 16
}

#[inline]
pub fn secondary_order(ce: u32) -> u32 {
    (ce >> 8) & 0xFF
}

/// Tertiary weight with the continuation bits stripped.
#[inline]
pub fn tertiary_order(ce: u32) -> u32 {
    ce & 0x3F
}

#[inline]
pub fn is_continuation(ce: u32) -> bool {
    ce & CONTINUATION_MARKER == CONTINUATION_MARKER
}

/// Packs weights into a CE. `tertiary` must fit in six bits.
#[inline]
pub const fn make_ce(primary: u32, secondary: u32, tertiary: u32) -> u32 {
    (primary << 16) | ((secondary & 0xFF) << 8) | (tertiary & 0x3F)
}

/// Bidirectional cursor over the collation elements of one text.
///
/// Implementations must follow the offset contract described in the module
/// docs. `set_offset` is only called with offsets on `char` boundaries.
pub trait CollationElements {
    /// Returns the next CE, or `None` at the end of the text.
    fn next_ce(&mut self) -> Option<u32>;

    /// Returns the previous CE, or `None` at the start of the text.
    fn previous_ce(&mut self) -> Option<u32>;

    /// Current position as a byte offset.
    fn offset(&self) -> usize;

    /// Repositions the cursor and drops any partially consumed unit.
    fn set_offset(&mut self, offset: usize);

    /// Upper bound on the number of CEs in an expansion ending with `ce`.
    fn max_expansion(&self, ce: u32) -> usize;
}

/// A collation ruleset and its comparison attributes.
pub trait Collation {
    type Elements: CollationElements;

    /// Opens an element cursor positioned at the start of `text`.
    fn elements(&self, text: Arc<str>) -> Self::Elements;

    fn strength(&self) -> Strength;

    fn alternate_handling(&self) -> AlternateHandling;

    /// CEs below this value (compared as whole CEs) with a non-zero primary
    /// are variable.
    fn variable_top(&self) -> u32;

    /// True when digit runs collate by numeric value.
    fn is_numeric(&self) -> bool;
}
