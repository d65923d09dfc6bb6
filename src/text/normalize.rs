//! Canonical decomposition oracle.
//!
//! The matcher needs three things from normalization: NFD of a candidate
//! slice and of the pattern for the identical-strength check, and whether a
//! character always starts or ends a normalization segment (used to allow
//! matches that end inside a grapheme cluster).

use std::borrow::Cow;
use unicode_normalization::char::{canonical_combining_class, decompose_canonical};
use unicode_normalization::{is_nfd_quick, IsNormalized, UnicodeNormalization};

/// NFD form of `text`, borrowing when the quick check proves it is already
/// decomposed.
pub fn to_nfd(text: &str) -> Cow<'_, str> {
    if is_nfd_quick(text.chars()) == IsNormalized::Yes {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.nfd().collect())
    }
}

/// True if NFD never reorders or merges `c` with what precedes it.
pub fn has_boundary_before(c: char) -> bool {
    let mut lead = None;
    decompose_canonical(c, |d| {
        if lead.is_none() {
            lead = Some(d);
        }
    });
    lead.map_or(true, |d| canonical_combining_class(d) == 0)
}

/// True if NFD never reorders or merges `c` with what follows it.
pub fn has_boundary_after(c: char) -> bool {
    let mut trail = c;
    decompose_canonical(c, |d| trail = d);
    canonical_combining_class(trail) == 0
}
