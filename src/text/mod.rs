//! Text oracles consumed by the matcher: canonical normalization and
//! break boundaries.
//!
//! Both are thin layers over `unicode-normalization` and
//! `unicode-segmentation`. All positions are UTF-8 byte offsets.

pub mod boundary;
pub mod normalize;

pub use boundary::{BreakOracle, GraphemeBreaks, WordBreaks};

/// Largest char boundary `<= index`, clamped to `text.len()`.
pub(crate) fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut i = index;
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Offset just past the char starting at `index`, or `text.len()` at the end.
pub(crate) fn next_char_boundary(text: &str, index: usize) -> usize {
    match text[index..].chars().next() {
        Some(c) => index + c.len_utf8(),
        None => text.len(),
    }
}

/// Start of the char ending at `index`, or 0 at the start.
pub(crate) fn prev_char_boundary(text: &str, index: usize) -> usize {
    match text[..index].char_indices().next_back() {
        Some((i, _)) => i,
        None => 0,
    }
}
