//! Error types for search construction and reconfiguration.
//!
//! Not finding a match is never an error; searches report it as `None`.
//! These errors cover arguments that would leave a search in an undefined
//! state, and are raised by the call that introduced the bad input before
//! any state is mutated.

use std::fmt;

/// Errors from building or reconfiguring a [`StringSearch`](crate::StringSearch).
///
/// This enum is non-exhaustive so new diagnostics can be introduced without
/// breaking downstream matches.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SearchError {
    /// The pattern text is empty.
    EmptyPattern,
    /// The target text is empty.
    EmptyTarget,
    /// A position lies outside `0..=len` of the target text.
    IndexOutOfBounds { index: usize, len: usize },
    /// A position lies inside a multi-byte UTF-8 sequence.
    NotCharBoundary { index: usize },
    /// The collator sorts digit runs numerically, which element-wise
    /// matching cannot support.
    NumericCollation,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPattern => write!(f, "search pattern is empty"),
            Self::EmptyTarget => write!(f, "target text is empty"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for text of length {len}")
            }
            Self::NotCharBoundary { index } => {
                write!(f, "index {index} is not on a character boundary")
            }
            Self::NumericCollation => {
                write!(f, "numeric collation is not supported by string search")
            }
        }
    }
}

impl std::error::Error for SearchError {}

/// Syntax error in a tailoring rule string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleError {
    /// Byte offset into the rule string.
    pub offset: usize,
    pub kind: RuleErrorKind,
}

/// What went wrong while parsing tailoring rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleErrorKind {
    /// A relation operator appeared before any `&` reset.
    MissingReset,
    /// A reset or relation had no characters after it.
    EmptyItem,
    /// An operator appeared where an item was expected.
    UnexpectedOperator(char),
    /// An item followed another item without a relation operator.
    MissingRelation,
    /// Rule syntax that this collator does not implement.
    UnsupportedSyntax(char),
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RuleErrorKind::MissingReset => {
                write!(f, "relation without a preceding '&' reset at byte {}", self.offset)
            }
            RuleErrorKind::EmptyItem => write!(f, "empty rule item at byte {}", self.offset),
            RuleErrorKind::MissingRelation => {
                write!(f, "missing relation operator at byte {}", self.offset)
            }
            RuleErrorKind::UnexpectedOperator(op) => {
                write!(f, "unexpected operator '{op}' at byte {}", self.offset)
            }
            RuleErrorKind::UnsupportedSyntax(c) => {
                write!(f, "unsupported rule syntax '{c}' at byte {}", self.offset)
            }
        }
    }
}

impl std::error::Error for RuleError {}
