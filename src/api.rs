use serde::{Deserialize, Serialize};
use std::ops::Range;

// --------------------------
// Public API types
// --------------------------

/// Comparison strength of a collator.
///
/// Ordered from loosest to strictest: `Primary < Secondary < Tertiary <
/// Quaternary < Identical`. Each level adds one more weight field to the
/// processed elements the search engine compares.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    /// Base letters only.
    Primary,
    /// Base letters and accents.
    Secondary,
    /// Base letters, accents and case/variant differences.
    #[default]
    Tertiary,
    /// Adds the shifted weight of variable (punctuation) elements.
    Quaternary,
    /// Tertiary/quaternary comparison followed by a code point identity check.
    Identical,
}

impl Strength {
    /// Returns true when the quaternary weight participates in comparisons.
    #[inline]
    pub fn includes_quaternary(self) -> bool {
        self >= Strength::Quaternary
    }

    /// Parses a strength name (`primary`, `secondary`, `tertiary`,
    /// `quaternary`, `identical`, or `1`..`5`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "primary" | "1" => Some(Strength::Primary),
            "secondary" | "2" => Some(Strength::Secondary),
            "tertiary" | "3" => Some(Strength::Tertiary),
            "quaternary" | "4" => Some(Strength::Quaternary),
            "identical" | "5" => Some(Strength::Identical),
            _ => None,
        }
    }
}

/// Treatment of variable elements (whitespace and punctuation).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlternateHandling {
    /// Variable elements carry ordinary primary weights.
    #[default]
    NonIgnorable,
    /// Variable elements are shifted to the quaternary level and ignored
    /// below quaternary strength.
    Shifted,
}

/// How a target element is compared with a pattern element.
///
/// The wildcard modes exist for asymmetric (prefix/"fuzzy accent") search:
/// a pattern written without accents or case can match accented or cased
/// target text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementComparison {
    /// Elements match only when their weights are equal.
    #[default]
    Standard,
    /// A pattern secondary or tertiary weight equal to the common base
    /// weight matches any target weight at that level.
    PatternBaseWeightIsWildcard,
    /// Base weights on either side match any weight at that level.
    AnyBaseWeightIsWildcard,
}

impl ElementComparison {
    /// Parses `standard`, `pattern-wildcard` or `any-wildcard`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "standard" => Some(ElementComparison::Standard),
            "pattern-wildcard" => Some(ElementComparison::PatternBaseWeightIsWildcard),
            "any-wildcard" => Some(ElementComparison::AnyBaseWeightIsWildcard),
            _ => None,
        }
    }
}

/// Per-search flags.
///
/// All combinations are valid. `reset()` on a search restores
/// `SearchOptions::default()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Allow a match to begin inside the previous match.
    pub overlap: bool,
    /// Canonical-equivalence matching. Identical strength already compares
    /// NFD forms, so the matcher does not consult this flag.
    pub canonical: bool,
    /// Element comparison mode.
    pub element_comparison: ElementComparison,
}

impl SearchOptions {
    pub fn with_overlap(mut self, overlap: bool) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn with_canonical(mut self, canonical: bool) -> Self {
        self.canonical = canonical;
        self
    }

    pub fn with_element_comparison(mut self, mode: ElementComparison) -> Self {
        self.element_comparison = mode;
        self
    }
}

/// A match in the target text, as UTF-8 byte offsets.
///
/// `start` and `limit` always fall on `char` boundaries. A degenerate
/// (entirely ignorable) pattern produces zero-width matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Match {
    pub start: usize,
    pub limit: usize,
}

impl Match {
    #[inline]
    pub fn len(&self) -> usize {
        self.limit - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.limit
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.limit
    }
}
