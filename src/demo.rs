use crate::api::Strength;
use crate::collation::RuleCollator;
use crate::error::SearchError;
use crate::search::StringSearch;

// --------------------------
// Demo collators
// --------------------------

/// German tailoring: `ß` and `ẞ` sort as `ss` and `SS` with a tertiary
/// difference.
pub const GERMAN_RULES: &str = "&ss , \u{df} &SS , \u{1e9e}";

/// Root collator at tertiary strength.
pub fn root_collator() -> RuleCollator {
    RuleCollator::root()
}

/// German collator at secondary strength, so `ß` matches `ss`.
pub fn german_collator() -> RuleCollator {
    RuleCollator::with_rules(GERMAN_RULES)
        .expect("built-in German rules parse")
        .with_strength(Strength::Secondary)
}

/// Primary-strength search over the root collator: ignores case and
/// accents.
pub fn demo_search(pattern: &str, target: &str) -> Result<StringSearch, SearchError> {
    let collator = root_collator().with_strength(Strength::Primary);
    StringSearch::new(pattern, target, collator)
}
