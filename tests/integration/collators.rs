//! Tailored and custom collators driving a search.

use collsearch::{
    AlternateHandling, Collation, Match, RuleCollator, RuleElements, RuleErrorKind, StringSearch,
    Strength,
};
use std::sync::Arc;

fn starts<C: Collation>(search: &mut StringSearch<C>) -> Vec<usize> {
    search.matches().map(|m| m.start).collect()
}

#[test]
fn secondary_tailoring_is_ignored_at_primary() {
    let coll = RuleCollator::with_rules("& o ; p").expect("rules");
    let mut search =
        StringSearch::new("fox", "fox fpx", coll.clone().with_strength(Strength::Primary))
            .expect("search");
    assert_eq!(starts(&mut search), vec![0, 4]);

    let mut search =
        StringSearch::new("fox", "fox fpx", coll.with_strength(Strength::Secondary))
            .expect("search");
    assert_eq!(starts(&mut search), vec![0]);
}

#[test]
fn contraction_matches_only_as_a_whole() {
    let coll = RuleCollator::with_rules("&z = ab").expect("rules");
    let mut search = StringSearch::new("z", "xab zz", coll.clone()).expect("search");
    assert_eq!(starts(&mut search), vec![1, 4, 5]);
    assert_eq!(search.first(), Some(Match { start: 1, limit: 3 }));

    let mut search = StringSearch::new("a", "xab", coll).expect("search");
    assert_eq!(search.first(), None);
    assert_eq!(search.last(), None);
}

#[test]
fn shifted_punctuation_depends_on_strength() {
    let shifted = RuleCollator::root().with_alternate_handling(AlternateHandling::Shifted);
    let mut search = StringSearch::new("ab", "a-b", shifted.clone()).expect("search");
    assert_eq!(search.first(), Some(Match { start: 0, limit: 3 }));

    let quaternary = shifted.with_strength(Strength::Quaternary);
    let mut search = StringSearch::new("ab", "a-b", quaternary.clone()).expect("search");
    assert_eq!(search.first(), None);
    let mut search = StringSearch::new("a-b", "a-b", quaternary).expect("search");
    assert_eq!(search.first(), Some(Match { start: 0, limit: 3 }));
}

#[test]
fn alternate_handling_change_recompiles_the_pattern() {
    let mut search = StringSearch::new("a b", "ab a b", RuleCollator::root()).expect("search");
    assert_eq!(starts(&mut search), vec![3]);
    search
        .collator_mut()
        .set_alternate_handling(AlternateHandling::Shifted);
    assert_eq!(starts(&mut search), vec![0, 3]);
}

#[test]
fn malformed_rules_are_reported() {
    let err = RuleCollator::with_rules("< a").unwrap_err();
    assert_eq!(err.kind, RuleErrorKind::MissingReset);
    assert_eq!(err.offset, 0);
    assert!(err.to_string().contains("reset"));
}

/// Wraps the reference collator but always compares at primary strength.
struct PrimaryOnly(RuleCollator);

impl Collation for PrimaryOnly {
    type Elements = RuleElements;

    fn elements(&self, text: Arc<str>) -> RuleElements {
        self.0.elements(text)
    }

    fn strength(&self) -> Strength {
        Strength::Primary
    }

    fn alternate_handling(&self) -> AlternateHandling {
        self.0.alternate_handling()
    }

    fn variable_top(&self) -> u32 {
        self.0.variable_top()
    }

    fn is_numeric(&self) -> bool {
        false
    }
}

#[test]
fn custom_collation_drives_the_search() {
    let mut search = StringSearch::new("ECOLE", "une \u{e9}cole", PrimaryOnly(RuleCollator::root()))
        .expect("search");
    assert_eq!(search.first(), Some(Match { start: 4, limit: 10 }));
    assert_eq!(search.collator().strength(), Strength::Primary);
}
