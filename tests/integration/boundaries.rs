//! Match boundaries: break oracles, clusters and ignorable elements.

use collsearch::{
    ElementComparison, GraphemeBreaks, Match, RuleCollator, StringSearch, Strength, WordBreaks,
};

#[test]
fn word_oracle_skips_partial_words() {
    let mut search = StringSearch::with_break_oracle(
        "fox",
        "foxy fox fox.",
        RuleCollator::root(),
        Box::new(WordBreaks::new()),
    )
    .expect("search");
    assert!(search.has_break_oracle());
    let starts: Vec<usize> = search.matches().map(|m| m.start).collect();
    assert_eq!(starts, vec![5, 9]);
    assert_eq!(search.last(), Some(Match { start: 9, limit: 12 }));
    assert_eq!(search.previous(), Some(Match { start: 5, limit: 8 }));
    assert_eq!(search.previous(), None);
}

#[test]
fn removing_the_oracle_restores_substring_matches() {
    let mut search = StringSearch::with_break_oracle(
        "fox",
        "foxy",
        RuleCollator::root(),
        Box::new(WordBreaks::new()),
    )
    .expect("search");
    assert_eq!(search.first(), None);
    search.set_break_oracle(None);
    assert!(!search.has_break_oracle());
    assert_eq!(search.first(), Some(Match { start: 0, limit: 3 }));
}

#[test]
fn prefix_may_end_before_a_spacing_mark_without_an_oracle() {
    let mut search =
        StringSearch::new("\u{915}", "\u{915}\u{93e}", RuleCollator::root()).expect("search");
    assert_eq!(search.first(), Some(Match { start: 0, limit: 3 }));

    search.set_break_oracle(Some(Box::new(GraphemeBreaks::new())));
    assert_eq!(search.first(), None);
}

#[test]
fn combining_mark_alone_does_not_match_inside_a_cluster() {
    let mut search =
        StringSearch::new("\u{301}", "\u{301} e\u{301}", RuleCollator::root()).expect("search");
    let starts: Vec<usize> = search.matches().map(|m| m.start).collect();
    assert_eq!(starts, vec![0]);
}

#[test]
fn primary_match_absorbs_trailing_marks() {
    let coll = RuleCollator::root().with_strength(Strength::Primary);
    let mut search = StringSearch::new("cafe", "un cafe\u{301}!", coll).expect("search");
    assert_eq!(search.first(), Some(Match { start: 3, limit: 9 }));
    assert_eq!(search.matched_text(), Some("cafe\u{301}"));
}

#[test]
fn pattern_base_weights_act_as_wildcards() {
    let mut search =
        StringSearch::new("resume", "My R\u{e9}sum\u{e9}", RuleCollator::root()).expect("search");
    assert_eq!(search.first(), None);
    search.set_element_comparison(ElementComparison::PatternBaseWeightIsWildcard);
    assert_eq!(search.first(), Some(Match { start: 3, limit: 11 }));
}

#[test]
fn any_base_weight_matches_in_both_directions() {
    let mut search = StringSearch::new("RESUME", "resume", RuleCollator::root()).expect("search");
    search.set_element_comparison(ElementComparison::PatternBaseWeightIsWildcard);
    assert_eq!(search.first(), None);
    search.set_element_comparison(ElementComparison::AnyBaseWeightIsWildcard);
    assert_eq!(search.first(), Some(Match { start: 0, limit: 6 }));
}
