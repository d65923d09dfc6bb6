//! End-to-end searches over the bundled collators.

use collsearch::{german_collator, Match, RuleCollator, SearchError, StringSearch, Strength};

fn starts(search: &mut StringSearch) -> Vec<usize> {
    search.matches().map(|m| m.start).collect()
}

fn ranges(search: &mut StringSearch) -> Vec<(usize, usize)> {
    search.matches().map(|m| (m.start, m.limit)).collect()
}

fn ranges_backward(search: &mut StringSearch) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut next = search.last();
    while let Some(found) = next {
        out.push((found.start, found.limit));
        next = search.previous();
    }
    out.reverse();
    out
}

fn starts_backward(search: &mut StringSearch) -> Vec<usize> {
    let mut out = Vec::new();
    let mut next = search.last();
    while let Some(found) = next {
        out.push(found.start);
        next = search.previous();
    }
    out
}

#[test]
fn primary_strength_ignores_case() {
    let coll = RuleCollator::root().with_strength(Strength::Primary);
    let mut search = StringSearch::new("cat", "The CAT sat", coll).expect("search");
    assert_eq!(search.first(), Some(Match { start: 4, limit: 7 }));
    assert_eq!(search.match_start(), Some(4));
    assert_eq!(search.match_length(), 3);
    assert_eq!(search.matched_text(), Some("CAT"));
    assert_eq!(search.next(), None);
}

#[test]
fn sharp_s_matches_double_s() {
    let mut search = StringSearch::new("ss", "\u{df}", german_collator()).expect("search");
    assert_eq!(search.first(), Some(Match { start: 0, limit: 2 }));
    assert_eq!(search.match_length(), 2);

    let mut search =
        StringSearch::new("STRASSE", "Die Stra\u{df}e", german_collator()).expect("search");
    assert_eq!(search.first(), Some(Match { start: 4, limit: 11 }));
    assert_eq!(search.matched_text(), Some("Stra\u{df}e"));
}

#[test]
fn empty_pattern_is_an_error() {
    let err = StringSearch::new("", "abc", RuleCollator::root()).unwrap_err();
    assert_eq!(err, SearchError::EmptyPattern);
    assert_eq!(err.to_string(), "search pattern is empty");
}

#[test]
fn overlap_controls_adjacent_matches() {
    let mut search = StringSearch::new("aa", "aaaa", RuleCollator::root()).expect("search");
    assert_eq!(starts(&mut search), vec![0, 2]);
    assert_eq!(starts_backward(&mut search), vec![2, 0]);

    search.set_overlap(true);
    assert_eq!(starts(&mut search), vec![0, 1, 2]);
    assert_eq!(starts_backward(&mut search), vec![2, 1, 0]);
}

#[test]
fn overlap_with_longer_period() {
    let mut search =
        StringSearch::new("abab", "abababab", RuleCollator::root()).expect("search");
    assert_eq!(starts(&mut search), vec![0, 4]);
    assert_eq!(starts_backward(&mut search), vec![4, 0]);
    search.set_overlap(true);
    assert_eq!(starts(&mut search), vec![0, 2, 4]);
    assert_eq!(starts_backward(&mut search), vec![4, 2, 0]);
}

#[test]
fn overlapping_backward_keeps_combining_sequences_whole() {
    let cases = [
        ("a", "aa\u{301}", vec![(0, 1), (1, 4)]),
        ("\u{e0}", "aa\u{301}", vec![(0, 1), (1, 4)]),
        ("a\u{301}", "aa\u{301}", vec![(0, 1), (1, 4)]),
        ("a", "Aa\u{301}", vec![(0, 1), (1, 4)]),
        ("a", "\u{e0}a\u{301}", vec![(0, 2), (2, 5)]),
    ];
    for (pattern, text, expected) in cases {
        let coll = RuleCollator::root().with_strength(Strength::Primary);
        let mut search = StringSearch::new(pattern, text, coll).expect("search");
        search.set_overlap(true);
        assert_eq!(ranges(&mut search), expected, "forward {pattern:?} in {text:?}");
        assert_eq!(
            ranges_backward(&mut search),
            expected,
            "backward {pattern:?} in {text:?}"
        );
    }
}

#[test]
fn overlapping_backward_finds_adjacent_expansions() {
    let cases = [
        ("\u{df}\u{df}", vec![(0, 2), (2, 4)]),
        ("\u{df}\u{df}a", vec![(0, 2), (2, 4)]),
        ("\u{df}\u{df}\u{e0}", vec![(0, 2), (2, 4)]),
    ];
    for (text, expected) in cases {
        let coll = german_collator().with_strength(Strength::Primary);
        let mut search = StringSearch::new("ss", text, coll).expect("search");
        search.set_overlap(true);
        assert_eq!(ranges(&mut search), expected, "forward in {text:?}");
        assert_eq!(ranges_backward(&mut search), expected, "backward in {text:?}");
    }
}

#[test]
fn identical_matches_either_spelling() {
    let identical = RuleCollator::root().with_strength(Strength::Identical);

    let mut search =
        StringSearch::new("\u{e9}", "cafe\u{301}", identical.clone()).expect("search");
    assert_eq!(search.first(), Some(Match { start: 3, limit: 6 }));
    search.set_canonical(true);
    assert_eq!(search.first(), Some(Match { start: 3, limit: 6 }));

    let mut search = StringSearch::new("e\u{301}", "caf\u{e9}", identical).expect("search");
    assert_eq!(search.first(), Some(Match { start: 3, limit: 5 }));
    search.set_canonical(true);
    assert_eq!(search.first(), Some(Match { start: 3, limit: 5 }));
    assert_eq!(search.last(), Some(Match { start: 3, limit: 5 }));
}

#[test]
fn finds_word_after_near_misses() {
    let mut search =
        StringSearch::new("string", "silly spring string", RuleCollator::root()).expect("search");
    assert_eq!(search.first().map(|m| m.start), Some(13));
    assert_eq!(search.next(), None);
}

#[test]
fn accented_letter_is_not_its_base_at_tertiary() {
    let mut search = StringSearch::new("A", "A\u{c0}C", RuleCollator::root()).expect("search");
    assert_eq!(starts(&mut search), vec![0]);

    let mut search = StringSearch::new("A", "\u{c0}", RuleCollator::root()).expect("search");
    assert_eq!(search.first(), None);
    assert_eq!(search.last(), None);
}

#[test]
fn accented_letter_is_its_base_at_primary() {
    let coll = RuleCollator::root().with_strength(Strength::Primary);
    let mut search = StringSearch::new("A", "A\u{c0}C", coll).expect("search");
    let found: Vec<Match> = search.matches().collect();
    assert_eq!(
        found,
        vec![Match { start: 0, limit: 1 }, Match { start: 1, limit: 3 }]
    );
}

#[test]
fn no_match_is_not_an_error() {
    let mut search = StringSearch::new("xyz", "abc", RuleCollator::root()).expect("search");
    assert_eq!(search.first(), None);
    assert_eq!(search.last(), None);
    assert_eq!(search.current_match(), None);
    assert_eq!(search.matched_text(), None);
}
