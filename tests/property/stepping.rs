//! Stepping properties over small alphabets, checked against a byte-level
//! reference where the collator reduces to exact matching, plus direction
//! symmetry over expansions and combining sequences.

use proptest::prelude::*;

use collsearch::{german_collator, Match, RuleCollator, StringSearch, Strength};

fn text_strategy(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', ' ']), 1..=max_len)
        .prop_map(|chars| chars.into_iter().collect())
}

fn pattern_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b']), 1..=3)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Text built from whole clusters: precomposed and decomposed accented
/// letters, the German sharp s, and plain letters.
fn cluster_text_strategy(max_clusters: usize) -> impl Strategy<Value = String> {
    let clusters = vec!["a", "\u{e0}", "a\u{301}", "\u{df}", "s", " "];
    prop::collection::vec(prop::sample::select(clusters), 1..=max_clusters)
        .prop_map(|parts| parts.concat())
}

fn cluster_pattern_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!["a", "s", "\u{e0}", "\u{df}"]), 1..=3)
        .prop_map(|parts| parts.concat())
}

fn forward_all(search: &mut StringSearch) -> Vec<Match> {
    search.matches().collect()
}

fn backward_all(search: &mut StringSearch) -> Vec<Match> {
    let mut out = Vec::new();
    let mut next = search.last();
    while let Some(found) = next {
        out.push(found);
        next = search.previous();
    }
    out
}

/// Every byte offset where `pattern` occurs in `text`.
fn naive_overlapping(text: &str, pattern: &str) -> Vec<usize> {
    (0..=text.len().saturating_sub(pattern.len()))
        .filter(|&i| text[i..].starts_with(pattern))
        .collect()
}

/// Greedy left-to-right non-overlapping occurrences.
fn naive_disjoint(text: &str, pattern: &str) -> Vec<usize> {
    let mut out = Vec::new();
    let mut i = 0;
    while let Some(pos) = text[i..].find(pattern) {
        out.push(i + pos);
        i += pos + pattern.len();
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn overlapping_matches_agree_with_byte_search(
        text in text_strategy(24),
        pattern in pattern_strategy()
    ) {
        let mut search = StringSearch::new(&pattern, &text, RuleCollator::root()).unwrap();
        search.set_overlap(true);
        let starts: Vec<usize> = forward_all(&mut search).iter().map(|m| m.start).collect();
        prop_assert_eq!(starts, naive_overlapping(&text, &pattern));
    }

    #[test]
    fn disjoint_matches_agree_with_greedy_scan(
        text in text_strategy(24),
        pattern in pattern_strategy()
    ) {
        let mut search = StringSearch::new(&pattern, &text, RuleCollator::root()).unwrap();
        let found = forward_all(&mut search);
        let starts: Vec<usize> = found.iter().map(|m| m.start).collect();
        prop_assert_eq!(starts, naive_disjoint(&text, &pattern));
        for m in &found {
            prop_assert_eq!(m.len(), pattern.len());
        }
    }

    #[test]
    fn disjoint_matches_are_ordered_and_do_not_overlap(
        text in text_strategy(24),
        pattern in pattern_strategy()
    ) {
        let coll = RuleCollator::root().with_strength(Strength::Primary);
        let mut search = StringSearch::new(&pattern, &text.to_uppercase(), coll).unwrap();
        let found = forward_all(&mut search);
        for pair in found.windows(2) {
            prop_assert!(pair[0].limit <= pair[1].start, "{:?}", pair);
        }
    }

    #[test]
    fn overlapping_backward_mirrors_forward(
        text in text_strategy(20),
        pattern in pattern_strategy()
    ) {
        let mut search = StringSearch::new(&pattern, &text, RuleCollator::root()).unwrap();
        search.set_overlap(true);
        let forward = forward_all(&mut search);
        let mut backward = backward_all(&mut search);
        backward.reverse();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn overlapping_backward_mirrors_forward_across_clusters(
        text in cluster_text_strategy(10),
        pattern in cluster_pattern_strategy()
    ) {
        let coll = german_collator().with_strength(Strength::Primary);
        let mut search = StringSearch::new(&pattern, &text, coll).unwrap();
        search.set_overlap(true);
        let forward = forward_all(&mut search);
        let mut backward = backward_all(&mut search);
        backward.reverse();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn reset_is_idempotent(
        text in text_strategy(16),
        pattern in pattern_strategy(),
        steps in 0usize..4
    ) {
        let mut search = StringSearch::new(&pattern, &text, RuleCollator::root()).unwrap();
        let fresh = forward_all(&mut search);
        for _ in 0..steps {
            search.next();
        }
        search.reset();
        search.reset();
        prop_assert_eq!(search.index(), 0);
        prop_assert_eq!(search.current_match(), None);
        prop_assert_eq!(forward_all(&mut search), fresh);
    }

    #[test]
    fn following_finds_first_match_at_or_after_index(
        text in text_strategy(16),
        pattern in pattern_strategy(),
        index in 0usize..16
    ) {
        let index = index.min(text.len());
        let mut search = StringSearch::new(&pattern, &text, RuleCollator::root()).unwrap();
        let expected = naive_overlapping(&text, &pattern)
            .into_iter()
            .find(|&start| start >= index);
        let found = search.following(index).unwrap().map(|m| m.start);
        prop_assert_eq!(found, expected);
    }
}
