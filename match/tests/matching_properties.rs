use lottery_match::engine::data::RecentPairSet;
use lottery_match::engine::entry::GroupBounds;
use lottery_match::{create_matches, MatchingInput, MatchingResult};
use proptest::prelude::*;

fn ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("user-{}", i)).collect()
}

fn input(participants: Vec<String>, min: usize, max: usize, seed: &str) -> MatchingInput {
    MatchingInput {
        participant_ids: participants,
        group_size_min: min,
        group_size_max: max,
        recent_matches: Vec::new(),
        seed: seed.to_string(),
    }
}

fn flattened(result: &MatchingResult) -> Vec<String> {
    let mut all: Vec<String> = result.matches.concat();
    all.extend(result.unmatched.iter().cloned());
    all.sort();
    all
}

fn history_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(
        prop::collection::vec((0usize..30).prop_map(|i| format!("user-{}", i)), 0..5),
        0..12,
    )
}

proptest! {
    /// Every participant lands in exactly one group or in `unmatched`.
    #[test]
    fn partition_is_complete(
        n in 0usize..40,
        min in 0usize..6,
        max in 0usize..6,
        recent in history_strategy(),
        seed in "[a-z0-9-]{0,12}",
    ) {
        let mut request = input(ids(n), min, max, &seed);
        request.recent_matches = recent;
        let result = create_matches(&request);
        let mut expected = ids(n);
        expected.sort();
        prop_assert_eq!(flattened(&result), expected);
    }

    /// Groups respect the normalized bounds and the leftover stays below the minimum.
    #[test]
    fn groups_respect_bounds(n in 0usize..40, min in 0usize..6, max in 0usize..6, seed in "[a-z]{1,8}") {
        let bounds = GroupBounds::normalized(min, max);
        let result = create_matches(&input(ids(n), min, max, &seed));
        for group in &result.matches {
            prop_assert!(bounds.contains(group.len()), "group of {} outside {:?}", group.len(), bounds);
        }
        if result.matches.is_empty() {
            prop_assert_eq!(result.unmatched.len(), n);
            prop_assert!(n < bounds.min());
        } else {
            prop_assert!(result.unmatched.len() < bounds.min());
        }
    }

    /// Identical inputs give identical results.
    #[test]
    fn matching_is_deterministic(n in 0usize..30, recent in history_strategy(), seed in ".{0,16}") {
        let mut request = input(ids(n), 2, 3, &seed);
        request.recent_matches = recent;
        prop_assert_eq!(create_matches(&request), create_matches(&request));
    }
}

#[test]
fn example_four_participants() {
    let request = input(
        vec!["a".into(), "b".into(), "c".into(), "d".into()],
        2,
        2,
        "run-42",
    );
    let first = create_matches(&request);
    assert_eq!(first.matches.len(), 2);
    assert!(first.matches.iter().all(|g| g.len() == 2));
    assert!(first.unmatched.is_empty());
    assert_eq!(create_matches(&request), first);
}

#[test]
fn remainder_distribution_seven_participants() {
    let result = create_matches(&input(ids(7), 2, 3, "remainder"));
    let mut sizes: Vec<usize> = result.matches.iter().map(Vec::len).collect();
    assert_eq!(sizes[0], 3);
    sizes.sort();
    assert_eq!(sizes, vec![2, 2, 3]);
    assert!(result.unmatched.is_empty());
}

#[test]
fn seed_changes_assignment() {
    let results: Vec<MatchingResult> = ["alpha", "beta", "gamma", "delta", "epsilon"]
        .iter()
        .map(|seed| create_matches(&input(ids(12), 3, 3, seed)))
        .collect();
    assert!(results.iter().any(|r| r.matches != results[0].matches));
}

#[test]
fn avoids_recent_pairs_when_feasible() {
    let mut request = input(ids(6), 2, 2, "feasible");
    request.recent_matches = vec![vec!["user-0".into(), "user-1".into()]];
    let result = create_matches(&request);
    let recent = RecentPairSet::from_groups(&request.recent_matches);
    assert!(result.matches.iter().all(|g| !recent.conflicts_with(g)));
    assert_eq!(result.matches.len(), 3);
}

#[test]
fn infeasible_history_still_partitions() {
    let mut request = input(vec!["a".into(), "b".into()], 2, 2, "stuck");
    request.recent_matches = vec![vec!["a".into(), "b".into()]; 5];
    let result = create_matches(&request);
    assert_eq!(result.matches.len(), 1);
    assert!(result.unmatched.is_empty());
    assert_eq!(flattened(&result), vec!["a", "b"]);
}
