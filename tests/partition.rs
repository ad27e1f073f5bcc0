//! Integration tests for shuffling, general groups and match pairing.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
use team_activity_picker::{
    pair_into_matches, partition_into_groups, shuffle_roster, GroupSize, MatchMode, PickerError,
};

fn roster(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("P{i}")).collect()
}

fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}

#[test]
fn shuffle_is_a_permutation_and_leaves_input_alone() {
    let original = roster(25);
    let before = original.clone();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let shuffled = shuffle_roster(&original, &mut rng);
        assert_eq!(shuffled.len(), original.len());
        assert_eq!(sorted(shuffled), sorted(original.clone()));
    }
    assert_eq!(original, before);
}

#[test]
fn shuffle_keeps_duplicates() {
    let names: Vec<String> = ["Ann", "Ann", "Bo"].iter().map(|s| s.to_string()).collect();
    let shuffled = shuffle_roster(&names, &mut StdRng::seed_from_u64(1));
    assert_eq!(shuffled.iter().filter(|n| *n == "Ann").count(), 2);
}

#[test]
fn shuffle_of_empty_is_empty() {
    let empty: Vec<String> = Vec::new();
    assert!(shuffle_roster(&empty, &mut StdRng::seed_from_u64(3)).is_empty());
}

#[test]
fn shuffle_is_reproducible_with_same_seed() {
    let r = roster(12);
    let a = shuffle_roster(&r, &mut StdRng::seed_from_u64(42));
    let b = shuffle_roster(&r, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn group_size_below_two_is_rejected() {
    assert!(matches!(GroupSize::new(0), Err(PickerError::InvalidGroupSize(_))));
    assert!(matches!(GroupSize::new(1), Err(PickerError::InvalidGroupSize(_))));
    assert_eq!(GroupSize::new(2).unwrap().get(), 2);
    assert_eq!(GroupSize::default().get(), 2);
}

#[test]
fn group_size_parses_numbers_only() {
    assert_eq!(" 4 ".parse::<GroupSize>().unwrap().get(), 4);
    assert!(matches!("abc".parse::<GroupSize>(), Err(PickerError::InvalidGroupSize(_))));
    assert!(matches!("1".parse::<GroupSize>(), Err(PickerError::InvalidGroupSize(_))));
    assert!(matches!("-3".parse::<GroupSize>(), Err(PickerError::InvalidGroupSize(_))));
}

#[test]
fn group_size_from_json_accepts_number_or_string() {
    let n = serde_json::json!(3);
    let s = serde_json::json!("5");
    assert_eq!(GroupSize::try_from(&n).unwrap().get(), 3);
    assert_eq!(GroupSize::try_from(&s).unwrap().get(), 5);
    for bad in [serde_json::json!(1), serde_json::json!(2.5), serde_json::json!(null), serde_json::json!("x")] {
        assert!(GroupSize::try_from(&bad).is_err(), "{bad} should be rejected");
    }
}

#[test]
fn ten_people_in_threes_gives_three_groups_and_one_leftover() {
    let r = roster(10);
    let outcome = partition_into_groups(&r, GroupSize::new(3).unwrap());
    assert_eq!(outcome.groups.len(), 3);
    assert!(outcome.groups.iter().all(|g| g.len() == 3));
    assert_eq!(outcome.leftover, vec!["P9".to_string()]);
    assert_eq!(outcome.used.len(), 9);
    assert!(!outcome.is_perfect());
    assert_eq!(outcome.headline(), "Some players get a break this round!");
}

#[test]
fn groups_follow_roster_order() {
    let r = roster(6);
    let outcome = partition_into_groups(&r, GroupSize::new(2).unwrap());
    assert_eq!(
        outcome.groups,
        vec![
            vec!["P0".to_string(), "P1".to_string()],
            vec!["P2".to_string(), "P3".to_string()],
            vec!["P4".to_string(), "P5".to_string()],
        ]
    );
    assert!(outcome.is_perfect());
    assert_eq!(outcome.headline(), "Perfect matching achieved!");
}

#[test]
fn groups_cover_roster_exactly_for_many_sizes() {
    let mut rng = StdRng::seed_from_u64(11);
    for n in 0..30 {
        for k in 2..8 {
            let r = shuffle_roster(&roster(n), &mut rng);
            let outcome = partition_into_groups(&r, GroupSize::new(k).unwrap());
            assert!(outcome.leftover.len() < k);
            assert_eq!(outcome.groups.len(), n / k);
            for g in &outcome.groups {
                assert_eq!(g.len(), k);
                assert_eq!(g.iter().collect::<BTreeSet<_>>().len(), k);
            }
            let all: Vec<String> = outcome
                .groups
                .iter()
                .flatten()
                .chain(outcome.leftover.iter())
                .cloned()
                .collect();
            assert_eq!(sorted(all), sorted(r));
        }
    }
}

#[test]
fn roster_smaller_than_group_is_all_leftover() {
    let outcome = partition_into_groups(&roster(3), GroupSize::new(5).unwrap());
    assert!(outcome.groups.is_empty());
    assert_eq!(outcome.leftover.len(), 3);
    assert!(outcome.used.is_empty());
}

#[test]
fn seven_players_one_v_one_gives_three_matches_one_reserve() {
    let outcome = pair_into_matches(&roster(7), MatchMode::OneVOne);
    assert_eq!(outcome.matches.len(), 3);
    for m in &outcome.matches {
        assert_eq!(m.team_1.len(), 1);
        assert_eq!(m.team_2.len(), 1);
    }
    assert_eq!(outcome.leftover, vec!["P6".to_string()]);
    assert_eq!(outcome.used.len(), 6);
    assert!(!outcome.used.contains("P6"));
}

#[test]
fn ten_players_two_v_two_gives_two_matches_two_reserves() {
    let outcome = pair_into_matches(&roster(10), MatchMode::TwoVTwo);
    assert_eq!(outcome.matches.len(), 2);
    assert_eq!(outcome.matches[0].team_1, vec!["P0".to_string(), "P1".to_string()]);
    assert_eq!(outcome.matches[0].team_2, vec!["P2".to_string(), "P3".to_string()]);
    assert_eq!(outcome.matches[1].team_1, vec!["P4".to_string(), "P5".to_string()]);
    assert_eq!(outcome.matches[1].team_2, vec!["P6".to_string(), "P7".to_string()]);
    assert_eq!(outcome.leftover, vec!["P8".to_string(), "P9".to_string()]);
    assert_eq!(outcome.mode, MatchMode::TwoVTwo);
}

#[test]
fn short_roster_makes_no_partial_match() {
    let outcome = pair_into_matches(&roster(3), MatchMode::TwoVTwo);
    assert!(outcome.matches.is_empty());
    assert_eq!(outcome.leftover.len(), 3);

    let empty: Vec<String> = Vec::new();
    let outcome = pair_into_matches(&empty, MatchMode::OneVOne);
    assert!(outcome.matches.is_empty());
    assert!(outcome.leftover.is_empty());
    assert!(outcome.is_perfect());
}

#[test]
fn same_order_gives_same_boundaries() {
    let r = roster(11);
    let a = pair_into_matches(&r, MatchMode::TwoVTwo);
    let b = pair_into_matches(&r, MatchMode::TwoVTwo);
    assert_eq!(a.matches, b.matches);
    assert_eq!(a.leftover, b.leftover);

    let size = GroupSize::new(4).unwrap();
    assert_eq!(
        partition_into_groups(&r, size).groups,
        partition_into_groups(&r, size).groups
    );
}

#[test]
fn match_serializes_with_team1_team2_fields() {
    let outcome = pair_into_matches(&roster(2), MatchMode::OneVOne);
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["mode"], "1v1");
    assert_eq!(json["matches"][0]["team1"][0], "P0");
    assert_eq!(json["matches"][0]["team2"][0], "P1");
}
