//! Integration tests for speaker eligibility and picking.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
use team_activity_picker::{eligible_speakers, pick_speaker, PickerError};

fn list(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn exclusions_and_blanks_are_dropped_in_order() {
    let speakers = list(&["Ann", "", "Bo", "Cy", "  "]);
    assert_eq!(eligible_speakers(&speakers, &list(&["Bo"])), list(&["Ann", "Cy"]));
    assert_eq!(eligible_speakers(&speakers, &list(&[""])), list(&["Ann", "Bo", "Cy"]));
}

#[test]
fn pick_never_returns_already_picked() {
    let eligible = list(&["Ann", "Bo", "Cy"]);
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..50 {
        let who = pick_speaker(&eligible, &list(&["Ann", "Cy"]), &mut rng).unwrap();
        assert_eq!(who, "Bo");
    }
}

#[test]
fn pick_eventually_reaches_everyone() {
    let eligible = list(&["Ann", "Bo", "Cy", "Di"]);
    let mut rng = StdRng::seed_from_u64(4);
    let seen: BTreeSet<String> = (0..200)
        .map(|_| pick_speaker(&eligible, &[], &mut rng).unwrap())
        .collect();
    assert_eq!(seen.len(), 4);
}

#[test]
fn empty_or_exhausted_list_is_an_error() {
    let mut rng = StdRng::seed_from_u64(5);
    assert_eq!(pick_speaker(&[], &[], &mut rng), Err(PickerError::NoEligibleSpeakers));
    let eligible = list(&["Ann"]);
    assert_eq!(
        pick_speaker(&eligible, &eligible, &mut rng),
        Err(PickerError::NoEligibleSpeakers)
    );
}
