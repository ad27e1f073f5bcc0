//! Results of one generation round: groups, matches, squads.

use crate::models::activity::MatchMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const PERFECT_HEADLINE: &str = "Perfect matching achieved!";
const BREAK_HEADLINE: &str = "Some players get a break this round!";

fn headline_for(leftover: &[String]) -> &'static str {
    if leftover.is_empty() {
        PERFECT_HEADLINE
    } else {
        BREAK_HEADLINE
    }
}

/// A single match: two equal-size teams (1 each for 1v1, 2 each for 2v2).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    #[serde(rename = "team1")]
    pub team_1: Vec<String>,
    #[serde(rename = "team2")]
    pub team_2: Vec<String>,
}

impl GameMatch {
    pub fn new(team_1: Vec<String>, team_2: Vec<String>) -> Self {
        Self { team_1, team_2 }
    }
}

/// General mode result: full groups plus the people sitting this round out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupOutcome {
    pub group_size: usize,
    pub groups: Vec<Vec<String>>,
    pub leftover: Vec<String>,
    /// Everyone placed into a committed group.
    pub used: BTreeSet<String>,
    pub generated_at: DateTime<Utc>,
}

impl GroupOutcome {
    pub fn is_perfect(&self) -> bool {
        self.leftover.is_empty()
    }

    pub fn headline(&self) -> &'static str {
        headline_for(&self.leftover)
    }
}

/// 1v1 / 2v2 result: matches plus the reserve list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub mode: MatchMode,
    pub matches: Vec<GameMatch>,
    pub leftover: Vec<String>,
    pub used: BTreeSet<String>,
    pub generated_at: DateTime<Utc>,
}

impl MatchOutcome {
    pub fn is_perfect(&self) -> bool {
        self.leftover.is_empty()
    }

    pub fn headline(&self) -> &'static str {
        headline_for(&self.leftover)
    }
}

/// How many players one pool contributed to each squad.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PoolQuota {
    pub label: String,
    pub team_a: usize,
    pub team_b: usize,
}

/// Two stratified squads with their own reserve benches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SquadOutcome {
    pub team_a: Vec<String>,
    pub team_b: Vec<String>,
    pub reserves_a: Vec<String>,
    pub reserves_b: Vec<String>,
    pub quotas: Vec<PoolQuota>,
    pub generated_at: DateTime<Utc>,
}

impl SquadOutcome {
    /// All reserves, team A's bench first.
    pub fn reserves(&self) -> impl Iterator<Item = &String> {
        self.reserves_a.iter().chain(self.reserves_b.iter())
    }

    /// Squads with equal pool contributions on both sides.
    pub fn is_balanced(&self) -> bool {
        self.team_a.len() == self.team_b.len()
    }
}
