//! Cricket: two squads built from labeled pools, each squad taking a quota from every pool.

use crate::logic::shuffle::shuffle_roster;
use crate::models::{
    Activity, ActivityBoard, GenerationTicket, PickerError, Pool, PoolQuota, RosterBook,
    SquadOutcome,
};
use chrono::Utc;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where an odd-sized list is cut between team A and team B.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPolicy {
    /// Team A gets the extra player.
    #[default]
    RoundUp,
    /// Team B gets the extra player.
    RoundDown,
    /// Odd pools are rejected. Reserve benches still round up.
    RequireEven,
}

impl SplitPolicy {
    /// Team A's share of a pool of `len`, or None if the pool must be rejected.
    pub fn pool_midpoint(self, len: usize) -> Option<usize> {
        match self {
            SplitPolicy::RoundUp => Some(len.div_ceil(2)),
            SplitPolicy::RoundDown => Some(len / 2),
            SplitPolicy::RequireEven if len % 2 == 0 => Some(len / 2),
            SplitPolicy::RequireEven => None,
        }
    }

    /// Team A's share of the reserve bench.
    pub fn reserve_midpoint(self, len: usize) -> usize {
        match self {
            SplitPolicy::RoundDown => len / 2,
            SplitPolicy::RoundUp | SplitPolicy::RequireEven => len.div_ceil(2),
        }
    }
}

impl fmt::Display for SplitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitPolicy::RoundUp => f.write_str("round_up"),
            SplitPolicy::RoundDown => f.write_str("round_down"),
            SplitPolicy::RequireEven => f.write_str("require_even"),
        }
    }
}

impl FromStr for SplitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "round_up" | "up" | "ceil" => Ok(SplitPolicy::RoundUp),
            "round_down" | "down" | "floor" => Ok(SplitPolicy::RoundDown),
            "require_even" | "even" | "reject" => Ok(SplitPolicy::RequireEven),
            other => Err(format!("unknown split policy '{}'", other)),
        }
    }
}

/// Shuffle each pool on its own and cut it between the squads; shuffle the extras into two benches.
///
/// Odd pools are checked before any shuffling, so a rejected call consumes no randomness.
pub fn build_squads<R: Rng + ?Sized>(
    pools: &[Pool],
    extras: &[String],
    policy: SplitPolicy,
    rng: &mut R,
) -> Result<SquadOutcome, PickerError> {
    let mut midpoints = Vec::with_capacity(pools.len());
    for pool in pools {
        let size = pool.members.len();
        let mid = policy.pool_midpoint(size).ok_or_else(|| PickerError::UnevenPool {
            label: pool.label.clone(),
            size,
        })?;
        midpoints.push(mid);
    }

    let mut team_a = Vec::new();
    let mut team_b = Vec::new();
    let mut quotas = Vec::with_capacity(pools.len());
    for (pool, mid) in pools.iter().zip(midpoints) {
        let shuffled = shuffle_roster(&pool.members, rng);
        let (a, b) = shuffled.split_at(mid);
        quotas.push(PoolQuota {
            label: pool.label.clone(),
            team_a: a.len(),
            team_b: b.len(),
        });
        team_a.extend_from_slice(a);
        team_b.extend_from_slice(b);
    }

    let mut reserves_a = shuffle_roster(extras, rng);
    let reserves_b = reserves_a.split_off(policy.reserve_midpoint(reserves_a.len()));

    Ok(SquadOutcome {
        team_a,
        team_b,
        reserves_a,
        reserves_b,
        quotas,
        generated_at: Utc::now(),
    })
}

/// Build fresh cricket squads from the roster book and replace the board's squads.
pub fn generate_squads<R: Rng + ?Sized>(
    board: &mut ActivityBoard,
    ticket: GenerationTicket,
    book: &RosterBook,
    policy: SplitPolicy,
    rng: &mut R,
) -> Result<(), PickerError> {
    board.check_ticket_for(ticket, Activity::Cricket)?;
    board.finish_generation(ticket);
    if book.players_for(Activity::Cricket).is_empty() {
        return Err(PickerError::EmptyRoster(Activity::Cricket));
    }

    let outcome = build_squads(&book.cricket_pools, &book.cricket_extras, policy, rng)?;
    debug!(
        "cricket: {} vs {} ({} + {} reserves, policy {})",
        outcome.team_a.len(),
        outcome.team_b.len(),
        outcome.reserves_a.len(),
        outcome.reserves_b.len(),
        policy
    );
    board.squads = Some(outcome);
    Ok(())
}
