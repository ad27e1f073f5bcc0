//! General mode: split the shuffled roster into fixed-size groups.

use crate::logic::shuffle::draw_roster;
use crate::models::{Activity, ActivityBoard, GenerationTicket, GroupOutcome, PickerError, RosterBook};
use chrono::Utc;
use log::debug;
use rand::Rng;
use std::str::FromStr;

/// Validated group size (at least 2).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GroupSize(usize);

impl GroupSize {
    pub const MIN: usize = 2;

    pub fn new(size: usize) -> Result<Self, PickerError> {
        if size < Self::MIN {
            return Err(PickerError::InvalidGroupSize(size.to_string()));
        }
        Ok(Self(size))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for GroupSize {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<usize> for GroupSize {
    type Error = PickerError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl FromStr for GroupSize {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .map_err(|_| PickerError::InvalidGroupSize(s.to_string()))
            .and_then(Self::new)
    }
}

/// Accepts a JSON number or a numeric string (form inputs send either).
impl TryFrom<&serde_json::Value> for GroupSize {
    type Error = PickerError;

    fn try_from(raw: &serde_json::Value) -> Result<Self, Self::Error> {
        match raw {
            serde_json::Value::Number(n) => n
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| PickerError::InvalidGroupSize(n.to_string()))
                .and_then(Self::new),
            serde_json::Value::String(s) => s.parse(),
            other => Err(PickerError::InvalidGroupSize(other.to_string())),
        }
    }
}

/// Consecutive blocks of `size` in roster order; the final partial block is the leftover.
pub fn partition_into_groups(roster: &[String], size: GroupSize) -> GroupOutcome {
    let k = size.get();
    let chunks = roster.chunks_exact(k);
    let leftover = chunks.remainder().to_vec();
    let groups: Vec<Vec<String>> = chunks.map(|c| c.to_vec()).collect();
    let used = groups.iter().flatten().cloned().collect();
    GroupOutcome {
        group_size: k,
        groups,
        leftover,
        used,
        generated_at: Utc::now(),
    }
}

/// Draw a fresh general roster and replace the board's groups.
///
/// The roster is the eligible speaker list. On error the previous groups stay in place.
pub fn generate_groups<R: Rng + ?Sized>(
    board: &mut ActivityBoard,
    ticket: GenerationTicket,
    book: &RosterBook,
    size: GroupSize,
    rng: &mut R,
) -> Result<(), PickerError> {
    board.check_ticket_for(ticket, Activity::General)?;
    let drawn = draw_roster(book, Activity::General, rng);
    board.finish_generation(ticket);
    let roster = drawn?;

    let outcome = partition_into_groups(&roster, size);
    debug!(
        "general: {} groups of {}, {} left over",
        outcome.groups.len(),
        outcome.group_size,
        outcome.leftover.len()
    );
    board.groups = Some(outcome);
    Ok(())
}
