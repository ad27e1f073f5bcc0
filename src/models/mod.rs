//! Data structures for the picker: activities, rosters, results and the board.

mod activity;
mod board;
mod outcome;
mod roster;

pub use activity::{Activity, MatchMode, UnknownActivity};
pub use board::{ActivityBoard, BoardId, GameState, GenerationTicket, PickerError, SpeakerState};
pub use outcome::{GameMatch, GroupOutcome, MatchOutcome, PoolQuota, SquadOutcome};
pub use roster::{Pool, RosterBook, RosterError, RosterSummary};
