//! Team activity picker: library with models and picking logic.

pub mod config;
pub mod logic;
pub mod models;

pub use config::AppConfig;
pub use logic::{
    build_squads, eligible_speakers, generate_groups, generate_matches, generate_squads,
    pair_into_matches, partition_into_groups, pick_board_speaker, pick_speaker, shuffle_roster,
    GroupSize, SplitPolicy,
};
pub use models::{
    Activity, ActivityBoard, BoardId, GameMatch, GameState, GenerationTicket, GroupOutcome,
    MatchMode, MatchOutcome, PickerError, Pool, PoolQuota, RosterBook, RosterError,
    RosterSummary, SpeakerState, SquadOutcome, UnknownActivity,
};
