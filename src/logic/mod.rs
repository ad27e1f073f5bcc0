//! Picker logic: shuffling, grouping, pairing, squad building and speaker picks.

mod groups;
mod matches;
mod shuffle;
mod speaker;
mod squads;

pub use groups::{generate_groups, partition_into_groups, GroupSize};
pub use matches::{generate_matches, pair_into_matches};
pub use shuffle::shuffle_roster;
pub use speaker::{eligible_speakers, pick_board_speaker, pick_speaker};
pub use squads::{build_squads, generate_squads, SplitPolicy};
