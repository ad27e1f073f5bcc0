//! Activity categories and the 1v1 / 2v2 match mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tab of the picker: one source roster and one kind of result.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    /// Fixed-size groups drawn from the speaker list.
    General,
    Chess,
    Carrom,
    Badminton,
    /// Two stratified squads built from labeled pools.
    Cricket,
    Speaker,
}

impl Activity {
    pub const GAMES: [Activity; 3] = [Activity::Chess, Activity::Carrom, Activity::Badminton];

    /// True for activities that produce head-to-head matches.
    pub fn is_game(self) -> bool {
        Self::GAMES.contains(&self)
    }

    /// Mode a game starts in (chess is 1v1, the rest 2v2). None for non-games.
    pub fn default_mode(self) -> Option<MatchMode> {
        match self {
            Activity::Chess => Some(MatchMode::OneVOne),
            Activity::Carrom | Activity::Badminton => Some(MatchMode::TwoVTwo),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Activity::General => "general",
            Activity::Chess => "chess",
            Activity::Carrom => "carrom",
            Activity::Badminton => "badminton",
            Activity::Cricket => "cricket",
            Activity::Speaker => "speaker",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known activity.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownActivity(pub String);

impl fmt::Display for UnknownActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown activity '{}'", self.0)
    }
}

impl std::error::Error for UnknownActivity {}

impl FromStr for Activity {
    type Err = UnknownActivity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(Activity::General),
            "chess" => Ok(Activity::Chess),
            "carrom" => Ok(Activity::Carrom),
            "badminton" => Ok(Activity::Badminton),
            "cricket" => Ok(Activity::Cricket),
            "speaker" | "speakers" => Ok(Activity::Speaker),
            _ => Err(UnknownActivity(s.to_string())),
        }
    }
}

/// Head-to-head format: one player per side or two.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum MatchMode {
    #[default]
    #[serde(rename = "1v1")]
    OneVOne,
    #[serde(rename = "2v2")]
    TwoVTwo,
}

impl MatchMode {
    /// Players on each side of a match.
    pub fn team_size(self) -> usize {
        match self {
            MatchMode::OneVOne => 1,
            MatchMode::TwoVTwo => 2,
        }
    }

    /// Players consumed by one match (both teams).
    pub fn block_size(self) -> usize {
        self.team_size() * 2
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::OneVOne => f.write_str("1v1"),
            MatchMode::TwoVTwo => f.write_str("2v2"),
        }
    }
}
