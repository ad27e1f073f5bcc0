//! ActivityBoard: the latest result per activity, owned by the caller.

use crate::models::activity::{Activity, MatchMode};
use crate::models::outcome::{GroupOutcome, MatchOutcome, SquadOutcome};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// User-facing errors. None of them are fatal; the board is left as it was.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PickerError {
    /// Group size was not a number or was below 2.
    InvalidGroupSize(String),
    /// Every eligible speaker has been picked (or none exist).
    NoEligibleSpeakers,
    /// The source list for this activity is empty.
    EmptyRoster(Activity),
    /// Match modes and matches only exist for chess, carrom and badminton.
    NotAGame(Activity),
    /// Odd-sized pool under the require-even split policy.
    UnevenPool { label: String, size: usize },
    /// A newer generate request (or a mode switch) superseded this one.
    StaleGeneration,
}

impl std::fmt::Display for PickerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickerError::InvalidGroupSize(raw) => {
                write!(f, "Please set a valid group size (got '{}', need a number of at least 2)", raw)
            }
            PickerError::NoEligibleSpeakers => write!(f, "No eligible speakers left to pick"),
            PickerError::EmptyRoster(activity) => write!(f, "No players available for {}", activity),
            PickerError::NotAGame(activity) => write!(f, "{} has no head-to-head matches", activity),
            PickerError::UnevenPool { label, size } => {
                write!(f, "Pool '{}' has {} players and cannot be split evenly", label, size)
            }
            PickerError::StaleGeneration => write!(f, "A newer request replaced this one"),
        }
    }
}

impl std::error::Error for PickerError {}

/// Unique identifier for a board.
pub type BoardId = Uuid;

/// Handed out when a generate request starts; only the newest ticket per activity may commit.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GenerationTicket {
    pub activity: Activity,
    pub serial: u64,
}

/// Per-game state: the chosen mode and the last matches generated in it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub mode: MatchMode,
    pub outcome: Option<MatchOutcome>,
}

/// Speaker of the day plus the rotation history.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SpeakerState {
    pub current: Option<String>,
    /// Everyone picked so far, oldest first.
    pub history: Vec<String>,
    /// When set, a speaker is not picked again until the history is reset.
    pub no_repeat: bool,
}

/// Latest results for every activity of one client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActivityBoard {
    pub id: BoardId,
    pub groups: Option<GroupOutcome>,
    pub games: BTreeMap<Activity, GameState>,
    pub squads: Option<SquadOutcome>,
    pub speaker: SpeakerState,
    /// Activities with a generate request in flight.
    pub generating: BTreeSet<Activity>,
    /// Newest ticket serial issued per activity.
    #[serde(default)]
    serials: BTreeMap<Activity, u64>,
}

impl ActivityBoard {
    /// Empty board with every game in its default mode.
    pub fn new(no_repeat_speakers: bool) -> Self {
        let games = Activity::GAMES
            .iter()
            .filter_map(|&g| {
                g.default_mode().map(|mode| (g, GameState { mode, outcome: None }))
            })
            .collect();
        Self {
            id: Uuid::new_v4(),
            groups: None,
            games,
            squads: None,
            speaker: SpeakerState {
                no_repeat: no_repeat_speakers,
                ..SpeakerState::default()
            },
            generating: BTreeSet::new(),
            serials: BTreeMap::new(),
        }
    }

    /// Start a generate request. Any earlier ticket for the same activity becomes stale.
    pub fn begin_generation(&mut self, activity: Activity) -> GenerationTicket {
        let serial = self.serials.entry(activity).or_insert(0);
        *serial += 1;
        self.generating.insert(activity);
        GenerationTicket {
            activity,
            serial: *serial,
        }
    }

    /// Ok if no newer request (or mode switch) has happened since the ticket was issued.
    pub fn check_ticket(&self, ticket: GenerationTicket) -> Result<(), PickerError> {
        match self.serials.get(&ticket.activity) {
            Some(&latest) if latest == ticket.serial => Ok(()),
            _ => Err(PickerError::StaleGeneration),
        }
    }

    /// Like `check_ticket`, but a ticket issued for another activity is stale too.
    pub fn check_ticket_for(&self, ticket: GenerationTicket, activity: Activity) -> Result<(), PickerError> {
        if ticket.activity != activity {
            return Err(PickerError::StaleGeneration);
        }
        self.check_ticket(ticket)
    }

    /// Clear the in-flight flag if this ticket is still the newest one.
    pub fn finish_generation(&mut self, ticket: GenerationTicket) {
        if self.check_ticket(ticket).is_ok() {
            self.generating.remove(&ticket.activity);
        }
    }

    pub fn is_generating(&self, activity: Activity) -> bool {
        self.generating.contains(&activity)
    }

    pub fn game(&self, activity: Activity) -> Result<&GameState, PickerError> {
        self.games.get(&activity).ok_or(PickerError::NotAGame(activity))
    }

    pub fn game_mut(&mut self, activity: Activity) -> Result<&mut GameState, PickerError> {
        self.games.get_mut(&activity).ok_or(PickerError::NotAGame(activity))
    }

    /// Switch a game between 1v1 and 2v2. Clears its matches and supersedes in-flight requests.
    pub fn set_mode(&mut self, activity: Activity, mode: MatchMode) -> Result<(), PickerError> {
        let game = self.game_mut(activity)?;
        game.mode = mode;
        game.outcome = None;
        *self.serials.entry(activity).or_insert(0) += 1;
        self.generating.remove(&activity);
        Ok(())
    }

    /// Forget who has spoken so the whole eligible list is available again.
    pub fn reset_speaker_history(&mut self) {
        self.speaker.history.clear();
        self.speaker.current = None;
    }
}
