//! Source rosters per activity category, with CSV loading.

use crate::logic::eligible_speakers;
use crate::models::activity::Activity;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;

/// A labeled subset of the cricket roster; each squad takes a quota from it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub label: String,
    pub members: Vec<String>,
}

impl Pool {
    pub fn new(label: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            label: label.into(),
            members,
        }
    }
}

/// Errors while loading a roster file.
#[derive(Debug)]
pub enum RosterError {
    Io { path: String, source: std::io::Error },
    Csv { path: String, source: csv::Error },
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::Io { path, source } => write!(f, "failed to read roster file {}: {}", path, source),
            RosterError::Csv { path, source } => write!(f, "CSV error in roster file {}: {}", path, source),
        }
    }
}

impl std::error::Error for RosterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterError::Io { source, .. } => Some(source),
            RosterError::Csv { source, .. } => Some(source),
        }
    }
}

/// One line of a roster CSV: `category,name,pool`.
#[derive(Debug, Deserialize)]
struct RawRosterRow {
    category: String,
    name: String,
    #[serde(default)]
    pool: String,
}

/// Fixed source lists the picker draws from. Never mutated by a generation.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RosterBook {
    pub speakers: Vec<String>,
    /// Speakers never picked and left out of general groups.
    pub excluded_speakers: Vec<String>,
    pub chess: Vec<String>,
    pub carrom: Vec<String>,
    pub badminton: Vec<String>,
    pub cricket_pools: Vec<Pool>,
    /// Cricket players outside every pool; they fill the reserve benches.
    pub cricket_extras: Vec<String>,
}

/// Counts per category (for the roster endpoint).
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RosterSummary {
    pub speakers: usize,
    pub eligible_speakers: usize,
    pub chess: usize,
    pub carrom: usize,
    pub badminton: usize,
    pub cricket_pools: Vec<(String, usize)>,
    pub cricket_extras: usize,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl RosterBook {
    /// Built-in demo rosters used when no roster file is configured.
    pub fn builtin() -> Self {
        let speakers = names(&[
            "Aarav", "Bianca", "Chen", "Dara", "Elif", "Farah", "Gabriel", "Hana", "Ivan", "Jonas",
            "Kavya", "Lior", "Mateo", "Nadia", "Omar", "Priya", "Quentin", "Rosa", "Sven", "Tariq",
        ]);
        Self {
            chess: names(&["Aarav", "Chen", "Elif", "Ivan", "Kavya", "Mateo", "Priya"]),
            carrom: names(&[
                "Bianca", "Dara", "Farah", "Hana", "Jonas", "Lior", "Nadia", "Omar", "Rosa", "Sven",
            ]),
            badminton: names(&[
                "Aarav", "Gabriel", "Hana", "Kavya", "Mateo", "Quentin", "Tariq", "Sven",
            ]),
            cricket_pools: vec![
                Pool::new("batting", names(&["Aarav", "Chen", "Ivan", "Mateo", "Omar", "Tariq"])),
                Pool::new("bowling", names(&["Dara", "Gabriel", "Jonas", "Quentin"])),
                Pool::new("wicket_keeping", names(&["Lior", "Sven"])),
            ],
            cricket_extras: names(&["Bianca", "Elif", "Farah"]),
            speakers,
            excluded_speakers: Vec::new(),
        }
    }

    pub fn with_excluded_speakers(mut self, excluded: Vec<String>) -> Self {
        self.excluded_speakers = excluded;
        self
    }

    /// Load rosters from a CSV file with a `category,name,pool` header.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let file = std::fs::File::open(path).map_err(|source| RosterError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_csv_reader(file).map_err(|source| RosterError::Csv {
            path: display,
            source,
        })
    }

    /// Rows with an unknown category or a blank name are skipped with a warning.
    pub fn from_csv_reader<R: Read>(rdr: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);
        let mut book = Self::default();
        for result in reader.deserialize::<RawRosterRow>() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    warn!("skipping malformed roster row: {}", e);
                    continue;
                }
            };
            if row.name.is_empty() {
                warn!("skipping roster row with blank name (category '{}')", row.category);
                continue;
            }
            let activity = match row.category.parse::<Activity>() {
                Ok(a) => a,
                Err(e) => {
                    warn!("skipping roster row '{}': {}", row.name, e);
                    continue;
                }
            };
            match activity {
                Activity::Speaker | Activity::General => book.speakers.push(row.name),
                Activity::Chess => book.chess.push(row.name),
                Activity::Carrom => book.carrom.push(row.name),
                Activity::Badminton => book.badminton.push(row.name),
                Activity::Cricket if row.pool.is_empty() => book.cricket_extras.push(row.name),
                Activity::Cricket => match book.cricket_pools.iter_mut().find(|p| p.label == row.pool) {
                    Some(pool) => pool.members.push(row.name),
                    None => book.cricket_pools.push(Pool::new(row.pool, vec![row.name])),
                },
            }
        }
        Ok(book)
    }

    /// Speakers minus the exclusion list.
    pub fn eligible_speakers(&self) -> Vec<String> {
        eligible_speakers(&self.speakers, &self.excluded_speakers)
    }

    /// Unshuffled source list for an activity. General groups draw from eligible speakers.
    pub fn players_for(&self, activity: Activity) -> Vec<String> {
        match activity {
            Activity::General | Activity::Speaker => self.eligible_speakers(),
            Activity::Chess => self.chess.clone(),
            Activity::Carrom => self.carrom.clone(),
            Activity::Badminton => self.badminton.clone(),
            Activity::Cricket => self
                .cricket_pools
                .iter()
                .flat_map(|p| p.members.iter().cloned())
                .chain(self.cricket_extras.iter().cloned())
                .collect(),
        }
    }

    pub fn summary(&self) -> RosterSummary {
        RosterSummary {
            speakers: self.speakers.len(),
            eligible_speakers: self.eligible_speakers().len(),
            chess: self.chess.len(),
            carrom: self.carrom.len(),
            badminton: self.badminton.len(),
            cricket_pools: self
                .cricket_pools
                .iter()
                .map(|p| (p.label.clone(), p.members.len()))
                .collect(),
            cricket_extras: self.cricket_extras.len(),
        }
    }
}
