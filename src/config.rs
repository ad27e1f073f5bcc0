//! Runtime configuration from environment variables.
//!
//! HOST, PORT, PICKER_ROSTER_FILE, PICKER_DELAY_MS, PICKER_EXCLUDED_SPEAKERS,
//! PICKER_SPEAKER_NO_REPEAT, PICKER_SQUAD_SPLIT. Bad values fall back to defaults.

use crate::logic::SplitPolicy;
use crate::models::{RosterBook, RosterError};
use log::warn;
use std::path::PathBuf;
use std::time::Duration;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// CSV roster; built-in rosters when unset.
    pub roster_file: Option<PathBuf>,
    /// Cosmetic pause before each generation (for the spinner). Zero disables it.
    pub generate_delay: Duration,
    pub excluded_speakers: Vec<String>,
    pub speaker_no_repeat: bool,
    pub split_policy: SplitPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            roster_file: None,
            generate_delay: Duration::ZERO,
            excluded_speakers: Vec::new(),
            speaker_no_repeat: false,
            split_policy: SplitPolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT").map(|p| p.trim().parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(e)) => {
                warn!("ignoring invalid PORT: {}", e);
                defaults.port
            }
            None => defaults.port,
        };
        let generate_delay = match get("PICKER_DELAY_MS").map(|d| d.trim().parse::<u64>()) {
            Some(Ok(ms)) => Duration::from_millis(ms),
            Some(Err(e)) => {
                warn!("ignoring invalid PICKER_DELAY_MS: {}", e);
                defaults.generate_delay
            }
            None => defaults.generate_delay,
        };
        let speaker_no_repeat = match get("PICKER_SPEAKER_NO_REPEAT") {
            Some(v) => match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    warn!("ignoring invalid PICKER_SPEAKER_NO_REPEAT '{}'", other);
                    defaults.speaker_no_repeat
                }
            },
            None => defaults.speaker_no_repeat,
        };
        let split_policy = match get("PICKER_SQUAD_SPLIT").map(|s| s.parse::<SplitPolicy>()) {
            Some(Ok(policy)) => policy,
            Some(Err(e)) => {
                warn!("ignoring PICKER_SQUAD_SPLIT: {}", e);
                defaults.split_policy
            }
            None => defaults.split_policy,
        };
        let excluded_speakers = get("PICKER_EXCLUDED_SPEAKERS")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            roster_file: get("PICKER_ROSTER_FILE").map(PathBuf::from),
            generate_delay,
            excluded_speakers,
            speaker_no_repeat,
            split_policy,
        }
    }

    /// Roster file if configured, otherwise the built-in rosters; exclusions applied either way.
    pub fn load_roster_book(&self) -> Result<RosterBook, RosterError> {
        let book = match &self.roster_file {
            Some(path) => RosterBook::from_csv_path(path)?,
            None => RosterBook::builtin(),
        };
        Ok(book.with_excluded_speakers(self.excluded_speakers.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]), AppConfig::default());
    }

    #[test]
    fn reads_all_keys() {
        let c = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("PICKER_ROSTER_FILE", "roster.csv"),
            ("PICKER_DELAY_MS", "1000"),
            ("PICKER_EXCLUDED_SPEAKERS", "Ivan, ,Rosa"),
            ("PICKER_SPEAKER_NO_REPEAT", "yes"),
            ("PICKER_SQUAD_SPLIT", "require-even"),
        ]);
        assert_eq!(c.host, "127.0.0.1");
        assert_eq!(c.port, 9000);
        assert_eq!(c.roster_file, Some(PathBuf::from("roster.csv")));
        assert_eq!(c.generate_delay, Duration::from_millis(1000));
        assert_eq!(c.excluded_speakers, vec!["Ivan".to_string(), "Rosa".to_string()]);
        assert!(c.speaker_no_repeat);
        assert_eq!(c.split_policy, SplitPolicy::RequireEven);
    }

    #[test]
    fn invalid_values_fall_back() {
        let c = config_from(&[
            ("PORT", "eighty"),
            ("PICKER_DELAY_MS", "-5"),
            ("PICKER_SPEAKER_NO_REPEAT", "maybe"),
            ("PICKER_SQUAD_SPLIT", "sideways"),
        ]);
        assert_eq!(c, AppConfig::default());
    }

    #[test]
    fn builtin_book_gets_exclusions() {
        let c = config_from(&[("PICKER_EXCLUDED_SPEAKERS", "Aarav")]);
        let book = c.load_roster_book().unwrap();
        assert!(!book.eligible_speakers().contains(&"Aarav".to_string()));
        assert_eq!(book.eligible_speakers().len(), book.speakers.len() - 1);
    }
}
