// Explicitly constructed portal state, passed by reference to the view
// layer. Only the preference fields cross the persistence boundary; the
// reservation flow and calendar are view-model state that dies with the
// page.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::calendar::Calendar;
use crate::reservation::ReservationFlow;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

// The persisted slice of the portal state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub sidebar_open: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            sidebar_open: true,
        }
    }
}

impl Preferences {
    // Missing or unreadable files fall back to defaults with a logged
    // warning; only a later save reports real errors.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                info!(path = %path.display(), error = %e, "no saved preferences, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(preferences) => preferences,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt preferences file, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StateError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

// Everything a portal page needs, constructed once at page mount
#[derive(Debug, Default)]
pub struct PortalState {
    pub preferences: Preferences,
    pub flow: ReservationFlow,
    pub calendar: Calendar,
}

impl PortalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: Preferences) -> Self {
        Self {
            preferences,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("portal-prefs-{}-{}.json", name, rand::random::<u32>()))
    }

    #[test]
    fn test_preferences_round_trip() {
        let path = temp_path("roundtrip");
        let prefs = Preferences {
            theme: Theme::Dark,
            sidebar_open: false,
        };

        prefs.save(&path).unwrap();
        let loaded = Preferences::load(&path);
        assert_eq!(loaded, prefs);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = temp_path("missing");
        let loaded = Preferences::load(&path);
        assert_eq!(loaded, Preferences::default());
        assert_eq!(loaded.theme, Theme::Light);
        assert!(loaded.sidebar_open);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{not json").unwrap();

        let loaded = Preferences::load(&path);
        assert_eq!(loaded, Preferences::default());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_portal_state_starts_clean() {
        let state = PortalState::new();
        assert_eq!(state.flow.dates.nights(), 0);
        assert!(state.calendar.selected().is_none());
        assert_eq!(state.preferences, Preferences::default());
    }
}
