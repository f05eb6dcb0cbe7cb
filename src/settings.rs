//! Game settings and preferences
//!
//! Persisted separately from profiles in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::ai::Difficulty;
use crate::archetype::{DEFAULT_BUG, bug_by_id};
use crate::arena::{DEFAULT_ARENA, arena_by_id};
use crate::consts::{GOALS_TO_WIN, MATCH_SECONDS};
use crate::error::ConfigError;

/// Match preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Computer opponent strength for quick play
    pub difficulty: Difficulty,
    pub selected_bug: String,
    pub selected_arena: String,
    /// Match clock; 0 plays until someone reaches `goals_to_win`
    pub match_seconds: u32,
    pub goals_to_win: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            selected_bug: DEFAULT_BUG.to_string(),
            selected_arena: DEFAULT_ARENA.to_string(),
            match_seconds: MATCH_SECONDS,
            goals_to_win: GOALS_TO_WIN,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "bugBall_settings";

    pub fn validate(&self) -> Result<(), ConfigError> {
        if bug_by_id(&self.selected_bug).is_none() {
            return Err(ConfigError::UnknownBug(self.selected_bug.clone()));
        }
        if arena_by_id(&self.selected_arena).is_none() {
            return Err(ConfigError::UnknownArena(self.selected_arena.clone()));
        }
        if self.goals_to_win == 0 {
            return Err(ConfigError::NoWinCondition);
        }
        Ok(())
    }

    /// Parse and validate; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Discarding stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.goals_to_win, 5);
        assert_eq!(settings.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r#"{"difficulty":"pro","selectedBug":"ant"}"#).unwrap();
        assert_eq!(settings.difficulty, Difficulty::Pro);
        assert_eq!(settings.selected_bug, "ant");
        assert_eq!(settings.selected_arena, DEFAULT_ARENA);
    }

    #[test]
    fn test_rejects_unknown_ids() {
        assert!(matches!(
            Settings::from_json(r#"{"selectedBug":"mantis"}"#),
            Err(ConfigError::UnknownBug(id)) if id == "mantis"
        ));
        assert!(matches!(
            Settings::from_json(r#"{"selectedArena":"moon"}"#),
            Err(ConfigError::UnknownArena(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"goalsToWin":0}"#),
            Err(ConfigError::NoWinCondition)
        ));
        assert!(matches!(
            Settings::from_json(r#"{"difficulty":"insane"}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            difficulty: Difficulty::Hard,
            match_seconds: 0,
            ..Default::default()
        };
        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back, settings);
    }
}
