//! Player profiles
//!
//! Career stats and tower progress, one LocalStorage entry per profile.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::tower::TOWER_LEVELS;

const STORAGE_PREFIX: &str = "bugBall_save_";

/// Final score of one match, from the home (left) team's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home_goals: u32,
    pub away_goals: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl MatchResult {
    pub fn outcome(&self) -> Outcome {
        match self.home_goals.cmp(&self.away_goals) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Less => Outcome::Loss,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

/// Career totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileStats {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub goals_scored: u32,
    pub goals_conceded: u32,
    pub matches_played: u32,
}

impl ProfileStats {
    pub fn record_match(&mut self, result: &MatchResult) {
        self.matches_played += 1;
        self.goals_scored += result.home_goals;
        self.goals_conceded += result.away_goals;
        match result.outcome() {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TowerProgress {
    /// Level the next tower match is played at
    pub current_level: u32,
    pub highest_level: u32,
    pub levels_completed: u32,
    pub is_complete: bool,
}

impl Default for TowerProgress {
    fn default() -> Self {
        Self {
            current_level: 1,
            highest_level: 0,
            levels_completed: 0,
            is_complete: false,
        }
    }
}

impl TowerProgress {
    /// Record a win at `level`. Replaying an earlier level changes nothing.
    pub fn record_win(&mut self, level: u32) {
        if level > self.levels_completed {
            self.levels_completed = level;
            self.current_level = (level + 1).min(TOWER_LEVELS);
        }
        self.highest_level = self.highest_level.max(level);
        if level >= TOWER_LEVELS {
            self.is_complete = true;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    /// Creation time, ms since the Unix epoch
    #[serde(default)]
    pub created: f64,
    #[serde(default)]
    pub stats: ProfileStats,
    #[serde(default)]
    pub tower: TowerProgress,
}

impl Profile {
    pub fn new(name: &str) -> Result<Self, ConfigError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyProfileName);
        }
        Ok(Self {
            name: name.to_string(),
            created: now_ms(),
            stats: ProfileStats::default(),
            tower: TowerProgress::default(),
        })
    }

    pub fn record_match(&mut self, result: &MatchResult) {
        self.stats.record_match(result);
    }

    pub fn record_tower_win(&mut self, level: u32) {
        self.tower.record_win(level);
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let profile: Self = serde_json::from_str(json)?;
        if profile.name.trim().is_empty() {
            return Err(ConfigError::EmptyProfileName);
        }
        Ok(profile)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load a profile from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(name: &str) -> Option<Self> {
        let key = storage_key(name).ok()?;
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;

        let json = storage.get_item(&key).ok().flatten()?;
        match Self::from_json(&json) {
            Ok(profile) => {
                log::info!("Loaded profile {}", profile.name);
                Some(profile)
            }
            Err(e) => {
                log::warn!("Ignoring stored profile {key}: {e}");
                None
            }
        }
    }

    /// Save the profile to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let (Some(storage), Ok(key)) = (storage, storage_key(&self.name)) {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(&key, &json);
                log::info!("Profile {} saved", self.name);
            }
        }
    }

    /// Every stored profile, newest first (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn list() -> Vec<Self> {
        let Some(storage) = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
        else {
            return Vec::new();
        };

        let len = storage.length().unwrap_or(0);
        let entries = (0..len).filter_map(|i| {
            let key = storage.key(i).ok().flatten()?;
            let json = storage.get_item(&key).ok().flatten()?;
            Some((key, json))
        });
        collect_profiles(entries)
    }

    /// Remove a stored profile (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn delete(name: &str) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let (Some(storage), Ok(key)) = (storage, storage_key(name)) {
            if storage.remove_item(&key).is_ok() {
                log::info!("Profile {name} deleted");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(_name: &str) -> Option<Self> {
        None
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn list() -> Vec<Self> {
        Vec::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn delete(_name: &str) {
        // No-op for native
    }
}

/// Parse the profile entries out of raw storage `(key, json)` pairs, newest
/// first. Foreign keys and unreadable entries are skipped.
pub fn collect_profiles<I>(entries: I) -> Vec<Profile>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut profiles: Vec<Profile> = entries
        .into_iter()
        .filter(|(key, _)| key.starts_with(STORAGE_PREFIX))
        .filter_map(|(key, json)| match Profile::from_json(&json) {
            Ok(profile) => Some(profile),
            Err(e) => {
                log::warn!("Skipping stored profile {key}: {e}");
                None
            }
        })
        .collect();
    profiles.sort_by(|a, b| b.created.total_cmp(&a.created));
    profiles
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64() * 1000.0)
}

/// LocalStorage key for a profile: lower-cased, whitespace runs to `_`
pub fn storage_key(name: &str) -> Result<String, ConfigError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigError::EmptyProfileName);
    }
    let normalised = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    Ok(format!("{STORAGE_PREFIX}{normalised}"))
}
