//! Match configuration: who plays, and under which rules

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::config::PhysicsConfig;
use super::state::Side;
use crate::ai::Difficulty;
use crate::archetype::random_bug;
use crate::consts::*;
use crate::error::ConfigError;
use crate::settings::Settings;
use crate::tower::{level_config, opponent_bugs};

/// Scoring and timing rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    pub goals_to_win: u32,
    /// 0 disables the match clock
    pub match_seconds: u32,
    pub kickoff_countdown_seconds: u32,
    pub goal_countdown_seconds: u32,
    /// Multiplier on every bug's jump
    pub jump_boost: f32,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            goals_to_win: GOALS_TO_WIN,
            match_seconds: MATCH_SECONDS,
            kickoff_countdown_seconds: KICKOFF_COUNTDOWN_SECONDS,
            goal_countdown_seconds: GOAL_COUNTDOWN_SECONDS,
            jump_boost: 1.0,
        }
    }
}

impl MatchRules {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.goals_to_win == 0 {
            return Err(ConfigError::NoWinCondition);
        }
        if self.jump_boost <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "jump_boost",
                value: self.jump_boost,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamControl {
    /// Driven by a gamepad / keyboard slot
    Human,
    Ai(Difficulty),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamSetup {
    /// Archetype ids, first is the slot-0 bug
    pub bugs: Vec<String>,
    pub control: TeamControl,
    /// Boss multiplier on jump and power
    pub boss_factor: Option<f32>,
}

impl TeamSetup {
    pub fn human(bug: &str) -> Self {
        Self {
            bugs: vec![bug.to_string()],
            control: TeamControl::Human,
            boss_factor: None,
        }
    }

    pub fn ai(difficulty: Difficulty, bugs: &[&str]) -> Self {
        Self {
            bugs: bugs.iter().map(|b| b.to_string()).collect(),
            control: TeamControl::Ai(difficulty),
            boss_factor: None,
        }
    }

    pub fn with_boss(mut self, factor: f32) -> Self {
        self.boss_factor = Some(factor);
        self
    }
}

/// Everything needed to start a match. Home plays from the left.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSetup {
    pub config: PhysicsConfig,
    pub rules: MatchRules,
    pub arena: String,
    pub home: TeamSetup,
    pub away: TeamSetup,
}

impl MatchSetup {
    pub fn new(home: TeamSetup, away: TeamSetup) -> Self {
        Self {
            config: PhysicsConfig::default(),
            rules: MatchRules::default(),
            arena: crate::arena::DEFAULT_ARENA.to_string(),
            home,
            away,
        }
    }

    fn with_settings(mut self, settings: &Settings) -> Self {
        self.rules.goals_to_win = settings.goals_to_win;
        self.rules.match_seconds = settings.match_seconds;
        self.arena = settings.selected_arena.clone();
        self
    }

    /// Player's bug against one computer bug at the preferred difficulty
    pub fn quickplay(settings: &Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let opponent = random_bug(&mut rng).id;
        Self::new(
            TeamSetup::human(&settings.selected_bug),
            TeamSetup::ai(settings.difficulty, &[opponent]),
        )
        .with_settings(settings)
    }

    /// Two local players
    pub fn versus(settings: &Settings, away_bug: &str) -> Self {
        Self::new(
            TeamSetup::human(&settings.selected_bug),
            TeamSetup::human(away_bug),
        )
        .with_settings(settings)
    }

    /// One rung of the tower ladder
    pub fn tower(settings: &Settings, level: u32, seed: u64) -> Self {
        let tower = level_config(level);
        let mut rng = Pcg32::seed_from_u64(seed);
        let bugs: Vec<&str> = opponent_bugs(&tower, &mut rng).iter().map(|b| b.id).collect();
        let mut away = TeamSetup::ai(tower.difficulty, &bugs);
        if let Some(factor) = tower.boss_factor {
            away = away.with_boss(factor);
        }
        Self::new(TeamSetup::human(&settings.selected_bug), away).with_settings(settings)
    }

    /// Computer against computer
    pub fn exhibition(home: TeamSetup, away: TeamSetup) -> Self {
        Self::new(home, away)
    }

    pub fn team(&self, side: Side) -> &TeamSetup {
        match side {
            Side::Left => &self.home,
            Side::Right => &self.away,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()?;
        self.rules.validate()?;
        if crate::arena::arena_by_id(&self.arena).is_none() {
            return Err(ConfigError::UnknownArena(self.arena.clone()));
        }
        for side in [Side::Left, Side::Right] {
            let team = self.team(side);
            let max = match team.control {
                TeamControl::Human => 1,
                TeamControl::Ai(_) => 2,
            };
            if team.bugs.is_empty() || team.bugs.len() > max {
                return Err(ConfigError::TeamSize {
                    side: side.as_str(),
                    len: team.bugs.len(),
                });
            }
            if let Some(bad) = team
                .bugs
                .iter()
                .find(|id| crate::archetype::bug_by_id(id).is_none())
            {
                return Err(ConfigError::UnknownBug(bad.clone()));
            }
        }
        Ok(())
    }
}
