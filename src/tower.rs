//! Tower campaign ladder
//!
//! Eight levels against the computer: one opponent at rising difficulty, then
//! two. The final level fields boss-strength bugs.

use rand::Rng;

use crate::ai::Difficulty;
use crate::archetype::{BugArchetype, random_bug};

pub const TOWER_LEVELS: u32 = 8;

/// Jump and power multiplier for the final level's opponents
pub const BOSS_FACTOR: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowerLevel {
    pub level: u32,
    pub difficulty: Difficulty,
    /// Number of computer bugs on the opposing team
    pub ai_count: usize,
    pub boss_factor: Option<f32>,
}

impl TowerLevel {
    pub fn is_final(&self) -> bool {
        self.level >= TOWER_LEVELS
    }
}

/// Opposition for a level; anything past the top repeats the hardest setup
/// and level 0 is treated as level 1
pub fn level_config(level: u32) -> TowerLevel {
    let level = level.max(1);
    let (difficulty, ai_count) = match level {
        1..=4 => (Difficulty::ALL[(level - 1) as usize], 1),
        5..=8 => (Difficulty::ALL[(level - 5) as usize], 2),
        _ => (Difficulty::Pro, 2),
    };
    TowerLevel {
        level,
        difficulty,
        ai_count,
        boss_factor: (level >= TOWER_LEVELS).then_some(BOSS_FACTOR),
    }
}

/// Draw the opposing bugs for a level
pub fn opponent_bugs<R: Rng + ?Sized>(tower: &TowerLevel, rng: &mut R) -> Vec<&'static BugArchetype> {
    (0..tower.ai_count).map(|_| random_bug(rng)).collect()
}
