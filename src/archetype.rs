//! Bug archetypes
//!
//! Immutable stat profiles selectable as a player's character, and the rule
//! that unlocks each one.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::profile::ProfileStats;

/// Physical stats of a bug, each nominally in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BugStats {
    pub speed: f32,
    pub jump: f32,
    pub power: f32,
    pub size: f32,
}

impl BugStats {
    /// Boss variant: jump and power scaled up, possibly past 1.0
    pub fn boss(self, factor: f32) -> Self {
        Self {
            jump: self.jump * factor,
            power: self.power * factor,
            ..self
        }
    }
}

/// What a profile must achieve to play a bug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnlockRule {
    Starter,
    Wins(u32),
    Goals(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BugArchetype {
    pub id: &'static str,
    pub name: &'static str,
    pub stats: BugStats,
    /// Body colour as a CSS hex string
    pub color: &'static str,
    pub unlock: UnlockRule,
}

pub const BUGS: &[BugArchetype] = &[
    BugArchetype {
        id: "ladybug",
        name: "Ladybug",
        stats: BugStats {
            speed: 0.75,
            jump: 0.75,
            power: 0.75,
            size: 0.8,
        },
        color: "#ff4444",
        unlock: UnlockRule::Starter,
    },
    BugArchetype {
        id: "grasshopper",
        name: "Grasshopper",
        stats: BugStats {
            speed: 0.9,
            jump: 1.0,
            power: 0.7,
            size: 0.9,
        },
        color: "#7ed321",
        unlock: UnlockRule::Wins(1),
    },
    BugArchetype {
        id: "stagBeetle",
        name: "Beetle",
        stats: BugStats {
            speed: 0.6,
            jump: 0.7,
            power: 1.0,
            size: 1.2,
        },
        color: "#8B4513",
        unlock: UnlockRule::Wins(10),
    },
    BugArchetype {
        id: "ant",
        name: "Ant",
        stats: BugStats {
            speed: 1.0,
            jump: 0.65,
            power: 0.5,
            size: 0.6,
        },
        color: "#2d2d2d",
        unlock: UnlockRule::Goals(50),
    },
    BugArchetype {
        id: "spider",
        name: "Spider",
        stats: BugStats {
            speed: 0.85,
            jump: 0.8,
            power: 0.8,
            size: 1.0,
        },
        color: "#4a235a",
        unlock: UnlockRule::Wins(10),
    },
];

/// Bug every profile starts with
pub const DEFAULT_BUG: &str = "ladybug";

pub fn bug_by_id(id: &str) -> Option<&'static BugArchetype> {
    BUGS.iter().find(|bug| bug.id == id)
}

/// Any bug from the roster, locked or not (computer opponents)
pub fn random_bug<R: Rng + ?Sized>(rng: &mut R) -> &'static BugArchetype {
    &BUGS[rng.random_range(0..BUGS.len())]
}

/// Whether `stats` satisfy the archetype's unlock rule
pub fn is_unlocked(archetype: &BugArchetype, stats: &ProfileStats) -> bool {
    match archetype.unlock {
        UnlockRule::Starter => true,
        UnlockRule::Wins(n) => stats.wins >= n,
        UnlockRule::Goals(n) => stats.goals_scored >= n,
    }
}

/// All bugs the profile can currently pick, in roster order
pub fn unlocked_bugs(stats: &ProfileStats) -> impl Iterator<Item = &'static BugArchetype> + '_ {
    BUGS.iter().filter(move |bug| is_unlocked(bug, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(bug_by_id("ant").map(|b| b.name), Some("Ant"));
        assert!(bug_by_id("mantis").is_none());
        assert!(bug_by_id(DEFAULT_BUG).is_some());
    }

    #[test]
    fn test_unlock_rules() {
        let mut stats = ProfileStats::default();
        let ids: Vec<_> = unlocked_bugs(&stats).map(|b| b.id).collect();
        assert_eq!(ids, vec!["ladybug"]);

        stats.wins = 1;
        assert!(is_unlocked(bug_by_id("grasshopper").unwrap(), &stats));
        assert!(!is_unlocked(bug_by_id("spider").unwrap(), &stats));

        stats.wins = 10;
        stats.goals_scored = 50;
        assert_eq!(unlocked_bugs(&stats).count(), BUGS.len());
    }

    #[test]
    fn test_boss_scales_jump_and_power_only() {
        let stats = bug_by_id("spider").unwrap().stats.boss(1.5);
        assert!((stats.jump - 1.2).abs() < 1e-5);
        assert!((stats.power - 1.2).abs() < 1e-5);
        assert_eq!(stats.speed, 0.85);
        assert_eq!(stats.size, 1.0);
    }
}
