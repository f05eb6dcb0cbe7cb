//! Errors for the fallible edges of the crate
//!
//! The simulation itself is total; only configuration and persisted JSON can
//! be rejected.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A dimension or physical constant that must be strictly positive was not
    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    /// A ratio that must lie strictly between 0 and 1 did not
    #[error("`{field}` must be in (0, 1), got {value}")]
    RatioOutOfRange { field: &'static str, value: f32 },

    /// Goal geometry does not fit inside the arena
    #[error("goal of {goal_width}x{goal_height} does not fit an arena with ground at {ground_y}")]
    GoalTooLarge {
        goal_width: f32,
        goal_height: f32,
        ground_y: f32,
    },

    #[error("unknown bug archetype `{0}`")]
    UnknownBug(String),

    #[error("unknown arena `{0}`")]
    UnknownArena(String),

    #[error("goals to win must be at least 1")]
    NoWinCondition,

    /// Computer teams field one or two bugs, human teams exactly one
    #[error("{side} team cannot field {len} bugs")]
    TeamSize { side: &'static str, len: usize },

    #[error("profile name cannot be empty")]
    EmptyProfileName,

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
