//! Bug Ball Blitz - side-on arcade soccer played by bugs
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (physics, collisions, match flow)
//! - `ai`: Computer-controlled opponents
//! - `archetype` / `arena` / `tower`: Static game data
//! - `profile` / `settings`: Player records persisted to LocalStorage

pub mod ai;
pub mod archetype;
pub mod arena;
pub mod error;
pub mod profile;
pub mod settings;
pub mod sim;
pub mod tower;

pub use archetype::{BugArchetype, BugStats};
pub use error::ConfigError;
pub use profile::{MatchResult, Profile, ProfileStats};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation runs one step per animation frame
    pub const STEPS_PER_SECOND: u32 = 60;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1000.0;
    pub const ARENA_HEIGHT: f32 = 700.0;
    /// Ground line sits at 70% of the height
    pub const GROUND_RATIO: f32 = 0.7;

    /// Goal mouth
    pub const GOAL_WIDTH: f32 = 100.0;
    pub const GOAL_HEIGHT: f32 = 120.0;
    pub const GOAL_DEPTH: f32 = 50.0;

    /// Motion constants (per step)
    pub const GRAVITY: f32 = 0.6;
    pub const BALL_FRICTION: f32 = 0.95;
    pub const BOUNCE_DAMPING: f32 = 0.8;
    pub const PLAYER_FRICTION: f32 = 0.9;
    pub const MAX_BALL_SPEED: f32 = 40.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;

    /// Player box edge at size 1.0
    pub const PLAYER_BASE_SIZE: f32 = 40.0;
    /// Horizontal speed per point of the speed stat
    pub const MOVE_SPEED_SCALE: f32 = 5.0;
    /// Launch speed per point of the jump stat
    pub const JUMP_SCALE: f32 = 15.0;
    /// Kick impulse per point of the power stat
    pub const KICK_SCALE: f32 = 10.0;

    /// Match flow
    pub const GOALS_TO_WIN: u32 = 5;
    pub const MATCH_SECONDS: u32 = 120;
    pub const KICKOFF_COUNTDOWN_SECONDS: u32 = 5;
    pub const GOAL_COUNTDOWN_SECONDS: u32 = 3;
}

/// Sign of `value` as -1, 0 or 1 (unlike `f32::signum`, zero maps to zero)
#[inline]
pub fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Seconds to simulation steps
#[inline]
pub fn seconds_to_steps(seconds: u32) -> u32 {
    seconds * consts::STEPS_PER_SECOND
}
