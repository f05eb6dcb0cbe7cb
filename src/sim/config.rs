//! Shared physical constants
//!
//! One `PhysicsConfig` is handed to the engine and to the AI trajectory
//! predictor so both simulate the same law.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Arena width in pixels
    pub width: f32,
    /// Arena height in pixels
    pub height: f32,
    /// Ground line as a fraction of height (measured from the top)
    pub ground_ratio: f32,

    /// Downward acceleration per step
    pub gravity: f32,
    /// Horizontal velocity retained by the ball each step
    pub friction: f32,
    /// Vertical velocity retained on a ground bounce
    pub bounce_damping: f32,
    /// Horizontal velocity retained by players each step
    pub player_friction: f32,
    pub wall_damping: f32,
    pub crossbar_damping: f32,
    /// Horizontal push away from the end wall after a crossbar hit
    pub crossbar_nudge: f32,
    pub ceiling_damping: f32,

    pub goal_width: f32,
    pub goal_height: f32,
    /// How close to the back wall the ball must get to count as a goal
    pub goal_depth: f32,

    /// Ball speed ceiling after a kick
    pub max_ball_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            ground_ratio: GROUND_RATIO,
            gravity: GRAVITY,
            friction: BALL_FRICTION,
            bounce_damping: BOUNCE_DAMPING,
            player_friction: PLAYER_FRICTION,
            wall_damping: 0.8,
            crossbar_damping: 0.7,
            crossbar_nudge: 1.5,
            ceiling_damping: 0.5,
            goal_width: GOAL_WIDTH,
            goal_height: GOAL_HEIGHT,
            goal_depth: GOAL_DEPTH,
            max_ball_speed: MAX_BALL_SPEED,
        }
    }
}

impl PhysicsConfig {
    /// Default constants for an arena of the given size
    pub fn with_size(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Y coordinate of the ground line
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.height * self.ground_ratio
    }

    /// Y coordinate of the crossbar
    #[inline]
    pub fn goal_y(&self) -> f32 {
        self.ground_y() - self.goal_height
    }

    /// Reject geometry the engine cannot simulate sensibly
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("gravity", self.gravity),
            ("goal_width", self.goal_width),
            ("goal_height", self.goal_height),
            ("goal_depth", self.goal_depth),
            ("max_ball_speed", self.max_ball_speed),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let ratios = [
            ("ground_ratio", self.ground_ratio),
            ("friction", self.friction),
            ("bounce_damping", self.bounce_damping),
            ("player_friction", self.player_friction),
            ("wall_damping", self.wall_damping),
            ("crossbar_damping", self.crossbar_damping),
            ("ceiling_damping", self.ceiling_damping),
        ];
        for (field, value) in ratios {
            if !(value > 0.0 && value < 1.0) {
                return Err(ConfigError::RatioOutOfRange { field, value });
            }
        }

        if self.goal_height >= self.ground_y() || self.goal_width * 2.0 >= self.width {
            return Err(ConfigError::GoalTooLarge {
                goal_width: self.goal_width,
                goal_height: self.goal_height,
                ground_y: self.ground_y(),
            });
        }
        Ok(())
    }
}
