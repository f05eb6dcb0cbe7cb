//! Ball and player entities
//!
//! Plain records mutated in place by the physics step and the controllers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::archetype::BugStats;
use crate::consts::*;

/// Horizontal speed below which a coasting player counts as standing
const STANDING_SPEED: f32 = 0.1;

/// End of the field a team defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Unit x direction pointing at the opponent's goal
    #[inline]
    pub fn attack_dir(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Spin angle for rendering (radians)
    pub rotation: f32,
}

impl Ball {
    pub fn new(pos: Vec2) -> Self {
        Self::with_radius(pos, BALL_RADIUS)
    }

    pub fn with_radius(pos: Vec2, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "ball radius must be positive");
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            rotation: 0.0,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Movement intent set by input or AI before the physics step
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub move_left: bool,
    pub move_right: bool,
    /// Cap on the horizontal speed the movement assigns
    pub speed_limit: Option<f32>,
}

/// A bug on the field
///
/// `pos` is the bottom-centre point: the body box spans `pos.x ± width / 2`
/// and `[pos.y - height, pos.y]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
    pub grounded: bool,
    pub intent: Intent,
    /// +1 facing right, -1 facing left
    pub facing: f32,
    /// One-shot jump command, consumed by the next physics step
    #[serde(default)]
    jump_queued: bool,
}

impl Player {
    /// Create a player sized from its archetype, standing at `pos`
    pub fn new(pos: Vec2, stats: &BugStats) -> Self {
        let size = PLAYER_BASE_SIZE * stats.size;
        Self::with_size(pos, size, size)
    }

    pub fn with_size(pos: Vec2, width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "player dimensions must be positive");
        Self {
            pos,
            vel: Vec2::ZERO,
            width,
            height,
            grounded: true,
            intent: Intent::default(),
            facing: 1.0,
            jump_queued: false,
        }
    }

    /// Request a jump on the next physics step
    pub fn queue_jump(&mut self) {
        self.jump_queued = true;
    }

    pub fn jump_queued(&self) -> bool {
        self.jump_queued
    }

    /// Consume the queued jump (whether or not it can fire)
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_queued)
    }

    /// Drop intent and any pending jump
    pub fn clear_input(&mut self) {
        self.intent = Intent::default();
        self.jump_queued = false;
    }

    /// Y coordinate of the top of the body box
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.height
    }

    /// Horizontal direction the player is actively moving (-1, 0 or 1)
    ///
    /// Friction only decays velocity, so a leftover crawl reads as 0.
    #[inline]
    pub fn move_dir(&self) -> f32 {
        if self.vel.x.abs() < STANDING_SPEED {
            0.0
        } else {
            crate::sign(self.vel.x)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_is_one_shot() {
        let mut player = Player::with_size(Vec2::new(100.0, 490.0), 40.0, 40.0);
        assert!(!player.take_jump());
        player.queue_jump();
        assert!(player.jump_queued());
        assert!(player.take_jump());
        assert!(!player.take_jump());
    }

    #[test]
    fn test_player_sized_from_stats() {
        let stats = BugStats {
            speed: 0.5,
            jump: 0.5,
            power: 0.5,
            size: 1.2,
        };
        let player = Player::new(Vec2::new(0.0, 490.0), &stats);
        assert!((player.width - 48.0).abs() < 1e-4);
        assert!((player.top() - 442.0).abs() < 1e-4);
    }

    #[test]
    fn test_coasting_player_comes_to_a_stand() {
        let mut player = Player::with_size(Vec2::new(100.0, 490.0), 40.0, 40.0);
        player.vel.x = 4.0;
        assert_eq!(player.move_dir(), 1.0);
        player.vel.x = -0.5;
        assert_eq!(player.move_dir(), -1.0);

        player.vel.x = 4.0;
        for _ in 0..300 {
            player.vel.x *= PLAYER_FRICTION;
        }
        assert!(player.vel.x > 0.0);
        assert_eq!(player.move_dir(), 0.0);
    }

    #[test]
    fn test_side_directions() {
        assert_eq!(Side::Left.attack_dir(), 1.0);
        assert_eq!(Side::Right.attack_dir(), -1.0);
        assert_eq!(Side::Left.opponent(), Side::Right);
    }
}
