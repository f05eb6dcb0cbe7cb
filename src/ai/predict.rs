//! Ball trajectory prediction
//!
//! Forward-simulates the free ball with the engine's own constants.

use glam::Vec2;

use crate::sim::{Ball, PhysicsConfig};

/// Maximum number of steps looked ahead
pub const PREDICTION_STEPS: usize = 30;

/// Lookahead for an agent of the given prediction accuracy
pub fn prediction_steps(accuracy: f32) -> usize {
    (PREDICTION_STEPS as f32 * accuracy.clamp(0.0, 1.0)).floor() as usize
}

/// Where the ball will be when it reaches the ground, or after `steps`
/// steps if it stays airborne that long
pub fn predict_ball_position(ball: &Ball, config: &PhysicsConfig, steps: usize) -> Vec2 {
    let r = ball.radius;
    let floor = config.ground_y() - r;
    let mut pos = ball.pos;
    let mut vel = ball.vel;

    for _ in 0..steps {
        vel.y += config.gravity;
        pos += vel;
        vel.x *= config.friction;

        if pos.x < r || pos.x > config.width - r {
            vel.x *= -config.wall_damping;
            pos.x = pos.x.clamp(r, config.width - r);
        }

        if pos.y >= floor {
            break;
        }
    }

    pos
}
