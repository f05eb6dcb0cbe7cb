//! Physics engine
//!
//! One call advances an entity by one fixed step (one animation frame). The
//! engine keeps no state between calls beyond its constants; everything else
//! lives on the ball and players it is handed.

use glam::Vec2;

use super::collision::{Aabb, HitZone, ball_box_contact};
use super::config::PhysicsConfig;
use super::state::{Ball, Player, Side};
use crate::archetype::BugStats;
use crate::consts::*;

/// Vertical speed below which a ground bounce is killed
const REST_SPEED: f32 = 1.0;
/// Horizontal speed kept on each ground bounce
const GROUND_ROLL_DAMPING: f32 = 0.98;

/// How far a header leans toward the player's heading
const HEADER_BLEND: f32 = 0.4;
/// How far a foot contact leans toward the movement direction
const FOOT_BLEND: f32 = 0.8;
/// Share of the player's velocity carried into the ball
const CARRY: f32 = 0.5;
/// Player speed above which a grounded kick is chipped
const CHIP_SPEED: f32 = 3.0;

#[derive(Debug, Clone)]
pub struct Physics {
    pub config: PhysicsConfig,
}

impl Default for Physics {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl Physics {
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.config.ground_y()
    }

    /// Advance the ball one step and resolve arena collisions
    pub fn update_ball(&self, ball: &mut Ball) {
        let c = &self.config;
        let r = ball.radius;
        let ground_y = c.ground_y();

        ball.vel.y += c.gravity;
        ball.pos += ball.vel;
        ball.rotation += ball.vel.x / r;

        ball.vel.x *= c.friction;

        // Ground
        if ball.pos.y + r > ground_y {
            ball.pos.y = ground_y - r;
            ball.vel.y *= -c.bounce_damping;
            ball.vel.x *= GROUND_ROLL_DAMPING;
            if ball.vel.y.abs() < REST_SPEED {
                ball.vel.y = 0.0;
            }
        }

        // Side walls
        if ball.pos.x - r < 0.0 {
            ball.pos.x = r;
            ball.vel.x *= -c.wall_damping;
        }
        if ball.pos.x + r > c.width {
            ball.pos.x = c.width - r;
            ball.vel.x *= -c.wall_damping;
        }

        // Crossbars, nudged toward the field centre so the ball can't sit on them
        if ball.pos.x < c.goal_width {
            self.crossbar_bounce(ball, c.crossbar_nudge);
        }
        if ball.pos.x > c.width - c.goal_width {
            self.crossbar_bounce(ball, -c.crossbar_nudge);
        }

        // Ceiling
        if ball.pos.y - r < 0.0 {
            ball.pos.y = r;
            ball.vel.y *= -c.ceiling_damping;
        }
    }

    fn crossbar_bounce(&self, ball: &mut Ball, nudge: f32) {
        let goal_y = self.config.goal_y();
        let r = ball.radius;
        if ball.pos.y + r > goal_y && ball.pos.y - r < goal_y {
            ball.pos.y = if ball.vel.y > 0.0 { goal_y - r } else { goal_y + r };
            ball.vel.y *= -self.config.crossbar_damping;
            ball.vel.x += nudge;
        }
    }

    /// Advance a player one step and apply its intent
    ///
    /// Movement sets horizontal velocity directly. A queued jump is consumed
    /// here whether or not the player is grounded.
    pub fn update_player(&self, player: &mut Player, stats: &BugStats, jump_power: f32) {
        let c = &self.config;
        let ground_y = c.ground_y();

        player.vel.y += c.gravity;
        player.pos += player.vel;
        player.vel.x *= c.player_friction;

        if player.pos.y > ground_y {
            player.pos.y = ground_y;
            player.vel.y = 0.0;
            player.grounded = true;
        } else {
            player.grounded = false;
        }

        let half_w = player.width / 2.0;
        if player.pos.x - half_w < 0.0 {
            player.pos.x = half_w;
            player.vel.x = 0.0;
        }
        if player.pos.x + half_w > c.width {
            player.pos.x = c.width - half_w;
            player.vel.x = 0.0;
        }

        let mut run_speed = stats.speed * MOVE_SPEED_SCALE;
        if let Some(limit) = player.intent.speed_limit {
            run_speed = run_speed.min(limit);
        }
        if player.intent.move_left {
            player.vel.x = -run_speed;
            player.facing = -1.0;
        }
        if player.intent.move_right {
            player.vel.x = run_speed;
            player.facing = 1.0;
        }

        if player.take_jump() && player.grounded {
            player.vel.y = -(stats.jump * JUMP_SCALE * jump_power);
            player.grounded = false;
        }
    }

    /// Resolve ball-vs-player contact and apply the kick
    ///
    /// Returns true when the ball touched the player. The ball ends resting on
    /// the player's surface and never below the ground line.
    pub fn check_ball_player_collision(
        &self,
        ball: &mut Ball,
        player: &Player,
        stats: &BugStats,
    ) -> bool {
        let aabb = Aabb::of_player(player);
        let Some(contact) = ball_box_contact(ball.pos, ball.radius, &aabb) else {
            return false;
        };

        let zone = HitZone::classify(ball.pos, player);
        ball.pos = contact.point + contact.normal * ball.radius;

        let direction = kick_direction(zone, contact.normal, player);
        let kick_power = stats.power * KICK_SCALE;
        let player_speed = player.vel.length();
        let total_power = kick_power + player_speed * CARRY;

        ball.vel = direction * total_power + player.vel * CARRY;

        // Ball on the head of a falling bug gets slammed down
        let landing_on_ball = contact.normal.y < -0.5 && player.vel.y > 0.0;
        if landing_on_ball {
            ball.vel.y = ball.vel.y.abs() + kick_power * 0.8;
        } else if !player.grounded {
            ball.vel.y -= player.vel.y.abs() * 1.5;
        } else if player_speed > CHIP_SPEED {
            ball.vel.y -= kick_power * 0.4;
        } else {
            // Soft touch on the ground plays as a low pass
            ball.vel.y = ball.vel.y.min(-2.0);
            ball.vel.x *= 1.2;
        }

        ball.vel = ball.vel.clamp_length_max(self.config.max_ball_speed);

        let floor = self.config.ground_y() - ball.radius;
        if ball.pos.y > floor {
            ball.pos.y = floor;
        }

        log::trace!(
            "kick {:?} depth={:.2} dir=({:.2},{:.2}) vel=({:.2},{:.2})",
            zone,
            contact.penetration,
            direction.x,
            direction.y,
            ball.vel.x,
            ball.vel.y
        );
        true
    }

    /// Which goal the ball is in, if any
    ///
    /// The ball must be within `goal_depth` of the back wall and between the
    /// crossbar and the ground.
    pub fn check_goal(&self, ball: &Ball) -> Option<Side> {
        let c = &self.config;
        let r = ball.radius;
        let in_goal_height = ball.pos.y + r > c.goal_y() && ball.pos.y - r < c.ground_y();
        if !in_goal_height {
            return None;
        }

        if ball.pos.x < c.goal_depth {
            Some(Side::Left)
        } else if ball.pos.x > c.width - c.goal_depth {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Put the ball back at the kickoff spot
    pub fn reset_ball(&self, ball: &mut Ball) {
        ball.pos = Vec2::new(self.config.width / 2.0, self.config.height / 2.0);
        ball.vel = Vec2::ZERO;
        ball.rotation = 0.0;
    }

    /// Kickoff spot for a player; slot 1 is the second team-mate
    pub fn kickoff_x(&self, side: Side, slot: usize) -> f32 {
        let fraction = match (side, slot) {
            (Side::Left, 0) => 0.25,
            (Side::Left, _) => 0.35,
            (Side::Right, 0) => 0.75,
            (Side::Right, _) => 0.65,
        };
        self.config.width * fraction
    }

    /// Put a player back at its kickoff spot, standing still
    pub fn reset_player(&self, player: &mut Player, side: Side, slot: usize) {
        player.pos = Vec2::new(self.kickoff_x(side, slot), self.config.ground_y());
        player.vel = Vec2::ZERO;
        player.grounded = true;
        player.facing = side.attack_dir();
        player.clear_input();
    }
}

/// Blend the contact normal with the player's movement according to where
/// the ball was struck
fn kick_direction(zone: HitZone, normal: Vec2, player: &Player) -> Vec2 {
    let moving = player.move_dir();
    match zone {
        HitZone::Header => {
            let heading = if moving != 0.0 { moving } else { player.facing };
            blend(normal, Vec2::new(heading, 0.0), HEADER_BLEND)
        }
        HitZone::LeftSide | HitZone::RightSide => {
            if moving != 0.0 && moving == zone.side_dir() {
                Vec2::new(moving, 0.0)
            } else {
                normal
            }
        }
        HitZone::Foot => {
            if moving != 0.0 && moving * normal.x >= 0.0 {
                blend(normal, Vec2::new(moving, 0.0), FOOT_BLEND)
            } else {
                normal
            }
        }
    }
}

fn blend(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    let mixed = from.lerp(to, t).normalize_or_zero();
    if mixed == Vec2::ZERO { from } else { mixed }
}
