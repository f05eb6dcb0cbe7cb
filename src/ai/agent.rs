//! Single computer-controlled player
//!
//! Decisions are throttled by a reaction timer: the agent picks a new target
//! every `reaction_time` frames and steers toward the last target in between.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::params::{AiParams, Difficulty};
use super::predict::{predict_ball_position, prediction_steps};
use crate::sim::{Ball, Intent, PhysicsConfig, Player, Side};

/// Distance from the own goal at which the agent drops everything to clear
pub const DANGER_ZONE: f32 = 200.0;
/// Goal anchors sit this far in from the end walls
pub const GOAL_ANCHOR_INSET: f32 = 50.0;
/// Horizontal window in which an overhead ball counts as being juggled
pub const JUGGLE_WINDOW: f32 = 40.0;
/// Steering dead zone around the target (px)
pub const DEAD_ZONE: f32 = 20.0;
/// Beyond this fraction of the width (from the own end) the agent never
/// walks further toward its own goal, unless clearing
pub const OWN_THIRD: f32 = 0.3;

const SIDESTEP: f32 = 70.0;
const MOVING_BALL_SPEED: f32 = 2.0;
const STRIKE_OFFSET_NEAR: f32 = 40.0;
const STRIKE_OFFSET_FAR: f32 = 35.0;
const NEAR_GOAL: f32 = 250.0;
const NOISE_SCALE: f32 = 100.0;
const JUMP_REACH_X: f32 = 80.0;
const JUMP_REACH_Y: f32 = 150.0;
const SURPRISE_JUMP_RATE: f32 = 0.01;
/// Run-speed units per point of `max_speed`
const SPEED_CAP_SCALE: f32 = 5.5;

/// Which rule produced the current target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Ball near our goal: go straight at it
    DangerClear,
    /// Ball bouncing on our head: step aside toward the opponent's goal
    AvoidJuggle,
    /// Ball moving: meet it where it lands
    Intercept,
    /// Ball still: line up behind it
    Attack,
}

/// Own goal anchor x for a side
#[inline]
pub fn own_goal_x(side: Side, config: &PhysicsConfig) -> f32 {
    match side {
        Side::Left => GOAL_ANCHOR_INSET,
        Side::Right => config.width - GOAL_ANCHOR_INSET,
    }
}

/// Opponent goal anchor x for a side
#[inline]
pub fn opponent_goal_x(side: Side, config: &PhysicsConfig) -> f32 {
    own_goal_x(side.opponent(), config)
}

/// Whether the ball's entire body is above the player's head
#[inline]
pub(crate) fn ball_overhead(ball: &Ball, player: &Player) -> bool {
    ball.pos.y + ball.radius < player.top()
}

/// Triangular noise in [-scale, scale], peaked at zero
pub(crate) fn noise(rng: &mut Pcg32, scale: f32) -> f32 {
    (rng.random::<f32>() + rng.random::<f32>() - 1.0) * scale
}

/// Keep a target inside the playable width for a player
#[inline]
pub(crate) fn clamp_target(x: f32, player: &Player, config: &PhysicsConfig) -> f32 {
    let half_w = player.width / 2.0;
    x.clamp(half_w, config.width - half_w)
}

#[derive(Debug, Clone)]
pub struct AiAgent {
    pub difficulty: Difficulty,
    pub params: AiParams,
    /// Goal this agent defends
    pub side: Side,
    reaction_timer: u32,
    target_x: f32,
    should_jump: bool,
    last_rule: Option<Rule>,
    decisions: u64,
    rng: Pcg32,
}

impl AiAgent {
    pub fn new(difficulty: Difficulty, side: Side, start_x: f32, seed: u64) -> Self {
        Self::with_params(difficulty, difficulty.params(), side, start_x, seed)
    }

    pub fn with_params(
        difficulty: Difficulty,
        params: AiParams,
        side: Side,
        start_x: f32,
        seed: u64,
    ) -> Self {
        Self {
            difficulty,
            params,
            side,
            reaction_timer: 0,
            target_x: start_x,
            should_jump: false,
            last_rule: None,
            decisions: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn target_x(&self) -> f32 {
        self.target_x
    }

    pub fn should_jump(&self) -> bool {
        self.should_jump
    }

    pub fn last_rule(&self) -> Option<Rule> {
        self.last_rule
    }

    /// Number of target recomputations so far
    pub fn decisions(&self) -> u64 {
        self.decisions
    }

    /// Forget the current plan (after a goal or restart)
    pub fn reset(&mut self, start_x: f32) {
        self.reaction_timer = 0;
        self.target_x = start_x;
        self.should_jump = false;
        self.last_rule = None;
    }

    pub fn in_danger_zone(&self, ball: &Ball, config: &PhysicsConfig) -> bool {
        (ball.pos.x - own_goal_x(self.side, config)).abs() < DANGER_ZONE
    }

    /// Per-frame entry point
    pub fn update(&mut self, player: &mut Player, ball: &Ball, config: &PhysicsConfig) {
        self.reaction_timer += 1;
        if self.reaction_timer >= self.params.reaction_time {
            self.reaction_timer = 0;
            self.calculate_action(player, ball, config);
        }
        self.execute_action(player, ball, config);
    }

    /// Pick a new target and jump decision; first matching rule wins
    pub fn calculate_action(&mut self, player: &Player, ball: &Ball, config: &PhysicsConfig) {
        let attack_dir = self.side.attack_dir();
        let dx = ball.pos.x - player.pos.x;

        let (target, rule) = if self.in_danger_zone(ball, config) {
            (ball.pos.x, Rule::DangerClear)
        } else {
            let (target, rule) = if ball_overhead(ball, player) && dx.abs() < JUGGLE_WINDOW {
                (player.pos.x + attack_dir * SIDESTEP, Rule::AvoidJuggle)
            } else if ball.speed() > MOVING_BALL_SPEED {
                let heading_home = ball.vel.x * -attack_dir > 0.0;
                if heading_home {
                    (ball.pos.x, Rule::Intercept)
                } else {
                    (self.predict(ball, config).x, Rule::Intercept)
                }
            } else {
                let to_goal = (ball.pos.x - opponent_goal_x(self.side, config)).abs();
                let offset = if to_goal < NEAR_GOAL {
                    STRIKE_OFFSET_NEAR
                } else {
                    STRIKE_OFFSET_FAR
                };
                (ball.pos.x - attack_dir * offset, Rule::Attack)
            };
            let scale = (1.0 - self.params.prediction_accuracy) * NOISE_SCALE;
            (target + noise(&mut self.rng, scale), rule)
        };

        self.target_x = clamp_target(target, player, config);
        self.should_jump = self.decide_jump(player, ball);
        self.last_rule = Some(rule);
        self.decisions += 1;

        log::debug!(
            "ai[{}] {:?} target={:.1} jump={}",
            self.side.as_str(),
            rule,
            self.target_x,
            self.should_jump
        );
    }

    /// Jump for a reachable ball above, otherwise an occasional surprise hop
    pub fn decide_jump(&mut self, player: &Player, ball: &Ball) -> bool {
        if !player.grounded {
            return false;
        }

        let dx = (ball.pos.x - player.pos.x).abs();
        let above_and_close = ball_overhead(ball, player)
            && ball.pos.y > player.top() - JUMP_REACH_Y
            && (JUGGLE_WINDOW..JUMP_REACH_X).contains(&dx);

        if above_and_close {
            self.rng.random::<f32>() < self.params.jump_timing
        } else {
            self.rng.random::<f32>() < self.params.aggressiveness * SURPRISE_JUMP_RATE
        }
    }

    /// Turn the current target into intent flags
    ///
    /// Outside the danger zone the agent is never allowed to walk further
    /// toward its own goal once it is inside its own third.
    pub fn execute_action(&mut self, player: &mut Player, ball: &Ball, config: &PhysicsConfig) {
        let x = player.pos.x;
        let mut move_left = self.target_x < x - DEAD_ZONE;
        let mut move_right = self.target_x > x + DEAD_ZONE;

        if !self.in_danger_zone(ball, config) {
            match self.side {
                Side::Right if x > config.width * (1.0 - OWN_THIRD) => move_right = false,
                Side::Left if x < config.width * OWN_THIRD => move_left = false,
                _ => {}
            }
        }

        player.intent = Intent {
            move_left,
            move_right,
            speed_limit: Some(self.params.max_speed * SPEED_CAP_SCALE),
        };

        if self.should_jump && player.grounded {
            player.queue_jump();
            self.should_jump = false;
        }
    }

    /// Predicted landing point of the ball, as far ahead as this agent sees
    pub fn predict(&self, ball: &Ball, config: &PhysicsConfig) -> Vec2 {
        let steps = prediction_steps(self.params.prediction_accuracy);
        predict_ball_position(ball, config, steps)
    }
}
