//! Two-player computer team
//!
//! Each frame the team-mate nearer the ball attacks and the other defends.
//! Both keep their own reaction timer, so their decisions drift apart.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::agent::{clamp_target, opponent_goal_x, own_goal_x};
use super::params::{AiParams, Difficulty};
use crate::sim::{Ball, Intent, PhysicsConfig, Player, Side};

const SIDESTEP: f32 = 70.0;
const OVERHEAD_WINDOW: f32 = 35.0;
const STRIKE_OFFSET_NEAR: f32 = 40.0;
const STRIKE_OFFSET_FAR: f32 = 35.0;
const NEAR_GOAL: f32 = 250.0;
const RETREAT_RANGE: f32 = 120.0;
const ATTACK_NOISE: f32 = 50.0;
const ATTACK_GUARD: f32 = 0.8;
const ATTACK_DEAD_ZONE: f32 = 15.0;
const ATTACK_SPEED_SCALE: f32 = 5.5;

const CLEAR_RANGE: f32 = 250.0;
const DEFENSIVE_LINE: f32 = 0.7;
const DEFENSIVE_HALF: f32 = 0.55;
const DEFEND_END_MARGIN: f32 = 100.0;
const DEFEND_DEAD_ZONE: f32 = 20.0;
const DEFEND_SPEED_SCALE: f32 = 5.0;

/// A grounded ball this close, sitting between a player and its own goal,
/// is jumped over rather than pushed in
const HURDLE_RANGE: f32 = 70.0;
const HURDLE_LANDING: f32 = 60.0;
const ON_GROUND_BAND: f32 = 50.0;

/// Space kept to the own goal when backing off
const BACKOFF_LIMIT: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Attacker,
    Defender,
}

/// What a team-mate decided at its last reaction
#[derive(Debug, Clone, Copy)]
struct Plan {
    target_x: f32,
    role: Role,
    /// Jumping over a ball in front of our goal; the own-goal guard is off
    hurdle: bool,
}

#[derive(Debug, Clone)]
struct Member {
    reaction_timer: u32,
    plan: Plan,
    should_jump: bool,
}

#[derive(Debug, Clone)]
pub struct TeamAi {
    pub difficulty: Difficulty,
    pub params: AiParams,
    pub side: Side,
    members: [Member; 2],
    attacker: usize,
    rng: Pcg32,
}

impl TeamAi {
    pub fn new(difficulty: Difficulty, side: Side, start_x: [f32; 2], seed: u64) -> Self {
        Self::with_params(difficulty, difficulty.params(), side, start_x, seed)
    }

    pub fn with_params(
        difficulty: Difficulty,
        params: AiParams,
        side: Side,
        start_x: [f32; 2],
        seed: u64,
    ) -> Self {
        let member = |x: f32, role: Role| Member {
            reaction_timer: 0,
            plan: Plan {
                target_x: x,
                role,
                hurdle: false,
            },
            should_jump: false,
        };
        Self {
            difficulty,
            params,
            side,
            members: [
                member(start_x[0], Role::Attacker),
                member(start_x[1], Role::Defender),
            ],
            attacker: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Index of the current attacker
    pub fn attacker(&self) -> usize {
        self.attacker
    }

    pub fn role(&self, index: usize) -> Role {
        if index == self.attacker {
            Role::Attacker
        } else {
            Role::Defender
        }
    }

    /// Target of a team-mate's current plan
    pub fn target_x(&self, index: usize) -> f32 {
        self.members[index].plan.target_x
    }

    /// Forget both plans (after a goal or restart)
    pub fn reset(&mut self, start_x: [f32; 2]) {
        for (i, m) in self.members.iter_mut().enumerate() {
            m.reaction_timer = 0;
            m.should_jump = false;
            m.plan = Plan {
                target_x: start_x[i],
                role: if i == 0 { Role::Attacker } else { Role::Defender },
                hurdle: false,
            };
        }
        self.attacker = 0;
    }

    /// Per-frame entry point for both team-mates
    pub fn update(&mut self, players: [&mut Player; 2], ball: &Ball, config: &PhysicsConfig) {
        let [first, second] = players;
        self.assign_roles(first, second, ball);

        for (i, player) in [&mut *first, &mut *second].into_iter().enumerate() {
            self.members[i].reaction_timer += 1;
            if self.members[i].reaction_timer >= self.params.reaction_time {
                self.members[i].reaction_timer = 0;
                let plan = match self.role(i) {
                    Role::Attacker => self.attack(i, player, ball, config),
                    Role::Defender => self.defend(i, player, ball, config),
                };
                log::debug!(
                    "team[{}] #{} {:?} target={:.1}",
                    self.side.as_str(),
                    i,
                    plan.role,
                    plan.target_x
                );
                self.members[i].plan = plan;
            }
            self.execute(i, player, config);
        }

        let defender = 1 - self.attacker;
        let (def, att) = if defender == 0 {
            (first, second)
        } else {
            (second, first)
        };
        self.maintain_spacing(def, att, config);
    }

    /// Nearer team-mate by x attacks; exact ties are a coin flip
    fn assign_roles(&mut self, first: &Player, second: &Player, ball: &Ball) {
        let d0 = (ball.pos.x - first.pos.x).abs();
        let d1 = (ball.pos.x - second.pos.x).abs();
        self.attacker = if d0 < d1 {
            0
        } else if d1 < d0 {
            1
        } else {
            usize::from(self.rng.random::<bool>())
        };
    }

    /// Ball grounded, close, and sitting between the player and its own goal
    fn hurdle(&self, player: &Player, ball: &Ball, config: &PhysicsConfig) -> Option<Plan> {
        let own_goal = own_goal_x(self.side, config);
        let between = match self.side {
            Side::Right => ball.pos.x > player.pos.x && ball.pos.x < own_goal,
            Side::Left => ball.pos.x < player.pos.x && ball.pos.x > own_goal,
        };
        let on_ground = ball.pos.y > config.ground_y() - ball.radius - ON_GROUND_BAND;
        let close = (ball.pos.x - player.pos.x).abs() < HURDLE_RANGE;

        (between && on_ground && close && player.grounded).then(|| Plan {
            target_x: ball.pos.x - self.side.attack_dir() * HURDLE_LANDING,
            role: Role::Attacker,
            hurdle: true,
        })
    }

    fn attack(&mut self, i: usize, player: &Player, ball: &Ball, config: &PhysicsConfig) -> Plan {
        if let Some(plan) = self.hurdle(player, ball, config) {
            self.members[i].should_jump = true;
            return plan;
        }

        let attack_dir = self.side.attack_dir();
        let opponent_goal = opponent_goal_x(self.side, config);
        let dx = (ball.pos.x - player.pos.x).abs();
        let overhead = ball.pos.y < player.top() - ON_GROUND_BAND && dx < OVERHEAD_WINDOW;

        let target = if (player.pos.x - own_goal_x(self.side, config)).abs() < RETREAT_RANGE {
            config.width / 2.0
        } else {
            let target = if overhead {
                player.pos.x + attack_dir * SIDESTEP
            } else if (ball.pos.x - opponent_goal).abs() < NEAR_GOAL {
                ball.pos.x - attack_dir * STRIKE_OFFSET_NEAR
            } else {
                ball.pos.x - attack_dir * STRIKE_OFFSET_FAR
            };
            let error = (1.0 - self.params.prediction_accuracy) * ATTACK_NOISE;
            target + (self.rng.random::<f32>() - 0.5) * error
        };

        // Headers, keener near the opponent's goal
        let ball_high = ball.pos.y < player.top() - 25.0;
        if ball_high && dx < 75.0 && player.grounded && !overhead {
            let near_goal = (ball.pos.x - opponent_goal).abs() < 200.0;
            let chance = self.params.jump_timing * if near_goal { 1.1 } else { 0.9 };
            self.members[i].should_jump = self.rng.random::<f32>() < chance;
        }

        Plan {
            target_x: clamp_target(target, player, config),
            role: Role::Attacker,
            hurdle: false,
        }
    }

    fn defend(&mut self, i: usize, player: &Player, ball: &Ball, config: &PhysicsConfig) -> Plan {
        if let Some(plan) = self.hurdle(player, ball, config) {
            self.members[i].should_jump = true;
            return Plan {
                role: Role::Defender,
                ..plan
            };
        }

        let w = config.width;
        let target = if (ball.pos.x - own_goal_x(self.side, config)).abs() < CLEAR_RANGE {
            ball.pos.x
        } else {
            match self.side {
                Side::Right => {
                    let mid = (ball.pos.x + w * DEFENSIVE_LINE) / 2.0;
                    mid.max(w * DEFENSIVE_HALF).min(w - DEFEND_END_MARGIN)
                }
                Side::Left => {
                    let mid = (ball.pos.x + w * (1.0 - DEFENSIVE_LINE)) / 2.0;
                    mid.min(w * (1.0 - DEFENSIVE_HALF)).max(DEFEND_END_MARGIN)
                }
            }
        };

        let ball_high = ball.pos.y < player.top() - 35.0;
        let dx = (ball.pos.x - player.pos.x).abs();
        if ball_high && dx < 90.0 && player.grounded {
            self.members[i].should_jump =
                self.rng.random::<f32>() < self.params.jump_timing * 0.75;
        }

        Plan {
            target_x: clamp_target(target, player, config),
            role: Role::Defender,
            hurdle: false,
        }
    }

    fn execute(&mut self, i: usize, player: &mut Player, config: &PhysicsConfig) {
        let plan = self.members[i].plan;
        let x = player.pos.x;
        let (dead_zone, speed_scale) = match plan.role {
            Role::Attacker => (ATTACK_DEAD_ZONE, ATTACK_SPEED_SCALE),
            Role::Defender => (DEFEND_DEAD_ZONE, DEFEND_SPEED_SCALE),
        };

        let mut move_left = plan.target_x < x - dead_zone;
        let mut move_right = plan.target_x > x + dead_zone;

        if plan.role == Role::Attacker && !plan.hurdle {
            match self.side {
                Side::Right if x > config.width * ATTACK_GUARD => move_right = false,
                Side::Left if x < config.width * (1.0 - ATTACK_GUARD) => move_left = false,
                _ => {}
            }
        }

        player.intent = Intent {
            move_left,
            move_right,
            speed_limit: Some(self.params.max_speed * speed_scale),
        };

        let member = &mut self.members[i];
        if member.should_jump && player.grounded {
            player.queue_jump();
            member.should_jump = false;
        }
    }

    /// The defender drops back toward its goal when crowding the attacker
    fn maintain_spacing(&mut self, defender: &mut Player, attacker: &Player, config: &PhysicsConfig) {
        if (defender.pos.x - attacker.pos.x).abs() >= self.params.spacing {
            return;
        }
        if self.rng.random::<f32>() >= self.params.teamwork {
            return;
        }

        let own_goal = own_goal_x(self.side, config);
        let room = (defender.pos.x - own_goal).abs() > BACKOFF_LIMIT;
        let intent = &mut defender.intent;
        match self.side {
            Side::Right => {
                intent.move_right = room;
                intent.move_left = false;
            }
            Side::Left => {
                intent.move_left = room;
                intent.move_right = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn config() -> PhysicsConfig {
        PhysicsConfig::with_size(1000.0, 700.0)
    }

    fn player_at(x: f32) -> Player {
        Player::with_size(Vec2::new(x, config().ground_y()), 40.0, 40.0)
    }

    fn resting_ball(x: f32) -> Ball {
        Ball::new(Vec2::new(x, config().ground_y() - 15.0))
    }

    /// Pro numbers but deciding every frame and always keeping spacing
    fn eager(side: Side) -> TeamAi {
        let params = AiParams {
            reaction_time: 1,
            teamwork: 1.0,
            ..Difficulty::Pro.params()
        };
        TeamAi::with_params(Difficulty::Pro, params, side, [650.0, 750.0], 1)
    }

    #[test]
    fn test_nearer_player_attacks() {
        let mut team = eager(Side::Right);
        let mut a = player_at(700.0);
        let mut b = player_at(450.0);
        team.update([&mut a, &mut b], &resting_ball(400.0), &config());
        assert_eq!(team.attacker(), 1);
        assert_eq!(team.role(0), Role::Defender);
        assert_eq!(team.role(1), Role::Attacker);
    }

    #[test]
    fn test_attacker_lines_up_behind_ball() {
        let mut team = eager(Side::Right);
        let mut a = player_at(450.0);
        let mut b = player_at(800.0);
        team.update([&mut a, &mut b], &resting_ball(400.0), &config());
        // Right side attacks leftward; 35 behind plus a little noise
        assert!((team.target_x(0) - 435.0).abs() < 1.5);
    }

    #[test]
    fn test_defender_holds_own_half() {
        let mut team = eager(Side::Right);
        let mut a = player_at(250.0);
        let mut b = player_at(800.0);
        team.update([&mut a, &mut b], &resting_ball(200.0), &config());
        // Midpoint of 200 and 700 is 450, pulled back to 550
        assert!((team.target_x(1) - 550.0).abs() < 1e-3);

        let mut team = eager(Side::Left);
        let mut a = player_at(850.0);
        let mut b = player_at(200.0);
        team.update([&mut a, &mut b], &resting_ball(800.0), &config());
        assert!((team.target_x(1) - 450.0).abs() < 1e-3);
    }

    #[test]
    fn test_defender_clears_near_goal() {
        let mut team = eager(Side::Right);
        let mut a = player_at(780.0);
        let mut b = player_at(600.0);
        team.update([&mut a, &mut b], &resting_ball(760.0), &config());
        assert_eq!(team.attacker(), 0);
        assert_eq!(team.target_x(1), 760.0);
    }

    #[test]
    fn test_attacker_retreats_from_own_goal() {
        let mut team = eager(Side::Right);
        let mut a = player_at(900.0);
        let mut b = player_at(300.0);
        team.update([&mut a, &mut b], &resting_ball(860.0), &config());
        assert_eq!(team.attacker(), 0);
        assert_eq!(team.target_x(0), 500.0);
    }

    #[test]
    fn test_attacker_guard_blocks_own_goal_run() {
        let mut team = eager(Side::Right);
        let mut a = player_at(820.0);
        let mut b = player_at(200.0);
        // Ball high above and beyond the attacker, out of hurdle range
        let ball = Ball::new(Vec2::new(900.0, 100.0));
        team.update([&mut a, &mut b], &ball, &config());
        assert_eq!(team.attacker(), 0);
        assert!(!a.intent.move_right);
    }

    #[test]
    fn test_defender_backs_off_when_crowding() {
        let mut team = eager(Side::Right);
        let mut a = player_at(500.0);
        let mut b = player_at(560.0);
        team.update([&mut a, &mut b], &resting_ball(300.0), &config());
        assert_eq!(team.attacker(), 0);
        assert!(b.intent.move_right);
        assert!(!b.intent.move_left);

        // No room left behind the defender: it stands still
        let mut a = player_at(780.0);
        let mut b = player_at(870.0);
        team.update([&mut a, &mut b], &resting_ball(300.0), &config());
        assert!(!b.intent.move_right && !b.intent.move_left);
    }

    #[test]
    fn test_hurdles_ball_in_front_of_own_goal() {
        let mut team = eager(Side::Right);
        let mut a = player_at(600.0);
        let mut b = player_at(200.0);
        team.update([&mut a, &mut b], &resting_ball(650.0), &config());
        assert_eq!(team.attacker(), 0);
        assert!(a.jump_queued());
        assert_eq!(team.target_x(0), 710.0);
        assert!(a.intent.move_right);
    }

    #[test]
    fn test_reaction_timers_are_per_member() {
        let mut team = TeamAi::new(Difficulty::Easy, Side::Right, [650.0, 750.0], 3);
        let mut a = player_at(650.0);
        let mut b = player_at(750.0);
        let ball = resting_ball(300.0);
        for _ in 0..29 {
            team.update([&mut a, &mut b], &ball, &config());
        }
        assert_eq!(team.target_x(0), 650.0);
        assert_eq!(team.target_x(1), 750.0);
        team.update([&mut a, &mut b], &ball, &config());
        assert_ne!(team.target_x(0), 650.0);
    }
}
