//! Fixed timestep match loop
//!
//! One call to [`tick`] is one animation frame. Order while playing: clock,
//! controllers, player physics, ball physics, ball-player contacts, goal.

use glam::Vec2;
use serde::Serialize;

use super::physics::Physics;
use super::setup::{MatchRules, MatchSetup, TeamControl};
use super::state::{Ball, Intent, Player, Side};
use crate::ai::{AiAgent, TeamAi};
use crate::archetype::{BugStats, bug_by_id};
use crate::error::ConfigError;
use crate::profile::MatchResult;
use crate::seconds_to_steps;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// Frozen before kickoff or after a goal
    Countdown,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Someone reached the goal target or the clock ran out
    MatchOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    Kickoff,
    /// A bug touched the ball
    Kick { side: Side, slot: usize },
    Goal { scorer: Side, score: Score },
    MatchOver { winner: Option<Side> },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Countdown => "countdown",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::MatchOver => "matchOver",
        }
    }
}

impl Score {
    pub fn of(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn add(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn leader(&self) -> Option<Side> {
        match self.left.cmp(&self.right) {
            std::cmp::Ordering::Greater => Some(Side::Left),
            std::cmp::Ordering::Less => Some(Side::Right),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// One human's controls for a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PadInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Held jump re-queues every frame; it only fires from the ground
    pub jump: bool,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pad 0 drives the first human team, pad 1 the second
    pub pads: [PadInput; 2],
    /// Pause toggle
    pub pause: bool,
}

#[derive(Debug, Clone)]
enum Control {
    Human { pad: usize },
    Solo(Box<AiAgent>),
    /// Driven by `MatchState::squads`
    Squad,
}

/// A bug on the field and whatever steers it
#[derive(Debug, Clone)]
pub struct Competitor {
    pub player: Player,
    pub side: Side,
    /// 0 or 1 within the team
    pub slot: usize,
    pub bug_id: &'static str,
    pub stats: BugStats,
    control: Control,
}

impl Competitor {
    pub fn is_human(&self) -> bool {
        matches!(self.control, Control::Human { .. })
    }
}

#[derive(Debug, Clone)]
struct Squad {
    ai: TeamAi,
    /// Competitor indices, ascending
    members: [usize; 2],
}

#[derive(Debug, Clone)]
pub struct MatchState {
    pub phase: GamePhase,
    /// Phase to return to when unpausing
    resume_phase: GamePhase,
    pub physics: Physics,
    pub rules: MatchRules,
    pub arena: String,
    pub ball: Ball,
    pub competitors: Vec<Competitor>,
    squads: Vec<Squad>,
    pub score: Score,
    /// Steps left before play (re)starts
    pub countdown_steps: u32,
    /// Steps left on the match clock, if there is one
    pub clock_steps: Option<u32>,
    /// Steps spent playing
    pub time_steps: u64,
    pub seed: u64,
    events: Vec<GameEvent>,
}

/// Derive an independent stream seed per controller
fn stream_seed(seed: u64, stream: u64) -> u64 {
    seed ^ 0x9E37_79B9_7F4A_7C15u64.wrapping_mul(stream + 1)
}

/// Two distinct elements of a slice, `a < b`
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert!(a < b, "pair_mut needs ascending indices");
    let (head, tail) = items.split_at_mut(b);
    (&mut head[a], &mut tail[0])
}

impl MatchState {
    pub fn new(setup: MatchSetup, seed: u64) -> Result<Self, ConfigError> {
        setup.validate()?;

        let physics = Physics::new(setup.config);
        let mut ball = Ball::new(Vec2::ZERO);
        physics.reset_ball(&mut ball);

        let mut competitors = Vec::new();
        let mut squads = Vec::new();
        let mut next_pad = 0;

        for side in [Side::Left, Side::Right] {
            let team = setup.team(side);
            let first = competitors.len();

            for (slot, id) in team.bugs.iter().enumerate() {
                let archetype = bug_by_id(id).ok_or_else(|| ConfigError::UnknownBug(id.clone()))?;
                let stats = match team.boss_factor {
                    Some(factor) => archetype.stats.boss(factor),
                    None => archetype.stats,
                };
                let mut player = Player::new(Vec2::ZERO, &stats);
                physics.reset_player(&mut player, side, slot);

                let control = match team.control {
                    TeamControl::Human => {
                        // At most one human per side, so pads never run out
                        let pad = next_pad;
                        next_pad += 1;
                        Control::Human { pad }
                    }
                    TeamControl::Ai(_) if team.bugs.len() == 2 => Control::Squad,
                    TeamControl::Ai(difficulty) => Control::Solo(Box::new(AiAgent::new(
                        difficulty,
                        side,
                        player.pos.x,
                        stream_seed(seed, competitors.len() as u64),
                    ))),
                };

                competitors.push(Competitor {
                    player,
                    side,
                    slot,
                    bug_id: archetype.id,
                    stats,
                    control,
                });
            }

            if let (TeamControl::Ai(difficulty), 2) = (team.control, team.bugs.len()) {
                let members = [first, first + 1];
                let start = members.map(|i| competitors[i].player.pos.x);
                squads.push(Squad {
                    ai: TeamAi::new(difficulty, side, start, stream_seed(seed, 16 + first as u64)),
                    members,
                });
            }
        }

        let rules = setup.rules;
        log::info!(
            "Match set up: {} vs {} bugs, first to {}, seed {}",
            setup.home.bugs.len(),
            setup.away.bugs.len(),
            rules.goals_to_win,
            seed
        );

        Ok(Self {
            phase: GamePhase::Countdown,
            resume_phase: GamePhase::Countdown,
            physics,
            rules,
            arena: setup.arena,
            ball,
            competitors,
            squads,
            score: Score::default(),
            countdown_steps: seconds_to_steps(rules.kickoff_countdown_seconds),
            clock_steps: (rules.match_seconds > 0).then(|| seconds_to_steps(rules.match_seconds)),
            time_steps: 0,
            seed,
            events: Vec::new(),
        })
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::MatchOver
    }

    /// Score from the home (left) team's point of view
    pub fn result(&self) -> MatchResult {
        MatchResult {
            home_goals: self.score.left,
            away_goals: self.score.right,
        }
    }

    /// Whole seconds left on the clock, rounded up
    pub fn seconds_left(&self) -> Option<u32> {
        self.clock_steps
            .map(|steps| steps.div_ceil(crate::consts::STEPS_PER_SECOND))
    }

    /// Ball to the centre spot, every bug to its kickoff mark, plans dropped
    fn reset_positions(&mut self) {
        self.physics.reset_ball(&mut self.ball);
        for c in &mut self.competitors {
            self.physics.reset_player(&mut c.player, c.side, c.slot);
            if let Control::Solo(ai) = &mut c.control {
                ai.reset(c.player.pos.x);
            }
        }
        for squad in &mut self.squads {
            let start = squad.members.map(|i| self.competitors[i].player.pos.x);
            squad.ai.reset(start);
        }
    }

    fn finish(&mut self) {
        self.phase = GamePhase::MatchOver;
        let winner = self.score.leader();
        self.events.push(GameEvent::MatchOver { winner });
        log::info!(
            "Match over {}-{}, winner: {}",
            self.score.left,
            self.score.right,
            winner.map_or("draw", |s| s.as_str())
        );
    }

    /// Set intents for every bug
    fn drive(&mut self, input: &TickInput) {
        let config = self.physics.config;
        for c in &mut self.competitors {
            match &mut c.control {
                Control::Human { pad } => {
                    let pad = input.pads[*pad];
                    c.player.intent = Intent {
                        move_left: pad.move_left,
                        move_right: pad.move_right,
                        speed_limit: None,
                    };
                    if pad.jump {
                        c.player.queue_jump();
                    }
                }
                Control::Solo(ai) => ai.update(&mut c.player, &self.ball, &config),
                Control::Squad => {}
            }
        }

        for squad in &mut self.squads {
            let [a, b] = squad.members;
            let (first, second) = pair_mut(&mut self.competitors, a, b);
            squad
                .ai
                .update([&mut first.player, &mut second.player], &self.ball, &config);
        }
    }
}

/// Advance the match by one fixed timestep
pub fn tick(state: &mut MatchState, input: &TickInput) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Countdown | GamePhase::Playing => {
                state.resume_phase = state.phase;
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = state.resume_phase,
            GamePhase::MatchOver => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::MatchOver => return,
        GamePhase::Countdown => {
            state.countdown_steps = state.countdown_steps.saturating_sub(1);
            if state.countdown_steps == 0 {
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Kickoff);
                log::debug!("Kickoff");
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_steps += 1;
    if let Some(steps) = state.clock_steps.as_mut() {
        *steps = steps.saturating_sub(1);
        if *steps == 0 {
            state.finish();
            return;
        }
    }

    state.drive(input);

    let jump_boost = state.rules.jump_boost;
    for c in &mut state.competitors {
        state.physics.update_player(&mut c.player, &c.stats, jump_boost);
    }
    state.physics.update_ball(&mut state.ball);

    for c in &state.competitors {
        if state
            .physics
            .check_ball_player_collision(&mut state.ball, &c.player, &c.stats)
        {
            state.events.push(GameEvent::Kick {
                side: c.side,
                slot: c.slot,
            });
        }
    }

    if let Some(goal) = state.physics.check_goal(&state.ball) {
        // The ball sits in `goal`'s net, so the other side scores
        let scorer = goal.opponent();
        state.score.add(scorer);
        state.events.push(GameEvent::Goal {
            scorer,
            score: state.score,
        });
        log::info!(
            "Goal for {}: {}-{}",
            scorer.as_str(),
            state.score.left,
            state.score.right
        );

        state.reset_positions();
        if state.score.of(scorer) >= state.rules.goals_to_win {
            state.finish();
        } else {
            state.phase = GamePhase::Countdown;
            state.countdown_steps = seconds_to_steps(state.rules.goal_countdown_seconds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Difficulty;
    use crate::sim::setup::TeamSetup;

    fn quick_rules() -> MatchRules {
        MatchRules {
            kickoff_countdown_seconds: 1,
            goal_countdown_seconds: 1,
            ..Default::default()
        }
    }

    fn human_vs_ai(seed: u64) -> MatchState {
        let mut setup = MatchSetup::new(
            TeamSetup::human("ladybug"),
            TeamSetup::ai(Difficulty::Medium, &["spider"]),
        );
        setup.rules = quick_rules();
        MatchState::new(setup, seed).unwrap()
    }

    fn run_countdown(state: &mut MatchState) {
        let idle = TickInput::default();
        while state.phase == GamePhase::Countdown {
            tick(state, &idle);
        }
    }

    #[test]
    fn test_countdown_to_kickoff() {
        let mut state = human_vs_ai(1);
        assert_eq!(state.phase, GamePhase::Countdown);
        let ball_before = state.ball.pos;

        for _ in 0..59 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Countdown);
        // Frozen while counting down
        assert_eq!(state.ball.pos, ball_before);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.drain_events(), vec![GameEvent::Kickoff]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_tick_pause() {
        let mut state = human_vs_ai(2);
        run_countdown(&mut state);

        let input = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Paused);

        let ball = state.ball.pos;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, ball);

        // Unpause
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_human_pad_moves_player() {
        let mut state = human_vs_ai(3);
        run_countdown(&mut state);
        let x = state.competitors[0].player.pos.x;

        let input = TickInput {
            pads: [
                PadInput {
                    move_right: true,
                    ..Default::default()
                },
                PadInput::default(),
            ],
            ..Default::default()
        };
        tick(&mut state, &input);
        tick(&mut state, &input);
        assert!(state.competitors[0].player.pos.x > x);
        assert!(state.competitors[0].is_human());
    }

    #[test]
    fn test_goal_scores_for_the_other_side() {
        let mut state = human_vs_ai(4);
        run_countdown(&mut state);
        state.drain_events();

        // Drop the ball into the left net
        let goal_y = state.physics.config.goal_y();
        state.ball.pos = Vec2::new(20.0, goal_y + 40.0);
        state.ball.vel = Vec2::ZERO;
        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, Score { left: 0, right: 1 });
        assert_eq!(state.phase, GamePhase::Countdown);
        assert!(state.drain_events().contains(&GameEvent::Goal {
            scorer: Side::Right,
            score: Score { left: 0, right: 1 },
        }));
        // Everything back on the marks
        assert_eq!(state.ball.pos, Vec2::new(500.0, 350.0));
        assert_eq!(state.competitors[0].player.pos.x, 250.0);
    }

    #[test]
    fn test_reaching_goal_target_ends_match() {
        let mut setup = MatchSetup::new(TeamSetup::human("ant"), TeamSetup::human("spider"));
        setup.rules = MatchRules {
            goals_to_win: 1,
            ..quick_rules()
        };
        let mut state = MatchState::new(setup, 5).unwrap();
        run_countdown(&mut state);

        let goal_y = state.physics.config.goal_y();
        state.ball.pos = Vec2::new(980.0, goal_y + 40.0);
        tick(&mut state, &TickInput::default());

        assert!(state.is_over());
        assert_eq!(
            state.result(),
            MatchResult {
                home_goals: 1,
                away_goals: 0
            }
        );
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::MatchOver { winner: Some(Side::Left) })
        );

        // Nothing moves once it's over
        let ball = state.ball.pos;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, ball);
    }

    #[test]
    fn test_clock_runs_out() {
        let mut setup = MatchSetup::new(TeamSetup::human("ant"), TeamSetup::human("spider"));
        setup.rules = MatchRules {
            match_seconds: 1,
            ..quick_rules()
        };
        let mut state = MatchState::new(setup, 6).unwrap();
        run_countdown(&mut state);
        assert_eq!(state.seconds_left(), Some(1));

        for _ in 0..60 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.is_over());
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::MatchOver { winner: None })
        );
    }

    #[test]
    fn test_two_bug_ai_team_gets_a_squad() {
        let setup = MatchSetup::new(
            TeamSetup::human("ladybug"),
            TeamSetup::ai(Difficulty::Hard, &["ant", "stagBeetle"]).with_boss(1.2),
        );
        let state = MatchState::new(setup, 7).unwrap();
        assert_eq!(state.competitors.len(), 3);
        assert_eq!(state.squads.len(), 1);
        assert_eq!(state.squads[0].members, [1, 2]);
        assert_eq!(state.competitors[2].player.pos.x, 650.0);
        assert!((state.competitors[2].stats.power - 1.2).abs() < 1e-5);
    }

    #[test]
    fn test_rejects_bad_setup() {
        let setup = MatchSetup::new(TeamSetup::human("ladybug"), TeamSetup::human("mantis"));
        assert!(matches!(
            MatchState::new(setup, 0),
            Err(ConfigError::UnknownBug(_))
        ));
    }

    #[test]
    fn test_events_serialize_for_front_end() {
        let event = GameEvent::Goal {
            scorer: Side::Left,
            score: Score { left: 2, right: 1 },
        };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["type"], "goal");
        assert_eq!(json["scorer"], "Left");
        assert_eq!(json["score"]["left"], 2);
    }

    #[test]
    fn test_determinism() {
        let make = || {
            let mut setup = MatchSetup::exhibition(
                TeamSetup::ai(Difficulty::Hard, &["grasshopper"]),
                TeamSetup::ai(Difficulty::Pro, &["spider", "ant"]),
            );
            setup.rules = quick_rules();
            MatchState::new(setup, 99999).unwrap()
        };
        let mut state1 = make();
        let mut state2 = make();

        for _ in 0..2000 {
            tick(&mut state1, &TickInput::default());
            tick(&mut state2, &TickInput::default());
        }

        assert_eq!(state1.ball.pos, state2.ball.pos);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.drain_events(), state2.drain_events());
    }
}
