//! Computer opponents
//!
//! `AiAgent` drives a single bug, `TeamAi` a pair. Both only ever set a
//! player's intent and queue jumps; the physics step does the moving.

mod agent;
mod params;
mod predict;
mod team;

pub use agent::{AiAgent, DANGER_ZONE, DEAD_ZONE, OWN_THIRD, Rule, own_goal_x};
pub use params::{AiParams, Difficulty};
pub use predict::{PREDICTION_STEPS, predict_ball_position, prediction_steps};
pub use team::{Role, TeamAi};
