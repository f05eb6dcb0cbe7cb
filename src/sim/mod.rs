//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one step per animation frame)
//! - Seeded RNG only
//! - Stable iteration order (competitors in setup order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod config;
pub mod physics;
pub mod setup;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Contact, HitZone, ball_box_contact, distance_to_box};
pub use config::PhysicsConfig;
pub use physics::Physics;
pub use setup::{MatchRules, MatchSetup, TeamControl, TeamSetup};
pub use state::{Ball, Intent, Player, Side};
pub use tick::{Competitor, GameEvent, GamePhase, MatchState, PadInput, Score, TickInput, tick};
