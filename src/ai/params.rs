//! Difficulty presets for computer opponents

use serde::{Deserialize, Serialize};

/// AI difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Pro,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Pro,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Pro => "pro",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "pro" => Some(Difficulty::Pro),
            _ => None,
        }
    }

    pub fn params(&self) -> AiParams {
        match self {
            Difficulty::Easy => AiParams {
                reaction_time: 30,
                prediction_accuracy: 0.30,
                jump_timing: 0.40,
                aggressiveness: 0.40,
                max_speed: 0.55,
                teamwork: 0.30,
                spacing: 100.0,
            },
            Difficulty::Medium => AiParams {
                reaction_time: 18,
                prediction_accuracy: 0.60,
                jump_timing: 0.60,
                aggressiveness: 0.65,
                max_speed: 0.75,
                teamwork: 0.60,
                spacing: 130.0,
            },
            Difficulty::Hard => AiParams {
                reaction_time: 10,
                prediction_accuracy: 0.80,
                jump_timing: 0.80,
                aggressiveness: 0.85,
                max_speed: 0.92,
                teamwork: 0.85,
                spacing: 160.0,
            },
            Difficulty::Pro => AiParams {
                reaction_time: 5,
                prediction_accuracy: 0.95,
                jump_timing: 0.95,
                aggressiveness: 0.95,
                max_speed: 1.0,
                teamwork: 0.95,
                spacing: 180.0,
            },
        }
    }
}

/// Tuning knobs derived from a difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiParams {
    /// Frames between re-decisions
    pub reaction_time: u32,
    /// 0-1; lower means noisier target selection
    pub prediction_accuracy: f32,
    /// Probability of taking a good jump
    pub jump_timing: f32,
    /// Drives unprompted jumps
    pub aggressiveness: f32,
    /// Fraction of the full run speed the agent may use
    pub max_speed: f32,
    /// Two-player teams: how reliably the defender keeps its distance
    pub teamwork: f32,
    /// Two-player teams: preferred gap between team-mates (px)
    pub spacing: f32,
}
