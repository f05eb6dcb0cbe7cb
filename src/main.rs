//! Bug Ball Blitz entry point
//!
//! On the web the JavaScript front end drives a `WasmMatch` once per
//! animation frame and draws whatever it reads back. Natively this runs a
//! headless computer-vs-computer match and logs it.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::prelude::*;

    use bug_ball_blitz::profile::{Outcome, Profile};
    use bug_ball_blitz::settings::Settings;
    use bug_ball_blitz::sim::{MatchSetup, MatchState, PadInput, TickInput, tick};

    fn to_js(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// Stored profiles as a JSON array, newest first
    #[wasm_bindgen]
    pub fn list_profiles() -> Result<String, JsValue> {
        serde_json::to_string(&Profile::list()).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn delete_profile(name: &str) {
        Profile::delete(name);
    }

    /// A running match as seen from JavaScript
    #[wasm_bindgen]
    pub struct WasmMatch {
        state: MatchState,
        /// Tower level being played, if any
        tower_level: Option<u32>,
        recorded: bool,
    }

    #[wasm_bindgen]
    impl WasmMatch {
        /// Quick play against the computer using the stored settings
        #[wasm_bindgen(constructor)]
        pub fn new(seed: u32) -> Result<WasmMatch, JsValue> {
            let settings = Settings::load();
            let setup = MatchSetup::quickplay(&settings, seed as u64);
            Self::start(setup, seed, None)
        }

        pub fn versus(away_bug: &str, seed: u32) -> Result<WasmMatch, JsValue> {
            let settings = Settings::load();
            Self::start(MatchSetup::versus(&settings, away_bug), seed, None)
        }

        pub fn tower(level: u32, seed: u32) -> Result<WasmMatch, JsValue> {
            let settings = Settings::load();
            let setup = MatchSetup::tower(&settings, level, seed as u64);
            Self::start(setup, seed, Some(level))
        }

        fn start(setup: MatchSetup, seed: u32, tower_level: Option<u32>) -> Result<WasmMatch, JsValue> {
            let state = MatchState::new(setup, seed as u64).map_err(to_js)?;
            Ok(WasmMatch {
                state,
                tower_level,
                recorded: false,
            })
        }

        /// Advance one frame with both pads' state
        #[allow(clippy::too_many_arguments)]
        pub fn step(
            &mut self,
            p1_left: bool,
            p1_right: bool,
            p1_jump: bool,
            p2_left: bool,
            p2_right: bool,
            p2_jump: bool,
            pause: bool,
        ) {
            let input = TickInput {
                pads: [
                    PadInput {
                        move_left: p1_left,
                        move_right: p1_right,
                        jump: p1_jump,
                    },
                    PadInput {
                        move_left: p2_left,
                        move_right: p2_right,
                        jump: p2_jump,
                    },
                ],
                pause,
            };
            tick(&mut self.state, &input);
        }

        /// Events since the last call, as a JSON array
        pub fn drain_events(&mut self) -> Result<String, JsValue> {
            serde_json::to_string(&self.state.drain_events()).map_err(to_js)
        }

        pub fn phase(&self) -> String {
            self.state.phase.as_str().to_string()
        }

        pub fn ball_x(&self) -> f32 {
            self.state.ball.pos.x
        }

        pub fn ball_y(&self) -> f32 {
            self.state.ball.pos.y
        }

        pub fn ball_rotation(&self) -> f32 {
            self.state.ball.rotation
        }

        pub fn player_count(&self) -> usize {
            self.state.competitors.len()
        }

        pub fn player_x(&self, index: usize) -> f32 {
            self.state.competitors.get(index).map_or(0.0, |c| c.player.pos.x)
        }

        pub fn player_y(&self, index: usize) -> f32 {
            self.state.competitors.get(index).map_or(0.0, |c| c.player.pos.y)
        }

        pub fn player_size(&self, index: usize) -> f32 {
            self.state.competitors.get(index).map_or(0.0, |c| c.player.width)
        }

        pub fn player_facing(&self, index: usize) -> f32 {
            self.state.competitors.get(index).map_or(1.0, |c| c.player.facing)
        }

        pub fn player_bug(&self, index: usize) -> String {
            self.state
                .competitors
                .get(index)
                .map_or_else(String::new, |c| c.bug_id.to_string())
        }

        pub fn score_left(&self) -> u32 {
            self.state.score.left
        }

        pub fn score_right(&self) -> u32 {
            self.state.score.right
        }

        /// Whole seconds on the match clock, -1 when there is none
        pub fn seconds_left(&self) -> i32 {
            self.state.seconds_left().map_or(-1, |s| s as i32)
        }

        /// Whole seconds left on the current countdown
        pub fn countdown_seconds(&self) -> u32 {
            self.state
                .countdown_steps
                .div_ceil(bug_ball_blitz::consts::STEPS_PER_SECOND)
        }

        /// Fold a finished match into the named profile. Only the first call
        /// after the final whistle counts.
        pub fn record(&mut self, profile_name: &str) -> Result<(), JsValue> {
            if !self.state.is_over() || self.recorded {
                return Ok(());
            }
            let mut profile = match Profile::load(profile_name) {
                Some(profile) => profile,
                None => Profile::new(profile_name).map_err(to_js)?,
            };

            let result = self.state.result();
            profile.record_match(&result);
            if let (Some(level), Outcome::Win) = (self.tower_level, result.outcome()) {
                profile.record_tower_win(level);
            }
            profile.save();
            self.recorded = true;
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    log::info!("Bug Ball Blitz (web) ready");
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bug_ball_blitz::ai::Difficulty;
    use bug_ball_blitz::consts::STEPS_PER_SECOND;
    use bug_ball_blitz::sim::{GameEvent, MatchSetup, MatchState, TeamSetup, TickInput, tick};

    env_logger::init();
    log::info!("Bug Ball Blitz (native) starting headless exhibition...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let setup = MatchSetup::exhibition(
        TeamSetup::ai(Difficulty::Hard, &["grasshopper"]),
        TeamSetup::ai(Difficulty::Medium, &["stagBeetle", "ant"]),
    );
    let mut state = match MatchState::new(setup, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Could not start match: {e}");
            std::process::exit(1);
        }
    };

    let input = TickInput::default();
    while !state.is_over() {
        tick(&mut state, &input);
        for event in state.drain_events() {
            if let GameEvent::Goal { scorer, score } = event {
                log::info!(
                    "[{:>4}s] goal {}: {}-{}",
                    state.time_steps / STEPS_PER_SECOND as u64,
                    scorer.as_str(),
                    score.left,
                    score.right
                );
            }
        }
    }

    let result = state.result();
    println!(
        "Final score {}-{} after {}s ({:?} for home)",
        result.home_goals,
        result.away_goals,
        state.time_steps / STEPS_PER_SECOND as u64,
        result.outcome()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
