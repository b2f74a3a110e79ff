//! Pixel Bruno - an endless-runner game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, obstacles, difficulty, timers)
//! - `tuning`: Data-driven game balance
//! - `audio`: Cue dispatch toward the host's audio/effects layer
//! - `highscores`: The persisted best score
//! - `persistence`: Storage backends for the high score
//!
//! Rendering, sprite generation and sound synthesis belong to the host engine.
//! The core only emits [`sim::GameEvent`] cues for it to consume.

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::{HighScore, HighScoreOutcome};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Sprite frames are 32x32 source pixels, drawn at 2x
    pub const SPRITE_FRAME: f32 = 32.0;
    pub const SPRITE_SCALE: f32 = 2.0;

    /// Obstacles appear this far past the right edge of the field
    pub const SPAWN_MARGIN: f32 = 40.0;
    /// Obstacles left of this x are culled
    pub const CULL_X: f32 = -50.0;

    /// Bird flight height above the ground (sprite centre)
    pub const BIRD_ALTITUDE: f32 = 70.0;
    pub const BIRD_BOB_AMPLITUDE: f32 = 15.0;
    /// Full up-and-down bob cycle
    pub const BIRD_BOB_PERIOD_MS: f32 = 800.0;

    /// Slack for the ground-contact sensor
    pub const GROUND_EPSILON: f32 = 0.5;

    /// Camera shake on hit
    pub const HURT_SHAKE_MS: f32 = 200.0;
    pub const HURT_SHAKE_INTENSITY: f32 = 0.01;
    /// Alpha flash on hit (8 half-cycles of 100 ms)
    pub const HURT_FLASH_MS: f32 = 1600.0;

    /// Player tint by lives lost (index 0 = untouched)
    pub const LIFE_TINTS: [u32; 4] = [0xffffff, 0xffaaaa, 0xff6666, 0xff2222];
}
