//! Data-driven game balance
//!
//! Every gameplay number the simulation depends on lives here so a JSON file
//! can override it without a rebuild. Missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::LIFE_TINTS;

/// Why a tuning override was rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

/// Balance parameters for a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Speed & score ===
    /// Initial scroll speed (units/s)
    pub start_speed: f32,
    /// Speed added on every speed-up
    pub speed_step: f32,
    /// Seconds between speed-ups
    pub speedup_interval_secs: f32,
    /// Score accrues at `speed * dt / score_divisor`
    pub score_divisor: f32,
    /// First milestone cue
    pub milestone_start: f32,
    pub milestone_step: f32,

    // === Spawning ===
    pub spawn_base_interval_ms: f32,
    pub spawn_min_interval_ms: f32,
    /// Speed above `start_speed` at which the interval bottoms out
    pub spawn_speed_span: f32,
    pub spawn_jitter_min_ms: i32,
    pub spawn_jitter_max_ms: i32,

    // === Player ===
    pub starting_lives: u8,
    pub invincibility_ms: f32,
    pub jump_impulse: f32,
    pub death_bounce: f32,
    pub gravity: f32,
    pub player_x: f32,
    /// Run animation frame rate at `start_speed`
    pub run_anim_base_fps: f32,
    /// Speed units per extra run animation frame
    pub run_anim_speed_divisor: f32,

    // === Session ===
    pub game_over_grace_ms: f32,

    // === Touch input ===
    pub swipe_max_duration_ms: f32,
    pub swipe_min_travel: f32,
    pub swipe_duck_hold_ms: f32,

    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Distance from the bottom of the field to the ground surface
    pub ground_inset: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            start_speed: 200.0,
            speed_step: 20.0,
            speedup_interval_secs: 10.0,
            score_divisor: 20.0,
            milestone_start: 100.0,
            milestone_step: 100.0,

            spawn_base_interval_ms: 2000.0,
            spawn_min_interval_ms: 700.0,
            spawn_speed_span: 400.0,
            spawn_jitter_min_ms: -200,
            spawn_jitter_max_ms: 400,

            starting_lives: 3,
            invincibility_ms: 1500.0,
            jump_impulse: 420.0,
            death_bounce: 200.0,
            gravity: 1200.0,
            player_x: 120.0,
            run_anim_base_fps: 10.0,
            run_anim_speed_divisor: 20.0,

            game_over_grace_ms: 800.0,

            swipe_max_duration_ms: 300.0,
            swipe_min_travel: 30.0,
            swipe_duck_hold_ms: 500.0,

            field_width: 800.0,
            field_height: 400.0,
            ground_inset: 16.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and check it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.spawn_jitter_min_ms > self.spawn_jitter_max_ms {
            return Err(TuningError::Invalid("spawn jitter range is inverted"));
        }
        if self.spawn_speed_span <= 0.0 {
            return Err(TuningError::Invalid("spawn_speed_span must be positive"));
        }
        if self.score_divisor <= 0.0 {
            return Err(TuningError::Invalid("score_divisor must be positive"));
        }
        if self.spawn_min_interval_ms <= 0.0 {
            return Err(TuningError::Invalid("spawn_min_interval_ms must be positive"));
        }
        if self.speedup_interval_secs <= 0.0 || self.milestone_step <= 0.0 {
            return Err(TuningError::Invalid("speed-up interval and milestone step must be positive"));
        }
        if self.starting_lives == 0 || usize::from(self.starting_lives) >= LIFE_TINTS.len() {
            return Err(TuningError::Invalid("starting_lives must be 1..=3"));
        }
        Ok(())
    }

    /// Y coordinate of the ground surface (screen space, y grows downward)
    pub fn ground_y(&self) -> f32 {
        self.field_height - self.ground_inset
    }
}
