//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Delayed work goes through the session's [`Timers`], never wall-clock
//! - No rendering, audio or platform dependencies; effects leave as
//!   [`GameEvent`] cues

pub mod collision;
pub mod difficulty;
pub mod events;
pub mod hitbox;
pub mod input;
pub mod obstacle;
pub mod player;
pub mod runner;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::{OverlapOutcome, detect_overlaps};
pub use difficulty::{Difficulty, DifficultyStep};
pub use events::{AnimationCue, GameEvent, SoundCue, SquashKind};
pub use hitbox::{Aabb, Anchor, Hitbox};
pub use input::{InputState, is_duck_swipe};
pub use obstacle::{Obstacle, ObstacleKind, ObstacleSpec, Oscillation};
pub use player::{HealthState, HurtOutcome, MovementState, Player};
pub use runner::Runner;
pub use spawner::{Spawner, available_kinds, base_interval_ms};
pub use state::{GameSession, SessionPhase};
pub use tick::{TickInput, tick};
pub use timers::{FiredTimer, TimerId, TimerTask, Timers};
