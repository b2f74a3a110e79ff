//! Game session state
//!
//! A session owns exactly one player, one spawner (and through it the live
//! obstacles), the score/speed controller and the timers that drive delayed
//! transitions. Everything runs on the simulation tick; timer callbacks are
//! dispatched from inside it, so no state is ever shared across threads.

use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::events::GameEvent;
use super::input::InputState;
use super::player::Player;
use super::spawner::Spawner;
use super::tick::{TickInput, tick};
use super::timers::{TimerTask, Timers};
use crate::tuning::Tuning;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Normal play
    Running,
    /// Last life lost: spawning stopped and score frozen, death animation
    /// still playing
    Dying,
    /// Terminal: nothing moves any more
    Over,
}

/// One run, from start to game over
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: SessionPhase,
    pub player: Player,
    pub spawner: Spawner,
    pub difficulty: Difficulty,
    pub timers: Timers,
    /// Simulation tick counter
    pub time_ticks: u64,
    final_score: Option<u32>,
    pub(crate) input: InputState,
    pub(crate) events: Vec<GameEvent>,
}

impl GameSession {
    /// Start a run with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Start a run; the spawn stream is armed immediately
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut timers = Timers::new();
        let mut spawner = Spawner::new(&tuning, seed);
        spawner.start(&mut timers);

        log::info!("Session started with seed {}", seed);

        Self {
            seed,
            tuning,
            phase: SessionPhase::Running,
            player: Player::new(&tuning),
            spawner,
            difficulty: Difficulty::new(&tuning),
            timers,
            time_ticks: 0,
            final_score: None,
            input: InputState::new(),
            events: Vec::new(),
        }
    }

    /// Throw the current run away and start over. Pending timers die with
    /// the old run, so nothing armed before the restart can fire after it.
    pub fn restart(&mut self, seed: u64) {
        self.timers.cancel_all();
        *self = Self::with_tuning(seed, self.tuning);
        self.events.push(GameEvent::Restart);
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Advance one simulation step; see [`tick`](super::tick::tick).
    ///
    /// Cues pile up in the session until [`GameSession::drain_events`] is
    /// called, so hosts must drain once per frame.
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        tick(self, input, dt);
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// True once the session is permanently frozen
    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::Over
    }

    pub fn score(&self) -> f32 {
        self.difficulty.score()
    }

    pub fn game_speed(&self) -> f32 {
        self.difficulty.game_speed()
    }

    /// Integer score recorded when the session froze
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    /// Cues emitted since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Input ===

    pub fn request_jump(&mut self) {
        if self.is_running() {
            self.player.jump(&mut self.events);
        }
    }

    pub fn set_duck_key(&mut self, held: bool) {
        if self.is_running() {
            self.input
                .set_duck_key(held, &mut self.player, &mut self.events);
        }
    }

    pub fn pointer_down(&mut self, y: f32) {
        if self.is_running() {
            let now = self.timers.now_ms();
            self.input
                .pointer_down(y, now, &mut self.player, &mut self.events);
        }
    }

    pub fn pointer_up(&mut self, y: f32) {
        if self.is_running() {
            let now = self.timers.now_ms();
            self.input.pointer_up(
                y,
                now,
                &self.tuning,
                &mut self.player,
                &mut self.timers,
                &mut self.events,
            );
        }
    }

    // === Game over ===

    /// Last life lost: stop spawning now, freeze after the grace delay
    pub(crate) fn begin_game_over(&mut self) {
        if self.phase != SessionPhase::Running {
            return;
        }
        self.phase = SessionPhase::Dying;
        self.spawner.stop(&mut self.timers);
        self.timers
            .after(self.tuning.game_over_grace_ms, TimerTask::FreezeSession);
        log::info!(
            "Game over pending at score {}",
            self.difficulty.whole_score()
        );
    }

    /// Grace delay elapsed: record the final score and stop everything
    pub(crate) fn freeze(&mut self) {
        if self.phase != SessionPhase::Dying {
            return;
        }
        let score = self.difficulty.whole_score();
        self.phase = SessionPhase::Over;
        self.final_score = Some(score);
        self.timers.cancel_all();
        self.events.push(GameEvent::GameOver { score });
        log::info!("Game over, final score {}", score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::{HealthState, MovementState};

    #[test]
    fn test_new_session() {
        let session = GameSession::new(1);
        assert_eq!(session.phase, SessionPhase::Running);
        assert_eq!(session.score(), 0.0);
        assert_eq!(session.game_speed(), 200.0);
        assert_eq!(session.difficulty.next_milestone(), 100.0);
        assert_eq!(session.player.lives, 3);
        assert!(session.spawner.is_running());
        assert!(session.spawner.obstacles().is_empty());
        assert_eq!(session.final_score(), None);
    }

    #[test]
    fn test_input_ignored_when_not_running() {
        let mut session = GameSession::new(1);
        session.phase = SessionPhase::Dying;
        session.request_jump();
        session.set_duck_key(true);
        assert_eq!(session.player.movement, MovementState::Grounded);
    }

    #[test]
    fn test_game_over_lifecycle() {
        let mut session = GameSession::new(1);
        session.begin_game_over();
        assert_eq!(session.phase, SessionPhase::Dying);
        assert!(!session.spawner.is_running());
        assert_eq!(session.final_score(), None);

        // Idempotent
        session.begin_game_over();
        assert_eq!(session.timers.pending_count(), 1);

        session.freeze();
        assert!(session.is_over());
        assert_eq!(session.final_score(), Some(0));
        assert!(session.events().contains(&GameEvent::GameOver { score: 0 }));
    }

    #[test]
    fn test_freeze_requires_dying() {
        let mut session = GameSession::new(1);
        session.freeze();
        assert_eq!(session.phase, SessionPhase::Running);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut session = GameSession::new(1);
        session.spawner.spawn(&mut session.events);
        session.player.hurt(&mut session.timers, &mut session.events);
        session.begin_game_over();
        session.freeze();

        session.restart(2);
        assert_eq!(session.seed, 2);
        assert_eq!(session.phase, SessionPhase::Running);
        assert_eq!(session.player.lives, 3);
        assert_eq!(session.player.health, HealthState::Normal);
        assert_eq!(session.player.movement, MovementState::Grounded);
        assert!(session.spawner.obstacles().is_empty());
        // Only the fresh spawn timer is armed
        assert_eq!(session.timers.pending_count(), 1);
        assert_eq!(session.events(), &[GameEvent::Restart]);
    }

    #[test]
    fn test_drain_events() {
        let mut session = GameSession::new(1);
        session.request_jump();
        let events = session.drain_events();
        assert!(!events.is_empty());
        assert!(session.events().is_empty());
    }
}
