//! Obstacle spawner
//!
//! Owns the live obstacle set and the recurring spawn timer. The delay between
//! spawns shrinks linearly as the game speeds up, with random jitter on top.
//! Type choice and jitter both come from a seeded PCG stream so runs replay
//! exactly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::events::GameEvent;
use super::obstacle::{Obstacle, ObstacleKind};
use super::timers::{TimerId, TimerTask, Timers};
use crate::consts::{CULL_X, SPAWN_MARGIN};
use crate::tuning::Tuning;

/// Obstacle types unlocked at `score`
pub fn available_kinds(score: u32) -> Vec<ObstacleKind> {
    ObstacleKind::ALL
        .into_iter()
        .filter(|kind| kind.spec().unlock_score <= score)
        .collect()
}

/// Spawn interval before jitter (ms). Shrinks from the base to the minimum
/// as speed climbs `spawn_speed_span` above the start speed.
pub fn base_interval_ms(tuning: &Tuning, speed: f32) -> f32 {
    let speed_factor = ((speed - tuning.start_speed) / tuning.spawn_speed_span).clamp(0.0, 1.0);
    let interval = tuning.spawn_base_interval_ms
        - speed_factor * (tuning.spawn_base_interval_ms - tuning.spawn_min_interval_ms);
    interval.max(tuning.spawn_min_interval_ms)
}

/// Spawns, moves and culls obstacles
#[derive(Debug, Clone)]
pub struct Spawner {
    tuning: Tuning,
    obstacles: Vec<Obstacle>,
    speed: f32,
    score: u32,
    rng: Pcg32,
    pending: Option<TimerId>,
    next_id: u32,
}

impl Spawner {
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        Self {
            tuning: *tuning,
            obstacles: Vec::new(),
            speed: tuning.start_speed,
            score: 0,
            rng: Pcg32::seed_from_u64(seed),
            pending: None,
            next_id: 1,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// True while a spawn is scheduled
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Begin the spawn stream (no-op if already running)
    pub fn start(&mut self, timers: &mut Timers) {
        if self.pending.is_none() {
            self.schedule_next(timers);
        }
    }

    /// Cancel the pending spawn. Live obstacles stay where they are.
    pub fn stop(&mut self, timers: &mut Timers) {
        if let Some(id) = self.pending.take() {
            timers.cancel(id);
        }
    }

    /// Arm the next spawn
    pub fn schedule_next(&mut self, timers: &mut Timers) -> TimerId {
        if let Some(id) = self.pending.take() {
            timers.cancel(id);
        }
        let delay = self.next_delay_ms();
        let id = timers.after(delay, TimerTask::SpawnObstacle);
        self.pending = Some(id);
        id
    }

    /// Base interval plus jitter, never below the minimum interval
    pub fn next_delay_ms(&mut self) -> f32 {
        let interval = base_interval_ms(&self.tuning, self.speed);
        // Tuning built in code skips validation; never sample an empty range
        let (lo, hi) = (self.tuning.spawn_jitter_min_ms, self.tuning.spawn_jitter_max_ms);
        let jitter = self.rng.random_range(lo.min(hi)..=lo.max(hi));
        (interval + jitter as f32).max(self.tuning.spawn_min_interval_ms)
    }

    /// Spawn timer callback: spawn one obstacle, then re-arm.
    /// Returns the new obstacle id, or None for a stale timer.
    pub fn on_spawn_timer(
        &mut self,
        id: TimerId,
        timers: &mut Timers,
        events: &mut Vec<GameEvent>,
    ) -> Option<u32> {
        if self.pending != Some(id) {
            return None;
        }
        self.pending = None;
        let spawned = self.spawn(events);
        self.schedule_next(timers);
        Some(spawned)
    }

    /// Add one obstacle of a random unlocked type just past the right edge
    pub fn spawn(&mut self, events: &mut Vec<GameEvent>) -> u32 {
        let kinds = available_kinds(self.score);
        let kind = kinds[self.rng.random_range(0..kinds.len())];

        let id = self.next_id;
        self.next_id += 1;

        let x = self.tuning.field_width + SPAWN_MARGIN;
        self.obstacles
            .push(Obstacle::new(id, kind, x, self.tuning.ground_y(), self.speed));
        events.push(GameEvent::ObstacleSpawned { id, kind });
        log::debug!("Spawned {:?} #{} at speed {}", kind, id, self.speed);
        id
    }

    /// Change speed for future spawns and every live obstacle
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        for obstacle in &mut self.obstacles {
            obstacle.vel.x = -speed;
        }
    }

    /// Whole score used for type unlocks
    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    /// Move every obstacle, then cull
    pub fn tick(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        for obstacle in &mut self.obstacles {
            obstacle.advance(dt);
        }
        self.update(events);
    }

    /// Drop obstacles that scrolled past the left edge
    pub fn update(&mut self, events: &mut Vec<GameEvent>) {
        self.obstacles.retain(|obstacle| {
            if obstacle.pos.x < CULL_X {
                events.push(GameEvent::ObstacleDestroyed { id: obstacle.id });
                false
            } else {
                true
            }
        });
    }

    /// Remove a specific obstacle (e.g. after it hit the player)
    pub fn remove(&mut self, id: u32) -> Option<Obstacle> {
        let index = self.obstacles.iter().position(|o| o.id == id)?;
        Some(self.obstacles.swap_remove(index))
    }

    #[cfg(test)]
    pub(crate) fn insert_for_test(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }
}
