//! One-shot simulation timers
//!
//! Delayed transitions (spawn cadence, invincibility expiry, swipe auto-stand,
//! game-over freeze) are armed here instead of on a wall clock. Each timer gets
//! a unique [`TimerId`]; owners keep the id they armed and ignore fires that do
//! not match, so a cancelled or superseded timer can never act on fresh state.

use serde::{Deserialize, Serialize};

/// Frame deltas arrive as f32; absorb their rounding when comparing due times
const DUE_SLACK_MS: f64 = 0.01;

/// Handle to an armed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(u64);

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerTask {
    /// Spawn one obstacle and re-arm
    SpawnObstacle,
    /// Player invincibility window is over
    EndInvincibility,
    /// Release a swipe-triggered duck
    AutoStand,
    /// Death animation is done; freeze the session
    FreezeSession,
}

/// A timer that came due during [`Timers::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub task: TimerTask,
}

#[derive(Debug, Clone)]
struct PendingTimer {
    id: TimerId,
    due_ms: f64,
    task: TimerTask,
}

/// Session-local timer wheel driven by the simulation tick
#[derive(Debug, Clone, Default)]
pub struct Timers {
    now_ms: f64,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulation time elapsed since the timers were created
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Arm a one-shot timer `delay_ms` from now
    pub fn after(&mut self, delay_ms: f32, task: TimerTask) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTimer {
            id,
            due_ms: self.now_ms + f64::from(delay_ms.max(0.0)),
            task,
        });
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    /// Drop every pending timer
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|t| t.id == id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Advance the clock and return every timer that came due, earliest first
    /// (ties fire in arming order).
    pub fn advance(&mut self, dt_ms: f32) -> Vec<FiredTimer> {
        self.now_ms += f64::from(dt_ms.max(0.0));
        let now = self.now_ms;

        let mut due: Vec<PendingTimer> = Vec::new();
        self.pending.retain(|t| {
            if t.due_ms <= now + DUE_SLACK_MS {
                due.push(t.clone());
                false
            } else {
                true
            }
        });

        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.id.0.cmp(&b.id.0)));
        due.into_iter()
            .map(|t| FiredTimer {
                id: t.id,
                task: t.task,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut timers = Timers::new();
        let id = timers.after(100.0, TimerTask::AutoStand);

        assert!(timers.advance(99.0).is_empty());
        assert!(timers.is_pending(id));

        let fired = timers.advance(1.0);
        assert_eq!(fired, vec![FiredTimer { id, task: TimerTask::AutoStand }]);
        assert!(!timers.is_pending(id));
        assert!(timers.advance(1000.0).is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut timers = Timers::new();
        let id = timers.after(50.0, TimerTask::SpawnObstacle);
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.advance(100.0).is_empty());
    }

    #[test]
    fn test_fire_order() {
        let mut timers = Timers::new();
        let late = timers.after(300.0, TimerTask::FreezeSession);
        let early = timers.after(100.0, TimerTask::EndInvincibility);
        let tie = timers.after(100.0, TimerTask::AutoStand);

        let fired: Vec<TimerId> = timers.advance(500.0).into_iter().map(|f| f.id).collect();
        assert_eq!(fired, vec![early, tie, late]);
    }

    #[test]
    fn test_delay_is_relative_to_arming_time() {
        let mut timers = Timers::new();
        timers.advance(1000.0);
        let id = timers.after(100.0, TimerTask::AutoStand);
        assert!(timers.advance(50.0).is_empty());
        assert_eq!(timers.advance(50.0)[0].id, id);
    }

    #[test]
    fn test_frame_sized_steps_hit_exact_delay() {
        let mut timers = Timers::new();
        timers.after(1500.0, TimerTask::EndInvincibility);
        let step = 1000.0 / 60.0;
        let mut fired_at = None;
        for i in 1..=200 {
            if !timers.advance(step).is_empty() {
                fired_at = Some(i);
                break;
            }
        }
        assert_eq!(fired_at, Some(90));
    }

    #[test]
    fn test_cancel_all() {
        let mut timers = Timers::new();
        timers.after(10.0, TimerTask::AutoStand);
        timers.after(20.0, TimerTask::FreezeSession);
        timers.cancel_all();
        assert_eq!(timers.pending_count(), 0);
        assert!(timers.advance(100.0).is_empty());
    }
}
