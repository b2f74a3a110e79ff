//! Keyboard and touch input mapping
//!
//! Both input paths end up in the same `jump`/`duck`/`stand_up` calls on the
//! player:
//! - keyboard: jump on press, duck while the key is held, stand on release
//! - touch: pointer-down jumps; a quick downward swipe ducks and stands back
//!   up on its own after a fixed hold

use super::events::GameEvent;
use super::player::Player;
use super::timers::{TimerId, TimerTask, Timers};
use crate::tuning::Tuning;

/// Where and when a pointer went down
#[derive(Debug, Clone, Copy, PartialEq)]
struct SwipeStart {
    y: f32,
    time_ms: f64,
}

/// True if a press/release pair counts as a downward duck swipe
pub fn is_duck_swipe(tuning: &Tuning, travel_y: f32, duration_ms: f64) -> bool {
    travel_y > tuning.swipe_min_travel && duration_ms < f64::from(tuning.swipe_max_duration_ms)
}

/// Input state carried between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    duck_key_held: bool,
    swipe: Option<SwipeStart>,
    auto_stand: Option<TimerId>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level-triggered duck key. Holding ducks every tick (so a duck blocked
    /// mid-jump happens on landing); releasing stands up once.
    pub fn set_duck_key(&mut self, held: bool, player: &mut Player, events: &mut Vec<GameEvent>) {
        if held {
            player.duck(events);
        } else if self.duck_key_held {
            player.stand_up();
        }
        self.duck_key_held = held;
    }

    /// Pointer pressed at screen `y`: jump and start tracking a swipe
    pub fn pointer_down(&mut self, y: f32, now_ms: f64, player: &mut Player, events: &mut Vec<GameEvent>) {
        self.swipe = Some(SwipeStart { y, time_ms: now_ms });
        player.jump(events);
    }

    /// Pointer released at screen `y`. A quick downward swipe ducks and arms
    /// the auto-stand timer. Returns true if it counted as a swipe.
    pub fn pointer_up(
        &mut self,
        y: f32,
        now_ms: f64,
        tuning: &Tuning,
        player: &mut Player,
        timers: &mut Timers,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        let Some(start) = self.swipe.take() else {
            return false;
        };
        if !is_duck_swipe(tuning, y - start.y, now_ms - start.time_ms) {
            return false;
        }

        player.duck(events);
        if let Some(id) = self.auto_stand.take() {
            timers.cancel(id);
        }
        self.auto_stand = Some(timers.after(tuning.swipe_duck_hold_ms, TimerTask::AutoStand));
        true
    }

    /// Auto-stand timer callback; stale ids are ignored
    pub fn on_auto_stand(&mut self, id: TimerId, player: &mut Player) {
        if self.auto_stand == Some(id) {
            self.auto_stand = None;
            player.stand_up();
        }
    }
}
