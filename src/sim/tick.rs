//! Per-frame simulation step
//!
//! Order within a tick:
//! 1. due timers fire (spawns, invincibility expiry, auto-stand, freeze)
//! 2. score and speed advance; a speed-up is pushed to the spawner
//! 3. input is applied to the player
//! 4. the player updates (physics, landing, animation)
//! 5. obstacles move and off-screen ones are culled
//! 6. overlaps are resolved into damage and, possibly, game over

use super::events::{GameEvent, SoundCue};
use super::obstacle::ObstacleKind;
use super::state::{GameSession, SessionPhase};
use super::timers::{FiredTimer, TimerTask};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump key went down this tick (space / up arrow)
    pub jump: bool,
    /// Duck key is currently held (down arrow)
    pub duck_held: bool,
    /// Pointer pressed at this screen y
    pub pointer_down: Option<f32>,
    /// Pointer released at this screen y
    pub pointer_up: Option<f32>,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the session by `dt` seconds
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    if session.is_over() {
        return;
    }

    session.time_ticks += 1;

    for fired in session.timers.advance(dt * 1000.0) {
        on_timer(session, fired);
    }

    // The freeze timer may have just fired
    if session.is_over() {
        return;
    }

    if session.phase == SessionPhase::Running {
        let step = session.difficulty.advance(dt);
        if step.milestone_reached {
            session.events.push(GameEvent::sound(SoundCue::Milestone));
        }
        if let Some(speed) = step.new_speed {
            session.spawner.set_speed(speed);
            session.events.push(GameEvent::RunAnimationRate {
                fps: session.difficulty.run_animation_rate(),
            });
            log::info!("Speed up: {}", speed);
        }
        session
            .spawner
            .set_score(session.difficulty.whole_score());

        let input = if input.idle_mode {
            autopilot(session, input)
        } else {
            input.clone()
        };
        apply_input(session, &input);
    }

    session.player.update(dt, &mut session.events);
    session.spawner.tick(dt, &mut session.events);

    if session.phase == SessionPhase::Running {
        session.resolve_collisions();
    }
}

fn on_timer(session: &mut GameSession, fired: FiredTimer) {
    log::trace!("Timer {:?} fired", fired.task);
    match fired.task {
        TimerTask::SpawnObstacle => {
            session
                .spawner
                .on_spawn_timer(fired.id, &mut session.timers, &mut session.events);
        }
        TimerTask::EndInvincibility => session.player.end_invincibility(fired.id),
        TimerTask::AutoStand => session.input.on_auto_stand(fired.id, &mut session.player),
        TimerTask::FreezeSession => session.freeze(),
    }
}

fn apply_input(session: &mut GameSession, input: &TickInput) {
    if let Some(y) = input.pointer_down {
        session.pointer_down(y);
    }
    if let Some(y) = input.pointer_up {
        session.pointer_up(y);
    }
    if input.jump {
        session.request_jump();
    }
    session.set_duck_key(input.duck_held);
}

/// Demo player: jump over ground obstacles, duck under birds
fn autopilot(session: &GameSession, input: &TickInput) -> TickInput {
    let player = session.player.bounds();
    let speed = session.spawner.speed();
    // Take off early enough that the obstacle passes under the top of the arc
    let jump_lead = speed * 0.15;

    let next = session
        .spawner
        .obstacles()
        .iter()
        .map(|o| (o.kind, o.bounds()))
        .filter(|(_, b)| b.max.x > player.min.x)
        .min_by(|a, b| a.1.min.x.total_cmp(&b.1.min.x));

    let mut out = TickInput {
        idle_mode: true,
        ..input.clone()
    };
    if let Some((kind, bounds)) = next {
        let gap = bounds.min.x - player.max.x;
        match kind {
            ObstacleKind::Bird => out.duck_held = gap < speed * 0.2,
            ObstacleKind::Rock | ObstacleKind::Cactus => out.jump = gap > 0.0 && gap < jump_lead,
        }
    }
    out
}
