//! The player: a dog with a movement axis and a health axis
//!
//! Movement (`Grounded`/`Jumping`/`Ducking`) and health (`Normal`/
//! `Invincible`/`Dead`) are tracked separately. Guards on each entry point
//! make invalid calls harmless no-ops, since input and collision events race
//! each other.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::events::{AnimationCue, GameEvent, SoundCue, SquashKind};
use super::hitbox::{Aabb, Anchor, Hitbox};
use super::timers::{TimerId, TimerTask, Timers};
use crate::consts::*;
use crate::tuning::Tuning;

/// Hitbox while running or jumping
pub const STANDING_HITBOX: Hitbox = Hitbox::new(20.0, 28.0, 6.0, 4.0);
/// Wider, shorter hitbox while ducking
pub const DUCKING_HITBOX: Hitbox = Hitbox::new(24.0, 14.0, 4.0, 18.0);

/// Movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MovementState {
    #[default]
    Grounded,
    Jumping,
    Ducking,
}

/// Health axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HealthState {
    #[default]
    Normal,
    /// Just hurt: collisions are ignored and the hurt clip plays until the
    /// window expires
    Invincible,
    Dead,
}

/// Result of [`Player::hurt`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HurtOutcome {
    /// Dead or invincible; nothing changed
    Ignored,
    /// Lost a life, still running
    Survived,
    /// Lost the last life
    Died,
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    /// Bottom-centre of the sprite (screen space, y down)
    pub pos: Vec2,
    pub vel: Vec2,
    pub movement: MovementState,
    pub health: HealthState,
    pub lives: u8,
    pub hitbox: Hitbox,
    pub animation: AnimationCue,
    pub dust_trail: bool,
    tuning: Tuning,
    invincibility_timer: Option<TimerId>,
}

impl Player {
    /// Fresh player standing on the ground with full lives
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.ground_y()),
            vel: Vec2::ZERO,
            movement: MovementState::Grounded,
            health: HealthState::Normal,
            lives: tuning.starting_lives,
            hitbox: STANDING_HITBOX,
            animation: AnimationCue::Idle,
            dust_trail: false,
            tuning: *tuning,
            invincibility_timer: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health != HealthState::Dead
    }

    pub fn is_invincible(&self) -> bool {
        self.health == HealthState::Invincible
    }

    pub fn is_jumping(&self) -> bool {
        self.movement == MovementState::Jumping
    }

    pub fn is_ducking(&self) -> bool {
        self.movement == MovementState::Ducking
    }

    /// Ground-contact sensor: resting on the surface, not moving up
    pub fn on_ground(&self) -> bool {
        self.pos.y >= self.tuning.ground_y() - GROUND_EPSILON && self.vel.y >= 0.0
    }

    /// World-space hitbox
    pub fn bounds(&self) -> Aabb {
        self.hitbox
            .bounds_at(Anchor::BottomCenter.frame_origin(self.pos))
    }

    /// Jump if standing on the ground. Returns true if the jump happened.
    pub fn jump(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if !self.is_alive() || self.is_ducking() || !self.on_ground() {
            return false;
        }

        self.vel.y = -self.tuning.jump_impulse;
        self.movement = MovementState::Jumping;
        self.set_animation(AnimationCue::Jump, events);
        events.push(GameEvent::Squash {
            kind: SquashKind::Jump,
        });
        events.push(GameEvent::sound(SoundCue::Jump));
        true
    }

    /// Crouch and swap to the ducking hitbox. Returns true on transition.
    pub fn duck(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if !self.is_alive() || self.movement != MovementState::Grounded {
            return false;
        }

        self.movement = MovementState::Ducking;
        self.hitbox = DUCKING_HITBOX;
        self.set_animation(AnimationCue::Duck, events);
        true
    }

    /// Undo [`Player::duck`]. Returns true on transition.
    pub fn stand_up(&mut self) -> bool {
        if !self.is_ducking() {
            return false;
        }
        self.movement = MovementState::Grounded;
        self.hitbox = STANDING_HITBOX;
        true
    }

    /// Take a hit: lose a life and start the invincibility window.
    ///
    /// The last life turns the player `Dead` instead, with a small upward
    /// bounce; no expiry timer is armed for a dead player.
    pub fn hurt(&mut self, timers: &mut Timers, events: &mut Vec<GameEvent>) -> HurtOutcome {
        if !self.is_alive() || self.is_invincible() {
            return HurtOutcome::Ignored;
        }

        self.lives = self.lives.saturating_sub(1);
        self.health = HealthState::Invincible;

        self.set_animation(AnimationCue::Hurt, events);
        events.push(GameEvent::sound(SoundCue::Hit));
        events.push(GameEvent::CameraShake {
            duration_ms: HURT_SHAKE_MS,
            intensity: HURT_SHAKE_INTENSITY,
        });
        events.push(GameEvent::Tint {
            rgb: self.tint(),
        });
        events.push(GameEvent::InvincibilityFlash {
            duration_ms: HURT_FLASH_MS,
        });
        events.push(GameEvent::LivesChanged { lives: self.lives });

        if let Some(id) = self.invincibility_timer.take() {
            timers.cancel(id);
        }

        if self.lives == 0 {
            self.health = HealthState::Dead;
            self.movement = MovementState::Grounded;
            self.hitbox = STANDING_HITBOX;
            self.vel.y = -self.tuning.death_bounce;
            self.set_dust_trail(false, events);
            log::info!("Player died");
            return HurtOutcome::Died;
        }

        self.invincibility_timer =
            Some(timers.after(self.tuning.invincibility_ms, TimerTask::EndInvincibility));
        log::debug!("Player hurt, {} lives left", self.lives);
        HurtOutcome::Survived
    }

    /// Invincibility expiry callback; stale ids are ignored
    pub fn end_invincibility(&mut self, id: TimerId) {
        if self.invincibility_timer != Some(id) {
            return;
        }
        self.invincibility_timer = None;
        if self.health == HealthState::Invincible {
            self.health = HealthState::Normal;
        }
    }

    /// Per-tick update: physics, landing, animation and dust trail
    pub fn update(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        self.integrate(dt);

        // A dead dog just falls back to the ground
        if !self.is_alive() {
            return;
        }

        if self.is_jumping() && self.on_ground() {
            self.movement = MovementState::Grounded;
            events.push(GameEvent::Squash {
                kind: SquashKind::Land,
            });
        }

        let cue = if self.is_invincible() {
            AnimationCue::Hurt
        } else {
            match self.movement {
                MovementState::Jumping => AnimationCue::Jump,
                MovementState::Ducking => AnimationCue::Duck,
                MovementState::Grounded => AnimationCue::Run,
            }
        };
        self.set_animation(cue, events);

        let dust = self.movement == MovementState::Grounded && self.on_ground();
        self.set_dust_trail(dust, events);
    }

    fn integrate(&mut self, dt: f32) {
        let ground = self.tuning.ground_y();
        self.vel.y += self.tuning.gravity * dt;
        self.pos.y += self.vel.y * dt;
        if self.pos.y >= ground {
            self.pos.y = ground;
            self.vel.y = self.vel.y.min(0.0);
        }
    }

    /// Redder tint as lives run out
    fn tint(&self) -> u32 {
        let lost = self.tuning.starting_lives.saturating_sub(self.lives) as usize;
        LIFE_TINTS[lost.min(LIFE_TINTS.len() - 1)]
    }

    fn set_animation(&mut self, cue: AnimationCue, events: &mut Vec<GameEvent>) {
        if self.animation != cue {
            self.animation = cue;
            events.push(GameEvent::Animation { cue });
        }
    }

    fn set_dust_trail(&mut self, active: bool, events: &mut Vec<GameEvent>) {
        if self.dust_trail != active {
            self.dust_trail = active;
            events.push(GameEvent::DustTrail { active });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    fn setup() -> (Player, Timers, Vec<GameEvent>) {
        (Player::new(&Tuning::default()), Timers::new(), Vec::new())
    }

    #[test]
    fn test_new_player() {
        let (player, _, _) = setup();
        assert_eq!(player.movement, MovementState::Grounded);
        assert_eq!(player.health, HealthState::Normal);
        assert_eq!(player.lives, 3);
        assert_eq!(player.hitbox, STANDING_HITBOX);
        assert!(player.on_ground());
    }

    #[test]
    fn test_jump_and_land() {
        let (mut player, _, mut events) = setup();
        assert!(player.jump(&mut events));
        assert!(player.is_jumping());
        assert!(events.contains(&GameEvent::sound(SoundCue::Jump)));
        assert!(events.contains(&GameEvent::Squash { kind: SquashKind::Jump }));

        // No double jump while airborne
        assert!(!player.jump(&mut events));

        events.clear();
        let mut landed_after = None;
        for i in 0..120 {
            player.update(SIM_DT, &mut events);
            if !player.is_jumping() {
                landed_after = Some(i);
                break;
            }
        }
        // 420 / 1200 * 2 = 0.7 s of air time
        let ticks = landed_after.expect("player should land");
        assert!((40..=44).contains(&ticks), "landed after {} ticks", ticks);
        assert!(events.contains(&GameEvent::Squash { kind: SquashKind::Land }));
        assert_eq!(player.animation, AnimationCue::Run);
        assert!(player.dust_trail);
    }

    #[test]
    fn test_jump_blocked_while_ducking() {
        let (mut player, _, mut events) = setup();
        assert!(player.duck(&mut events));
        assert!(!player.jump(&mut events));
        assert!(player.is_ducking());
    }

    #[test]
    fn test_duck_blocked_while_jumping() {
        let (mut player, _, mut events) = setup();
        player.jump(&mut events);
        assert!(!player.duck(&mut events));
        assert_eq!(player.hitbox, STANDING_HITBOX);
    }

    #[test]
    fn test_duck_swaps_hitbox() {
        let (mut player, _, mut events) = setup();
        let standing = player.bounds();
        assert!(player.duck(&mut events));
        let ducking = player.bounds();

        assert_eq!(player.hitbox, DUCKING_HITBOX);
        assert!(ducking.width() > standing.width());
        assert!(ducking.height() < standing.height());
        assert_eq!(ducking.max.y, standing.max.y);

        assert!(player.stand_up());
        assert_eq!(player.hitbox, STANDING_HITBOX);
        assert!(!player.stand_up());
    }

    #[test]
    fn test_hurt_starts_invincibility() {
        let (mut player, mut timers, mut events) = setup();
        assert_eq!(player.hurt(&mut timers, &mut events), HurtOutcome::Survived);
        assert_eq!(player.lives, 2);
        assert!(player.is_invincible());
        assert!(events.contains(&GameEvent::sound(SoundCue::Hit)));
        assert!(events.contains(&GameEvent::Tint { rgb: 0xffaaaa }));

        // Second hit inside the window does nothing
        assert_eq!(player.hurt(&mut timers, &mut events), HurtOutcome::Ignored);
        assert_eq!(player.lives, 2);

        for fired in timers.advance(1499.0) {
            player.end_invincibility(fired.id);
        }
        assert!(player.is_invincible());

        for fired in timers.advance(1.0) {
            player.end_invincibility(fired.id);
        }
        assert_eq!(player.health, HealthState::Normal);
        assert_eq!(player.hurt(&mut timers, &mut events), HurtOutcome::Survived);
        assert_eq!(player.lives, 1);
    }

    #[test]
    fn test_last_life() {
        let (mut player, mut timers, mut events) = setup();
        player.lives = 1;
        assert_eq!(player.hurt(&mut timers, &mut events), HurtOutcome::Died);
        assert_eq!(player.lives, 0);
        assert_eq!(player.health, HealthState::Dead);
        assert!(player.vel.y < 0.0);
        assert_eq!(timers.pending_count(), 0);

        // Dead stays dead
        assert_eq!(player.hurt(&mut timers, &mut events), HurtOutcome::Ignored);
        assert_eq!(player.lives, 0);
        assert!(!player.jump(&mut events));
        assert!(!player.duck(&mut events));
    }

    #[test]
    fn test_death_resets_duck() {
        let (mut player, mut timers, mut events) = setup();
        player.lives = 1;
        player.duck(&mut events);
        player.hurt(&mut timers, &mut events);
        assert_eq!(player.movement, MovementState::Grounded);
        assert_eq!(player.hitbox, STANDING_HITBOX);
    }

    #[test]
    fn test_hurt_animation_overrides_movement() {
        let (mut player, mut timers, mut events) = setup();
        player.jump(&mut events);
        player.hurt(&mut timers, &mut events);
        player.update(SIM_DT, &mut events);
        assert_eq!(player.animation, AnimationCue::Hurt);
        assert!(!player.dust_trail);
    }

    #[test]
    fn test_stale_invincibility_timer_ignored() {
        let (mut player, mut timers, mut events) = setup();
        player.hurt(&mut timers, &mut events);
        let stale = timers.after(0.0, TimerTask::EndInvincibility);
        player.end_invincibility(stale);
        assert!(player.is_invincible());
    }

    #[derive(Debug, Clone, Copy)]
    enum Action {
        Jump,
        Duck,
        Stand,
        Hurt,
        Tick,
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::Jump),
            Just(Action::Duck),
            Just(Action::Stand),
            Just(Action::Hurt),
            Just(Action::Tick),
        ]
    }

    proptest! {
        #[test]
        fn prop_movement_and_lives_stay_valid(actions in proptest::collection::vec(action(), 0..200)) {
            let (mut player, mut timers, mut events) = setup();
            for action in actions {
                match action {
                    Action::Jump => { player.jump(&mut events); }
                    Action::Duck => { player.duck(&mut events); }
                    Action::Stand => { player.stand_up(); }
                    Action::Hurt => { player.hurt(&mut timers, &mut events); }
                    Action::Tick => {
                        for fired in timers.advance(SIM_DT * 1000.0) {
                            player.end_invincibility(fired.id);
                        }
                        player.update(SIM_DT, &mut events);
                    }
                }
                prop_assert!(!(player.is_ducking() && player.is_jumping()));
                prop_assert!(player.lives <= 3);
                let expected = if player.is_ducking() { DUCKING_HITBOX } else { STANDING_HITBOX };
                prop_assert_eq!(player.hitbox, expected);
                prop_assert_eq!(player.lives == 0, player.health == HealthState::Dead);
            }
        }
    }
}
