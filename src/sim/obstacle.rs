//! Obstacle types and their per-tick motion

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hitbox::{Aabb, Anchor, Hitbox};
use crate::consts::*;

/// Obstacle types, in unlock order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Rock,
    Cactus,
    Bird,
}

/// Static description of an obstacle type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSpec {
    /// Frame index in the obstacle sprite sheet
    pub frame: u32,
    /// Minimum (whole) score before this type can spawn
    pub unlock_score: u32,
    pub hitbox: Hitbox,
    /// Height of the anchor above the ground
    pub altitude: f32,
    pub anchor: Anchor,
    /// Bobs up and down while flying
    pub bobs: bool,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Rock, ObstacleKind::Cactus, ObstacleKind::Bird];

    pub const fn spec(self) -> ObstacleSpec {
        match self {
            ObstacleKind::Rock => ObstacleSpec {
                frame: 1,
                unlock_score: 0,
                hitbox: Hitbox::new(20.0, 12.0, 6.0, 16.0),
                altitude: 0.0,
                anchor: Anchor::BottomCenter,
                bobs: false,
            },
            ObstacleKind::Cactus => ObstacleSpec {
                frame: 0,
                unlock_score: 50,
                hitbox: Hitbox::new(12.0, 30.0, 10.0, 2.0),
                altitude: 0.0,
                anchor: Anchor::BottomCenter,
                bobs: false,
            },
            ObstacleKind::Bird => ObstacleSpec {
                frame: 2,
                unlock_score: 150,
                hitbox: Hitbox::new(18.0, 10.0, 7.0, 10.0),
                altitude: BIRD_ALTITUDE,
                anchor: Anchor::Center,
                bobs: true,
            },
        }
    }
}

/// Perpetual vertical bob: up by `amplitude`, back down, sine-eased both ways
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillation {
    pub base_y: f32,
    pub amplitude: f32,
    pub period_ms: f32,
    pub elapsed_ms: f32,
}

impl Oscillation {
    pub fn new(base_y: f32) -> Self {
        Self {
            base_y,
            amplitude: BIRD_BOB_AMPLITUDE,
            period_ms: BIRD_BOB_PERIOD_MS,
            elapsed_ms: 0.0,
        }
    }

    /// Upward displacement at the current phase, in `[0, amplitude]`
    pub fn offset(&self) -> f32 {
        let phase = self.elapsed_ms / self.period_ms;
        self.amplitude * (1.0 - (TAU * phase).cos()) / 2.0
    }

    pub fn advance(&mut self, dt_ms: f32) {
        self.elapsed_ms = (self.elapsed_ms + dt_ms) % self.period_ms;
    }

    pub fn y(&self) -> f32 {
        self.base_y - self.offset()
    }
}

/// A live obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Owned by the obstacle, so it dies with it
    pub oscillation: Option<Oscillation>,
}

impl Obstacle {
    /// Place a new obstacle of `kind` at `x`, moving left at `speed`
    pub fn new(id: u32, kind: ObstacleKind, x: f32, ground_y: f32, speed: f32) -> Self {
        let spec = kind.spec();
        let y = ground_y - spec.altitude;
        Self {
            id,
            kind,
            pos: Vec2::new(x, y),
            vel: Vec2::new(-speed, 0.0),
            oscillation: spec.bobs.then(|| Oscillation::new(y)),
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos.x += self.vel.x * dt;
        if let Some(osc) = &mut self.oscillation {
            osc.advance(dt * 1000.0);
            self.pos.y = osc.y();
        }
    }

    pub fn bounds(&self) -> Aabb {
        let spec = self.kind.spec();
        spec.hitbox.bounds_at(spec.anchor.frame_origin(self.pos))
    }
}
