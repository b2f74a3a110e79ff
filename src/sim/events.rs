//! Presentation cues emitted by the simulation
//!
//! The host engine drains these once per frame and turns them into sounds,
//! tweens and scene changes. Nothing in the simulation waits on them.

use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleKind;

/// Sound effect requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Jump,
    Hit,
    Milestone,
}

/// Squash-and-stretch flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SquashKind {
    /// Quick back-eased squash on take-off
    Jump,
    /// Bouncy squash on touchdown
    Land,
}

/// Player animation clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationCue {
    #[default]
    Idle,
    Run,
    Jump,
    Duck,
    Hurt,
}

/// A single fire-and-forget cue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Sound { cue: SoundCue },
    Squash { kind: SquashKind },
    CameraShake { duration_ms: f32, intensity: f32 },
    /// Player tint as 0xRRGGBB
    Tint { rgb: u32 },
    InvincibilityFlash { duration_ms: f32 },
    Animation { cue: AnimationCue },
    /// Dust trail behind the running player switched on/off
    DustTrail { active: bool },
    RunAnimationRate { fps: f32 },
    LivesChanged { lives: u8 },
    ObstacleSpawned { id: u32, kind: ObstacleKind },
    ObstacleDestroyed { id: u32 },
    GameOver { score: u32 },
    Restart,
}

impl GameEvent {
    pub fn sound(cue: SoundCue) -> Self {
        GameEvent::Sound { cue }
    }
}
