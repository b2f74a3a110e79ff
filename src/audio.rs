//! Cue dispatch toward the host's audio layer
//!
//! The simulation only emits [`GameEvent`]s. This module forwards the sound
//! cues among them to a [`SoundBackend`] at the configured volume. Playback
//! failures are logged and dropped: a missing audio device must never stall
//! the game.

use thiserror::Error;

use crate::sim::{GameEvent, SoundCue};

/// Why a cue could not be played
#[derive(Debug, Error)]
pub enum CueError {
    /// No playback capability (no audio context, headless run, ...)
    #[error("audio backend unavailable")]
    Unavailable,
    /// The backend refused the cue
    #[error("cue rejected: {0}")]
    Rejected(String),
}

/// Something that can make noise
pub trait SoundBackend {
    fn play(&mut self, cue: SoundCue, volume: f32) -> Result<(), CueError>;
}

/// Anything that consumes presentation cues
pub trait CueSink {
    fn cue(&mut self, event: &GameEvent) -> Result<(), CueError>;
}

/// Forward every event to `sink`, swallowing failures.
/// Returns how many were accepted.
pub fn dispatch<S: CueSink + ?Sized>(events: &[GameEvent], sink: &mut S) -> usize {
    let mut delivered = 0;
    for event in events {
        match sink.cue(event) {
            Ok(()) => delivered += 1,
            Err(e) => log::warn!("Dropped cue {:?}: {}", event, e),
        }
    }
    delivered
}

/// Audio manager for the game
pub struct AudioManager<B> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<B: SoundBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: SoundBackend> CueSink for AudioManager<B> {
    fn cue(&mut self, event: &GameEvent) -> Result<(), CueError> {
        let GameEvent::Sound { cue } = event else {
            return Ok(());
        };
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return Ok(());
        }
        self.backend.play(*cue, vol)
    }
}

/// Backend for headless runs: logs each sound
#[derive(Debug, Default, Clone, Copy)]
pub struct LogBackend;

impl SoundBackend for LogBackend {
    fn play(&mut self, cue: SoundCue, volume: f32) -> Result<(), CueError> {
        log::debug!("Sound {:?} at volume {:.2}", cue, volume);
        Ok(())
    }
}
