//! The persisted best score
//!
//! A single integer under [`STORAGE_KEY`]. A finished run replaces it only
//! when strictly greater. Storage trouble is logged and otherwise ignored:
//! the game-over screen still shows the run's score.

use serde::{Deserialize, Serialize};

use crate::persistence::HighScoreStore;

/// Storage key for the best score
pub const STORAGE_KEY: &str = "pixelBrunoHighScore";

/// What the game-over screen needs to know
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreOutcome {
    pub final_score: u32,
    /// Best score after this run
    pub high_score: u32,
    pub is_new_high: bool,
}

/// Best-score bookkeeping over a storage backend
#[derive(Debug, Clone)]
pub struct HighScore<S> {
    store: S,
}

impl<S: HighScoreStore> HighScore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored best, or 0 if none (or unreadable)
    pub fn best(&self) -> u32 {
        match self.store.load(STORAGE_KEY) {
            Ok(best) => best.unwrap_or(0),
            Err(e) => {
                log::warn!("Failed to load high score: {}", e);
                0
            }
        }
    }

    /// Record a finished run
    pub fn submit(&mut self, final_score: u32) -> HighScoreOutcome {
        let previous = self.best();
        if final_score <= previous {
            return HighScoreOutcome {
                final_score,
                high_score: previous,
                is_new_high: false,
            };
        }

        if let Err(e) = self.store.store(STORAGE_KEY, final_score) {
            log::warn!("Failed to save high score: {}", e);
        } else {
            log::info!("New high score: {}", final_score);
        }
        HighScoreOutcome {
            final_score,
            high_score: final_score,
            is_new_high: true,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
