//! Fixed-timestep driver
//!
//! Hosts call [`Runner::update`] with their variable frame delta; the runner
//! turns it into whole [`SIM_DT`] ticks so gameplay stays frame-rate
//! independent.

use super::state::GameSession;
use super::tick::{TickInput, tick};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame delta accepted; longer stalls are dropped
const MAX_FRAME_DT: f32 = 0.25;

/// Accumulates frame time and steps a session
#[derive(Debug, Clone)]
pub struct Runner {
    pub session: GameSession,
    /// Input for the next tick; one-shot fields are cleared after use
    pub input: TickInput,
    accumulator: f32,
}

impl Runner {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            input: TickInput::default(),
            accumulator: 0.0,
        }
    }

    /// Run as many simulation ticks as `dt` seconds cover. Returns the
    /// number of ticks taken.
    pub fn update(&mut self, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            tick(&mut self.session, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.jump = false;
            self.input.pointer_down = None;
            self.input.pointer_up = None;
        }

        // Hit the cap: drop the backlog instead of replaying it next frame
        if substeps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }
        substeps
    }

    /// New run with a fresh seed; held input and leftover time are dropped
    pub fn restart(&mut self, seed: u64) {
        self.session.restart(seed);
        self.accumulator = 0.0;
        self.input = TickInput {
            idle_mode: self.input.idle_mode,
            ..Default::default()
        };
    }
}
