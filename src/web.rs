//! Browser bindings
//!
//! A JS renderer owns the canvas, sprites and tweens. It drives a
//! [`WasmRunner`] once per animation frame, forwards input, and applies the
//! returned cue list (JSON array of [`GameEvent`](crate::sim::GameEvent)s).

use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::audio::{AudioManager, CueError, SoundBackend, dispatch};
use crate::highscores::{HighScore, HighScoreOutcome};
use crate::persistence::LocalStorageStore;
use crate::sim::{GameSession, Runner, SoundCue};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Pixel Bruno core loaded");
}

fn random_seed() -> u64 {
    getrandom::u64().unwrap_or_else(|_| js_sys::Date::now() as u64)
}

fn cue_name(cue: SoundCue) -> &'static str {
    match cue {
        SoundCue::Jump => "jump",
        SoundCue::Hit => "hit",
        SoundCue::Milestone => "milestone",
    }
}

/// Calls a JS `(cue, volume) => void` callback for each sound
#[derive(Default)]
struct JsSoundBackend {
    callback: Option<Function>,
}

impl SoundBackend for JsSoundBackend {
    fn play(&mut self, cue: SoundCue, volume: f32) -> Result<(), CueError> {
        let Some(callback) = &self.callback else {
            return Err(CueError::Unavailable);
        };
        callback
            .call2(
                &JsValue::NULL,
                &JsValue::from_str(cue_name(cue)),
                &JsValue::from_f64(f64::from(volume)),
            )
            .map(|_| ())
            .map_err(|e| CueError::Rejected(format!("{:?}", e)))
    }
}

/// Game handle exported to JS
#[wasm_bindgen]
pub struct WasmRunner {
    runner: Runner,
    high_score: HighScore<LocalStorageStore>,
    audio: AudioManager<JsSoundBackend>,
    outcome: Option<HighScoreOutcome>,
}

#[wasm_bindgen]
impl WasmRunner {
    /// Start a run. `tuning_json` overrides balance values; invalid JSON
    /// falls back to the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>, tuning_json: Option<String>) -> WasmRunner {
        let tuning = match tuning_json.as_deref().map(Tuning::from_json) {
            Some(Ok(tuning)) => tuning,
            Some(Err(e)) => {
                log::warn!("Ignoring invalid tuning: {}", e);
                Tuning::default()
            }
            None => Tuning::default(),
        };
        let seed = seed.map(|s| s as u64).unwrap_or_else(random_seed);

        Self {
            runner: Runner::new(GameSession::with_tuning(seed, tuning)),
            high_score: HighScore::new(LocalStorageStore::new()),
            audio: AudioManager::new(JsSoundBackend::default()),
            outcome: None,
        }
    }

    /// Advance by `dt_ms` of wall time. Returns the cues emitted, as JSON.
    pub fn tick(&mut self, dt_ms: f64) -> String {
        self.runner.update((dt_ms / 1000.0) as f32);
        let events = self.runner.session.drain_events();

        if self.audio.backend().callback.is_some() {
            dispatch(&events, &mut self.audio);
        }

        if self.outcome.is_none() {
            if let Some(score) = self.runner.session.final_score() {
                self.outcome = Some(self.high_score.submit(score));
            }
        }

        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::warn!("Failed to encode cues: {}", e);
            "[]".to_string()
        })
    }

    pub fn jump(&mut self) {
        self.runner.input.jump = true;
    }

    pub fn set_duck_key(&mut self, held: bool) {
        self.runner.input.duck_held = held;
    }

    pub fn pointer_down(&mut self, y: f32) {
        self.runner.input.pointer_down = Some(y);
    }

    pub fn pointer_up(&mut self, y: f32) {
        self.runner.input.pointer_up = Some(y);
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.runner.input.idle_mode = idle;
        log::info!("Idle mode: {}", idle);
    }

    pub fn restart(&mut self) {
        self.runner.restart(random_seed());
        self.outcome = None;
    }

    /// Register `(cue, volume) => void` for sound cues
    pub fn set_sound_callback(&mut self, callback: Option<Function>) {
        self.audio = AudioManager::new(JsSoundBackend { callback });
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.audio.set_muted(muted);
    }

    pub fn set_volume(&mut self, vol: f32) {
        self.audio.set_master_volume(vol);
    }

    pub fn score(&self) -> u32 {
        self.runner.session.difficulty.whole_score()
    }

    pub fn lives(&self) -> u8 {
        self.runner.session.player.lives
    }

    pub fn game_speed(&self) -> f32 {
        self.runner.session.game_speed()
    }

    pub fn is_over(&self) -> bool {
        self.runner.session.is_over()
    }

    pub fn high_score(&self) -> u32 {
        self.outcome
            .map(|o| o.high_score)
            .unwrap_or_else(|| self.high_score.best())
    }

    pub fn is_new_high(&self) -> bool {
        self.outcome.is_some_and(|o| o.is_new_high)
    }

    /// Player and obstacle positions for the renderer, as JSON
    pub fn snapshot(&self) -> String {
        let session = &self.runner.session;
        let snapshot = serde_json::json!({
            "player": {
                "x": session.player.pos.x,
                "y": session.player.pos.y,
                "movement": session.player.movement,
                "health": session.player.health,
            },
            "obstacles": session.spawner.obstacles().iter().map(|o| serde_json::json!({
                "id": o.id,
                "kind": o.kind,
                "x": o.pos.x,
                "y": o.pos.y,
            })).collect::<Vec<_>>(),
        });
        snapshot.to_string()
    }
}
