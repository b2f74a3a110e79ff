//! Pixel Bruno entry point
//!
//! On the web the JS host drives [`pixel_bruno::web::WasmRunner`]; this binary
//! is the native headless runner: the autopilot plays one run and the result
//! is recorded in a local high score file.
//!
//! Usage: `pixel-bruno [--seed <n>] [--tuning <path>] [--seconds <n>] [--scores <path>]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use pixel_bruno::audio::{AudioManager, LogBackend, dispatch};
    use pixel_bruno::consts::SIM_DT;
    use pixel_bruno::persistence::FileStore;
    use pixel_bruno::sim::{GameEvent, GameSession, Runner};
    use pixel_bruno::{HighScore, Tuning};

    const DEFAULT_SCORES_PATH: &str = "pixel-bruno-scores.json";
    const DEFAULT_SECONDS: f32 = 300.0;

    #[derive(Debug, Default)]
    struct Args {
        seed: Option<u64>,
        tuning: Option<String>,
        seconds: Option<f32>,
        scores: Option<String>,
    }

    fn parse_args() -> Result<Args, String> {
        let mut args = Args::default();
        let mut iter = std::env::args().skip(1);
        while let Some(flag) = iter.next() {
            let mut value = || iter.next().ok_or_else(|| format!("{} needs a value", flag));
            match flag.as_str() {
                "--seed" => {
                    let raw = value()?;
                    args.seed = Some(raw.parse().map_err(|_| format!("bad seed: {}", raw))?);
                }
                "--seconds" => {
                    let raw = value()?;
                    args.seconds = Some(raw.parse().map_err(|_| format!("bad duration: {}", raw))?);
                }
                "--tuning" => args.tuning = Some(value()?),
                "--scores" => args.scores = Some(value()?),
                other => return Err(format!("unknown argument: {}", other)),
            }
        }
        Ok(args)
    }

    fn load_tuning(path: &str) -> Tuning {
        match fs::read_to_string(path).map_err(|e| e.to_string()).and_then(|json| {
            Tuning::from_json(&json).map_err(|e| e.to_string())
        }) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Failed to load tuning from {}: {} - using defaults", path, e);
                Tuning::default()
            }
        }
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    pub fn run() {
        env_logger::init();

        let args = match parse_args() {
            Ok(args) => args,
            Err(e) => {
                eprintln!("{}", e);
                eprintln!(
                    "usage: pixel-bruno [--seed <n>] [--tuning <path>] [--seconds <n>] [--scores <path>]"
                );
                std::process::exit(2);
            }
        };

        let tuning = args.tuning.as_deref().map(load_tuning).unwrap_or_default();
        let seed = args.seed.unwrap_or_else(clock_seed);
        let seconds = args.seconds.unwrap_or(DEFAULT_SECONDS);

        log::info!("Pixel Bruno (native) starting with seed {}", seed);

        let mut runner = Runner::new(GameSession::with_tuning(seed, tuning));
        runner.input.idle_mode = true;
        let mut audio = AudioManager::new(LogBackend);

        let max_ticks = (seconds / SIM_DT).ceil() as u64;
        let mut hits = 0;
        while runner.session.time_ticks < max_ticks && !runner.session.is_over() {
            runner.update(SIM_DT);
            let events = runner.session.drain_events();
            hits += events
                .iter()
                .filter(|e| matches!(e, GameEvent::LivesChanged { .. }))
                .count();
            dispatch(&events, &mut audio);
        }

        let session = &runner.session;
        let elapsed = session.time_ticks as f32 * SIM_DT;
        println!("seed:    {}", seed);
        println!("time:    {:.1} s", elapsed);
        println!("score:   {}", session.difficulty.whole_score());
        println!("speed:   {}", session.game_speed());
        println!("hits:    {}", hits);
        println!("lives:   {}", session.player.lives);

        match session.final_score() {
            Some(score) => {
                let path = args.scores.as_deref().unwrap_or(DEFAULT_SCORES_PATH);
                let mut high_score = HighScore::new(FileStore::new(path));
                let outcome = high_score.submit(score);
                println!("result:  game over");
                println!(
                    "best:    {}{}",
                    outcome.high_score,
                    if outcome.is_new_high { " (new high score!)" } else { "" }
                );
            }
            None => println!("result:  still running after {:.0} s", seconds),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is pixel_bruno::web::start, this is just to satisfy the compiler
}
