//! Score and speed progression
//!
//! Score accrues with distance (`speed * dt / divisor`), so faster play scores
//! faster. Speed steps up on a fixed real-time cadence.

use crate::tuning::Tuning;

/// Accumulated speed-up time is compared with this much slack so summed frame
/// deltas land on the cadence instead of one frame late
const SPEEDUP_SLACK_SECS: f32 = 1e-3;

/// What changed during one [`Difficulty::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DifficultyStep {
    /// A score milestone was crossed
    pub milestone_reached: bool,
    /// Game speed stepped up to this value
    pub new_speed: Option<f32>,
}

/// Score/speed controller
#[derive(Debug, Clone)]
pub struct Difficulty {
    tuning: Tuning,
    score: f32,
    game_speed: f32,
    speed_timer: f32,
    next_milestone: f32,
}

impl Difficulty {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            tuning: *tuning,
            score: 0.0,
            game_speed: tuning.start_speed,
            speed_timer: 0.0,
            next_milestone: tuning.milestone_start,
        }
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    /// Score truncated for display, unlocks and the final result
    pub fn whole_score(&self) -> u32 {
        self.score.floor() as u32
    }

    pub fn game_speed(&self) -> f32 {
        self.game_speed
    }

    pub fn next_milestone(&self) -> f32 {
        self.next_milestone
    }

    /// Run animation frame rate for the current speed
    pub fn run_animation_rate(&self) -> f32 {
        self.tuning.run_anim_base_fps
            + (self.game_speed - self.tuning.start_speed) / self.tuning.run_anim_speed_divisor
    }

    /// Advance by `dt` seconds
    pub fn advance(&mut self, dt: f32) -> DifficultyStep {
        let mut step = DifficultyStep::default();
        if dt <= 0.0 {
            return step;
        }

        self.score += self.game_speed * dt / self.tuning.score_divisor;

        if self.score >= self.next_milestone {
            self.next_milestone += self.tuning.milestone_step;
            step.milestone_reached = true;
        }

        self.speed_timer += dt;
        if self.speed_timer + SPEEDUP_SLACK_SECS >= self.tuning.speedup_interval_secs {
            self.speed_timer = 0.0;
            self.game_speed += self.tuning.speed_step;
            step.new_speed = Some(self.game_speed);
        }

        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    #[test]
    fn test_score_rate() {
        let mut difficulty = Difficulty::new(&Tuning::default());
        difficulty.advance(1.0);
        // 200 units/s over 1 s, divided by 20
        assert!((difficulty.score() - 10.0).abs() < 1e-4);
        assert_eq!(difficulty.whole_score(), 10);
    }

    #[test]
    fn test_speedup_once_per_ten_seconds() {
        let mut difficulty = Difficulty::new(&Tuning::default());
        let mut speedups = Vec::new();
        for i in 0..600 {
            if let Some(speed) = difficulty.advance(SIM_DT).new_speed {
                speedups.push((i, speed));
            }
        }
        assert_eq!(speedups, vec![(599, 220.0)]);
        assert_eq!(difficulty.game_speed(), 220.0);

        // Not again until another 10 s have passed
        for _ in 0..590 {
            assert_eq!(difficulty.advance(SIM_DT).new_speed, None);
        }
    }

    #[test]
    fn test_milestones() {
        let mut difficulty = Difficulty::new(&Tuning::default());
        let mut milestones = 0;
        // 100 points take 10 s at 200 units/s
        for _ in 0..(60 * 9) {
            if difficulty.advance(SIM_DT).milestone_reached {
                milestones += 1;
            }
        }
        assert_eq!(milestones, 0);
        assert_eq!(difficulty.next_milestone(), 100.0);

        for _ in 0..(60 * 2) {
            if difficulty.advance(SIM_DT).milestone_reached {
                milestones += 1;
            }
        }
        assert_eq!(milestones, 1);
        assert_eq!(difficulty.next_milestone(), 200.0);
    }

    #[test]
    fn test_milestone_checked_with_gte() {
        let mut difficulty = Difficulty::new(&Tuning::default());
        // One big step jumps well past the threshold
        let step = difficulty.advance(15.0);
        assert!(step.milestone_reached);
        assert_eq!(difficulty.next_milestone(), 200.0);
    }

    #[test]
    fn test_faster_speed_scores_faster() {
        let mut difficulty = Difficulty::new(&Tuning::default());
        difficulty.advance(10.0);
        let before = difficulty.score();
        difficulty.advance(1.0);
        // Now at 220 units/s
        assert!((difficulty.score() - before - 11.0).abs() < 1e-3);
    }

    #[test]
    fn test_run_animation_rate() {
        let mut difficulty = Difficulty::new(&Tuning::default());
        assert_eq!(difficulty.run_animation_rate(), 10.0);
        difficulty.advance(10.0);
        assert_eq!(difficulty.run_animation_rate(), 11.0);
    }

    #[test]
    fn test_zero_dt_is_noop() {
        let mut difficulty = Difficulty::new(&Tuning::default());
        assert_eq!(difficulty.advance(0.0), DifficultyStep::default());
        assert_eq!(difficulty.score(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_score_and_speed_monotone(dts in proptest::collection::vec(0.001f32..0.1, 1..500)) {
            let mut difficulty = Difficulty::new(&Tuning::default());
            for dt in dts {
                let (score, speed) = (difficulty.score(), difficulty.game_speed());
                difficulty.advance(dt);
                prop_assert!(difficulty.score() > score);
                prop_assert!(difficulty.game_speed() >= speed);
            }
        }
    }
}
