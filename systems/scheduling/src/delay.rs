//! Difficulty-scaled delay generation for mole visibility windows.

use std::time::Duration;

use mole_rush_core::Difficulty;

use crate::SchedulerRng;

const EASY_DELAY_MS: u64 = 1500;
const NORMAL_DELAY_MS: u64 = 1000;
const HARD_DELAY_MIN_MS: u64 = 600;
const HARD_DELAY_MAX_MS: u64 = 1200;

/// Computes how long the next mole stays visible.
///
/// Easy and normal difficulties use fixed windows of 1500 and 1000
/// milliseconds. Hard re-samples a uniform integer millisecond count in the
/// inclusive range `[600, 1200]` on every call.
#[must_use]
pub fn compute_delay(difficulty: Difficulty, rng: &mut SchedulerRng) -> Duration {
    match difficulty {
        Difficulty::Easy => Duration::from_millis(EASY_DELAY_MS),
        Difficulty::Normal => Duration::from_millis(NORMAL_DELAY_MS),
        Difficulty::Hard => {
            Duration::from_millis(rng.uniform_inclusive(HARD_DELAY_MIN_MS, HARD_DELAY_MAX_MS))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easy_delay_is_always_fixed() {
        let mut rng = SchedulerRng::new(11);
        for _ in 0..100 {
            assert_eq!(
                compute_delay(Difficulty::Easy, &mut rng),
                Duration::from_millis(1500)
            );
        }
    }

    #[test]
    fn normal_delay_is_always_fixed() {
        let mut rng = SchedulerRng::new(11);
        for _ in 0..100 {
            assert_eq!(
                compute_delay(Difficulty::Normal, &mut rng),
                Duration::from_millis(1000)
            );
        }
    }

    #[test]
    fn hard_delay_stays_inside_the_inclusive_range() {
        let mut rng = SchedulerRng::new(0xfeed);
        for _ in 0..10_000 {
            let delay = compute_delay(Difficulty::Hard, &mut rng);
            assert!(delay >= Duration::from_millis(600), "delay {delay:?} too short");
            assert!(delay <= Duration::from_millis(1200), "delay {delay:?} too long");
        }
    }

    #[test]
    fn hard_delay_is_resampled_per_call() {
        let mut rng = SchedulerRng::new(0xfeed);
        let samples: Vec<Duration> = (0..32)
            .map(|_| compute_delay(Difficulty::Hard, &mut rng))
            .collect();
        let first = samples[0];
        assert!(samples.iter().any(|sample| *sample != first));
    }
}
