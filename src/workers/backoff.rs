//! Retry delay policy with exponential backoff and jitter.
//!
//! The delay doubles with every attempt up to a cap, and a uniform random
//! jitter proportional to the capped exponential part is added on top so
//! that a burst of events enqueued together does not come due in lockstep.

use std::time::Duration;

use rand::Rng;

use crate::constants::{DEFAULT_BACKOFF_BASE_MS, DEFAULT_BACKOFF_JITTER, DEFAULT_BACKOFF_MAX_MS};

/// A pure parameter set; the delay is recomputed from the attempt count on
/// every cycle, no state is persisted.
#[derive(Clone, Debug)]
pub struct BackoffPolicy {
    /// Initial delay, also the lower bound of any computed delay.
    pub base: Duration,
    /// Upper bound on the exponential part of the delay.
    pub max: Duration,
    /// Fraction of the exponential part added as uniform random jitter.
    pub jitter: f64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(DEFAULT_BACKOFF_BASE_MS),
            max: Duration::from_millis(DEFAULT_BACKOFF_MAX_MS),
            jitter: DEFAULT_BACKOFF_JITTER,
        }
    }
}

impl BackoffPolicy {
    pub fn new(base: Duration, max: Duration, jitter: f64) -> Self {
        Self { base, max, jitter }
    }

    /// Computes `min(max, base * 2^attempt)` plus jitter. Never below `base`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let exponential = (self.base.as_millis() as f64 * 2f64.powi(attempt.min(63) as i32))
            .min(self.max.as_millis() as f64);
        let jitter = rand::thread_rng().gen_range(0.0..1.0) * self.jitter * exponential;
        Duration::from_millis((exponential + jitter) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> BackoffPolicy {
        BackoffPolicy::new(Duration::from_millis(1000), Duration::from_millis(60000), 0.2)
    }

    #[test]
    fn test_delay_within_bounds_per_attempt() {
        let policy = policy();
        for attempt in 0..10u32 {
            let exponential = (1000f64 * 2f64.powi(attempt as i32)).min(60000.0);
            // sample repeatedly since jitter is random
            for _ in 0..50 {
                let delay = policy.delay(attempt).as_millis() as f64;
                assert!(delay >= exponential, "attempt {}: {} < {}", attempt, delay, exponential);
                assert!(
                    delay <= exponential * 1.2 + 1.0,
                    "attempt {}: {} > {}",
                    attempt,
                    delay,
                    exponential * 1.2
                );
            }
        }
    }

    #[test]
    fn test_delay_never_below_base() {
        let policy = policy();
        assert!(policy.delay(0) >= Duration::from_millis(1000));
    }

    #[test]
    fn test_delay_caps_at_max_plus_jitter() {
        let policy = policy();
        for _ in 0..50 {
            let delay = policy.delay(1000).as_millis();
            assert!(delay >= 60000);
            assert!(delay <= 72001);
        }
    }

    #[test]
    fn test_expected_delay_is_non_decreasing() {
        let policy = policy();
        // compare the deterministic exponential parts
        let exponential = |attempt: u32| {
            (policy.base.as_millis() as f64 * 2f64.powi(attempt as i32))
                .min(policy.max.as_millis() as f64)
        };
        for attempt in 0..20u32 {
            assert!(exponential(attempt + 1) >= exponential(attempt));
        }
    }

    #[test]
    fn test_zero_jitter_is_deterministic() {
        let policy = BackoffPolicy::new(
            Duration::from_millis(500),
            Duration::from_millis(8000),
            0.0,
        );
        assert_eq!(policy.delay(0), Duration::from_millis(500));
        assert_eq!(policy.delay(1), Duration::from_millis(1000));
        assert_eq!(policy.delay(2), Duration::from_millis(2000));
        assert_eq!(policy.delay(10), Duration::from_millis(8000));
    }
}
