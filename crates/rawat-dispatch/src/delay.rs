//! Randomized inter-message pacing.
//!
//! The delay is an injectable policy rather than a free function so tests
//! can run with zero delay while production keeps its randomized pacing
//! against the downstream gateway's rate limits.

use rand::Rng;
use std::time::Duration;

/// Uniformly random delay over an inclusive integer-second range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayPolicy {
    min_secs: u64,
    max_secs: u64,
}

impl DelayPolicy {
    /// Production deployments use 1-10s or 5-10s depending on gateway
    /// rate limits; both come from config.
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        let (min_secs, max_secs) = if min_secs <= max_secs {
            (min_secs, max_secs)
        } else {
            (max_secs, min_secs)
        };
        Self { min_secs, max_secs }
    }

    /// Zero-delay policy for tests and dry runs.
    pub fn none() -> Self {
        Self { min_secs: 0, max_secs: 0 }
    }

    pub fn min_secs(&self) -> u64 {
        self.min_secs
    }

    pub fn max_secs(&self) -> u64 {
        self.max_secs
    }

    /// Draw the next delay.
    pub fn next_delay(&self) -> Duration {
        if self.max_secs == 0 {
            return Duration::ZERO;
        }
        let secs = rand::thread_rng().gen_range(self.min_secs..=self.max_secs);
        Duration::from_secs(secs)
    }

    /// Sleep for one drawn delay.
    pub async fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tracing::debug!("Waiting {}s before next send", delay.as_secs());
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for DelayPolicy {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_stays_in_range() {
        let policy = DelayPolicy::new(5, 10);
        for _ in 0..100 {
            let d = policy.next_delay().as_secs();
            assert!((5..=10).contains(&d));
        }
    }

    #[test]
    fn test_none_is_zero() {
        assert_eq!(DelayPolicy::none().next_delay(), Duration::ZERO);
    }

    #[test]
    fn test_inverted_bounds_are_normalized() {
        let policy = DelayPolicy::new(10, 5);
        assert_eq!(policy.min_secs(), 5);
        assert_eq!(policy.max_secs(), 10);
        // Inverted bounds must never reach gen_range, which panics on an
        // empty range.
        for _ in 0..100 {
            let d = policy.next_delay().as_secs();
            assert!((5..=10).contains(&d));
        }
    }
}
