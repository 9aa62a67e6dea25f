//! Inter-page delay policy for polite fetching.
//!
//! The upstream marketplace rate-limits aggressive clients; one mandatory
//! pause between result pages is part of the fetch contract, not an
//! accident. The policy is an explicit value injected into
//! [`SearchService`](crate::search::SearchService) so tests can substitute
//! a zero-delay variant.

use std::time::Duration;

/// Delay policy applied between consecutive page fetches.
#[derive(Debug, Clone)]
pub struct ThrottleConfig {
    /// Base pause between pages.
    pub delay: Duration,

    /// Maximum random jitter added on top of `delay` (uniform [0, jitter]).
    /// Set to `Duration::ZERO` to disable.
    pub jitter: Duration,
}

impl ThrottleConfig {
    /// Fixed delay, no jitter.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            jitter: Duration::ZERO,
        }
    }

    /// Zero-delay policy for tests.
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Add random jitter (uniform [0, jitter]) on top of the base delay.
    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    /// Pause for the effective delay.
    pub async fn pause(&self) {
        let duration = self.effective_delay();
        if duration.is_zero() {
            return;
        }
        tracing::debug!(sleep_ms = %duration.as_millis(), "Pausing between pages");
        tokio::time::sleep(duration).await;
    }

    fn effective_delay(&self) -> Duration {
        if self.jitter.is_zero() {
            return self.delay;
        }
        let jitter_ms = rand_jitter_ms(self.jitter.as_millis() as u64);
        self.delay + Duration::from_millis(jitter_ms)
    }
}

impl Default for ThrottleConfig {
    /// 2 second fixed pause between pages.
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

// ---------------------------------------------------------------------------
// Deterministic jitter based on std — avoids pulling in the `rand` crate.
// Uses a simple xorshift seeded from the current time.
// ---------------------------------------------------------------------------

fn rand_jitter_ms(max_ms: u64) -> u64 {
    if max_ms == 0 {
        return 0;
    }
    let mut x = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64;
    // xorshift64
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    x % max_ms
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn default_is_a_two_second_fixed_pause() {
        let config = ThrottleConfig::default();
        assert_eq!(config.delay, Duration::from_secs(2));
        assert_eq!(config.jitter, Duration::ZERO);
    }

    #[test]
    fn effective_delay_without_jitter() {
        let config = ThrottleConfig::new(Duration::from_millis(100));
        assert_eq!(config.effective_delay(), Duration::from_millis(100));
    }

    #[test]
    fn effective_delay_with_jitter_is_bounded() {
        let config =
            ThrottleConfig::new(Duration::from_millis(100)).with_jitter(Duration::from_millis(50));
        for _ in 0..100 {
            let d = config.effective_delay();
            assert!(d >= Duration::from_millis(100));
            assert!(d < Duration::from_millis(150));
        }
    }

    #[tokio::test]
    async fn zero_delay_policy_returns_immediately() {
        let start = Instant::now();
        ThrottleConfig::none().pause().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn pause_waits_at_least_the_configured_delay() {
        let config = ThrottleConfig::new(Duration::from_millis(100));
        let start = Instant::now();
        config.pause().await;
        assert!(start.elapsed() >= Duration::from_millis(100));
    }
}
