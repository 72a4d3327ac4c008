//! Wall-clock source for the engine.
//!
//! Timers store absolute unix-millisecond start stamps, so readings must be
//! comparable across process restarts. `Clock` anchors a unix-epoch origin
//! once at construction and advances it with a monotonic instant; wall-clock
//! adjustments after construction cannot move readings backwards.
//!
//! Built on `tokio::time::Instant` so the paused test clock drives it.

use tokio::time::Instant;

/// Monotonic reader of unix-epoch milliseconds.
#[derive(Debug, Clone)]
pub struct Clock {
    origin_unix_ms: u64,
    origin: Instant,
}

impl Clock {
    /// Anchor a new clock at the current wall-clock time.
    pub fn new() -> Self {
        Self {
            origin_unix_ms: unix_now_ms(),
            origin: Instant::now(),
        }
    }

    /// Current unix time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        let elapsed = self.origin.elapsed().as_millis();
        self.origin_unix_ms
            .saturating_add(u64::try_from(elapsed).unwrap_or(u64::MAX))
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readings_never_go_backwards() {
        let clock = Clock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
        assert!(a >= clock.origin_unix_ms);
    }

    #[tokio::test(start_paused = true)]
    async fn follows_the_paused_test_clock() {
        let clock = Clock::new();
        let before = clock.now_ms();
        tokio::time::advance(std::time::Duration::from_millis(1500)).await;
        assert_eq!(clock.now_ms(), before + 1500);
    }
}
