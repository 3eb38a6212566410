//! Minimum response latency.
//!
//! The floor has to stay above the fastest legitimate outcome of the protected operation
//! (a malformed hash rejected before any hashing) or the timing difference leaks again.
//! Re-tune it whenever the Argon2 work factor of stored hashes changes.

use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, warn};

pub const DEFAULT_MIN_LATENCY: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyFloor(Duration);

impl LatencyFloor {
    #[must_use]
    pub const fn new(floor: Duration) -> Self {
        Self(floor)
    }

    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    #[must_use]
    pub const fn duration(self) -> Duration {
        self.0
    }

    /// Await `op`, then hold the result until at least the floor has elapsed since the start.
    ///
    /// The output of `op` is never inspected, so every outcome is padded the same way.
    pub async fn run<F>(self, op: F) -> F::Output
    where
        F: Future,
    {
        let started = Instant::now();
        let output = op.await;
        let elapsed = started.elapsed();

        if elapsed < self.0 {
            debug!(
                elapsed_ms = elapsed.as_millis(),
                padding_ms = (self.0 - elapsed).as_millis(),
                "padding response latency"
            );
        } else {
            warn!(
                elapsed_ms = elapsed.as_millis(),
                floor_ms = self.0.as_millis(),
                "operation exceeded latency floor"
            );
        }

        sleep_until(started + self.0).await;
        output
    }
}

impl Default for LatencyFloor {
    fn default() -> Self {
        Self(DEFAULT_MIN_LATENCY)
    }
}

/// Run `op` padded to `floor`.
pub async fn run<F>(floor: Duration, op: F) -> F::Output
where
    F: Future,
{
    LatencyFloor::new(floor).run(op).await
}
