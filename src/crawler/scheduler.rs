//! Request pacing
//!
//! Both tools send one request at a time. The throttle adds a fixed
//! courtesy pause before every follow-up request so the remote server is
//! never hit back-to-back.

use std::time::Duration;

/// Fixed delay inserted before follow-up requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// A throttle that never sleeps (tests, local mirrors)
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleeps for the configured delay
    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
