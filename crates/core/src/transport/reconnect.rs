//! Reconnection policy with a fixed delay
//!
//! The listening stream is retried forever at a constant cadence: no backoff,
//! no attempt cap. Only an explicit stop ends the retries.

use std::time::Duration;
use tokio::time::sleep;

use crate::RECONNECT_DELAY_MS;

/// Reconnection configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectConfig {
    /// Wait between the end of one connection and the next open
    pub delay: Duration,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(RECONNECT_DELAY_MS),
        }
    }
}

/// Create reconnect config with a custom delay
pub fn reconnect_config(delay: Duration) -> ReconnectConfig {
    ReconnectConfig { delay }
}

/// Counts consecutive failed connections and paces retries
#[derive(Debug)]
pub struct Reconnector {
    config: ReconnectConfig,
    failures: u64,
}

impl Reconnector {
    pub fn new(config: ReconnectConfig) -> Self {
        Self { config, failures: 0 }
    }

    /// Delay before the next attempt; always the configured value
    pub fn next_delay(&mut self) -> Duration {
        self.failures += 1;
        self.config.delay
    }

    /// Sleep for one reconnect delay
    pub async fn wait(&mut self) {
        let delay = self.next_delay();
        tracing::debug!("Reconnect attempt {} scheduled in {:?}", self.failures, delay);
        sleep(delay).await;
    }

    /// Forget past failures after a successful open
    pub fn reset(&mut self) {
        if self.failures > 0 {
            tracing::info!("Reconnected after {} attempts", self.failures);
        }
        self.failures = 0;
    }

    /// Consecutive failures since the last successful open
    pub fn failures(&self) -> u64 {
        self.failures
    }
}
