//! Transaction confirmation polling with capped multiplicative backoff

use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::domain::interfaces::ChainReader;
use crate::shared::errors::ChainError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffConfig {
    pub initial: Duration,
    pub factor: f64,
    pub max: Duration,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(500),
            factor: 1.2,
            max: Duration::from_millis(2500),
        }
    }
}

impl BackoffConfig {
    fn next(&self, current: Duration) -> Duration {
        let millis = (current.as_millis() as f64 * self.factor).round() as u64;
        Duration::from_millis(millis).min(self.max)
    }
}

pub struct ConfirmationPoller {
    backoff: BackoffConfig,
}

impl ConfirmationPoller {
    pub fn new(backoff: BackoffConfig) -> Self {
        Self { backoff }
    }

    /// Polls until the reference is confirmed, errored, or `timeout` elapses.
    ///
    /// Returns `Ok(false)` for both on-chain failure and timeout. Only a
    /// reference the chain cannot parse is an error.
    pub async fn wait_for(
        &self,
        chain: &dyn ChainReader,
        reference: &str,
        timeout: Duration,
    ) -> Result<bool, ChainError> {
        let deadline = Instant::now() + timeout;
        let mut backoff = self.backoff.initial;
        let mut polls = 0u32;

        while Instant::now() < deadline {
            polls += 1;
            match chain.signature_status(reference).await {
                Ok(Some(status)) => {
                    if let Some(err) = status.err {
                        warn!("❌ Transaction {} failed on-chain: {}", reference, err);
                        return Ok(false);
                    }
                    if status.is_confirmed() {
                        debug!("Transaction {} confirmed after {} polls", reference, polls);
                        return Ok(true);
                    }
                }
                Ok(None) => {}
                Err(e @ ChainError::InvalidReference(_)) => return Err(e),
                Err(e) => warn!("Status query for {} failed, retrying: {}", reference, e),
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            tokio::time::sleep(backoff.min(remaining)).await;
            backoff = self.backoff.next(backoff);
        }

        warn!("⏰ Transaction {} not confirmed within {:?} ({} polls)", reference, timeout, polls);
        Ok(false)
    }
}

impl Default for ConfirmationPoller {
    fn default() -> Self {
        Self::new(BackoffConfig::default())
    }
}
