//! Token polling loop for a started device authorization.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, info};

use super::device_code::{DeviceAuthorization, PollOutcome, TokenResponse};
use super::error::{DeviceFlowError, Result};

/// Wait between attempts while authorization is pending.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Give up once this much time has passed since polling began.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(60);

/// Timing for [`poll_for_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_POLL_TIMEOUT,
        }
    }
}

impl PollSettings {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A token endpoint that answers device-code polls.
#[async_trait]
pub trait TokenEndpoint: Send + Sync {
    /// Issue one token request for the device code.
    async fn request_token(&self, client_id: &str, device_code: &str) -> Result<TokenResponse>;
}

/// Poll `endpoint` until the user authorizes the session, the provider
/// reports a fatal error, or `settings.timeout` elapses.
///
/// The first request is sent immediately. No request is sent once the
/// deadline has passed.
pub async fn poll_for_token<E>(
    endpoint: &E,
    session: &DeviceAuthorization,
    settings: &PollSettings,
) -> Result<String>
where
    E: TokenEndpoint + ?Sized,
{
    let started = Instant::now();
    let mut attempt: u32 = 0;

    while started.elapsed() < settings.timeout {
        attempt += 1;
        debug!(attempt, elapsed = ?started.elapsed(), "polling token endpoint");

        let outcome = endpoint
            .request_token(session.client_id(), session.device_code())
            .await?
            .outcome();

        match outcome {
            PollOutcome::AccessToken(token) => {
                debug!(attempt, "device authorization granted");
                return Ok(token);
            }
            PollOutcome::Fatal(error) => return Err(error),
            PollOutcome::Pending => tokio::time::sleep(settings.interval).await,
            PollOutcome::SlowDown { interval_secs } => {
                info!(interval_secs, "provider asked to slow down");
                tokio::time::sleep(Duration::from_secs(interval_secs)).await;
            }
        }
    }

    debug!(attempt, "device authorization timed out");
    Err(DeviceFlowError::Timeout)
}
