//! Configuration for the device-token flow (layered: flags > env > defaults).

use std::time::Duration;

use crate::auth::error::{DeviceFlowError, Result};
use crate::auth::poller::PollSettings;

/// Scope requested when none is configured.
pub const DEFAULT_SCOPE: &str = "public_repo";

pub const ENV_CLIENT_ID: &str = "DEVICE_TOKEN_CLIENT_ID";
pub const ENV_SCOPE: &str = "DEVICE_TOKEN_SCOPE";
pub const ENV_POLL_INTERVAL_SECS: &str = "DEVICE_TOKEN_POLL_INTERVAL_SECS";
pub const ENV_TIMEOUT_SECS: &str = "DEVICE_TOKEN_TIMEOUT_SECS";

/// Settings handed to the device flow by the entry point.
///
/// # Example
/// ```
/// use device_token::config::DeviceTokenConfig;
///
/// let config = DeviceTokenConfig::new()
///     .with_client_id("Iv1.0123456789abcdef")
///     .with_scope("repo,read:user");
/// assert_eq!(config.scope(), "repo read:user");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceTokenConfig {
    client_id: Option<String>,
    scope: String,
    poll: PollSettings,
}

impl Default for DeviceTokenConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceTokenConfig {
    /// Defaults only: no client id, `public_repo` scope, default poll timing.
    pub fn new() -> Self {
        Self {
            client_id: None,
            scope: DEFAULT_SCOPE.to_string(),
            poll: PollSettings::default(),
        }
    }

    /// Load from environment variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unset or blank values keep
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::new();

        if let Some(client_id) = lookup(ENV_CLIENT_ID) {
            config = config.with_client_id(client_id);
        }
        if let Some(scope) = lookup(ENV_SCOPE) {
            config = config.with_scope(scope);
        }
        if let Some(value) = lookup(ENV_POLL_INTERVAL_SECS) {
            config.poll.interval = parse_secs(ENV_POLL_INTERVAL_SECS, &value)?;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            config.poll.timeout = parse_secs(ENV_TIMEOUT_SECS, &value)?;
        }

        Ok(config)
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the scope. Commas are accepted as separators and sent as spaces.
    pub fn with_scope(mut self, scope: impl AsRef<str>) -> Self {
        self.scope = normalize_scope(scope.as_ref());
        self
    }

    pub fn with_poll_settings(mut self, poll: PollSettings) -> Self {
        self.poll = poll;
        self
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// The client id, or a configuration error when it is missing or blank.
    pub fn require_client_id(&self) -> Result<&str> {
        self.client_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                DeviceFlowError::Configuration(format!(
                    "client_id is required (pass --client_id or set {ENV_CLIENT_ID})"
                ))
            })
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn poll_settings(&self) -> &PollSettings {
        &self.poll
    }
}

fn normalize_scope(scope: &str) -> String {
    scope.replace(',', " ")
}

fn parse_secs(key: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| DeviceFlowError::Configuration(format!("{key}={value:?}: {e}")))
}
