use thiserror::Error;

/// Errors that end a device authorization run.
///
/// None of these are retried; the only retried conditions are the
/// `authorization_pending` and `slow_down` codes, which never surface as
/// errors.
#[derive(Debug, Error)]
pub enum DeviceFlowError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Invalid request: {0}")]
    Construction(String),
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Invalid response: {0}")]
    Parse(String),
    #[error("Provider error: {0}")]
    Protocol(String),
    #[error("timeout")]
    Timeout,
}

impl DeviceFlowError {
    /// Provider error for an `error` code, with its description when given.
    pub fn protocol(code: &str, description: Option<&str>) -> Self {
        match description.filter(|d| !d.is_empty()) {
            Some(description) => Self::Protocol(format!("{code} ({description})")),
            None => Self::Protocol(code.to_string()),
        }
    }
}

impl From<reqwest::Error> for DeviceFlowError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_builder() {
            Self::Construction(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, DeviceFlowError>;
