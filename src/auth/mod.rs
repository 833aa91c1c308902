//! OAuth device authorization grant: start a session, then poll for a token.

pub mod device_code;
pub mod error;
pub mod poller;
pub mod providers;

pub use device_code::{
    DeviceAuthorization, FormBody, PollOutcome, ProviderErrorCode, TokenResponse,
    DEVICE_GRANT_TYPE,
};
pub use error::{DeviceFlowError, Result};
pub use poller::{
    poll_for_token, PollSettings, TokenEndpoint, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT,
};
