//! Provider-specific device flow clients.

pub mod github;

pub use github::GitHubDeviceFlow;
