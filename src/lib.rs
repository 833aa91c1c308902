//! device-token: GitHub OAuth device authorization grant.
//!
//! Requests a device/user code pair from GitHub, then polls the token
//! endpoint until the user approves the request in a browser, the provider
//! reports an error, or the poll deadline passes.
//!
//! # Quick Start
//!
//! ```no_run
//! use device_token::auth::providers::github::GitHubDeviceFlow;
//! use device_token::auth::{poll_for_token, PollSettings};
//!
//! # async fn example() -> device_token::auth::Result<()> {
//! let flow = GitHubDeviceFlow::new();
//! let session = flow.start_device_code("Iv1.0123456789abcdef", "public_repo").await?;
//! println!("Visit {} and enter {}", session.verification_uri(), session.user_code());
//! let token = poll_for_token(&flow, &session, &PollSettings::default()).await?;
//! println!("{token}");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;

#[cfg(feature = "cli")]
pub mod cli;
