use async_trait::async_trait;
use tracing::debug;

use crate::auth::device_code::{DeviceAuthorization, FormBody, TokenResponse, DEVICE_GRANT_TYPE};
use crate::auth::error::{DeviceFlowError, Result};
use crate::auth::poller::TokenEndpoint;

const DEFAULT_DEVICE_CODE_URL: &str = "https://github.com/login/device/code";
const DEFAULT_ACCESS_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";

/// GitHub device authorization grant over form-encoded requests.
///
/// # Example
/// ```no_run
/// use device_token::auth::providers::github::GitHubDeviceFlow;
/// use device_token::auth::{poll_for_token, PollSettings};
///
/// # async fn run() -> device_token::auth::Result<()> {
/// let flow = GitHubDeviceFlow::new();
/// let session = flow.start_device_code("Iv1.0123456789abcdef", "public_repo").await?;
/// println!("{} {}", session.verification_uri(), session.user_code());
/// let _token = poll_for_token(&flow, &session, &PollSettings::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GitHubDeviceFlow {
    client: reqwest::Client,
    device_code_url: String,
    access_token_url: String,
}

impl Default for GitHubDeviceFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubDeviceFlow {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            device_code_url: DEFAULT_DEVICE_CODE_URL.to_string(),
            access_token_url: DEFAULT_ACCESS_TOKEN_URL.to_string(),
        }
    }

    pub fn with_device_code_url(mut self, url: impl Into<String>) -> Self {
        self.device_code_url = url.into();
        self
    }

    pub fn with_access_token_url(mut self, url: impl Into<String>) -> Self {
        self.access_token_url = url.into();
        self
    }

    /// Ask GitHub for a device code and the user code to show.
    ///
    /// A single attempt; any failure ends the flow.
    pub async fn start_device_code(
        &self,
        client_id: &str,
        scope: &str,
    ) -> Result<DeviceAuthorization> {
        if client_id.trim().is_empty() {
            return Err(DeviceFlowError::Configuration(
                "client_id must not be empty".to_string(),
            ));
        }
        let form = self
            .post_form(
                &self.device_code_url,
                &[("client_id", client_id), ("scope", scope)],
            )
            .await?;
        let session = DeviceAuthorization::from_form(client_id, scope, &form)?;
        debug!(
            verification_uri = session.verification_uri(),
            "device authorization started"
        );
        Ok(session)
    }

    async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> Result<FormBody> {
        let resp = self
            .client
            .post(url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .form(fields)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        let parsed = FormBody::parse(&body);
        if !status.is_success() {
            return match parsed {
                Ok(form) if form.get("error").is_some() => Ok(form),
                _ => Err(DeviceFlowError::Protocol(format!(
                    "request to {url} failed with status {status}"
                ))),
            };
        }
        parsed
    }
}

#[async_trait]
impl TokenEndpoint for GitHubDeviceFlow {
    async fn request_token(&self, client_id: &str, device_code: &str) -> Result<TokenResponse> {
        let form = self
            .post_form(
                &self.access_token_url,
                &[
                    ("client_id", client_id),
                    ("device_code", device_code),
                    ("grant_type", DEVICE_GRANT_TYPE),
                ],
            )
            .await?;
        Ok(TokenResponse::from_form(&form))
    }
}
