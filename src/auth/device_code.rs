use strum::EnumString;

use super::error::{DeviceFlowError, Result};

/// Grant type sent with every token poll.
pub const DEVICE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// A device authorization started with the provider.
///
/// The device code is fixed once the provider issues it and is reused for
/// every poll of this session.
///
/// # Example
/// ```
/// use device_token::auth::DeviceAuthorization;
///
/// let session = DeviceAuthorization::new(
///     "Iv1.0123456789abcdef",
///     "public_repo",
///     "device-code",
///     "ABCD-1234",
///     "https://github.com/login/device",
/// );
/// assert_eq!(session.device_code(), "device-code");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAuthorization {
    client_id: String,
    scope: String,
    device_code: String,
    user_code: String,
    verification_uri: String,
}

impl DeviceAuthorization {
    pub fn new(
        client_id: impl Into<String>,
        scope: impl Into<String>,
        device_code: impl Into<String>,
        user_code: impl Into<String>,
        verification_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            scope: scope.into(),
            device_code: device_code.into(),
            user_code: user_code.into(),
            verification_uri: verification_uri.into(),
        }
    }

    /// Build a session from the device-code endpoint's form body.
    pub fn from_form(client_id: &str, scope: &str, form: &FormBody) -> Result<Self> {
        if let Some(code) = form.get("error").filter(|code| !code.is_empty()) {
            if form.get("device_code").is_none() {
                return Err(DeviceFlowError::protocol(
                    code,
                    form.get("error_description"),
                ));
            }
        }
        Ok(Self::new(
            client_id,
            scope,
            form.require("device_code")?,
            form.require("user_code")?,
            form.require("verification_uri")?,
        ))
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn device_code(&self) -> &str {
        &self.device_code
    }

    pub fn user_code(&self) -> &str {
        &self.user_code
    }

    pub fn verification_uri(&self) -> &str {
        &self.verification_uri
    }
}

/// Result of a single token poll.
#[derive(Debug)]
pub enum PollOutcome {
    AccessToken(String),
    Pending,
    SlowDown { interval_secs: u64 },
    Fatal(DeviceFlowError),
}

/// Error codes the token endpoint uses for flow control.
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ProviderErrorCode {
    AuthorizationPending,
    SlowDown,
    #[strum(default)]
    Other(String),
}

/// Decoded body of a token endpoint response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
    pub interval: Option<String>,
}

impl TokenResponse {
    pub fn from_form(form: &FormBody) -> Self {
        let field = |key: &str| form.get(key).map(str::to_string);
        Self {
            access_token: field("access_token"),
            token_type: field("token_type"),
            scope: field("scope"),
            error: field("error"),
            error_description: field("error_description"),
            interval: field("interval"),
        }
    }

    /// Map the response onto the poll state machine.
    ///
    /// A non-empty access token wins over any error code in the same body.
    pub fn outcome(self) -> PollOutcome {
        if let Some(token) = self.access_token.filter(|token| !token.is_empty()) {
            return PollOutcome::AccessToken(token);
        }
        let raw = self.error.unwrap_or_default();
        let code: ProviderErrorCode = raw
            .parse()
            .unwrap_or_else(|_| ProviderErrorCode::Other(raw.clone()));
        match code {
            ProviderErrorCode::AuthorizationPending => PollOutcome::Pending,
            ProviderErrorCode::SlowDown => {
                let interval = self.interval.unwrap_or_default();
                // A non-positive interval means poll again without waiting.
                match interval.parse::<i64>() {
                    Ok(secs) => PollOutcome::SlowDown {
                        interval_secs: u64::try_from(secs).unwrap_or(0),
                    },
                    Err(e) => PollOutcome::Fatal(DeviceFlowError::Parse(format!(
                        "slow_down interval {interval:?} is not an integer: {e}"
                    ))),
                }
            }
            ProviderErrorCode::Other(code) => PollOutcome::Fatal(DeviceFlowError::protocol(
                &code,
                self.error_description.as_deref(),
            )),
        }
    }
}

/// Key/value pairs of an `application/x-www-form-urlencoded` body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBody {
    pairs: Vec<(String, String)>,
}

impl FormBody {
    /// Decode a response body. The body must be UTF-8, must not use `;` as
    /// a separator, and every `%` must start a two-digit hex escape.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(body)
            .map_err(|e| DeviceFlowError::Parse(format!("response body is not UTF-8: {e}")))?;
        check_form_syntax(text)?;
        let pairs = url::form_urlencoded::parse(text.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Ok(Self { pairs })
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| DeviceFlowError::Parse(format!("response is missing {key}")))
    }
}

fn check_form_syntax(text: &str) -> Result<()> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b';' {
            return Err(DeviceFlowError::Parse(format!(
                "invalid semicolon separator at byte {i}"
            )));
        }
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(DeviceFlowError::Parse(format!(
                    "invalid percent escape at byte {i}"
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}
