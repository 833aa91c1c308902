#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use device_token::auth::{DeviceAuthorization, DeviceFlowError, TokenEndpoint, TokenResponse};
use tokio::time::Instant;

/// One recorded token request.
#[derive(Debug, Clone)]
pub struct RecordedPoll {
    pub at: Instant,
    pub client_id: String,
    pub device_code: String,
}

/// Token endpoint that replays a fixed script, then answers
/// `authorization_pending` forever.
#[derive(Default)]
pub struct ScriptedEndpoint {
    script: Mutex<VecDeque<Result<TokenResponse, DeviceFlowError>>>,
    polls: Mutex<Vec<RecordedPoll>>,
}

impl ScriptedEndpoint {
    pub fn new(script: Vec<Result<TokenResponse, DeviceFlowError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            polls: Mutex::new(Vec::new()),
        }
    }

    pub fn polls(&self) -> Vec<RecordedPoll> {
        self.polls.lock().expect("polls lock poisoned").clone()
    }
}

#[async_trait]
impl TokenEndpoint for ScriptedEndpoint {
    async fn request_token(
        &self,
        client_id: &str,
        device_code: &str,
    ) -> Result<TokenResponse, DeviceFlowError> {
        self.polls
            .lock()
            .expect("polls lock poisoned")
            .push(RecordedPoll {
                at: Instant::now(),
                client_id: client_id.to_string(),
                device_code: device_code.to_string(),
            });
        self.script
            .lock()
            .expect("script lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(error("authorization_pending")))
    }
}

pub fn session() -> DeviceAuthorization {
    DeviceAuthorization::new(
        "Iv1.test-client",
        "public_repo",
        "device-code-1",
        "ABCD-1234",
        "https://github.com/login/device",
    )
}

pub fn token(access_token: &str) -> TokenResponse {
    TokenResponse {
        access_token: Some(access_token.to_string()),
        token_type: Some("bearer".to_string()),
        scope: Some("public_repo".to_string()),
        ..TokenResponse::default()
    }
}

pub fn error(code: &str) -> TokenResponse {
    TokenResponse {
        error: Some(code.to_string()),
        ..TokenResponse::default()
    }
}

pub fn slow_down(interval: &str) -> TokenResponse {
    TokenResponse {
        error: Some("slow_down".to_string()),
        interval: Some(interval.to_string()),
        ..TokenResponse::default()
    }
}
