//! Handler for `device-token get-token`.

use std::io::Write;

use crate::auth::poller::poll_for_token;
use crate::auth::providers::github::GitHubDeviceFlow;
use crate::config::DeviceTokenConfig;

use super::GetTokenArgs;

/// Handle `device-token get-token`.
pub async fn handle_get_token(args: &GetTokenArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.apply(DeviceTokenConfig::from_env()?);
    let flow = GitHubDeviceFlow::new();
    run_get_token(&flow, &config, &mut std::io::stdout()).await?;
    Ok(())
}

/// Run the device flow, writing the prompt and the token to `out`.
///
/// Returns the access token that was printed.
pub async fn run_get_token<W: Write>(
    flow: &GitHubDeviceFlow,
    config: &DeviceTokenConfig,
    out: &mut W,
) -> Result<String, Box<dyn std::error::Error>> {
    let client_id = config.require_client_id()?;

    let session = flow
        .start_device_code(client_id, config.scope())
        .await
        .map_err(|e| format!("failed to initiate device authorization grant: {e}"))?;

    writeln!(
        out,
        "Device authorization requested. Sign in at the uri below and enter the user_code."
    )?;
    writeln!(out, "uri: {}", session.verification_uri())?;
    writeln!(out, "user_code: {}", session.user_code())?;
    out.flush()?;

    let token = poll_for_token(flow, &session, config.poll_settings())
        .await
        .map_err(|e| format!("failed to poll device authorization grant token: {e}"))?;

    writeln!(out, "Got user access token")?;
    writeln!(out, "{token}")?;
    Ok(token)
}
