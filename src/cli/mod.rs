//! CLI entry point for device-token.

pub mod get_token;

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::DeviceTokenConfig;

/// GitHub device authorization CLI
#[derive(Parser, Debug)]
#[command(
    name = "device-token",
    version,
    about = "Get a GitHub user access token through the device authorization grant"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Get a GitHub user token via the device authorization grant.
    ///
    /// Requires a GitHub App (or OAuth App) with device flow enabled. See
    /// https://docs.github.com/en/apps/oauth-apps/building-oauth-apps/authorizing-oauth-apps#device-flow
    GetToken(GetTokenArgs),
}

/// Arguments for `device-token get-token`.
#[derive(Parser, Debug, Default)]
pub struct GetTokenArgs {
    /// GitHub app client id (required here or via DEVICE_TOKEN_CLIENT_ID)
    #[arg(long = "client_id")]
    pub client_id: Option<String>,

    /// Comma-separated scopes to request [default: public_repo]
    #[arg(long)]
    pub scope: Option<String>,

    /// Seconds to wait between polls while authorization is pending
    #[arg(long)]
    pub interval: Option<u64>,

    /// Seconds to keep polling before giving up
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl GetTokenArgs {
    /// Layer explicit flags over `config`.
    pub fn apply(&self, mut config: DeviceTokenConfig) -> DeviceTokenConfig {
        if let Some(client_id) = &self.client_id {
            config = config.with_client_id(client_id.clone());
        }
        if let Some(scope) = &self.scope {
            config = config.with_scope(scope);
        }
        let mut poll = *config.poll_settings();
        if let Some(interval) = self.interval {
            poll = poll.with_interval(Duration::from_secs(interval));
        }
        if let Some(timeout) = self.timeout {
            poll = poll.with_timeout(Duration::from_secs(timeout));
        }
        config.with_poll_settings(poll)
    }
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn get_token_args(argv: &[&str]) -> GetTokenArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::GetToken(args) => args,
        }
    }

    #[test]
    fn parse_get_token_with_client_id() {
        let args = get_token_args(&["device-token", "get-token", "--client_id", "Iv1.abc"]);
        assert_eq!(args.client_id.as_deref(), Some("Iv1.abc"));
        assert!(args.scope.is_none());
        assert!(args.interval.is_none());
        assert!(args.timeout.is_none());
    }

    #[test]
    fn parse_get_token_with_all_options() {
        let args = get_token_args(&[
            "device-token",
            "get-token",
            "--client_id",
            "Iv1.abc",
            "--scope",
            "repo,read:org",
            "--interval",
            "3",
            "--timeout",
            "90",
        ]);
        assert_eq!(args.scope.as_deref(), Some("repo,read:org"));
        assert_eq!(args.interval, Some(3));
        assert_eq!(args.timeout, Some(90));
    }

    #[test]
    fn flags_override_config() {
        let args = get_token_args(&[
            "device-token",
            "get-token",
            "--client_id",
            "from-flag",
            "--scope",
            "repo,gist",
            "--timeout",
            "30",
        ]);
        let config = args.apply(DeviceTokenConfig::new().with_client_id("from-env"));
        assert_eq!(config.client_id(), Some("from-flag"));
        assert_eq!(config.scope(), "repo gist");
        assert_eq!(config.poll_settings().timeout, Duration::from_secs(30));
        assert_eq!(config.poll_settings().interval, Duration::from_secs(5));
    }

    #[test]
    fn missing_flags_keep_config_values() {
        let args = get_token_args(&["device-token", "get-token"]);
        let config = args.apply(
            DeviceTokenConfig::new()
                .with_client_id("from-env")
                .with_scope("gist"),
        );
        assert_eq!(config.client_id(), Some("from-env"));
        assert_eq!(config.scope(), "gist");
    }

    #[test]
    fn parse_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["device-token"]).is_err());
    }

    #[test]
    fn parse_non_numeric_timeout_is_error() {
        assert!(
            Cli::try_parse_from(["device-token", "get-token", "--timeout", "soon"]).is_err()
        );
    }
}
