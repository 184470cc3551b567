// src/common/dev_mode.rs
//! Development mode configuration and utilities
//! Allows bypassing authentication for testing purposes

use std::env;
use tracing::{info, warn};

use crate::auth::models::User;

/// Fixed id so follow relations survive restarts in dev mode
pub const DEV_USER_ID: &str = "U_000DEV";

#[derive(Debug, Clone)]
pub struct DevModeConfig {
    pub enabled: bool,
    pub username: String,
}

impl DevModeConfig {
    pub fn from_env() -> Self {
        let enabled = env::var("DEV_MODE")
            .unwrap_or_else(|_| "false".to_string())
            .to_lowercase()
            == "true";

        let username = env::var("DEV_USERNAME").unwrap_or_else(|_| "dev".to_string());

        Self { enabled, username }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            username: "dev".to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Create the dev user every request is attributed to
    pub fn create_dev_user(&self) -> User {
        User {
            id: DEV_USER_ID.to_string(),
            username: self.username.clone(),
            created_at: None,
        }
    }
}

/// Log dev mode status on startup
pub fn print_dev_mode_status(config: &DevModeConfig) {
    if config.enabled {
        warn!(
            username = %config.username,
            "DEV MODE ENABLED: authentication bypassed, DO NOT USE IN PRODUCTION"
        );
    } else {
        info!("Production mode - Authentication required");
    }
}

/// CLI argument parsing for dev mode; the last matching flag wins
pub fn parse_dev_mode_args<I>(args: I) -> Option<bool>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .filter_map(|arg| match arg.as_str() {
            "--dev" | "--dev-mode" => Some(true),
            "--no-dev" | "--prod" | "--production" => Some(false),
            _ => None,
        })
        .last()
}

/// Override dev mode from CLI args
pub fn apply_cli_override(mut config: DevModeConfig) -> DevModeConfig {
    if let Some(cli_dev_mode) = parse_dev_mode_args(env::args().skip(1)) {
        info!(dev_mode = cli_dev_mode, "CLI override: DEV_MODE");
        config.enabled = cli_dev_mode;
    }

    config
}
