//! Environment-driven bot configuration.
//!
//! The only configuration value the core itself consumes is the bot's own
//! application id (the app-id guard); the rest wires up the gateway and the
//! HTTP receiver. Lookup is injected so parsing is testable without
//! touching the process environment.

use std::net::SocketAddr;

use thiserror::Error;

use crate::commands::BotAlias;
use crate::types::{AppId, RepoId};

/// Errors that can occur while loading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },
}

/// Runtime configuration for the bot.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// The bot's own GitHub App id, used only for the app-id guard.
    pub app_id: AppId,

    /// The bot's @mention alias.
    pub alias: BotAlias,

    /// The repository the bot serves.
    pub repo: RepoId,

    /// Secret for webhook signature verification.
    pub webhook_secret: String,

    /// Token for platform API authentication.
    pub github_token: String,

    /// Address the HTTP receiver binds to.
    pub listen_addr: SocketAddr,
}

const DEFAULT_ALIAS: &str = "bioconda-bot";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

impl BotConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Loads configuration through an arbitrary lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require = |var: &'static str| lookup(var).ok_or(ConfigError::MissingVar(var));

        let app_id_raw = require("BOT_APP_ID")?;
        let app_id = app_id_raw
            .parse::<u64>()
            .map(AppId)
            .map_err(|e| ConfigError::InvalidVar {
                var: "BOT_APP_ID",
                reason: e.to_string(),
            })?;

        let alias_raw = lookup("BOT_ALIAS").unwrap_or_else(|| DEFAULT_ALIAS.to_string());
        let alias = BotAlias::parse(&alias_raw).ok_or_else(|| ConfigError::InvalidVar {
            var: "BOT_ALIAS",
            reason: "expected a hyphenated two-part name, e.g. `bioconda-bot`".to_string(),
        })?;

        let repo_raw = require("BOT_REPO")?;
        let repo = RepoId::parse(&repo_raw).ok_or_else(|| ConfigError::InvalidVar {
            var: "BOT_REPO",
            reason: "expected `owner/repo`".to_string(),
        })?;

        let webhook_secret = require("BOT_WEBHOOK_SECRET")?;
        let github_token = require("GITHUB_TOKEN")?;

        let listen_raw =
            lookup("BOT_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidVar {
                var: "BOT_LISTEN_ADDR",
                reason: e.to_string(),
            })?;

        Ok(BotConfig {
            app_id,
            alias,
            repo,
            webhook_secret,
            github_token,
            listen_addr,
        })
    }
}
