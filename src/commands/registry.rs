//! The typed command registry.
//!
//! A second routing table, independent of the event router, keyed purely by
//! command name. Unknown commands resolve to an explicit `Unrecognized`
//! outcome rather than a lookup failure: an unregistered command is a
//! user-visible, non-fatal condition and must not abort sibling commands in
//! the same comment.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::events::Envelope;
use crate::github::{GatewayError, GithubGateway};

use super::parser::ParsedCommand;

/// Errors produced by a registered command handler.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A platform API call made by the command failed.
    #[error("GitHub API call failed: {0}")]
    Gateway(#[from] GatewayError),

    /// The command was invoked with arguments it cannot accept.
    #[error("invalid arguments for `{command}`: {reason}")]
    InvalidArguments { command: String, reason: String },
}

/// Outcome of dispatching one parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A registered handler ran to completion.
    Handled,

    /// No handler is registered under this name.
    ///
    /// How (and whether) to report this back to the user is the registered
    /// commands' collaborators' concern, not the registry's.
    Unrecognized(String),
}

/// A handler for one command name.
///
/// Handlers receive the original envelope and the API gateway so they have
/// enough context to report results back to the PR.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn run(
        &self,
        event: &Envelope,
        gateway: &dyn GithubGateway,
        args: &[String],
    ) -> Result<(), CommandError>;
}

/// Routing table keyed by command name.
///
/// Built once at process start; read-only afterwards.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: HashMap<String, Box<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        CommandRegistry {
            handlers: HashMap::new(),
        }
    }

    /// Registers a handler under a command name (stored lowercased).
    ///
    /// Registering the same name twice replaces the earlier handler.
    pub fn register(&mut self, name: impl Into<String>, handler: impl CommandHandler + 'static) {
        self.handlers
            .insert(name.into().to_ascii_lowercase(), Box::new(handler));
    }

    /// True if a handler is registered under `name`.
    pub fn is_registered(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Dispatches one parsed command.
    ///
    /// Unknown commands return `Ok(Unrecognized)`; only a registered
    /// handler's own failure is an error.
    pub async fn dispatch(
        &self,
        command: &ParsedCommand,
        event: &Envelope,
        gateway: &dyn GithubGateway,
    ) -> Result<CommandOutcome, CommandError> {
        match self.handlers.get(&command.name) {
            Some(handler) => {
                info!(command = %command.name, args = ?command.args, "Dispatching command");
                handler.run(event, gateway, &command.args).await?;
                Ok(CommandOutcome::Handled)
            }
            None => {
                info!(command = %command.name, "Unrecognized command");
                Ok(CommandOutcome::Unrecognized(command.name.clone()))
            }
        }
    }
}
