//! Handler for `issue_comment` webhook events.
//!
//! Lines starting with an @mention of the bot are commands. Commands in one
//! comment dispatch strictly sequentially, in order of appearance: later
//! commands may depend on side effects of earlier ones, and the ordering
//! must be deterministic.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::commands::{BotAlias, CommandOutcome, CommandRegistry, parse_commands};
use crate::events::{Envelope, EventContext, EventHandler, HandlerError};

/// Dispatches bot commands found in freshly created comments.
pub struct CommentCreated {
    alias: BotAlias,
    commands: Arc<CommandRegistry>,
}

impl CommentCreated {
    pub fn new(alias: BotAlias, commands: Arc<CommandRegistry>) -> Self {
        CommentCreated { alias, commands }
    }
}

#[async_trait]
impl EventHandler for CommentCreated {
    async fn handle(&self, event: &Envelope, ctx: &EventContext) -> Result<(), HandlerError> {
        // A comment event without a body is inapplicable, not a failure.
        let Ok(body) = event.get_str("comment/body") else {
            info!("Comment event without a body, ignoring");
            return Ok(());
        };

        let commands = parse_commands(body, &self.alias);
        if commands.is_empty() {
            info!("No command in comment");
            return Ok(());
        }

        for command in &commands {
            match self
                .commands
                .dispatch(command, event, ctx.gateway.as_ref())
                .await?
            {
                CommandOutcome::Handled => {}
                CommandOutcome::Unrecognized(name) => {
                    // Non-fatal: sibling commands still run.
                    info!(command = %name, "Ignoring unrecognized command");
                }
            }
        }
        Ok(())
    }
}
