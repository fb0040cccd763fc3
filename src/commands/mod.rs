//! Comment-command extraction and dispatch.
//!
//! Comments on issues and PRs can carry bot commands: any line that starts
//! with an @mention of the bot is treated as a command line. The alias
//! matcher, the line parser, and the command registry live here; the
//! handlers registered in the registry are plugins supplied at startup.

pub mod alias;
pub mod parser;
pub mod registry;

pub use alias::BotAlias;
pub use parser::{ParsedCommand, parse_commands};
pub use registry::{CommandError, CommandHandler, CommandOutcome, CommandRegistry};
