//! Extraction of structured commands from comment text.
//!
//! Each line of the comment is considered independently. A line is a
//! command line when it starts with the bot's @mention; the next token is
//! the command name (lowercased) and the remaining tokens are positional
//! arguments, preserving their original case. Parsing is pure and
//! idempotent: re-parsing the same body yields the same sequence.

use serde::{Deserialize, Serialize};

use super::alias::BotAlias;

/// One command extracted from a comment line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    /// The command name, lowercased.
    pub name: String,

    /// Positional arguments in token order, original case preserved.
    pub args: Vec<String>,
}

/// Extracts every command line from a comment body, in order of appearance.
///
/// Lines that merely mention the alias mid-sentence are ignored, as are
/// lines carrying a bare mention with no command token.
pub fn parse_commands(body: &str, alias: &BotAlias) -> Vec<ParsedCommand> {
    body.lines()
        .filter_map(|line| alias.strip_line(line))
        .filter_map(|rest| {
            let mut tokens = rest.split_whitespace();
            let name = tokens.next()?.to_ascii_lowercase();
            let args = tokens.map(str::to_string).collect();
            Some(ParsedCommand { name, args })
        })
        .collect()
}
