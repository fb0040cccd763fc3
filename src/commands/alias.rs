//! Bot alias matching for command lines.
//!
//! The bot's name has two components (e.g., "bioconda" + "bot"), and users
//! write it with a hyphen, a space, or nothing between them. Matching is
//! case-insensitive, like GitHub mentions, and anchored at line start: a
//! mid-sentence mention of the alias is not a command.

/// A case-insensitive matcher for the bot's @mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotAlias {
    first: String,
    second: String,
}

impl BotAlias {
    /// Creates an alias from the bot name's two components.
    ///
    /// Components are stored lowercased; matching is case-insensitive.
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        BotAlias {
            first: first.into().to_ascii_lowercase(),
            second: second.into().to_ascii_lowercase(),
        }
    }

    /// Parses a hyphenated bot name (e.g., "bioconda-bot") into an alias.
    pub fn parse(name: &str) -> Option<Self> {
        let (first, second) = name.split_once('-')?;
        if first.is_empty() || second.is_empty() {
            return None;
        }
        Some(BotAlias::new(first, second))
    }

    /// Strips a leading `@alias` from a line, returning the rest.
    ///
    /// The mention must be the very first thing on the line and must be
    /// followed by whitespace or the end of the line. Accepted separators
    /// between the name components: `-`, a single space, or nothing.
    pub fn strip_line<'a>(&self, line: &'a str) -> Option<&'a str> {
        let rest = line.strip_prefix('@')?;
        let rest = strip_prefix_ignore_case(rest, &self.first)?;

        // Optional separator between the two name components.
        let rest = match rest.strip_prefix(['-', ' ']) {
            Some(stripped) => stripped,
            None => rest,
        };

        let rest = strip_prefix_ignore_case(rest, &self.second)?;

        // Word boundary: end of line or whitespace before the command.
        if rest.is_empty() {
            Some(rest)
        } else if rest.starts_with(|c: char| c.is_whitespace()) {
            Some(rest)
        } else {
            None
        }
    }
}

/// Strips `prefix` from the start of `text`, ASCII-case-insensitively.
fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}
