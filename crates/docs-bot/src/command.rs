//! Command detection in comment bodies.
//!
//! Usage in a comment, on its own line:
//!
//! ```text
//! !docs pathlib.Path, re.search, zip, while, pep-8
//! ```

use regex::Regex;

/// Default command token.
pub const DEFAULT_TRIGGER: &str = "!docs";

/// References requested by a single command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Requested references, whitespace removed, in request order.
    ///
    /// May contain empty strings when the list has stray commas.
    pub references: Vec<String>,
}

/// Finds the command line in a comment body.
#[derive(Debug, Clone)]
pub struct CommandParser {
    trigger: String,
    pattern: Regex,
}

impl CommandParser {
    /// Build a parser for the given command token.
    #[must_use]
    pub fn new(trigger: &str) -> Self {
        let pattern = Regex::new(&format!(r"(?m)^{}\s(.+)$", regex::escape(trigger)))
            .expect("escaped trigger is a valid regex");
        Self {
            trigger: trigger.to_string(),
            pattern,
        }
    }

    /// The command token this parser looks for.
    #[must_use]
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// Extract the references from the first command line in `body`.
    ///
    /// Returns `None` when no line starts with the trigger followed by
    /// whitespace. References are case-preserving; commas cannot be escaped.
    #[must_use]
    pub fn parse(&self, body: &str) -> Option<CommandInvocation> {
        let captures = self.pattern.captures(body)?;
        let arguments: String = captures[1]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        Some(CommandInvocation {
            references: arguments.split(',').map(ToString::to_string).collect(),
        })
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGER)
    }
}
