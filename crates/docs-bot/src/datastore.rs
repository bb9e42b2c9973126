//! Static reference data loaded once at startup.
//!
//! The table is never mutated after [`ReferenceTable::load`] returns; callers
//! share it behind an `Arc`.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::error::{BotError, Result};

/// A titled section of the language documentation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocSection {
    /// Section title as stored (usually lowercase).
    pub title: String,
    /// Canonical link to the section.
    pub link: String,
}

/// Read-only lookup data used by the resolvers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceTable {
    /// Language reference sections, in file order.
    #[serde(rename = "docs_sections")]
    pub sections: Vec<DocSection>,
    /// Built-in functions documented on the shared functions page.
    #[serde(rename = "builtin_functions")]
    pub builtins: HashSet<String>,
}

impl ReferenceTable {
    /// Load the table from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BotError::ReferenceTable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let table = Self::from_json(&content).map_err(|e| BotError::ReferenceTable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        tracing::debug!(
            path = %path.display(),
            sections = table.sections.len(),
            builtins = table.builtins.len(),
            "Loaded reference table"
        );
        Ok(table)
    }

    /// Parse the table from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Whether `name` is a built-in function (case-sensitive).
    #[must_use]
    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtins.contains(name)
    }
}
