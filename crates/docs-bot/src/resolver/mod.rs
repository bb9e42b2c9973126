//! Reference resolution.
//!
//! Each requested reference is run through three independent lookups, in a
//! fixed order:
//!
//! - [`DocsResolver::library_reference`]: standard library pages, probed live
//! - [`DocsResolver::language_reference`]: fuzzy match against section titles
//! - [`DocsResolver::enhancement_proposal`]: PEP pages, probed live
//!
//! A reference may match more than one lookup; every match is kept.

mod language;
mod library;
mod pep;
mod probe;

pub use language::MATCH_THRESHOLD;
pub use probe::{HttpProber, Prober};

use std::fmt;
use std::sync::Arc;

use crate::datastore::ReferenceTable;
use crate::error::Result;

/// Documentation hosts used to build links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsUrls {
    /// Prefix for standard library pages, ending in `/`.
    pub library_base: String,
    /// Page holding every built-in function.
    pub builtin_functions: String,
    /// Prefix completed by a zero-padded PEP number.
    pub pep_base: String,
}

impl Default for DocsUrls {
    fn default() -> Self {
        Self {
            library_base: "https://docs.python.org/3/library/".to_string(),
            builtin_functions: "https://docs.python.org/3/library/functions.html".to_string(),
            pep_base: "https://www.python.org/dev/peps/pep-".to_string(),
        }
    }
}

impl DocsUrls {
    /// Point every link at a single host, keeping the standard paths
    /// (`--docs-host`).
    #[must_use]
    pub fn with_host(host: &str) -> Self {
        let host = host.trim_end_matches('/');
        Self {
            library_base: format!("{host}/3/library/"),
            builtin_functions: format!("{host}/3/library/functions.html"),
            pep_base: format!("{host}/dev/peps/pep-"),
        }
    }
}

/// A single markdown link in a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Link text.
    pub title: String,
    /// Target URL.
    pub url: String,
    /// Indented code line rendered under the link.
    pub snippet: Option<String>,
}

impl ResolvedLink {
    /// Create a plain link.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: None,
        }
    }

    /// Create a link followed by a code line.
    pub fn with_snippet(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: Some(snippet.into()),
        }
    }
}

impl fmt::Display for ResolvedLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]({})  \n", self.title, self.url)?;
        match &self.snippet {
            Some(snippet) => write!(f, "\n    {snippet}  \n  \n"),
            None => f.write_str("  \n"),
        }
    }
}

/// Resolves references against the reference table and live docs hosts.
///
/// Holds only shared read-only state, so resolving the same reference twice
/// gives the same answer as long as the hosts answer the same way.
pub struct DocsResolver {
    table: Arc<ReferenceTable>,
    prober: Arc<dyn Prober>,
    urls: DocsUrls,
}

impl DocsResolver {
    /// Create a resolver using the public Python documentation hosts.
    #[must_use]
    pub fn new(table: Arc<ReferenceTable>, prober: Arc<dyn Prober>) -> Self {
        Self::with_urls(table, prober, DocsUrls::default())
    }

    /// Create a resolver with custom documentation hosts.
    #[must_use]
    pub fn with_urls(table: Arc<ReferenceTable>, prober: Arc<dyn Prober>, urls: DocsUrls) -> Self {
        Self {
            table,
            prober,
            urls,
        }
    }

    /// Resolve one reference into rendered link lines.
    ///
    /// Returns an empty string when nothing matched.
    pub async fn resolve(&self, reference: &str) -> Result<String> {
        let mut rendered = String::new();

        if let Some(link) = self.library_reference(reference).await? {
            rendered.push_str(&link.to_string());
        }
        for link in self.language_reference(reference) {
            rendered.push_str(&link.to_string());
        }
        if let Some(link) = self.enhancement_proposal(reference).await? {
            rendered.push_str(&link.to_string());
        }

        Ok(rendered)
    }

    /// Resolve every reference in order, dropping the ones that matched nothing.
    pub async fn resolve_all<S: AsRef<str>>(&self, references: &[S]) -> Result<Vec<String>> {
        let mut results = Vec::with_capacity(references.len());

        for reference in references {
            let rendered = self.resolve(reference.as_ref()).await?;
            if rendered.is_empty() {
                tracing::debug!(reference = reference.as_ref(), "Reference matched nothing");
            } else {
                results.push(rendered);
            }
        }

        Ok(results)
    }
}
