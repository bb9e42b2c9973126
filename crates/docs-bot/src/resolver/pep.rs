//! Python Enhancement Proposal links.

use super::{DocsResolver, ResolvedLink};
use crate::error::Result;

/// References that always answer with the Zen of Python.
const ZEN_ALIASES: [&str; 3] = ["zen", "zenofpython", "pep-20"];

impl DocsResolver {
    /// Resolve a `pep-<number>` reference (case-insensitive).
    ///
    /// The number is zero-padded to four digits and the page is probed.
    /// Malformed references return `None` without a probe.
    pub async fn enhancement_proposal(&self, reference: &str) -> Result<Option<ResolvedLink>> {
        let reference = reference.to_lowercase();

        if ZEN_ALIASES.contains(&reference.as_str()) {
            return Ok(Some(ResolvedLink::with_snippet(
                "The Zen of Python",
                format!("{}0020", self.urls.pep_base),
                ">>> import this",
            )));
        }

        let Some(number) = parse_pep_number(&reference) else {
            return Ok(None);
        };

        let url = format!("{}{number:04}", self.urls.pep_base);
        if self.prober.exists(&url).await? {
            Ok(Some(ResolvedLink::new(reference.to_uppercase(), url)))
        } else {
            tracing::debug!(reference, "No PEP page found");
            Ok(None)
        }
    }
}

/// Split `prefix-number` into exactly two parts and parse the number.
fn parse_pep_number(reference: &str) -> Option<i64> {
    let mut parts = reference.split('-');
    let (Some(_prefix), Some(number), None) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };
    number.parse().ok()
}
