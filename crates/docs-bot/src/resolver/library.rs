//! Standard library and built-in function links.

use super::{DocsResolver, ResolvedLink};
use crate::error::Result;

impl DocsResolver {
    /// Resolve a dotted standard-library reference such as `pathlib.Path`.
    ///
    /// Built-ins link to an anchor on the shared functions page. Everything
    /// else first tries a page named after the full reference (`os.path`
    /// has its own page), then the module-root page with the full reference
    /// as the anchor. Matching is case-sensitive.
    pub async fn library_reference(&self, reference: &str) -> Result<Option<ResolvedLink>> {
        if reference.is_empty() {
            return Ok(None);
        }

        let primary = if self.table.is_builtin(reference) {
            format!("{}#{reference}", self.urls.builtin_functions)
        } else {
            format!("{}{reference}.html#{reference}", self.urls.library_base)
        };

        if self.prober.exists(&primary).await? {
            return Ok(Some(ResolvedLink::new(reference, primary)));
        }

        let module = reference.split('.').next().unwrap_or(reference);
        let fallback = format!("{}{module}.html#{reference}", self.urls.library_base);

        if self.prober.exists(&fallback).await? {
            Ok(Some(ResolvedLink::new(reference, fallback)))
        } else {
            tracing::debug!(reference, "No library page found");
            Ok(None)
        }
    }
}
