//! Language reference links found by fuzzy title matching.

use super::{DocsResolver, ResolvedLink};
use crate::fuzzy::{title_case, token_set_ratio};

/// Titles must score strictly above this to match.
pub const MATCH_THRESHOLD: u8 = 85;

impl DocsResolver {
    /// Match a reference against every section title in the table.
    ///
    /// Every title scoring above [`MATCH_THRESHOLD`] is returned, in table
    /// order. Common words like `the` can match many sections.
    #[must_use]
    pub fn language_reference(&self, reference: &str) -> Vec<ResolvedLink> {
        let query = reference.to_lowercase();

        self.table
            .sections
            .iter()
            .filter(|section| token_set_ratio(&section.title, &query) > MATCH_THRESHOLD)
            .map(|section| ResolvedLink::new(title_case(&section.title), section.link.clone()))
            .collect()
    }
}
