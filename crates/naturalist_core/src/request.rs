//! Lookup request shape.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A request for one not-recently-seen observation.
///
/// Both parts are optional: a group alone browses the whole group, a query
/// alone is a free search, and both together narrow the group by text.
/// Blank queries are normalized away because command surfaces join trailing
/// words and hand over an empty string when there were none.
///
/// # Examples
///
/// ```
/// use naturalist_core::LookupRequest;
///
/// let browse = LookupRequest::new(Some("Aves"), Some("   "));
/// assert!(!browse.is_narrowed());
///
/// let search = LookupRequest::new(None, Some("canada goose"));
/// assert_eq!(search.query().as_deref(), Some("canada goose"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct LookupRequest {
    /// Taxon label to browse, e.g. `Aves`
    group: Option<String>,
    /// Free-text narrowing, e.g. `canada goose`
    query: Option<String>,
}

impl LookupRequest {
    /// Build a request, trimming the query and dropping it when blank.
    pub fn new(group: Option<&str>, query: Option<&str>) -> Self {
        Self {
            group: group
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string),
            query: query
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
        }
    }

    /// Whether free text narrows the request.
    ///
    /// Narrowed requests may legitimately return the same species again, so
    /// they never feed the species exclusion set.
    pub fn is_narrowed(&self) -> bool {
        self.query.is_some()
    }
}
