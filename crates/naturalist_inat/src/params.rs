//! Query-string encoding for the iNaturalist endpoints.

use naturalist_interface::ObservationQuery;
use std::fmt::Display;

/// Query pairs for `GET /taxa`, asking for the single best match.
pub(crate) fn taxa_params(label: &str, locale: Option<&str>) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("q", label.to_string()),
        ("page", "1".to_string()),
        ("per_page", "1".to_string()),
    ];
    if let Some(locale) = locale {
        params.push(("locale", locale.to_string()));
    }
    params
}

/// Query pairs for `GET /observations`.
///
/// Exclusion lists are comma-joined and omitted when empty.
pub(crate) fn observation_params(
    query: &ObservationQuery,
    locale: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(taxon_id) = query.taxon_id() {
        params.push(("taxon_id", taxon_id.to_string()));
    }
    if let Some(name) = query.taxon_name() {
        params.push(("taxon_name", name.clone()));
    }
    params.push(("hrank", query.highest_rank().clone()));
    params.push(("photos", query.photos().to_string()));
    params.push(("identified", query.identified().to_string()));
    params.push(("page", query.page().to_string()));
    params.push(("per_page", query.per_page().to_string()));
    if !query.not_id().is_empty() {
        params.push(("not_id", join(query.not_id())));
    }
    if !query.without_taxon_id().is_empty() {
        params.push(("without_taxon_id", join(query.without_taxon_id())));
    }
    if let Some(locale) = locale {
        params.push(("locale", locale.to_string()));
    }
    params
}

fn join<T: Display>(ids: &[T]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
