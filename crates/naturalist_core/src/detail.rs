//! Normalized observation record handed to the presentation layer.

use crate::{ObservationId, TaxonId};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One picked observation, already normalized for display.
///
/// Produced once per successful lookup and never cached.
///
/// # Examples
///
/// ```
/// use naturalist_core::ObservationDetail;
///
/// let detail = ObservationDetail::builder()
///     .observation_id(42u64)
///     .taxon_id(3u64)
///     .scientific_name("Turdus migratorius")
///     .preferred_common_name(Some("American Robin".to_string()))
///     .photo_url("https://x/photos/1/original.jpg")
///     .uri("https://x/42")
///     .build()
///     .unwrap();
///
/// assert_eq!(detail.title(), "American Robin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ObservationDetail {
    /// Catalog id of the observation
    observation_id: ObservationId,
    /// Species-level taxon id of the observation
    taxon_id: TaxonId,
    /// Latin binomial
    scientific_name: String,
    /// Vernacular name in the catalog's default locale
    #[builder(default)]
    preferred_common_name: Option<String>,
    /// Reference article about the species
    #[builder(default)]
    wikipedia_url: Option<String>,
    /// Original-resolution photo
    photo_url: String,
    /// Link to the observation page
    uri: String,
}

impl ObservationDetail {
    /// Creates a new builder.
    pub fn builder() -> ObservationDetailBuilder {
        ObservationDetailBuilder::default()
    }

    /// Common name when the catalog has one, otherwise the scientific name.
    pub fn title(&self) -> &str {
        self.preferred_common_name
            .as_deref()
            .unwrap_or(&self.scientific_name)
    }
}
