//! Query and record types exchanged with a catalog.

use derive_builder::Builder;
use derive_getters::Getters;
use naturalist_core::{ObservationDetail, ObservationId, TaxonId, upgrade_photo_url};
use naturalist_error::{CatalogError, NaturalistResult};
use serde::{Deserialize, Serialize};

/// Coarsest rank an observation may be identified at to be returned.
pub const SPECIES_RANK: &str = "species";

/// Best match returned by the taxon resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TaxonMatch {
    /// Resolved taxon id
    id: TaxonId,
    /// Canonical name, when the catalog reports one
    #[serde(default)]
    name: Option<String>,
}

impl TaxonMatch {
    /// Create a match for `id`.
    pub fn new(id: impl Into<TaxonId>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }
}

/// Parameters of a single-result observation search.
///
/// Defaults request one identified, photographed observation at species rank
/// or finer from the first page.
///
/// # Examples
///
/// ```
/// use naturalist_core::{ObservationId, TaxonId};
/// use naturalist_interface::ObservationQuery;
///
/// let query = ObservationQuery::builder()
///     .taxon_id(Some(TaxonId::from(3)))
///     .not_id(vec![ObservationId::from(42)])
///     .build()
///     .unwrap();
///
/// assert_eq!(*query.per_page(), 1);
/// assert!(*query.photos());
/// assert_eq!(query.highest_rank(), "species");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ObservationQuery {
    /// Restrict to this taxon and its descendants
    #[builder(default)]
    taxon_id: Option<TaxonId>,
    /// Free-text taxon name narrowing
    #[builder(default)]
    taxon_name: Option<String>,
    /// Coarsest acceptable identification rank
    #[builder(default = "SPECIES_RANK.to_string()")]
    highest_rank: String,
    /// Only observations with photos
    #[builder(default = "true")]
    photos: bool,
    /// Only identified observations
    #[builder(default = "true")]
    identified: bool,
    /// Result page, 1-based
    #[builder(default = "1")]
    page: u32,
    /// Page size
    #[builder(default = "1")]
    per_page: u32,
    /// Observation ids to exclude
    #[builder(default)]
    not_id: Vec<ObservationId>,
    /// Species ids to exclude
    #[builder(default)]
    without_taxon_id: Vec<TaxonId>,
}

impl ObservationQuery {
    /// Creates a new builder.
    pub fn builder() -> ObservationQueryBuilder {
        ObservationQueryBuilder::default()
    }
}

/// Taxon block embedded in an observation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TaxonRecord {
    /// Species-level taxon id
    id: TaxonId,
    /// Scientific name
    #[serde(default)]
    name: Option<String>,
    /// Reference article
    #[serde(default)]
    wikipedia_url: Option<String>,
    /// Vernacular name
    #[serde(default)]
    preferred_common_name: Option<String>,
}

impl TaxonRecord {
    /// Create a taxon block.
    pub fn new(
        id: impl Into<TaxonId>,
        name: impl Into<String>,
        wikipedia_url: Option<String>,
        preferred_common_name: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            wikipedia_url,
            preferred_common_name,
        }
    }
}

/// Photo attached to an observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PhotoRecord {
    /// Thumbnail URL as served by the catalog
    #[serde(default)]
    url: Option<String>,
}

impl PhotoRecord {
    /// Create a photo with `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}

/// One observation as returned by the catalog search.
///
/// Fields the catalog may omit are optional here and checked in
/// [`ObservationRecord::into_detail`], so a sparse record surfaces as a
/// missing-field error rather than a decode failure of the whole page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ObservationRecord {
    /// Observation id
    id: ObservationId,
    /// Identified taxon
    #[serde(default)]
    taxon: Option<TaxonRecord>,
    /// Attached photos, best first
    #[serde(default)]
    photos: Vec<PhotoRecord>,
    /// Observation page
    #[serde(default)]
    uri: Option<String>,
}

impl ObservationRecord {
    /// Create a record.
    pub fn new(
        id: impl Into<ObservationId>,
        taxon: TaxonRecord,
        photos: Vec<PhotoRecord>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            taxon: Some(taxon),
            photos,
            uri: Some(uri.into()),
        }
    }

    /// Normalize into the detail handed to the presentation layer.
    ///
    /// Upgrades the first photo from thumbnail to original resolution.
    ///
    /// # Errors
    ///
    /// Returns a missing-field catalog error when the taxon, its name, the
    /// first photo URL or the observation URI is absent.
    pub fn into_detail(self) -> NaturalistResult<ObservationDetail> {
        let taxon = self.taxon.ok_or_else(|| CatalogError::missing("taxon"))?;
        let scientific_name = taxon
            .name
            .ok_or_else(|| CatalogError::missing("taxon.name"))?;
        let thumbnail = self
            .photos
            .into_iter()
            .next()
            .and_then(|photo| photo.url)
            .ok_or_else(|| CatalogError::missing("photos[0].url"))?;
        let uri = self.uri.ok_or_else(|| CatalogError::missing("uri"))?;

        let detail = ObservationDetail::builder()
            .observation_id(self.id)
            .taxon_id(taxon.id)
            .scientific_name(scientific_name)
            .preferred_common_name(taxon.preferred_common_name)
            .wikipedia_url(taxon.wikipedia_url)
            .photo_url(upgrade_photo_url(&thumbnail))
            .uri(uri)
            .build()
            .map_err(|e| CatalogError::missing(e.to_string()))?;
        Ok(detail)
    }
}
