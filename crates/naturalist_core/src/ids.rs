//! Opaque catalog identifiers.

use serde::{Deserialize, Serialize};

/// Identifier of a taxon (group or species) in the external catalog.
///
/// # Examples
///
/// ```
/// use naturalist_core::TaxonId;
///
/// let aves = TaxonId::from(3);
/// assert_eq!(aves.get(), 3);
/// assert_eq!(aves.to_string(), "3");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct TaxonId(u64);

impl TaxonId {
    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Identifier of one cataloged observation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct ObservationId(u64);

impl ObservationId {
    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}
