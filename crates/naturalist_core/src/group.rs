//! Built-in taxon groups offered by the picture commands.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;

/// A taxon group users can browse without knowing a species name.
///
/// Each group has a short command alias (`bird`, `mush`, ...) and the catalog
/// label that the resolver turns into a taxon id (`Aves`, `Fungi`, ...).
///
/// # Examples
///
/// ```
/// use naturalist_core::TaxonGroup;
///
/// let group: TaxonGroup = "bird".parse().unwrap();
/// assert_eq!(group.label(), "Aves");
/// assert_eq!("fungi".parse::<TaxonGroup>().unwrap(), TaxonGroup::Fungus);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaxonGroup {
    /// Birds
    Bird,
    /// Fungi
    Fungus,
    /// Amphibians
    Amphibian,
    /// Reptiles
    Reptile,
    /// Mammals
    Mammal,
    /// Plants
    Plant,
    /// Insects
    Insect,
    /// Mollusks
    Mollusk,
    /// Ray-finned fishes
    Fish,
}

impl TaxonGroup {
    /// Catalog label handed to the taxon resolver.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bird => "Aves",
            Self::Fungus => "Fungi",
            Self::Amphibian => "Amphibia",
            Self::Reptile => "Reptilia",
            Self::Mammal => "Mammalia",
            Self::Plant => "Plantae",
            Self::Insect => "Insecta",
            Self::Mollusk => "Mollusca",
            Self::Fish => "Actinopterygii",
        }
    }

    /// Short command alias, as in `birdpic` or `mushpic`.
    pub fn alias(self) -> &'static str {
        match self {
            Self::Bird => "bird",
            Self::Fungus => "mush",
            Self::Amphibian => "am",
            Self::Reptile => "rep",
            Self::Mammal => "mam",
            Self::Plant => "plant",
            Self::Insect => "bug",
            Self::Mollusk => "mol",
            Self::Fish => "fish",
        }
    }

    /// One-line description for command listings.
    pub fn description(self) -> &'static str {
        match self {
            Self::Bird => "Bird pics",
            Self::Fungus => "Fungus pics",
            Self::Amphibian => "Amphibian pics",
            Self::Reptile => "Reptile pics",
            Self::Mammal => "Mammal pics",
            Self::Plant => "Plant pics",
            Self::Insect => "Insect pics",
            Self::Mollusk => "Mollusk pics",
            Self::Fish => "Fish pics",
        }
    }
}

impl FromStr for TaxonGroup {
    type Err = String;

    /// Accepts the alias, the alias with a `pic` suffix, the variant name or
    /// the catalog label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = wanted.strip_suffix("pic").unwrap_or(&wanted);
        Self::iter()
            .find(|group| {
                group.alias() == wanted
                    || group.as_ref() == wanted
                    || group.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("Unknown taxon group: {}", s.trim()))
    }
}
