//! Object type and magnitude selection of the NGC conversion.
//!
//! A filter is built once from the command line through [`NgcFilter::resolve`]:
//! a named [`NgcPreset`] wins over explicit types and limit; without a preset and
//! without explicit types the default selection (galaxies, single stars and
//! planetary nebulae, magnitude threshold 15) applies.
//!
//! The magnitude threshold keeps objects whose magnitude is greater than or
//! equal to it. Objects without a magnitude are dropped once a threshold is set.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::{ngc::ngc_reader::NgcObject, skycat_errors::SkycatError};

/// Object classification codes of the NGC 2000.0 `Type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NgcObjectType {
    #[serde(rename = "Gx")]
    Galaxy,
    #[serde(rename = "OC")]
    OpenCluster,
    #[serde(rename = "Gb")]
    GlobularCluster,
    #[serde(rename = "Nb")]
    Nebula,
    #[serde(rename = "Pl")]
    PlanetaryNebula,
    #[serde(rename = "C+N")]
    ClusterWithNebulosity,
    #[serde(rename = "Ast")]
    Asterism,
    #[serde(rename = "Kt")]
    Knot,
    #[serde(rename = "***")]
    TripleStar,
    #[serde(rename = "D*")]
    DoubleStar,
    #[serde(rename = "*")]
    SingleStar,
    #[serde(rename = "?")]
    Uncertain,
    #[serde(rename = "-")]
    Nonexistent,
    #[serde(rename = "PD")]
    PlateDefect,
}

impl NgcObjectType {
    pub const ALL: [NgcObjectType; 14] = [
        NgcObjectType::Galaxy,
        NgcObjectType::OpenCluster,
        NgcObjectType::GlobularCluster,
        NgcObjectType::Nebula,
        NgcObjectType::PlanetaryNebula,
        NgcObjectType::ClusterWithNebulosity,
        NgcObjectType::Asterism,
        NgcObjectType::Knot,
        NgcObjectType::TripleStar,
        NgcObjectType::DoubleStar,
        NgcObjectType::SingleStar,
        NgcObjectType::Uncertain,
        NgcObjectType::Nonexistent,
        NgcObjectType::PlateDefect,
    ];

    /// Code as written in the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            NgcObjectType::Galaxy => "Gx",
            NgcObjectType::OpenCluster => "OC",
            NgcObjectType::GlobularCluster => "Gb",
            NgcObjectType::Nebula => "Nb",
            NgcObjectType::PlanetaryNebula => "Pl",
            NgcObjectType::ClusterWithNebulosity => "C+N",
            NgcObjectType::Asterism => "Ast",
            NgcObjectType::Knot => "Kt",
            NgcObjectType::TripleStar => "***",
            NgcObjectType::DoubleStar => "D*",
            NgcObjectType::SingleStar => "*",
            NgcObjectType::Uncertain => "?",
            NgcObjectType::Nonexistent => "-",
            NgcObjectType::PlateDefect => "PD",
        }
    }
}

impl fmt::Display for NgcObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NgcObjectType {
    type Err = SkycatError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        NgcObjectType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == code)
            .ok_or_else(|| SkycatError::UnknownObjectType(code.to_string()))
    }
}

/// Named selections of the NGC conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NgcPreset {
    /// Explicit types and limit only
    All,
    DeepSky,
    Bright,
    Minimal,
}

impl FromStr for NgcPreset {
    type Err = SkycatError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "all" => Ok(NgcPreset::All),
            "deep-sky" => Ok(NgcPreset::DeepSky),
            "bright" => Ok(NgcPreset::Bright),
            "minimal" => Ok(NgcPreset::Minimal),
            other => Err(SkycatError::UnknownPreset(other.to_string())),
        }
    }
}

const DEEP_SKY_TYPES: [NgcObjectType; 6] = [
    NgcObjectType::Galaxy,
    NgcObjectType::OpenCluster,
    NgcObjectType::GlobularCluster,
    NgcObjectType::Nebula,
    NgcObjectType::PlanetaryNebula,
    NgcObjectType::ClusterWithNebulosity,
];

const MINIMAL_TYPES: [NgcObjectType; 5] = [
    NgcObjectType::OpenCluster,
    NgcObjectType::GlobularCluster,
    NgcObjectType::Galaxy,
    NgcObjectType::Nebula,
    NgcObjectType::PlanetaryNebula,
];

const DEFAULT_TYPES: [NgcObjectType; 3] = [
    NgcObjectType::Galaxy,
    NgcObjectType::SingleStar,
    NgcObjectType::PlanetaryNebula,
];

/// Selection applied to every parsed object. An empty type list keeps every type;
/// no magnitude threshold keeps every magnitude, including missing ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NgcFilter {
    pub types: Vec<NgcObjectType>,
    pub max_magnitude: Option<f64>,
}

impl NgcFilter {
    /// Combine a preset with the explicit selection.
    ///
    /// Arguments
    /// -----------------
    /// * `preset` – Named selection; `deep-sky`, `bright` and `minimal` replace the
    ///   explicit types and limit, `all` keeps them as given.
    /// * `types` – Explicit object types.
    /// * `max_magnitude` – Explicit magnitude threshold.
    ///
    /// Return
    /// ----------
    /// * The filter to apply. Without preset and without types, the default
    ///   selection `Gx * Pl` with threshold 15.
    pub fn resolve(
        preset: Option<NgcPreset>,
        types: Vec<NgcObjectType>,
        max_magnitude: Option<f64>,
    ) -> Self {
        match preset {
            Some(NgcPreset::DeepSky) => NgcFilter {
                types: DEEP_SKY_TYPES.to_vec(),
                max_magnitude: Some(15.0),
            },
            Some(NgcPreset::Bright) => NgcFilter {
                types: DEEP_SKY_TYPES.to_vec(),
                max_magnitude: Some(12.0),
            },
            Some(NgcPreset::Minimal) => NgcFilter {
                types: MINIMAL_TYPES.to_vec(),
                max_magnitude: Some(10.0),
            },
            None if types.is_empty() => NgcFilter {
                types: DEFAULT_TYPES.to_vec(),
                max_magnitude: Some(15.0),
            },
            Some(NgcPreset::All) | None => NgcFilter {
                types,
                max_magnitude,
            },
        }
    }

    pub fn accepts(&self, object: &NgcObject) -> bool {
        if !self.types.is_empty() {
            let code = object.object_type.as_deref().unwrap_or_default();
            if !self.types.iter().any(|kind| kind.as_str() == code) {
                return false;
            }
        }

        match self.max_magnitude {
            Some(limit) => object.magnitude.is_some_and(|mag| mag >= limit),
            None => true,
        }
    }

    /// Type codes for the output metadata, `None` when every type is kept.
    pub fn included_types(&self) -> Option<&[NgcObjectType]> {
        (!self.types.is_empty()).then_some(self.types.as_slice())
    }
}
