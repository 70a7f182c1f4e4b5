//! JSON shapes of the two BSC5 converters.
//!
//! * **Notes-aware** ([`NotesAwareStar`]): a bare array of stars with the
//!   historical catalog field names (`sra0`, `is`, `xrpm`...). The magnitude is
//!   the raw value in hundredths and proper motion always present, `0.0` when the
//!   catalog has none.
//! * **Metadata-rich** ([`Bsc5Document`]): an object with catalog metadata, the
//!   header echo and the stars. Magnitudes are in magnitudes, and motion fields
//!   are omitted when the catalog has none.

use serde::Serialize;

use crate::{
    bsc5::{bsc5_header::CatalogHeader, star_join::JoinedStar, Bsc5Variant},
    constants::{Radian, StarId, BSC5_CATALOG_NAME, BSC5_CATALOG_VERSION},
};

/// What to emit for a proper motion component missing from the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProperMotionPolicy {
    /// Emit `0.0`
    ZeroDefault,
    /// Omit the field
    OmitAbsent,
}

impl ProperMotionPolicy {
    pub fn apply(&self, value: Option<f32>) -> Option<f64> {
        match self {
            ProperMotionPolicy::ZeroDefault => Some(value.map_or(0.0, f64::from)),
            ProperMotionPolicy::OmitAbsent => value.map(f64::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotesAwareStar {
    pub xno: StarId,
    pub sra0: Radian,
    pub sdec0: Radian,
    #[serde(rename = "is")]
    pub spectral_type: String,
    /// Hundredths of a magnitude, `0` when the entry has none
    pub mag: i16,
    pub xrpm: f64,
    pub xdpm: f64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
}

impl NotesAwareStar {
    pub fn from_joined(star: &JoinedStar<'_>) -> Self {
        let record = star.record;
        let policy = Bsc5Variant::NotesAware.proper_motion_policy();
        NotesAwareStar {
            xno: star.identifier,
            sra0: record.right_ascension_rad,
            sdec0: record.declination_rad,
            spectral_type: record.spectral_type(),
            mag: record.primary_magnitude().unwrap_or(0),
            xrpm: policy.apply(record.ra_proper_motion).unwrap_or_default(),
            xdpm: policy.apply(record.dec_proper_motion).unwrap_or_default(),
            name: star.name.clone(),
            notes: star.notes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataRichStar {
    pub xno: StarId,
    pub sra0: Radian,
    pub sdec0: Radian,
    pub spectral_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mag: Option<f64>,
    pub name: String,
    pub coordinate_system: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ra_pm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dec_pm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radial_velocity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
}

impl MetadataRichStar {
    pub fn from_joined(star: &JoinedStar<'_>, header: &CatalogHeader) -> Self {
        let record = star.record;
        let policy = Bsc5Variant::MetadataRich.proper_motion_policy();
        MetadataRichStar {
            xno: star.identifier,
            sra0: record.right_ascension_rad,
            sdec0: record.declination_rad,
            spectral_type: record.spectral_type(),
            mag: record.primary_magnitude_scaled(),
            name: star.name.clone(),
            coordinate_system: header.epoch().as_str(),
            object_name: record.object_name(),
            ra_pm: policy.apply(record.ra_proper_motion),
            dec_pm: policy.apply(record.dec_proper_motion),
            radial_velocity: record.radial_velocity,
            notes: star.notes.clone(),
        }
    }
}

/// Echo of the binary header in the metadata-rich document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderInfo {
    pub star0: i32,
    pub star1: i32,
    pub star_count: usize,
    pub has_proper_motion: bool,
    pub magnitude_count: usize,
    pub bytes_per_entry: i32,
}

impl From<&CatalogHeader> for HeaderInfo {
    fn from(header: &CatalogHeader) -> Self {
        HeaderInfo {
            star0: header.sequence_offset,
            star1: header.first_identifier,
            star_count: header.record_count(),
            has_proper_motion: header.has_proper_motion(),
            magnitude_count: header.magnitude_count(),
            bytes_per_entry: header.bytes_per_record,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bsc5Document {
    pub catalog: &'static str,
    pub version: &'static str,
    pub coordinate_system: &'static str,
    pub total_stars: usize,
    pub header_info: HeaderInfo,
    pub stars: Vec<MetadataRichStar>,
}

impl Bsc5Document {
    pub fn new(header: &CatalogHeader, stars: &[JoinedStar<'_>]) -> Self {
        let stars: Vec<_> = stars
            .iter()
            .map(|star| MetadataRichStar::from_joined(star, header))
            .collect();
        Bsc5Document {
            catalog: BSC5_CATALOG_NAME,
            version: BSC5_CATALOG_VERSION,
            coordinate_system: header.epoch().as_str(),
            total_stars: stars.len(),
            header_info: HeaderInfo::from(header),
            stars,
        }
    }
}
