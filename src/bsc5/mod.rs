//! BSC5 conversion: binary catalog + notes + names → JSON.
//!
//! Both variants share the reader and the join, and differ in three knobs
//! carried by [`Bsc5Variant`]: the join tolerance, the proper-motion defaulting
//! and the output document shape.

use tracing::info;

use crate::{
    annotations::AnnotationIndex,
    constants::{METADATA_RICH_OUTPUT_FILE, NOTES_AWARE_OUTPUT_FILE},
    emit::{write_json, ConversionSummary, OutputStyle},
    env_state::Bsc5Config,
    skycat_errors::SkycatError,
};

use catalog_reader::Bsc5Catalog;
use star_join::{join_annotations, MatchPolicy};
use star_output::{Bsc5Document, NotesAwareStar};

pub use star_output::ProperMotionPolicy;

pub mod bsc5_header;
pub mod catalog_reader;
pub mod catalog_record;
pub mod record_schema;
pub mod star_join;
pub mod star_output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bsc5Variant {
    /// Bare star array, zero proper motion default, ±0.5 join window
    NotesAware,
    /// Document with catalog metadata, absent proper motion omitted, ±2 join window on rounded keys
    MetadataRich,
}

impl Bsc5Variant {
    pub fn match_policy(&self) -> MatchPolicy {
        match self {
            Bsc5Variant::NotesAware => MatchPolicy::NOTES_AWARE,
            Bsc5Variant::MetadataRich => MatchPolicy::METADATA_RICH,
        }
    }

    pub fn proper_motion_policy(&self) -> ProperMotionPolicy {
        match self {
            Bsc5Variant::NotesAware => ProperMotionPolicy::ZeroDefault,
            Bsc5Variant::MetadataRich => ProperMotionPolicy::OmitAbsent,
        }
    }

    pub fn default_output_file(&self) -> &'static str {
        match self {
            Bsc5Variant::NotesAware => NOTES_AWARE_OUTPUT_FILE,
            Bsc5Variant::MetadataRich => METADATA_RICH_OUTPUT_FILE,
        }
    }

    pub fn default_style(&self) -> OutputStyle {
        match self {
            Bsc5Variant::NotesAware => OutputStyle::Pretty,
            Bsc5Variant::MetadataRich => OutputStyle::Compact,
        }
    }
}

/// Convert the catalog described by `config`.
///
/// Every input is checked before anything is read, and the output is only
/// created once the join has succeeded: a failed run leaves no file behind.
///
/// Return
/// ----------
/// * The number of stars written, the output path and its size, or the first
///   [`SkycatError`] met (missing input, invalid header, I/O failure).
pub fn run_bsc5(config: &Bsc5Config) -> Result<ConversionSummary, SkycatError> {
    if let Some(missing) = config.sources().into_iter().find(|path| !path.exists()) {
        return Err(SkycatError::MissingSourceFile(missing.to_path_buf()));
    }

    let catalog = Bsc5Catalog::read_file(&config.catalog)?;
    let annotations = AnnotationIndex::read_files(&config.notes, &config.names)?;
    let stars = join_annotations(
        &catalog.records,
        &annotations,
        config.variant.match_policy(),
    );
    info!("Joined {} named stars", stars.len());

    let bytes_written = match config.variant {
        Bsc5Variant::NotesAware => {
            let document: Vec<_> = stars.iter().map(NotesAwareStar::from_joined).collect();
            write_json(&document, &config.output, config.style)?
        }
        Bsc5Variant::MetadataRich => {
            let document = Bsc5Document::new(&catalog.header, &stars);
            write_json(&document, &config.output, config.style)?
        }
    };

    info!(
        "Converted {} stars to {} ({:.1} KB)",
        stars.len(),
        config.output,
        bytes_written as f64 / 1024.0
    );

    Ok(ConversionSummary {
        entries: stars.len(),
        output: config.output.clone(),
        bytes_written,
    })
}

#[cfg(test)]
mod bsc5_test {
    use super::*;

    #[test]
    fn test_variant_knobs() {
        assert_eq!(Bsc5Variant::NotesAware.match_policy().tolerance, 0.5);
        assert_eq!(Bsc5Variant::MetadataRich.match_policy().tolerance, 2.0);
        assert_eq!(
            Bsc5Variant::NotesAware.proper_motion_policy(),
            ProperMotionPolicy::ZeroDefault
        );
        assert_eq!(
            Bsc5Variant::MetadataRich.proper_motion_policy(),
            ProperMotionPolicy::OmitAbsent
        );
    }
}
