//! # Constants and type definitions for skycat
//!
//! This module centralizes the **binary layout sizes**, **default file names** and
//! **catalog metadata strings** shared by the BSC5 and NGC pipelines, together with
//! a few type aliases used across the crate.
//!
//! ## Overview
//!
//! - Field widths of the BSC5 binary format
//! - Default file names inside the catalog base directory
//! - Descriptive metadata echoed into the JSON documents
//! - Core type aliases

// -------------------------------------------------------------------------------------------------
// BSC5 binary layout
// -------------------------------------------------------------------------------------------------

/// Size of the BSC5 header: seven big-endian `i32`
pub const HEADER_SIZE: usize = 28;

/// Width of the catalog number (XNO), integer or real
pub const IDENTIFIER_WIDTH: usize = 4;

/// Width of one coordinate (SRA0 / SDEC0)
pub const COORDINATE_WIDTH: usize = 8;

/// Width of the spectral type (IS)
pub const SPECTRAL_TYPE_WIDTH: usize = 2;

/// Width of one magnitude (MAG)
pub const MAGNITUDE_WIDTH: usize = 2;

/// Width of one proper motion component (XRPM / XDPM)
pub const PROPER_MOTION_WIDTH: usize = 4;

/// Width of the radial velocity (SVEL)
pub const RADIAL_VELOCITY_WIDTH: usize = 8;

/// STNUM value selecting an `Integer*4` catalog number
pub const INTEGER_IDENTIFIER_FORMAT: i32 = 4;

/// Magnitudes are stored as hundredths of a magnitude
pub const MAGNITUDE_SCALE: f64 = 100.0;

/// Name marker of the primary designation in the notes and names files
pub const NAME_MARKER: &str = "1N:";

/// Names starting with this prefix are cross references, not designations
pub const CROSS_REFERENCE_PREFIX: &str = "See HR";

// -------------------------------------------------------------------------------------------------
// Default file layout
// -------------------------------------------------------------------------------------------------

/// Environment variable holding the project directory
pub const PROJECT_DIR_ENV: &str = "PROJECT_DIR";

/// Catalog sub-directory below the project directory
pub const CATALOG_SUBDIR: &str = "bsc5";

pub const BSC5_CATALOG_FILE: &str = "BSC5ra.bsc5";
pub const BSC5_NOTES_FILE: &str = "ybsc5.notes";
pub const BSC5_NAMES_FILE: &str = "ybsc5.names";

pub const NOTES_AWARE_OUTPUT_FILE: &str = "bsc5_stars_with_notes.json";
pub const METADATA_RICH_OUTPUT_FILE: &str = "bsc5ra_stars_with_notes.json";

pub const NGC_INPUT_FILE: &str = "ngc2000.dat";
pub const NGC_OUTPUT_FILE: &str = "ngc2000.json";

// -------------------------------------------------------------------------------------------------
// Catalog metadata
// -------------------------------------------------------------------------------------------------

pub const BSC5_CATALOG_NAME: &str = "BSC5 - Yale Bright Star Catalog";
pub const BSC5_CATALOG_VERSION: &str = "5th Revised Edition";

pub const NGC_CATALOG_NAME: &str = "NGC 2000.0 - New General Catalogue and Index Catalogue";
pub const NGC_CATALOG_VERSION: &str = "2000.0";
pub const NGC_SOURCE: &str = "NASA/IPAC Extragalactic Database";
pub const NGC_DESCRIPTION: &str =
    "New General Catalogue (NGC) and Index Catalogue (IC) of Nebulae and Star Clusters";
pub const NGC_COORDINATE_EPOCH: &str = "J2000.0";

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in radians
pub type Radian = f64;

/// Angle in degrees
pub type Degree = f64;

/// Catalog designation number as written in the annotation files
pub type StarId = i64;
