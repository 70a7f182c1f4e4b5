//! # Run configuration
//!
//! This module resolves **where the catalogs live** and bundles everything one
//! pipeline run needs into a plain configuration value:
//!
//! - [`CatalogPaths`]: the catalog base directory, resolved once from the
//!   `PROJECT_DIR` environment variable (`$PROJECT_DIR/bsc5`, or the relative
//!   directory `bsc5` when unset).
//! - [`Bsc5Config`]: the three BSC5 inputs, the output file, the variant and the
//!   output style.
//! - [`NgcConfig`]: the NGC input, output, filter and output style.
//!
//! ## Structure
//!
//! ```text
//! CatalogPaths (base_dir)
//! ├── Bsc5Config  (catalog, notes, names, output, variant, style)
//! └── NgcConfig   (input, output, filter, style)
//! ```
//!
//! Nothing here reads the environment after construction: the pipelines only
//! ever see explicit paths.
//!
//! ## Usage
//!
//! ```rust
//! use skycat::bsc5::Bsc5Variant;
//! use skycat::env_state::{Bsc5Config, CatalogPaths};
//!
//! let paths = CatalogPaths::from_project_dir(Some("/data/sky"));
//! let config = Bsc5Config::new(Bsc5Variant::MetadataRich, &paths);
//! assert_eq!(config.catalog, "/data/sky/bsc5/BSC5ra.bsc5");
//! assert_eq!(config.output, "/data/sky/bsc5/bsc5ra_stars_with_notes.json");
//! ```
use camino::{Utf8Path, Utf8PathBuf};

use crate::{
    bsc5::Bsc5Variant,
    constants::{
        BSC5_CATALOG_FILE, BSC5_NAMES_FILE, BSC5_NOTES_FILE, CATALOG_SUBDIR, NGC_INPUT_FILE,
        NGC_OUTPUT_FILE, PROJECT_DIR_ENV,
    },
    emit::OutputStyle,
    ngc::ngc_filter::NgcFilter,
};

/// Catalog base directory shared by every pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    pub base_dir: Utf8PathBuf,
}

impl CatalogPaths {
    /// Resolve the base directory from `PROJECT_DIR`.
    ///
    /// A value that is not valid UTF-8 is treated as unset.
    pub fn from_env() -> Self {
        let project_dir = std::env::var(PROJECT_DIR_ENV).ok();
        Self::from_project_dir(project_dir.as_deref())
    }

    /// `project_dir/bsc5`, or `bsc5` without a project directory.
    pub fn from_project_dir(project_dir: Option<&str>) -> Self {
        let base_dir = match project_dir.filter(|dir| !dir.is_empty()) {
            Some(dir) => Utf8Path::new(dir).join(CATALOG_SUBDIR),
            None => Utf8PathBuf::from(CATALOG_SUBDIR),
        };
        CatalogPaths { base_dir }
    }

    pub fn from_base(base_dir: impl Into<Utf8PathBuf>) -> Self {
        CatalogPaths {
            base_dir: base_dir.into(),
        }
    }

    pub fn file(&self, name: &str) -> Utf8PathBuf {
        self.base_dir.join(name)
    }
}

/// Inputs and output of one BSC5 conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Bsc5Config {
    pub variant: Bsc5Variant,
    pub catalog: Utf8PathBuf,
    pub notes: Utf8PathBuf,
    pub names: Utf8PathBuf,
    pub output: Utf8PathBuf,
    pub style: OutputStyle,
}

impl Bsc5Config {
    /// Default file names of `variant` inside the base directory.
    pub fn new(variant: Bsc5Variant, paths: &CatalogPaths) -> Self {
        Bsc5Config {
            variant,
            catalog: paths.file(BSC5_CATALOG_FILE),
            notes: paths.file(BSC5_NOTES_FILE),
            names: paths.file(BSC5_NAMES_FILE),
            output: paths.file(variant.default_output_file()),
            style: variant.default_style(),
        }
    }

    /// The three inputs, in reading order.
    pub fn sources(&self) -> [&Utf8Path; 3] {
        [&self.catalog, &self.notes, &self.names]
    }
}

/// Input, output and filter of one NGC conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct NgcConfig {
    pub input: Utf8PathBuf,
    pub output: Utf8PathBuf,
    pub filter: NgcFilter,
    pub style: OutputStyle,
}

impl NgcConfig {
    pub fn new(paths: &CatalogPaths, filter: NgcFilter) -> Self {
        NgcConfig {
            input: paths.file(NGC_INPUT_FILE),
            output: paths.file(NGC_OUTPUT_FILE),
            filter,
            style: OutputStyle::Pretty,
        }
    }
}
