//! CLI argument definitions for skycat

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

use skycat::{
    bsc5::Bsc5Variant,
    emit::OutputStyle,
    env_state::{Bsc5Config, CatalogPaths, NgcConfig},
    ngc::ngc_filter::{NgcFilter, NgcObjectType, NgcPreset},
};

#[derive(Parser)]
#[command(name = "skycat")]
#[command(about = "Convert the BSC5 and NGC 2000.0 catalogs to JSON")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// BSC5 stars as a bare JSON array (zero default proper motion)
    Bsc5Notes(Bsc5Args),

    /// BSC5 stars with catalog metadata and header information
    Bsc5(Bsc5Args),

    /// NGC 2000.0 deep-sky objects, filtered by type and magnitude
    Ngc(NgcArgs),
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct StyleArgs {
    /// Indented JSON
    #[arg(long)]
    pub pretty: bool,

    /// JSON without whitespace
    #[arg(long, conflicts_with = "pretty")]
    pub compact: bool,
}

impl StyleArgs {
    pub fn resolve(&self, default: OutputStyle) -> OutputStyle {
        if self.pretty {
            OutputStyle::Pretty
        } else if self.compact {
            OutputStyle::Compact
        } else {
            default
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct Bsc5Args {
    /// Catalog directory (default: $PROJECT_DIR/bsc5, or ./bsc5)
    #[arg(long)]
    pub base_dir: Option<Utf8PathBuf>,

    /// Binary catalog (default: <base-dir>/BSC5ra.bsc5)
    #[arg(long)]
    pub catalog: Option<Utf8PathBuf>,

    /// Notes file (default: <base-dir>/ybsc5.notes)
    #[arg(long)]
    pub notes: Option<Utf8PathBuf>,

    /// Names file (default: <base-dir>/ybsc5.names)
    #[arg(long)]
    pub names: Option<Utf8PathBuf>,

    /// Output JSON file
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,

    #[command(flatten)]
    pub style: StyleArgs,
}

impl Bsc5Args {
    pub fn into_config(self, variant: Bsc5Variant, env_paths: &CatalogPaths) -> Bsc5Config {
        let paths = self
            .base_dir
            .map(CatalogPaths::from_base)
            .unwrap_or_else(|| env_paths.clone());
        let defaults = Bsc5Config::new(variant, &paths);

        Bsc5Config {
            variant,
            catalog: self.catalog.unwrap_or(defaults.catalog),
            notes: self.notes.unwrap_or(defaults.notes),
            names: self.names.unwrap_or(defaults.names),
            output: self.output.unwrap_or(defaults.output),
            style: self.style.resolve(defaults.style),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct NgcArgs {
    /// NGC 2000.0 data file (default: <base-dir>/ngc2000.dat)
    pub input: Option<Utf8PathBuf>,

    /// Output JSON file (default: <base-dir>/ngc2000.json)
    pub output: Option<Utf8PathBuf>,

    /// Catalog directory (default: $PROJECT_DIR/bsc5, or ./bsc5)
    #[arg(long)]
    pub base_dir: Option<Utf8PathBuf>,

    /// Object types to include: Gx OC Gb Nb Pl C+N Ast Kt *** D* * ? - PD
    #[arg(long, num_args = 1..)]
    pub types: Vec<NgcObjectType>,

    /// Keep objects with a magnitude at or above this value
    #[arg(long)]
    pub max_magnitude: Option<f64>,

    /// Predefined selection: all, deep-sky, bright, minimal
    #[arg(long)]
    pub preset: Option<NgcPreset>,

    #[command(flatten)]
    pub style: StyleArgs,
}

impl NgcArgs {
    pub fn into_config(self, env_paths: &CatalogPaths) -> NgcConfig {
        let paths = self
            .base_dir
            .map(CatalogPaths::from_base)
            .unwrap_or_else(|| env_paths.clone());
        let filter = NgcFilter::resolve(self.preset, self.types, self.max_magnitude);
        let defaults = NgcConfig::new(&paths, filter);

        NgcConfig {
            input: self.input.unwrap_or(defaults.input),
            output: self.output.unwrap_or(defaults.output),
            style: self.style.resolve(defaults.style),
            filter: defaults.filter,
        }
    }
}
