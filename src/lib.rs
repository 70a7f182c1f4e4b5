pub mod annotations;
pub mod bsc5;
pub mod constants;
pub mod emit;
pub mod env_state;
pub mod ngc;
pub mod skycat_errors;

pub use bsc5::{run_bsc5, Bsc5Variant};
pub use emit::{ConversionSummary, OutputStyle};
pub use ngc::run_ngc;
pub use skycat_errors::SkycatError;
