//! JSON writer shared by every pipeline.

use std::{
    fs::File,
    io::{BufWriter, Write},
};

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::skycat_errors::SkycatError;

/// Layout of the emitted JSON text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    /// Two-space indentation, one value per line
    #[default]
    Pretty,
    /// No insignificant whitespace
    Compact,
}

/// Outcome of one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Number of stars or objects written
    pub entries: usize,
    pub output: Utf8PathBuf,
    pub bytes_written: u64,
}

/// Serialize `value` into `writer` with the given layout.
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(
    writer: W,
    value: &T,
    style: OutputStyle,
) -> Result<(), SkycatError> {
    match style {
        OutputStyle::Pretty => serde_json::to_writer_pretty(writer, value)?,
        OutputStyle::Compact => serde_json::to_writer(writer, value)?,
    }
    Ok(())
}

pub fn to_json_string<T: Serialize + ?Sized>(
    value: &T,
    style: OutputStyle,
) -> Result<String, SkycatError> {
    let mut buffer = Vec::new();
    write_json_to(&mut buffer, value, style)?;
    // serde_json only ever writes UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Write `value` to `path`, replacing any existing file.
///
/// Return
/// ----------
/// * The size of the written file in bytes.
pub fn write_json<T: Serialize + ?Sized>(
    value: &T,
    path: &Utf8Path,
    style: OutputStyle,
) -> Result<u64, SkycatError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    write_json_to(&mut writer, value, style)?;
    writer.flush()?;
    drop(writer);

    Ok(std::fs::metadata(path)?.len())
}
