use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkycatError {
    #[error("Invalid catalog format: {0}")]
    FormatError(String),

    #[error("Required source file not found: {0}")]
    MissingSourceFile(Utf8PathBuf),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unable to serialize JSON output: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown NGC object type: {0}")]
    UnknownObjectType(String),

    #[error("Unknown NGC filter preset: {0}")]
    UnknownPreset(String),
}

impl PartialEq for SkycatError {
    fn eq(&self, other: &Self) -> bool {
        use SkycatError::*;
        match (self, other) {
            (FormatError(a), FormatError(b)) => a == b,
            (MissingSourceFile(a), MissingSourceFile(b)) => a == b,

            // wrapped errors are not comparable, same variant is enough
            (IoError(_), IoError(_)) => true,
            (JsonError(_), JsonError(_)) => true,

            (UnknownObjectType(a), UnknownObjectType(b)) => a == b,
            (UnknownPreset(a), UnknownPreset(b)) => a == b,

            _ => false,
        }
    }
}
