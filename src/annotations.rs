//! # BSC5 annotation sources
//!
//! Two line-oriented text files annotate the binary catalog:
//!
//! - **`ybsc5.notes`**: remarks. Only the primary designation lines,
//!   `<HR> 1N: <text>`, are kept, one note per star (a later line replaces an
//!   earlier one).
//! - **`ybsc5.names`**: every line starting with a star number. All lines of a
//!   star are kept, trimmed, in file order and with duplicates, because the join
//!   stage needs to tell the designation line (`1N:`) from the other remarks.
//!
//! Lines that do not match are skipped silently. Invalid UTF-8 is replaced, not
//! rejected.

use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    sync::LazyLock,
};

use camino::Utf8Path;
use itertools::Itertools;
use regex::Regex;
use tracing::info;

use crate::{constants::StarId, skycat_errors::SkycatError};

static NOTE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+) 1N: (.+)$").expect("valid notes regex"));

static NAME_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+) ").expect("valid names regex"));

/// Lines of `reader` without their line terminator, lossily decoded.
fn text_lines<R: BufRead>(reader: R) -> impl Iterator<Item = std::io::Result<String>> {
    reader.split(b'\n').map(|line| {
        line.map(|bytes| {
            let mut text = String::from_utf8_lossy(&bytes).into_owned();
            if text.ends_with('\r') {
                text.pop();
            }
            text
        })
    })
}

/// Parse the notes source into `star number -> note`.
pub fn parse_notes<R: BufRead>(reader: R) -> Result<HashMap<StarId, String>, SkycatError> {
    let mut notes = HashMap::new();
    for line in text_lines(reader) {
        let line = line?;
        let Some(caps) = NOTE_LINE.captures(&line) else {
            continue;
        };
        let Ok(star_id) = caps[1].parse::<StarId>() else {
            continue;
        };
        notes.insert(star_id, caps[2].trim().to_string());
    }
    Ok(notes)
}

/// Parse the names source into `star number -> trimmed lines`.
pub fn parse_names<R: BufRead>(reader: R) -> Result<HashMap<StarId, Vec<String>>, SkycatError> {
    let mut names: HashMap<StarId, Vec<String>> = HashMap::new();
    for line in text_lines(reader) {
        let line = line?;
        let Some(caps) = NAME_LINE.captures(&line) else {
            continue;
        };
        let Ok(star_id) = caps[1].parse::<StarId>() else {
            continue;
        };
        names
            .entry(star_id)
            .or_default()
            .push(line.trim().to_string());
    }
    Ok(names)
}

fn open_source(path: &Utf8Path) -> Result<BufReader<File>, SkycatError> {
    if !path.exists() {
        return Err(SkycatError::MissingSourceFile(path.to_path_buf()));
    }
    Ok(BufReader::new(File::open(path)?))
}

/// Notes and name lines of a catalog, keyed by star number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationIndex {
    pub notes_by_identifier: HashMap<StarId, String>,
    pub name_lines_by_identifier: HashMap<StarId, Vec<String>>,
}

impl AnnotationIndex {
    pub fn from_readers<N: BufRead, M: BufRead>(notes: N, names: M) -> Result<Self, SkycatError> {
        Ok(AnnotationIndex {
            notes_by_identifier: parse_notes(notes)?,
            name_lines_by_identifier: parse_names(names)?,
        })
    }

    /// Load both sources; either file missing is a [`SkycatError::MissingSourceFile`].
    pub fn read_files(notes_path: &Utf8Path, names_path: &Utf8Path) -> Result<Self, SkycatError> {
        let index = Self::from_readers(open_source(notes_path)?, open_source(names_path)?)?;
        info!(
            "Loaded {} notes and names for {} stars",
            index.notes_by_identifier.len(),
            index.name_lines_by_identifier.len()
        );
        Ok(index)
    }

    /// Sorted union of the star numbers found in either source.
    pub fn identifiers(&self) -> Vec<StarId> {
        self.notes_by_identifier
            .keys()
            .chain(self.name_lines_by_identifier.keys())
            .copied()
            .sorted_unstable()
            .dedup()
            .collect()
    }

    pub fn note(&self, star_id: StarId) -> Option<&str> {
        self.notes_by_identifier.get(&star_id).map(String::as_str)
    }

    pub fn name_lines(&self, star_id: StarId) -> &[String] {
        self.name_lines_by_identifier
            .get(&star_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod annotations_test {
    use super::*;

    const NOTES: &str = "\
    15 1N: A bright test star   \n\
    15 2N: Second remark that is ignored\n\
  this line has no number\n\
    16 1N: First note\n\
    16 1N: Replacing note\r\n";

    const NAMES: &str = "\
  15 1N: Alpha Example\n\
  15 Variable star, period 2.3 d\n\
  15 Variable star, period 2.3 d\n\
no number here\n\
30 1N: See HR 1\n\
30 1N: Beta Example\n";

    #[test]
    fn test_parse_notes() {
        let notes = parse_notes(NOTES.as_bytes()).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[&15], "A bright test star");
        assert_eq!(notes[&16], "Replacing note");
    }

    #[test]
    fn test_parse_names_keeps_order_and_duplicates() {
        let names = parse_names(NAMES.as_bytes()).unwrap();
        assert_eq!(
            names[&15],
            vec![
                "15 1N: Alpha Example",
                "15 Variable star, period 2.3 d",
                "15 Variable star, period 2.3 d"
            ]
        );
        assert_eq!(names[&30], vec!["30 1N: See HR 1", "30 1N: Beta Example"]);
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let raw = b"42 1N: Caf\xE9 star\n";
        let notes = parse_notes(&raw[..]).unwrap();
        assert_eq!(notes[&42], "Caf\u{FFFD} star");
    }

    #[test]
    fn test_sorted_identifier_union() {
        let index = AnnotationIndex::from_readers(
            "40 1N: Only a note\n15 1N: Both\n".as_bytes(),
            "30 1N: Name\n15 1N: Both\n".as_bytes(),
        )
        .unwrap();
        assert_eq!(index.identifiers(), vec![15, 30, 40]);
        assert_eq!(index.note(40), Some("Only a note"));
        assert!(index.name_lines(40).is_empty());
    }

    #[test]
    fn test_missing_source_file() {
        let dir = tempfile::tempdir().unwrap();
        let names = camino::Utf8PathBuf::from_path_buf(dir.path().join("ybsc5.names")).unwrap();
        std::fs::write(&names, "1 1N: Name\n").unwrap();
        let notes = names.with_file_name("ybsc5.notes");

        assert_eq!(
            AnnotationIndex::read_files(&notes, &names).unwrap_err(),
            SkycatError::MissingSourceFile(notes.clone())
        );
    }
}
