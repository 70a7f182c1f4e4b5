//! Fixed-width reader for the NGC 2000.0 catalog (`ngc2000.dat`).
//!
//! Columns used (1-based, inclusive):
//!
//! | Columns | Field                        |
//! |---------|------------------------------|
//! | 1–5     | NGC number, or `I` + IC number |
//! | 7–9     | object type                  |
//! | 11–12   | RA hours                     |
//! | 14–17   | RA minutes                   |
//! | 20      | Dec sign                     |
//! | 21–22   | Dec degrees                  |
//! | 24–25   | Dec arcminutes               |
//! | 30–32   | constellation                |
//! | 34–38   | largest dimension (arcmin)   |
//! | 41–44   | integrated magnitude         |
//!
//! Columns are counted in characters. Lines shorter than 99 columns are read as
//! if padded with spaces, and a numeric column that does not parse is absent.

use std::{io::Read, ops::Range};

use camino::Utf8Path;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{constants::Degree, skycat_errors::SkycatError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseNgcError {
    #[error("The line has no object name")]
    MissingName,
}

/// One parsed catalog line. Absent and empty fields are left out of the JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NgcObject {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ra_deg: Option<Degree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dec_deg: Option<Degree>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constellation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_arcmin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
}

/// Trimmed text of a column, empty past the end of the line.
fn column(chars: &[char], range: Range<usize>) -> String {
    let end = range.end.min(chars.len());
    let start = range.start.min(end);
    chars[start..end].iter().collect::<String>().trim().to_string()
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

fn number<T: std::str::FromStr>(text: &str) -> Option<T> {
    text.parse().ok()
}

/// Parse one catalog line.
///
/// Arguments
/// -----------------
/// * `line` – A line of `ngc2000.dat`, without its line terminator.
///
/// Return
/// ----------
/// * The parsed object, or [`ParseNgcError::MissingName`] for a line with blank
///   name columns.
pub fn parse_ngc_line(line: &str) -> Result<NgcObject, ParseNgcError> {
    let chars: Vec<char> = line.chars().collect();

    let name = column(&chars, 0..5);
    if name.is_empty() {
        return Err(ParseNgcError::MissingName);
    }

    let ra_hours: Option<i32> = number(&column(&chars, 10..12));
    let ra_minutes: Option<f64> = number(&column(&chars, 13..17));
    let dec_negative = column(&chars, 19..20) == "-";
    let dec_degrees: Option<i32> = number(&column(&chars, 20..22));
    let dec_minutes: Option<i32> = number(&column(&chars, 23..25));

    let ra_deg = ra_hours
        .zip(ra_minutes)
        .map(|(hours, minutes)| (f64::from(hours) + minutes / 60.0) * 15.0);

    let dec_deg = dec_degrees.zip(dec_minutes).map(|(degrees, minutes)| {
        let value = f64::from(degrees) + f64::from(minutes) / 60.0;
        if dec_negative {
            -value
        } else {
            value
        }
    });

    Ok(NgcObject {
        name,
        object_type: non_empty(column(&chars, 6..9)),
        ra_deg,
        dec_deg,
        constellation: non_empty(column(&chars, 29..32)),
        size_arcmin: number(&column(&chars, 33..38)),
        magnitude: number(&column(&chars, 40..44)),
    })
}

/// Decode catalog bytes, dropping undecodable sequences.
fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace(char::REPLACEMENT_CHARACTER, "")
}

/// Parse every line of a catalog stream.
///
/// Blank-name lines are logged at debug level and skipped. Returned objects keep
/// the file order.
pub fn read_ngc<R: Read>(mut reader: R) -> Result<Vec<NgcObject>, SkycatError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = decode_text(&bytes);

    let mut objects = Vec::new();
    for (line_number, line) in text.lines().enumerate() {
        match parse_ngc_line(line) {
            Ok(object) => objects.push(object),
            Err(ParseNgcError::MissingName) => {
                debug!("Line {} has no object name, skipped", line_number + 1)
            }
        }
    }
    Ok(objects)
}

/// Open and parse the catalog at `path`.
pub fn read_ngc_file(path: &Utf8Path) -> Result<Vec<NgcObject>, SkycatError> {
    if !path.exists() {
        return Err(SkycatError::MissingSourceFile(path.to_path_buf()));
    }
    let objects = read_ngc(std::fs::File::open(path)?)?;
    info!("Parsed {} NGC/IC objects from {path}", objects.len());
    Ok(objects)
}

#[cfg(test)]
mod ngc_reader_test {
    use approx::assert_relative_eq;

    use super::*;

    const M31: &str =
        "  224 Gx  00 42.7  +41 16 s  And  180.   3.5p !!!eB,vvL,vmE,Andromeda Galaxy = M31";
    const SOUTHERN: &str = "I2391 Pl  07 25.8  -32 35 s  Pup   0.2  11.9  pB,pS";

    #[test]
    fn test_parse_full_line() {
        let object = parse_ngc_line(M31).unwrap();

        assert_eq!(object.name, "224");
        assert_eq!(object.object_type.as_deref(), Some("Gx"));
        assert_relative_eq!(object.ra_deg.unwrap(), (0.0 + 42.7 / 60.0) * 15.0);
        assert_relative_eq!(object.dec_deg.unwrap(), 41.0 + 16.0 / 60.0);
        assert_eq!(object.constellation.as_deref(), Some("And"));
        assert_eq!(object.size_arcmin, Some(180.0));
        assert_eq!(object.magnitude, Some(3.5));
    }

    #[test]
    fn test_negative_declination() {
        let object = parse_ngc_line(SOUTHERN).unwrap();
        assert_eq!(object.name, "I2391");
        assert_relative_eq!(object.dec_deg.unwrap(), -(32.0 + 35.0 / 60.0));
        assert_relative_eq!(object.ra_deg.unwrap(), (7.0 + 25.8 / 60.0) * 15.0);
        assert_eq!(object.magnitude, Some(11.9));
    }

    #[test]
    fn test_short_line_and_absent_fields() {
        let object = parse_ngc_line(" 5000 Gx  13 09.8  +28 54 s  Com").unwrap();
        assert_eq!(object.constellation.as_deref(), Some("Com"));
        assert_eq!(object.size_arcmin, None);
        assert_eq!(object.magnitude, None);

        let object = parse_ngc_line("  12       xx 1x.0").unwrap();
        assert_eq!(object.name, "12");
        assert_eq!(object.object_type, None);
        assert_eq!(object.ra_deg, None);
        assert_eq!(object.dec_deg, None);

        assert_eq!(
            serde_json::to_value(&object).unwrap(),
            serde_json::json!({"name": "12"})
        );
    }

    #[test]
    fn test_missing_name() {
        assert_eq!(
            parse_ngc_line("      Gx  00 42.7"),
            Err(ParseNgcError::MissingName)
        );
        assert_eq!(parse_ngc_line(""), Err(ParseNgcError::MissingName));
    }

    #[test]
    fn test_control_characters_kept_in_name() {
        let object = parse_ngc_line(" 70\u{7}0 Gx  20 58.8").unwrap();
        assert_eq!(object.name, "70\u{7}0");
        assert_eq!(object.object_type.as_deref(), Some("Gx"));
    }

    #[test]
    fn test_read_stream() {
        let mut raw = Vec::new();
        raw.extend_from_slice(M31.as_bytes());
        raw.extend_from_slice(b"\r\n\n");
        // undecodable bytes are dropped before slicing
        raw.extend_from_slice(b" \xFF7000 Nb  20 58.8  +44 20 s  Cyg  120.   4.0  !!! vF,eL");
        raw.push(b'\n');

        let objects = read_ngc(raw.as_slice()).unwrap();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].name, "224");
        assert_eq!(objects[1].name, "7000");
        assert_eq!(objects[1].object_type.as_deref(), Some("Nb"));
    }

    #[test]
    fn test_json_field_names() {
        let value = serde_json::to_value(parse_ngc_line(SOUTHERN).unwrap()).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert!(keys.contains(&"type".to_string()));
        assert!(keys.contains(&"size_arcmin".to_string()));
    }
}
