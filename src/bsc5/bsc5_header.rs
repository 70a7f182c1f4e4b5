//! BSC5 binary header parsing utilities.
//!
//! Every BSC5-format catalog (`BSC5`, `BSC5ra`, `SAO`-style files produced by the
//! same Fortran writer) starts with a fixed **28-byte** header made of seven
//! big-endian `Integer*4` values. The header describes the layout of every star
//! entry that follows; nothing in the records themselves is self-describing.
//!
//! # What the header contains
//!
//! * **`STAR0`**: subtract from a star number to get its sequence number.
//! * **`STAR1`**: first star number in the file.
//! * **`STARN`**: number of stars; a negative value means J2000 coordinates.
//! * **`STNUM`**: star number format. Negative: no number, an object name of
//!   `-STNUM` characters closes each entry. `4`: `Integer*4` number. Any other
//!   non-negative value: `Real*4` number.
//! * **`MPROP`**: `0` no proper motion, `1` proper motion, `2` proper motion and
//!   radial velocity.
//! * **`NMAG`**: number of magnitudes; negative also means J2000.
//! * **`NBENT`**: number of bytes per star entry.
//!
//! # Example
//!
//! ```rust
//! use skycat::bsc5::bsc5_header::CatalogHeader;
//!
//! let header = CatalogHeader {
//!     sequence_offset: 0,
//!     first_identifier: 1,
//!     record_count_signed: -9110,
//!     identifier_format: 1,
//!     proper_motion_flag: 1,
//!     magnitude_count_signed: 1,
//!     bytes_per_record: 32,
//! };
//! let parsed = CatalogHeader::from_bytes(&header.to_bytes()).unwrap();
//! assert_eq!(parsed.record_count(), 9110);
//! assert!(parsed.is_j2000());
//! ```
//!
//! # See also
//! ------------
//! * [`crate::bsc5::record_schema::RecordSchema`] – Field layout derived from this header.
//! * [`crate::bsc5::catalog_record::CatalogRecord`] – Star entry decoded with that layout.

use std::{fmt, io::Read};

use nom::{number::complete::be_i32, IResult};

use crate::{constants::HEADER_SIZE, skycat_errors::SkycatError};

/// Coordinate reference frame of a catalog, reported but never converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Epoch {
    B1950,
    J2000,
}

impl Epoch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Epoch::B1950 => "B1950",
            Epoch::J2000 => "J2000",
        }
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-memory representation of the 28-byte BSC5 header.
///
/// The signed values are kept exactly as stored: the signs of `STARN` and
/// `NMAG` carry the epoch, see [`CatalogHeader::is_j2000`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CatalogHeader {
    /// `STAR0`
    pub sequence_offset: i32,
    /// `STAR1`
    pub first_identifier: i32,
    /// `STARN`
    pub record_count_signed: i32,
    /// `STNUM`
    pub identifier_format: i32,
    /// `MPROP`
    pub proper_motion_flag: i32,
    /// `NMAG`
    pub magnitude_count_signed: i32,
    /// `NBENT`
    pub bytes_per_record: i32,
}

impl CatalogHeader {
    /// Decode the seven big-endian integers of the header.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: A byte slice starting at the beginning of the catalog.
    ///
    /// Return
    /// ----------
    /// * An [`IResult`] whose value is `(remaining, header)`. No validation is
    ///   performed here, see [`Self::from_bytes`].
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, star0) = be_i32(input)?;
        let (input, star1) = be_i32(input)?;
        let (input, starn) = be_i32(input)?;
        let (input, stnum) = be_i32(input)?;
        let (input, mprop) = be_i32(input)?;
        let (input, nmag) = be_i32(input)?;
        let (input, nbent) = be_i32(input)?;
        Ok((
            input,
            CatalogHeader {
                sequence_offset: star0,
                first_identifier: star1,
                record_count_signed: starn,
                identifier_format: stnum,
                proper_motion_flag: mprop,
                magnitude_count_signed: nmag,
                bytes_per_record: nbent,
            },
        ))
    }

    /// Decode and validate a header from its raw bytes.
    ///
    /// Return
    /// ----------
    /// * The header, or [`SkycatError::FormatError`] when fewer than 28 bytes are
    ///   available or when `NBENT` is not strictly positive.
    pub fn from_bytes(input: &[u8]) -> Result<Self, SkycatError> {
        if input.len() < HEADER_SIZE {
            return Err(SkycatError::FormatError(format!(
                "Invalid header size: {} bytes",
                input.len()
            )));
        }

        let (_, header) = Self::parse(input)
            .map_err(|e| SkycatError::FormatError(format!("Unreadable header: {e}")))?;

        if header.bytes_per_record <= 0 {
            return Err(SkycatError::FormatError(format!(
                "Invalid number of bytes per entry: {}",
                header.bytes_per_record
            )));
        }

        Ok(header)
    }

    /// Read exactly [`HEADER_SIZE`] bytes from `reader` and decode them.
    ///
    /// A short read is fatal, there is no partial-header recovery.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, SkycatError> {
        let mut buffer = Vec::with_capacity(HEADER_SIZE);
        reader
            .by_ref()
            .take(HEADER_SIZE as u64)
            .read_to_end(&mut buffer)?;
        Self::from_bytes(&buffer)
    }

    /// Encode the header back into its on-disk representation.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        let fields = [
            self.sequence_offset,
            self.first_identifier,
            self.record_count_signed,
            self.identifier_format,
            self.proper_motion_flag,
            self.magnitude_count_signed,
            self.bytes_per_record,
        ];
        for (chunk, value) in bytes.chunks_exact_mut(4).zip(fields) {
            chunk.copy_from_slice(&value.to_be_bytes());
        }
        bytes
    }

    /// Number of star entries, `|STARN|`.
    pub fn record_count(&self) -> usize {
        self.record_count_signed.unsigned_abs() as usize
    }

    /// Number of magnitudes per entry, `|NMAG|`.
    pub fn magnitude_count(&self) -> usize {
        self.magnitude_count_signed.unsigned_abs() as usize
    }

    /// Record width in bytes. Only meaningful on a validated header.
    pub fn record_width(&self) -> usize {
        self.bytes_per_record.max(0) as usize
    }

    pub fn is_j2000(&self) -> bool {
        self.record_count_signed < 0 || self.magnitude_count_signed < 0
    }

    pub fn epoch(&self) -> Epoch {
        if self.is_j2000() {
            Epoch::J2000
        } else {
            Epoch::B1950
        }
    }

    pub fn has_proper_motion(&self) -> bool {
        self.proper_motion_flag != 0
    }
}

impl fmt::Display for CatalogHeader {
    /// Render a fixed-width table summarizing the header fields.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABEL_WIDTH: usize = 18;
        const VALUE_WIDTH: usize = 40;

        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = LABEL_WIDTH + 1,
            value = VALUE_WIDTH + 1
        );

        let rows = [
            ("Stars", self.record_count().to_string()),
            ("Coordinate system", self.epoch().to_string()),
            ("Bytes per entry", self.bytes_per_record.to_string()),
            ("Magnitudes", self.magnitude_count().to_string()),
            ("Proper motion", self.proper_motion_flag.to_string()),
            ("Star ID format", self.identifier_format.to_string()),
        ];

        writeln!(f, "{border}")?;
        writeln!(
            f,
            "| {:<label$}| {:<value$}|",
            "BSC5 Header",
            "",
            label = LABEL_WIDTH,
            value = VALUE_WIDTH
        )?;
        writeln!(f, "{border}")?;
        for (label, value) in rows {
            writeln!(
                f,
                "| {:<label$}| {:<value$}|",
                label,
                value,
                label = LABEL_WIDTH,
                value = VALUE_WIDTH
            )?;
        }
        writeln!(f, "{border}")
    }
}

#[cfg(test)]
mod bsc5_header_test {
    use super::*;

    fn header_bytes(values: [i32; 7]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_be_bytes()).collect()
    }

    #[test]
    fn test_parse_reference_header() {
        let bytes = header_bytes([0, 1, 9110, 1, 1, 1, 32]);
        let header = CatalogHeader::from_bytes(&bytes).unwrap();

        assert_eq!(header.sequence_offset, 0);
        assert_eq!(header.first_identifier, 1);
        assert_eq!(header.record_count(), 9110);
        assert_eq!(header.identifier_format, 1);
        assert_eq!(header.proper_motion_flag, 1);
        assert_eq!(header.magnitude_count(), 1);
        assert_eq!(header.record_width(), 32);
        assert_eq!(header.epoch(), Epoch::B1950);
    }

    #[test]
    fn test_epoch_from_signs() {
        for (starn, nmag, j2000) in [
            (9110, 1, false),
            (-9110, 1, true),
            (9110, -1, true),
            (-9110, -1, true),
        ] {
            let header =
                CatalogHeader::from_bytes(&header_bytes([0, 1, starn, 4, 0, nmag, 32])).unwrap();
            assert_eq!(header.is_j2000(), j2000, "STARN={starn} NMAG={nmag}");
            assert_eq!(header.record_count(), 9110);
            assert_eq!(header.magnitude_count(), 1);
        }
    }

    #[test]
    fn test_short_header_is_fatal() {
        let bytes = header_bytes([0, 1, 9110, 1, 1, 1, 32]);
        let err = CatalogHeader::from_bytes(&bytes[..20]).unwrap_err();
        assert_eq!(
            err,
            SkycatError::FormatError("Invalid header size: 20 bytes".into())
        );

        let mut reader = &bytes[..27];
        assert!(matches!(
            CatalogHeader::read_from(&mut reader),
            Err(SkycatError::FormatError(_))
        ));
    }

    #[test]
    fn test_non_positive_entry_size_is_fatal() {
        for nbent in [0, -32] {
            let err =
                CatalogHeader::from_bytes(&header_bytes([0, 1, 10, 1, 1, 1, nbent])).unwrap_err();
            assert_eq!(
                err,
                SkycatError::FormatError(format!("Invalid number of bytes per entry: {nbent}"))
            );
        }
    }

    #[test]
    fn test_read_from_advances_stream() {
        let mut bytes = header_bytes([0, 1, 2, 4, 0, 1, 24]);
        bytes.extend_from_slice(&[0xAB; 4]);
        let mut reader = bytes.as_slice();

        let header = CatalogHeader::read_from(&mut reader).unwrap();
        assert_eq!(header.record_count(), 2);
        assert_eq!(reader, &[0xAB; 4]);
    }

    #[test]
    fn test_to_bytes_inverse_of_parse() {
        let bytes = header_bytes([-7, 1, -9110, -12, 2, -3, 50]);
        let header = CatalogHeader::from_bytes(&bytes).unwrap();
        assert_eq!(header.to_bytes().to_vec(), bytes);
    }

    #[test]
    fn test_display_header() {
        let header = CatalogHeader {
            sequence_offset: 0,
            first_identifier: 1,
            record_count_signed: -9110,
            identifier_format: 1,
            proper_motion_flag: 1,
            magnitude_count_signed: 1,
            bytes_per_record: 32,
        };

        let expected = r#"+-------------------+-----------------------------------------+
| BSC5 Header       |                                         |
+-------------------+-----------------------------------------+
| Stars             | 9110                                    |
| Coordinate system | J2000                                   |
| Bytes per entry   | 32                                      |
| Magnitudes        | 1                                       |
| Proper motion     | 1                                       |
| Star ID format    | 1                                       |
+-------------------+-----------------------------------------+
"#;
        assert_eq!(format!("{header}"), expected);
    }
}
