//! Record layout derived once per catalog from its header.
//!
//! The BSC5 entry format has no per-record tags: which fields exist, and how
//! wide they are, is entirely decided by `STNUM`, `MPROP` and `NMAG`. This module
//! turns those header values into a [`RecordSchema`] value that the decoder
//! consults instead of the header, so that decoding only ever branches on the
//! schema and never on record content.
//!
//! Entry layout, in order:
//!
//! ```text
//! [XNO  4]  STNUM >= 0  (Integer*4 if STNUM == 4, Real*4 otherwise)
//!  SRA0 8   always       Real*8, radians
//!  SDEC0 8  always       Real*8, radians
//!  IS   2   always       Character*2
//! [MAG  2] x |NMAG|      Integer*2, magnitude * 100
//! [XRPM 4, XDPM 4]       MPROP >= 1, Real*4
//! [SVEL 8]               MPROP == 2, Real*8
//! [NAME -STNUM]          STNUM < 0, Character*(-STNUM)
//! ```

use crate::{
    bsc5::bsc5_header::CatalogHeader,
    constants::{
        COORDINATE_WIDTH, IDENTIFIER_WIDTH, INTEGER_IDENTIFIER_FORMAT, MAGNITUDE_WIDTH,
        PROPER_MOTION_WIDTH, RADIAL_VELOCITY_WIDTH, SPECTRAL_TYPE_WIDTH,
    },
    skycat_errors::SkycatError,
};

/// How the catalog number (XNO) is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierField {
    /// `Integer*4`, `STNUM == 4`
    Integer,
    /// `Real*4`, any other non-negative `STNUM`
    Real,
    /// No number; entries end with an object name of `name_length` bytes and the
    /// star number is taken from the entry position.
    Absent { name_length: usize },
}

/// Which motion fields follow the magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProperMotionLayout {
    None,
    RaDec,
    RaDecRadialVelocity,
}

impl ProperMotionLayout {
    fn from_flag(mprop: i32) -> Self {
        match mprop {
            2 => ProperMotionLayout::RaDecRadialVelocity,
            flag if flag >= 1 => ProperMotionLayout::RaDec,
            _ => ProperMotionLayout::None,
        }
    }

    pub fn has_proper_motion(&self) -> bool {
        !matches!(self, ProperMotionLayout::None)
    }

    pub fn has_radial_velocity(&self) -> bool {
        matches!(self, ProperMotionLayout::RaDecRadialVelocity)
    }
}

/// Field layout shared by every entry of one catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
    pub identifier: IdentifierField,
    pub magnitude_count: usize,
    pub proper_motion: ProperMotionLayout,
    /// `NBENT`
    pub record_width: usize,
    /// `STAR1`, origin of the positional numbering when XNO is absent
    pub first_identifier: i32,
}

impl RecordSchema {
    /// Derive the schema from a validated header.
    ///
    /// Return
    /// ----------
    /// * The schema, or [`SkycatError::FormatError`] when `NBENT` cannot even hold
    ///   the mandatory fields (number, coordinates, spectral type). Optional
    ///   fields that overflow the entry are tolerated and decoded as absent.
    pub fn from_header(header: &CatalogHeader) -> Result<Self, SkycatError> {
        if header.bytes_per_record <= 0 {
            return Err(SkycatError::FormatError(format!(
                "Invalid number of bytes per entry: {}",
                header.bytes_per_record
            )));
        }

        let identifier = match header.identifier_format {
            INTEGER_IDENTIFIER_FORMAT => IdentifierField::Integer,
            format if format >= 0 => IdentifierField::Real,
            format => IdentifierField::Absent {
                name_length: format.unsigned_abs() as usize,
            },
        };

        let schema = RecordSchema {
            identifier,
            magnitude_count: header.magnitude_count(),
            proper_motion: ProperMotionLayout::from_flag(header.proper_motion_flag),
            record_width: header.record_width(),
            first_identifier: header.first_identifier,
        };

        if schema.mandatory_width() > schema.record_width {
            return Err(SkycatError::FormatError(format!(
                "Entries of {} bytes cannot hold the {} bytes of mandatory fields",
                schema.record_width,
                schema.mandatory_width()
            )));
        }

        Ok(schema)
    }

    pub fn has_identifier_field(&self) -> bool {
        !matches!(self.identifier, IdentifierField::Absent { .. })
    }

    /// Bytes taken by the fields every entry must carry.
    pub fn mandatory_width(&self) -> usize {
        let identifier = if self.has_identifier_field() {
            IDENTIFIER_WIDTH
        } else {
            0
        };
        identifier + 2 * COORDINATE_WIDTH + SPECTRAL_TYPE_WIDTH
    }

    /// Bytes taken by all fields the header declares, optional ones included.
    pub fn layout_width(&self) -> usize {
        let mut width = self.mandatory_width() + self.magnitude_count * MAGNITUDE_WIDTH;
        if self.proper_motion.has_proper_motion() {
            width += 2 * PROPER_MOTION_WIDTH;
        }
        if self.proper_motion.has_radial_velocity() {
            width += RADIAL_VELOCITY_WIDTH;
        }
        if let IdentifierField::Absent { name_length } = self.identifier {
            width += name_length;
        }
        width
    }
}
