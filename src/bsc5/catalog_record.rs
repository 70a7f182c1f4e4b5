//! Decoding and encoding of one BSC5 star entry.
//!
//! An entry is decoded from exactly `NBENT` bytes following the
//! [`RecordSchema`] of its file. Mandatory fields are guaranteed to fit by
//! [`RecordSchema::from_header`]; optional fields (magnitudes, motion, name)
//! that do not fit in what is left of the entry are decoded as absent rather
//! than failing the whole catalog.
//!
//! All numbers are big-endian.

use nom::{
    bytes::complete::take,
    number::complete::{be_f32, be_f64, be_i16, be_i32},
    IResult,
};

use crate::{
    bsc5::record_schema::{IdentifierField, RecordSchema},
    constants::{Radian, StarId, MAGNITUDE_SCALE, SPECTRAL_TYPE_WIDTH},
    skycat_errors::SkycatError,
};

/// Catalog number of an entry, as stored or as assigned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StarNumber {
    /// `Integer*4` XNO
    Integer(i32),
    /// `Real*4` XNO
    Real(f32),
    /// No XNO in the file: `STAR1 + entry index`
    Sequence(i64),
}

impl StarNumber {
    pub fn value(&self) -> f64 {
        match *self {
            StarNumber::Integer(n) => f64::from(n),
            StarNumber::Real(x) => f64::from(x),
            StarNumber::Sequence(n) => n as f64,
        }
    }

    /// Nearest integer designation, used as lookup key. Halves round to even.
    pub fn rounded(&self) -> StarId {
        match *self {
            StarNumber::Integer(n) => StarId::from(n),
            StarNumber::Real(x) => f64::from(x).round_ties_even() as StarId,
            StarNumber::Sequence(n) => n,
        }
    }
}

/// One decoded star entry.
///
/// Text fields are kept as raw bytes so that an entry encodes back to the exact
/// bytes it was read from; use [`CatalogRecord::spectral_type`] and
/// [`CatalogRecord::object_name`] for their decoded form.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    pub number: StarNumber,
    pub right_ascension_rad: Radian,
    pub declination_rad: Radian,
    pub spectral_type_raw: [u8; SPECTRAL_TYPE_WIDTH],
    /// Magnitudes in hundredths, at most `|NMAG|` of them
    pub magnitudes: Vec<i16>,
    pub ra_proper_motion: Option<f32>,
    pub dec_proper_motion: Option<f32>,
    pub radial_velocity: Option<f64>,
    pub object_name_raw: Option<Vec<u8>>,
    /// Bytes left in the entry after the last decoded field
    pub padding: Vec<u8>,
}

/// Run `field` on `input`, keeping `input` untouched when it does not fit.
fn optional_field<'a, O>(
    input: &'a [u8],
    mut field: impl FnMut(&'a [u8]) -> IResult<&'a [u8], O>,
) -> (&'a [u8], Option<O>) {
    match field(input) {
        Ok((rest, value)) => (rest, Some(value)),
        Err(_) => (input, None),
    }
}

/// ASCII decoding where every non-ASCII byte becomes U+FFFD.
fn ascii_lossy(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '\u{FFFD}' })
        .collect()
}

impl CatalogRecord {
    /// Parse one entry with `schema`.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: The entry bytes, normally exactly `NBENT` of them.
    /// * `schema`: Layout of the file the entry comes from.
    /// * `index`: 0-based entry position, used for the star number when the file
    ///   has no XNO field.
    ///
    /// Return
    /// ----------
    /// * `(remaining, record)`. Fails only when the mandatory fields are missing.
    pub fn parse<'a>(
        input: &'a [u8],
        schema: &RecordSchema,
        index: usize,
    ) -> IResult<&'a [u8], Self> {
        let (input, number) = match schema.identifier {
            IdentifierField::Integer => {
                let (input, xno) = be_i32(input)?;
                (input, StarNumber::Integer(xno))
            }
            IdentifierField::Real => {
                let (input, xno) = be_f32(input)?;
                (input, StarNumber::Real(xno))
            }
            IdentifierField::Absent { .. } => (
                input,
                StarNumber::Sequence(i64::from(schema.first_identifier) + index as i64),
            ),
        };

        let (input, sra0) = be_f64(input)?;
        let (input, sdec0) = be_f64(input)?;
        let (mut input, is) = take(SPECTRAL_TYPE_WIDTH)(input)?;

        // |NMAG| comes from the file: grow with what the entry really holds
        let mut magnitudes = Vec::new();
        for _ in 0..schema.magnitude_count {
            match optional_field(input, be_i16) {
                (rest, Some(mag)) => {
                    magnitudes.push(mag);
                    input = rest;
                }
                (_, None) => break,
            }
        }

        let (mut ra_proper_motion, mut dec_proper_motion) = (None, None);
        if schema.proper_motion.has_proper_motion() {
            (input, ra_proper_motion) = optional_field(input, be_f32);
            (input, dec_proper_motion) = optional_field(input, be_f32);
        }

        let mut radial_velocity = None;
        if schema.proper_motion.has_radial_velocity() {
            (input, radial_velocity) = optional_field(input, be_f64);
        }

        let mut object_name_raw = None;
        if let IdentifierField::Absent { name_length } = schema.identifier {
            if input.len() >= name_length {
                let (name, rest) = input.split_at(name_length);
                object_name_raw = Some(name.to_vec());
                input = rest;
            }
        }

        let mut spectral_type_raw = [0u8; SPECTRAL_TYPE_WIDTH];
        spectral_type_raw.copy_from_slice(is);
        let (padding, input) = input.split_at(input.len());

        Ok((
            input,
            CatalogRecord {
                number,
                right_ascension_rad: sra0,
                declination_rad: sdec0,
                spectral_type_raw,
                magnitudes,
                ra_proper_motion,
                dec_proper_motion,
                radial_velocity,
                object_name_raw,
                padding: padding.to_vec(),
            },
        ))
    }

    /// Decode one entry, mapping parser failures to [`SkycatError::FormatError`].
    pub fn decode(input: &[u8], schema: &RecordSchema, index: usize) -> Result<Self, SkycatError> {
        Self::parse(input, schema, index)
            .map(|(_, record)| record)
            .map_err(|e| SkycatError::FormatError(format!("Unreadable entry {}: {e}", index + 1)))
    }

    /// Encode the entry with `schema`, followed by its padding and zero-filled
    /// up to `NBENT` bytes.
    ///
    /// Fields absent from the record are not written; positional star numbers
    /// are never written since the file has no XNO field for them.
    pub fn to_bytes(&self, schema: &RecordSchema) -> Vec<u8> {
        let mut bytes = Vec::new();

        match self.number {
            StarNumber::Integer(n) => bytes.extend_from_slice(&n.to_be_bytes()),
            StarNumber::Real(x) => bytes.extend_from_slice(&x.to_be_bytes()),
            StarNumber::Sequence(_) => {}
        }
        bytes.extend_from_slice(&self.right_ascension_rad.to_be_bytes());
        bytes.extend_from_slice(&self.declination_rad.to_be_bytes());
        bytes.extend_from_slice(&self.spectral_type_raw);
        for mag in &self.magnitudes {
            bytes.extend_from_slice(&mag.to_be_bytes());
        }
        for pm in [self.ra_proper_motion, self.dec_proper_motion]
            .into_iter()
            .flatten()
        {
            bytes.extend_from_slice(&pm.to_be_bytes());
        }
        if let Some(velocity) = self.radial_velocity {
            bytes.extend_from_slice(&velocity.to_be_bytes());
        }
        if let Some(name) = &self.object_name_raw {
            bytes.extend_from_slice(name);
        }
        bytes.extend_from_slice(&self.padding);

        if bytes.len() < schema.record_width {
            bytes.resize(schema.record_width, 0);
        }
        bytes
    }

    pub fn identifier(&self) -> f64 {
        self.number.value()
    }

    pub fn lookup_key(&self) -> StarId {
        self.number.rounded()
    }

    pub fn spectral_type(&self) -> String {
        ascii_lossy(&self.spectral_type_raw)
    }

    pub fn object_name(&self) -> Option<String> {
        self.object_name_raw
            .as_deref()
            .map(|raw| ascii_lossy(raw).trim().to_string())
    }

    /// First magnitude, in hundredths.
    pub fn primary_magnitude(&self) -> Option<i16> {
        self.magnitudes.first().copied()
    }

    /// First magnitude, in magnitudes.
    pub fn primary_magnitude_scaled(&self) -> Option<f64> {
        self.primary_magnitude()
            .map(|mag| f64::from(mag) / MAGNITUDE_SCALE)
    }
}
