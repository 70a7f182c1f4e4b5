//! Sequential reader for a complete BSC5 catalog.
//!
//! The header is read once, turned into a [`RecordSchema`], and the entries are
//! then read one `NBENT`-sized block at a time. The catalog is small (a few
//! thousand entries) and is fully materialized.
//!
//! A block shorter than `NBENT` can only happen at end of file: the reader logs
//! a warning, keeps every entry decoded so far and stops reading.

use std::{fs::File, io::Read};

use camino::Utf8Path;
use tracing::{info, warn};

use crate::{
    bsc5::{bsc5_header::CatalogHeader, catalog_record::CatalogRecord, record_schema::RecordSchema},
    skycat_errors::SkycatError,
};

/// A decoded catalog: header, derived schema and entries in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Bsc5Catalog {
    pub header: CatalogHeader,
    pub schema: RecordSchema,
    pub records: Vec<CatalogRecord>,
    /// 0-based index of the first entry that could not be read in full, if the
    /// file ended before `|STARN|` entries.
    pub truncated_at: Option<usize>,
}

/// Read up to `len` bytes, returning fewer only at end of stream.
fn read_block<R: Read>(reader: &mut R, len: usize) -> std::io::Result<Vec<u8>> {
    let mut block = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut block)?;
    Ok(block)
}

impl Bsc5Catalog {
    /// Decode a catalog from any byte stream.
    ///
    /// Return
    /// ----------
    /// * The catalog, or a [`SkycatError::FormatError`] for an invalid header.
    ///   A truncated entry list is not an error, see [`Bsc5Catalog::truncated_at`].
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, SkycatError> {
        let header = CatalogHeader::read_from(&mut reader)?;
        let schema = RecordSchema::from_header(&header)?;
        info!("BSC5 header\n{header}");

        // |STARN| is only a promise: the stream may end long before it
        let mut records = Vec::new();
        let mut truncated_at = None;

        for index in 0..header.record_count() {
            let block = read_block(&mut reader, schema.record_width)?;
            if block.len() < schema.record_width {
                warn!(
                    "Could not parse entry {}: {} of {} bytes available",
                    index + 1,
                    block.len(),
                    schema.record_width
                );
                truncated_at = Some(index);
                break;
            }
            records.push(CatalogRecord::decode(&block, &schema, index)?);
        }

        info!("Parsed {} star entries", records.len());

        Ok(Bsc5Catalog {
            header,
            schema,
            records,
            truncated_at,
        })
    }

    /// Open and decode the catalog at `path`.
    pub fn read_file(path: &Utf8Path) -> Result<Self, SkycatError> {
        if !path.exists() {
            return Err(SkycatError::MissingSourceFile(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}
