#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

use skycat::bsc5::{
    bsc5_header::CatalogHeader,
    catalog_record::{CatalogRecord, StarNumber},
    record_schema::RecordSchema,
};

/// Real star numbers, one magnitude, proper motion, J2000.
pub fn bsc5ra_header(star_count: i32) -> CatalogHeader {
    CatalogHeader {
        sequence_offset: 0,
        first_identifier: 1,
        record_count_signed: -star_count,
        identifier_format: 1,
        proper_motion_flag: 1,
        magnitude_count_signed: 1,
        bytes_per_record: 32,
    }
}

pub fn star(number: f32, spectral_type: &[u8; 2], magnitude: i16, pm: (f32, f32)) -> CatalogRecord {
    CatalogRecord {
        number: StarNumber::Real(number),
        right_ascension_rad: f64::from(number) / 100.0,
        declination_rad: -0.5,
        spectral_type_raw: *spectral_type,
        magnitudes: vec![magnitude],
        ra_proper_motion: Some(pm.0),
        dec_proper_motion: Some(pm.1),
        radial_velocity: None,
        object_name_raw: None,
        padding: Vec::new(),
    }
}

pub fn catalog_bytes(header: &CatalogHeader, records: &[CatalogRecord]) -> Vec<u8> {
    let schema = RecordSchema::from_header(header).unwrap();
    let mut bytes = header.to_bytes().to_vec();
    for record in records {
        bytes.extend(record.to_bytes(&schema));
    }
    bytes
}

/// Stars matching the names and notes of `tests/data`.
pub fn reference_stars() -> Vec<CatalogRecord> {
    vec![
        star(15.0, b"A1", 146, (0.25, -0.125)),
        star(20.0, b"K0", 300, (0.0, 0.0)),
        star(30.0, b"B9", 512, (-0.5, 0.75)),
        star(31.4, b"G2", 620, (0.0, 0.0)),
    ]
}

/// Temporary catalog directory with the three BSC5 inputs.
pub struct CatalogDir {
    _dir: TempDir,
    pub base: Utf8PathBuf,
}

impl CatalogDir {
    pub fn new(catalog: &[u8]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let base = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        std::fs::write(base.join("BSC5ra.bsc5"), catalog).unwrap();
        for name in ["ybsc5.notes", "ybsc5.names", "ngc2000_sample.dat"] {
            std::fs::copy(Utf8Path::new("tests/data").join(name), base.join(name)).unwrap();
        }

        CatalogDir { _dir: dir, base }
    }

    pub fn path(&self, name: &str) -> Utf8PathBuf {
        self.base.join(name)
    }

    pub fn read_json(&self, name: &str) -> serde_json::Value {
        let text = std::fs::read_to_string(self.path(name)).unwrap();
        serde_json::from_str(&text).unwrap()
    }
}
