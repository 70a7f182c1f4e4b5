//! NGC 2000.0 conversion: fixed-width catalog → filtered JSON document.

use itertools::Itertools;
use serde::{Serialize, Serializer};
use tracing::info;

use crate::{
    constants::{
        NGC_CATALOG_NAME, NGC_CATALOG_VERSION, NGC_COORDINATE_EPOCH, NGC_DESCRIPTION, NGC_SOURCE,
    },
    emit::{write_json, ConversionSummary},
    env_state::NgcConfig,
    skycat_errors::SkycatError,
};

use ngc_filter::{NgcFilter, NgcObjectType};
use ngc_reader::{read_ngc_file, NgcObject};

pub mod ngc_filter;
pub mod ngc_reader;

/// `"all"` when the filter keeps every type, the list of codes otherwise.
fn serialize_included_types<S: Serializer>(
    types: &Option<Vec<NgcObjectType>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match types {
        Some(types) => types.serialize(serializer),
        None => serializer.serialize_str("all"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataInfo {
    pub source: &'static str,
    pub description: &'static str,
    #[serde(serialize_with = "serialize_included_types")]
    pub included_types: Option<Vec<NgcObjectType>>,
    pub max_magnitude: Option<f64>,
    pub coordinate_epoch: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NgcDocument {
    pub catalog: &'static str,
    pub version: &'static str,
    pub coordinate_system: &'static str,
    pub total_objects: usize,
    pub data_info: DataInfo,
    pub objects: Vec<NgcObject>,
}

impl NgcDocument {
    /// Keep the objects accepted by `filter`, in input order.
    pub fn new(objects: Vec<NgcObject>, filter: &NgcFilter) -> Self {
        let objects: Vec<_> = objects
            .into_iter()
            .filter(|object| filter.accepts(object))
            .collect();

        NgcDocument {
            catalog: NGC_CATALOG_NAME,
            version: NGC_CATALOG_VERSION,
            coordinate_system: "J2000",
            total_objects: objects.len(),
            data_info: DataInfo {
                source: NGC_SOURCE,
                description: NGC_DESCRIPTION,
                included_types: filter.included_types().map(<[_]>::to_vec),
                max_magnitude: filter.max_magnitude,
                coordinate_epoch: NGC_COORDINATE_EPOCH,
            },
            objects,
        }
    }
}

/// Read, filter and write the NGC catalog described by `config`.
pub fn run_ngc(config: &NgcConfig) -> Result<ConversionSummary, SkycatError> {
    let objects = read_ngc_file(&config.input)?;
    let document = NgcDocument::new(objects, &config.filter);

    let bytes_written = write_json(&document, &config.output, config.style)?;
    info!(
        "Converted {} objects to {} ({:.1} KB)",
        document.total_objects,
        config.output,
        bytes_written as f64 / 1024.0
    );
    match filter_types_label(&config.filter) {
        Some(label) => info!("Included object types: {label}"),
        None => info!("Included object types: All types"),
    }
    if let Some(limit) = config.filter.max_magnitude {
        info!("Maximum magnitude: {limit}");
    }

    Ok(ConversionSummary {
        entries: document.total_objects,
        output: config.output.clone(),
        bytes_written,
    })
}

fn filter_types_label(filter: &NgcFilter) -> Option<String> {
    filter.included_types().map(|types| types.iter().join(", "))
}

#[cfg(test)]
mod ngc_test {
    use serde_json::json;

    use super::*;
    use crate::ngc::ngc_reader::parse_ngc_line;

    fn objects() -> Vec<NgcObject> {
        [
            "  224 Gx  00 42.7  +41 16 s  And  180.   3.5p",
            " 7000 Nb  20 58.8  +44 20 s  Cyg  120.   4.0",
            " 6543 Pl  17 58.6  +66 38 s  Dra   0.3   8.8",
            " 4000 Gx  11 57.9  +25 09 s  Com   1.3  15.5p",
        ]
        .into_iter()
        .map(|line| parse_ngc_line(line).unwrap())
        .collect()
    }

    #[test]
    fn test_default_filter_document() {
        let filter = NgcFilter::resolve(None, vec![], None);
        let document = NgcDocument::new(objects(), &filter);
        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(document.total_objects, 1);
        assert_eq!(value["objects"][0]["name"], "4000");
        assert_eq!(
            value["data_info"],
            json!({
                "source": "NASA/IPAC Extragalactic Database",
                "description": "New General Catalogue (NGC) and Index Catalogue (IC) of Nebulae and Star Clusters",
                "included_types": ["Gx", "*", "Pl"],
                "max_magnitude": 15.0,
                "coordinate_epoch": "J2000.0"
            })
        );
        assert_eq!(value["coordinate_system"], "J2000");
        assert_eq!(value["total_objects"], 1);
    }

    #[test]
    fn test_unfiltered_document() {
        let document = NgcDocument::new(objects(), &NgcFilter::default());
        let value = serde_json::to_value(&document).unwrap();

        assert_eq!(document.total_objects, 4);
        assert_eq!(value["data_info"]["included_types"], "all");
        assert_eq!(value["data_info"]["max_magnitude"], serde_json::Value::Null);
    }

    #[test]
    fn test_types_label() {
        let filter = NgcFilter::resolve(None, vec![], None);
        assert_eq!(filter_types_label(&filter).as_deref(), Some("Gx, *, Pl"));
        assert_eq!(filter_types_label(&NgcFilter::default()), None);
    }
}
