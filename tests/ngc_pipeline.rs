mod common;

use approx::assert_relative_eq;
use camino::Utf8Path;

use common::CatalogDir;
use skycat::{
    emit::OutputStyle,
    env_state::{CatalogPaths, NgcConfig},
    ngc::{
        ngc_filter::{NgcFilter, NgcObjectType, NgcPreset},
        ngc_reader::read_ngc_file,
        run_ngc,
    },
    SkycatError,
};

fn run(dir: &CatalogDir, filter: NgcFilter) -> serde_json::Value {
    let mut config = NgcConfig::new(&CatalogPaths::from_base(dir.base.clone()), filter);
    config.input = dir.path("ngc2000_sample.dat");
    run_ngc(&config).unwrap();
    dir.read_json("ngc2000.json")
}

fn names(document: &serde_json::Value) -> Vec<&str> {
    document["objects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|object| object["name"].as_str().unwrap())
        .collect()
}

#[test]
fn test_read_sample() {
    let objects = read_ngc_file(Utf8Path::new("tests/data/ngc2000_sample.dat")).unwrap();
    assert_eq!(objects.len(), 11);

    let orion = objects.iter().find(|object| object.name == "1976").unwrap();
    assert_eq!(orion.object_type.as_deref(), Some("Nb"));
    assert_relative_eq!(orion.ra_deg.unwrap(), (5.0 + 35.3 / 60.0) * 15.0);
    assert_relative_eq!(orion.dec_deg.unwrap(), -(5.0 + 23.0 / 60.0));
    assert_eq!(orion.constellation.as_deref(), Some("Ori"));

    let ghost = objects.iter().find(|object| object.name == "2000").unwrap();
    assert_eq!(ghost.object_type.as_deref(), Some("-"));
    assert_eq!(ghost.magnitude, None);
    assert_eq!(ghost.size_arcmin, None);
}

#[test]
fn test_default_selection() {
    let dir = CatalogDir::new(&[]);
    let document = run(&dir, NgcFilter::resolve(None, vec![], None));

    // 4000 is the only galaxy, star or planetary nebula at magnitude 15 or above
    assert_eq!(names(&document), vec!["4000"]);
    assert_eq!(document["total_objects"], 1);
    assert_eq!(
        document["data_info"]["included_types"],
        serde_json::json!(["Gx", "*", "Pl"])
    );
    assert_eq!(document["data_info"]["max_magnitude"], 15.0);
}

#[test]
fn test_presets() {
    let dir = CatalogDir::new(&[]);

    let deep_sky = run(&dir, NgcFilter::resolve(Some(NgcPreset::DeepSky), vec![], None));
    assert_eq!(names(&deep_sky), vec!["4000"]);

    let bright = run(&dir, NgcFilter::resolve(Some(NgcPreset::Bright), vec![], None));
    assert_eq!(names(&bright), vec!["1", "4000"]);
    assert_eq!(bright["data_info"]["max_magnitude"], 12.0);

    let all = run(&dir, NgcFilter::resolve(Some(NgcPreset::All), vec![], None));
    assert_eq!(all["total_objects"], 11);
    assert_eq!(all["data_info"]["included_types"], "all");
    assert!(all["data_info"]["max_magnitude"].is_null());
}

#[test]
fn test_explicit_types_and_limit() {
    let dir = CatalogDir::new(&[]);
    let filter = NgcFilter::resolve(
        None,
        vec![NgcObjectType::Nebula, NgcObjectType::OpenCluster],
        Some(5.0),
    );
    let document = run(&dir, filter);

    // both nebulae are at 4.0, the double cluster at 5.3
    assert_eq!(names(&document), vec!["869"]);
    assert_eq!(document["objects"][0]["type"], "OC");

    let galaxies = run(
        &dir,
        NgcFilter::resolve(None, vec![NgcObjectType::Galaxy], Some(9.0)),
    );
    assert_eq!(names(&galaxies), vec!["1", "I1613", "4000"]);

    let unlimited = run(
        &dir,
        NgcFilter::resolve(None, vec![NgcObjectType::Galaxy], None),
    );
    assert_eq!(names(&unlimited), vec!["1", "224", "I1613", "4000"]);
}

#[test]
fn test_compact_output_and_missing_input() {
    let dir = CatalogDir::new(&[]);
    let mut config = NgcConfig::new(&CatalogPaths::from_base(dir.base.clone()), NgcFilter::default());
    config.style = OutputStyle::Compact;

    assert_eq!(
        run_ngc(&config).unwrap_err(),
        SkycatError::MissingSourceFile(dir.path("ngc2000.dat"))
    );
    assert!(!config.output.exists());

    config.input = dir.path("ngc2000_sample.dat");
    let summary = run_ngc(&config).unwrap();
    assert_eq!(summary.entries, 11);
    let text = std::fs::read_to_string(&summary.output).unwrap();
    assert!(text.starts_with(r#"{"catalog":"NGC 2000.0"#));
}
