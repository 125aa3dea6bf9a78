use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use palliate_api::config::{CatalogSource, Settings, load_catalog, resolve_catalog};
use palliate_calculators::opioid::rotation::UnknownDrugPolicy;
use serde_json::json;

fn settings(vars: &[(&str, &str)]) -> eyre::Result<Settings> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(|key| vars.get(key).cloned())
}

fn write(dir: &tempfile::TempDir, value: serde_json::Value) -> PathBuf {
    let path = dir.path().join("catalog.json");
    fs::write(&path, value.to_string()).unwrap();
    path
}

#[test]
fn settings_defaults() {
    let s = settings(&[]).unwrap();
    assert_eq!(s.bind.to_string(), "127.0.0.1:8080");
    assert!(s.catalog_path.is_none());
    assert_eq!(s.unknown_drug_policy, UnknownDrugPolicy::AssumeReference);
}

#[test]
fn settings_from_variables() {
    let s = settings(&[
        ("PALLIATE_BIND", "0.0.0.0:9000"),
        ("PALLIATE_CATALOG", "/etc/palliate/catalog.json"),
        ("PALLIATE_STRICT_DRUGS", "TRUE"),
    ])
    .unwrap();
    assert_eq!(s.bind.port(), 9000);
    assert_eq!(s.catalog_path, Some(PathBuf::from("/etc/palliate/catalog.json")));
    assert_eq!(s.unknown_drug_policy, UnknownDrugPolicy::Reject);
}

#[test]
fn settings_reject_bad_values() {
    assert!(settings(&[("PALLIATE_BIND", "localhost")]).is_err());
    assert!(settings(&[("PALLIATE_STRICT_DRUGS", "maybe")]).is_err());
}

#[test]
fn missing_file_serves_builtin_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let s = settings(&[("PALLIATE_CATALOG", path.to_str().unwrap())]).unwrap();

    let loaded = resolve_catalog(&s).unwrap();
    assert_eq!(loaded.source, CatalogSource::Builtin);
    assert_eq!(loaded.catalog.len(), 3);
}

#[test]
fn loads_current_version_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        json!({
            "config_version": 1,
            "calculators": [{
                "id": "6f1c",
                "slug": "opioid-rotation",
                "title": "Opioid Rotation",
                "kind": "opioid-rotation",
                "config": {
                    "drugs": [
                        { "name": "Morphine oral", "routes": ["PO"], "ome_factor": 1.0 },
                        { "name": "Oxycodone oral", "routes": ["PO"], "ome_factor": 1.5 }
                    ],
                    "cross_tolerance": { "default_reduce_percent": 25 }
                },
                "created_at": "2025-03-01T12:00:00Z"
            }]
        }),
    );

    let loaded = load_catalog(&path).unwrap();
    assert_eq!(loaded.source, CatalogSource::File(path));
    assert_eq!(loaded.catalog.len(), 1);
    assert!(loaded.catalog.find("6f1c").is_some());
    assert_eq!(loaded.conversions.entries().len(), 10);
}

#[test]
fn migrates_bare_array_of_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        json!([
            { "id": "a", "slug": "ecog", "title": "ECOG", "kind": "ecog", "config": null },
            { "id": "b", "slug": "pps", "title": "PPS", "kind": "pps", "config": { "columns": [60, 30] } }
        ]),
    );

    let loaded = load_catalog(&path).unwrap();
    assert_eq!(loaded.catalog.len(), 2);
    assert!(loaded.catalog.find("pps").is_some());
}

#[test]
fn rejects_newer_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, json!({ "config_version": 7, "calculators": [] }));
    let err = load_catalog(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn rejects_version_too_large_to_represent() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        json!({ "config_version": 4_294_967_296u64, "calculators": [] }),
    );
    let err = load_catalog(&path).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn invalid_record_fails_loading() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        json!({
            "config_version": 1,
            "calculators": [{
                "id": "x",
                "slug": "pps",
                "title": "PPS",
                "kind": "pps",
                "config": { "columns": [55] }
            }]
        }),
    );
    assert!(load_catalog(&path).is_err());

    let blank_slug = write(
        &dir,
        json!([{ "id": "x", "slug": " ", "title": "PPS", "kind": "pps" }]),
    );
    assert!(load_catalog(&blank_slug).is_err());
}

#[test]
fn empty_calculator_list_serves_builtin_set() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, json!({ "config_version": 1, "calculators": [] }));
    let loaded = load_catalog(&path).unwrap();
    assert_eq!(loaded.catalog.len(), 3);
}

#[test]
fn conversions_can_be_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        json!({
            "config_version": 1,
            "conversions": [{
                "from_med": "Oxycodone",
                "to_med": "Hydromorphone",
                "route_from": "PO",
                "route_to": "PO",
                "conversion_factor": 0.25,
                "evidence_level": "Category 2A"
            }]
        }),
    );
    let loaded = load_catalog(&path).unwrap();
    assert_eq!(loaded.conversions.entries().len(), 1);

    let bad = write(
        &dir,
        json!({
            "conversions": [{
                "from_med": "Oxycodone",
                "to_med": "Hydromorphone",
                "route_from": "PO",
                "route_to": "PO",
                "conversion_factor": -1,
                "evidence_level": "Category 2A"
            }]
        }),
    );
    assert!(load_catalog(&bad).is_err());
}

#[test]
fn malformed_json_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(load_catalog(&path).is_err());
}
