// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use liberty_catalog::convert::{convert, ConvertOptions};
use liberty_catalog::export::{
    catalog_to_json, export_catalog_to_csv, export_catalog_to_json, read_catalog_json,
    CatalogFormat,
};
use liberty_catalog::{CatalogError, CellCatalog, CellRecord, MalformedCellPolicy};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("liberty_catalog_{}_{}", std::process::id(), name))
}

fn record(inputs: &[&str], outputs: &[(&str, &str)]) -> CellRecord {
    let inputs: Vec<String> = inputs.iter().map(|s| s.to_string()).collect();
    let outputs: BTreeMap<String, String> = outputs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    CellRecord::new(&inputs, outputs)
}

fn create_test_catalog() -> CellCatalog {
    let mut catalog = CellCatalog::new();
    catalog.insert("XOR2".to_string(), record(&["A", "B"], &[("Y", "A ^ B")]));
    catalog.insert("INV1".to_string(), record(&["A"], &[("Y", "!A")]));
    catalog.insert(
        "HA".to_string(),
        record(&["A", "B"], &[("S", "A ^ B"), ("CO", "A & B")]),
    );
    catalog
}

#[test]
fn test_json_single_cell_layout() {
    let mut catalog = CellCatalog::new();
    catalog.insert("INV1".to_string(), record(&["A"], &[("Y", "!A")]));

    let json = catalog_to_json(&catalog).unwrap();
    let expected = r#"{
    "INV1": {
        "input": "A ",
        "output": {
            "Y": "!A"
        }
    }
}"#;
    assert_eq!(json, expected);
}

#[test]
fn test_json_empty_catalog() {
    assert_eq!(catalog_to_json(&CellCatalog::new()).unwrap(), "{}");
}

#[test]
fn test_json_keys_sorted() {
    let json = catalog_to_json(&create_test_catalog()).unwrap();

    let ha = json.find("\"HA\"").unwrap();
    let inv = json.find("\"INV1\"").unwrap();
    let xor = json.find("\"XOR2\"").unwrap();
    assert!(ha < inv && inv < xor);

    // Output pins sorted too
    let co = json.find("\"CO\"").unwrap();
    let s = json.find("\"S\"").unwrap();
    assert!(co < s);
}

#[test]
fn test_json_file_read_back() {
    let path = temp_path("read_back.json");
    let catalog = create_test_catalog();
    export_catalog_to_json(&catalog, &path).unwrap();

    let loaded = read_catalog_json(&path).unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded.get("HA"), catalog.get("HA"));
    // Loaded in document (sorted) order
    assert_eq!(loaded.names().collect::<Vec<_>>(), vec!["HA", "INV1", "XOR2"]);
    assert_eq!(
        loaded.get("XOR2").unwrap().input_pins().collect::<Vec<_>>(),
        vec!["A", "B"]
    );

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_csv_export() {
    let path = temp_path("cells.csv");
    export_catalog_to_csv(&create_test_catalog(), &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "Cell,Inputs,Outputs");
    assert_eq!(lines[1], "HA,A B,CO=A & B;S=A ^ B");
    assert_eq!(lines[2], "INV1,A,Y=!A");
    assert_eq!(lines[3], "XOR2,A B,Y=A ^ B");
    assert_eq!(lines.len(), 4);

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_format_selection() {
    assert_eq!(CatalogFormat::from_path("cells.csv"), CatalogFormat::Csv);
    assert_eq!(CatalogFormat::from_path("cells.CSV"), CatalogFormat::Csv);
    assert_eq!(CatalogFormat::from_path("cells.json"), CatalogFormat::Json);
    assert_eq!(CatalogFormat::from_path("cells"), CatalogFormat::Json);

    assert_eq!("csv".parse::<CatalogFormat>().unwrap(), CatalogFormat::Csv);
    assert_eq!("JSON".parse::<CatalogFormat>().unwrap(), CatalogFormat::Json);
    assert!(matches!(
        "yaml".parse::<CatalogFormat>(),
        Err(CatalogError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_convert_end_to_end() {
    let liberty = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/demo.lib");
    let out = temp_path("demo.json");

    let catalog = convert(&ConvertOptions::new(&liberty, &out)).unwrap();
    assert_eq!(catalog.len(), 4);

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written, catalog_to_json(&catalog).unwrap());
    assert!(written.contains("\"input\": \"A1 A2 \""));
    assert!(written.contains("\"ZN\": \"!(A1 & A2)\""));

    fs::remove_file(&out).unwrap();
}

#[test]
fn test_convert_csv_by_option() {
    let liberty = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/demo.lib");
    let out = temp_path("demo_forced.out");

    let mut options = ConvertOptions::new(&liberty, &out);
    options.format = Some(CatalogFormat::Csv);
    options.malformed = MalformedCellPolicy::Skip;
    convert(&options).unwrap();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("Cell,Inputs,Outputs"));
    assert_eq!(content.lines().count(), 5);

    fs::remove_file(&out).unwrap();
}

#[test]
fn test_convert_missing_library() {
    let liberty = temp_path("empty.lib");
    fs::write(&liberty, "/* no groups */\n").unwrap();
    let out = temp_path("empty.json");

    let result = convert(&ConvertOptions::new(&liberty, &out));
    assert!(matches!(result, Err(CatalogError::MissingLibrary)));
    assert!(!out.exists());

    fs::remove_file(&liberty).unwrap();
}

#[test]
fn test_json_keeps_non_ascii_verbatim() {
    let mut catalog = CellCatalog::new();
    catalog.insert("INV_µ".to_string(), record(&["A"], &[("Y", "¬A")]));

    let json = catalog_to_json(&catalog).unwrap();
    assert!(json.contains("\"INV_µ\""));
    assert!(json.contains("\"Y\": \"¬A\""));
    assert!(!json.contains("\\u"));
}
