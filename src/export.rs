// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use csv::Writer;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use crate::catalog::{CellCatalog, CellRecord};
use crate::error::{CatalogError, Result};

/// Output document formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogFormat {
    #[default]
    Json,
    Csv,
}

impl CatalogFormat {
    /// Pick a format from the file extension, JSON when unknown
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => CatalogFormat::Csv,
            _ => CatalogFormat::Json,
        }
    }
}

impl FromStr for CatalogFormat {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(CatalogFormat::Json),
            "csv" => Ok(CatalogFormat::Csv),
            _ => Err(CatalogError::UnsupportedFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CellCsvRecord {
    #[serde(rename = "Cell")]
    pub cell: String,
    #[serde(rename = "Inputs")]
    pub inputs: String,
    #[serde(rename = "Outputs")]
    pub outputs: String,
}

/// Format outputs as `PIN=FUNCTION` pairs joined by `;`
fn format_outputs(record: &CellRecord) -> String {
    record
        .output
        .iter()
        .map(|(pin, function)| format!("{pin}={function}"))
        .collect::<Vec<String>>()
        .join(";")
}

fn cell_to_csv_record(name: &str, record: &CellRecord) -> CellCsvRecord {
    CellCsvRecord {
        cell: name.to_string(),
        inputs: record.input_pins().collect::<Vec<_>>().join(" "),
        outputs: format_outputs(record),
    }
}

/// Serialize the catalog with sorted keys and 4-space indentation
pub fn catalog_to_json(catalog: &CellCatalog) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    catalog.sorted().serialize(&mut serializer)?;

    // serde_json only emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Export the catalog to a JSON file
pub fn export_catalog_to_json<P: AsRef<Path>>(catalog: &CellCatalog, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = catalog_to_json(catalog)?;
    fs::write(path, json).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Export the catalog to a CSV file, one row per cell in name order
pub fn export_catalog_to_csv<P: AsRef<Path>>(catalog: &CellCatalog, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = Writer::from_writer(file);

    for (name, record) in catalog.sorted() {
        writer.serialize(cell_to_csv_record(name, record))?;
    }

    writer.flush().map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

pub fn write_catalog<P: AsRef<Path>>(
    catalog: &CellCatalog,
    path: P,
    format: CatalogFormat,
) -> Result<()> {
    match format {
        CatalogFormat::Json => export_catalog_to_json(catalog, path),
        CatalogFormat::Csv => export_catalog_to_csv(catalog, path),
    }
}

/// Load a catalog previously written by [`export_catalog_to_json`]
pub fn read_catalog_json<P: AsRef<Path>>(path: P) -> Result<CellCatalog> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
