// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Liberty to catalog conversion: read, extract, write.

use std::path::PathBuf;

use log::info;

use crate::catalog::extractor::{CellExtractor, ExtractOptions, MalformedCellPolicy};
use crate::catalog::CellCatalog;
use crate::error::{CatalogError, Result};
use crate::export::{write_catalog, CatalogFormat};
use crate::liberty::reader::LibertyReader;

/// Conversion options, the library-side twin of the CLI arguments
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Liberty input file
    pub liberty: PathBuf,
    /// Catalog output file
    pub out: PathBuf,
    /// Output format; guessed from the output extension when `None`
    pub format: Option<CatalogFormat>,
    pub malformed: MalformedCellPolicy,
}

impl ConvertOptions {
    pub fn new(liberty: impl Into<PathBuf>, out: impl Into<PathBuf>) -> Self {
        Self {
            liberty: liberty.into(),
            out: out.into(),
            format: None,
            malformed: MalformedCellPolicy::default(),
        }
    }

    fn output_format(&self) -> CatalogFormat {
        self.format
            .unwrap_or_else(|| CatalogFormat::from_path(&self.out))
    }
}

/// Convert an on-disk Liberty file to an on-disk catalog document
pub fn convert(options: &ConvertOptions) -> Result<CellCatalog> {
    let liberty = LibertyReader::new().read(&options.liberty)?;
    let library = liberty.library().ok_or(CatalogError::MissingLibrary)?;

    let extractor = CellExtractor::new(ExtractOptions {
        malformed: options.malformed,
    });
    let catalog = extractor.extract(library)?;

    let format = options.output_format();
    write_catalog(&catalog, &options.out, format)?;
    info!(
        "[SAVE] Wrote {} cells as {:?} to {}",
        catalog.len(),
        format,
        options.out.display()
    );

    Ok(catalog)
}
