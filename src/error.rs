// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Error types for Liberty reading, cell extraction and catalog export.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Liberty text could not be parsed; message carries the line number
    #[error("Liberty parse error: {message}")]
    Parse { message: String },

    #[error("no library group found in Liberty input")]
    MissingLibrary,

    /// A `cell` group without a name argument
    #[error("cell group #{index} has no name argument")]
    MissingCellName { index: usize },

    /// A `pin` group without a name argument
    #[error("pin group #{index} of cell {cell} has no name argument")]
    MissingPinName { cell: String, index: usize },

    /// An output pin without a `function` attribute
    #[error("output pin {pin} of cell {cell} has no function attribute")]
    MissingFunction { cell: String, pin: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}

impl CatalogError {
    /// Whether this error describes a single malformed cell rather than a
    /// failure of the whole input
    pub fn is_malformed_cell(&self) -> bool {
        matches!(
            self,
            CatalogError::MissingCellName { .. }
                | CatalogError::MissingPinName { .. }
                | CatalogError::MissingFunction { .. }
        )
    }
}
