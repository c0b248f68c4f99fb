//! Liberty Cell Catalog Library
//!
//! This library reads Liberty (.lib) standard-cell libraries and extracts a
//! catalog of combinational cells (input pins and output logic functions)
//! for logic synthesis and technology mapping tools.

pub mod catalog;
pub mod convert;
pub mod error;
pub mod export;
pub mod liberty;

// Re-export commonly used types
pub use catalog::extractor::{extract, CellExtractor, ExtractOptions, MalformedCellPolicy};
pub use catalog::{CellCatalog, CellRecord};
pub use error::{CatalogError, Result};
pub use liberty::{LibGroup, LibValue, Liberty};
