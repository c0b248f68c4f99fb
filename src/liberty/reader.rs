// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use super::{liberty_parser::parse_liberty, preprocessor::preprocess, Liberty};
use crate::error::{CatalogError, Result};

pub struct LibertyReader;

impl LibertyReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<Liberty> {
        let path = path.as_ref();
        info!("[LOAD] Loading Liberty file: {}", path.display());

        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("[FILE] Liberty file size: {} bytes", content.len());

        self.parse_str(&content)
    }

    pub fn parse_str(&self, content: &str) -> Result<Liberty> {
        let preprocessed = preprocess(content);
        debug!("{preprocessed}");

        match parse_liberty(&preprocessed.text) {
            Ok((remaining, liberty)) => {
                if !remaining.trim().is_empty() {
                    let offset = preprocessed.offset_of(remaining);
                    warn!(
                        "[WARN] {}",
                        preprocessed.format_error(
                            offset,
                            &format!("unparsed content remaining: {} chars", remaining.len())
                        )
                    );
                }
                log_statistics(&liberty);
                Ok(liberty)
            }
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                let offset = preprocessed.offset_of(e.input);
                let message = preprocessed.format_error(
                    offset,
                    &format!("unexpected input near {:?}", snippet(e.input)),
                );
                warn!("[FAIL] Failed to parse Liberty file: {message}");
                Err(CatalogError::Parse { message })
            }
            Err(nom::Err::Incomplete(_)) => Err(CatalogError::Parse {
                message: "incomplete Liberty input".to_string(),
            }),
        }
    }
}

impl Default for LibertyReader {
    fn default() -> Self {
        Self::new()
    }
}

fn snippet(input: &str) -> &str {
    let line = input.lines().next().unwrap_or("").trim();
    match line.char_indices().nth(40) {
        Some((end, _)) => &line[..end],
        None => line,
    }
}

fn log_statistics(liberty: &Liberty) {
    let libraries = liberty.groups.len();
    let mut cells = 0;
    let mut pins = 0;

    if let Some(library) = liberty.library() {
        for cell in library.groups("cell") {
            cells += 1;
            pins += cell.groups("pin").count();
        }
    }

    info!("[PASS] Liberty parsed successfully!");
    info!("[INFO] Statistics: {libraries} top-level groups, {cells} cells, {pins} pins");
}
