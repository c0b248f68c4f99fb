// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Cell catalog
//!
//! Maps a cell name to its input pins and its output functions:
//!
//! ```json
//! "NAND2": {
//!     "input": "A B ",
//!     "output": { "Y": "!(A & B)" }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    /// Input pin names, each followed by a single space
    pub input: String,
    /// Output pin name to logic function
    pub output: BTreeMap<String, String>,
}

impl CellRecord {
    pub fn new(input_pins: &[String], output: BTreeMap<String, String>) -> Self {
        Self {
            input: join_pin_names(input_pins),
            output,
        }
    }

    /// Input pin names in declaration order
    pub fn input_pins(&self) -> impl Iterator<Item = &str> {
        self.input.split_whitespace()
    }
}

/// Render pin names as `"A B C "` (one trailing space per entry)
pub fn join_pin_names(names: &[String]) -> String {
    names.iter().fold(String::new(), |mut acc, name| {
        acc.push_str(name);
        acc.push(' ');
        acc
    })
}

/// Accepted cells in acceptance order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellCatalog {
    cells: IndexMap<String, CellRecord>,
}

impl CellCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cell; an existing name keeps its position and gets the new record
    pub fn insert(&mut self, name: String, record: CellRecord) -> Option<CellRecord> {
        self.cells.insert(name, record)
    }

    pub fn get(&self, name: &str) -> Option<&CellRecord> {
        self.cells.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cells.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellRecord)> {
        self.cells.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Key-sorted view used for deterministic output
    pub fn sorted(&self) -> BTreeMap<&str, &CellRecord> {
        self.iter().collect()
    }
}

impl FromIterator<(String, CellRecord)> for CellCatalog {
    fn from_iter<T: IntoIterator<Item = (String, CellRecord)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

pub mod extractor;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pin_names_trailing_space() {
        let names = vec!["A".to_string(), "B".to_string()];
        assert_eq!(join_pin_names(&names), "A B ");
        assert_eq!(join_pin_names(&[]), "");
    }

    #[test]
    fn test_input_pins_round_trip() {
        let names = vec!["A1".to_string(), "A2".to_string(), "B".to_string()];
        let record = CellRecord::new(&names, BTreeMap::new());
        assert_eq!(record.input_pins().collect::<Vec<_>>(), vec!["A1", "A2", "B"]);
    }

    #[test]
    fn test_insert_existing_name_keeps_position() {
        let mut catalog = CellCatalog::new();
        catalog.insert("B".to_string(), CellRecord::default());
        catalog.insert("A".to_string(), CellRecord::default());
        let replaced = catalog.insert(
            "B".to_string(),
            CellRecord {
                input: "X ".to_string(),
                output: BTreeMap::new(),
            },
        );
        assert!(replaced.is_some());
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["B", "A"]);
        assert_eq!(catalog.get("B").unwrap().input, "X ");
    }

    #[test]
    fn test_sorted_view() {
        let catalog: CellCatalog = vec![
            ("XOR2".to_string(), CellRecord::default()),
            ("AND2".to_string(), CellRecord::default()),
        ]
        .into_iter()
        .collect();
        assert_eq!(catalog.sorted().keys().copied().collect::<Vec<_>>(), vec!["AND2", "XOR2"]);
    }
}
