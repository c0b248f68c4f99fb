// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Cell extraction
//!
//! Walks every `cell` group of a library once, in declaration order, and
//! keeps the cells that look like plain combinational logic:
//! - at least one output pin
//! - no output pin named `Q`
//! - no input pin whose name contains `CLK`
//! - an output mapping different from the previously accepted cell

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info, warn};

use super::{join_pin_names, CellCatalog, CellRecord};
use crate::error::{CatalogError, Result};
use crate::liberty::{LibGroup, LibValue};

const SEQUENTIAL_OUTPUT: &str = "Q";
const CLOCK_MARKER: &str = "CLK";

/// A pin after direction classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinClass {
    Input { name: String },
    Output { name: String, function: String },
}

/// Classify a pin. Only `direction : output` makes an output; every other
/// direction, including none at all, is an input.
pub fn classify_pin(cell: &str, index: usize, pin: &LibGroup) -> Result<PinClass> {
    let name = pin
        .name()
        .ok_or_else(|| CatalogError::MissingPinName {
            cell: cell.to_string(),
            index,
        })?
        .to_string();

    match pin.attribute("direction").map(LibValue::unquoted) {
        Some("output") => {
            let function = pin
                .attribute("function")
                .ok_or_else(|| CatalogError::MissingFunction {
                    cell: cell.to_string(),
                    pin: name.clone(),
                })?
                .unquoted()
                .to_string();
            Ok(PinClass::Output { name, function })
        }
        _ => Ok(PinClass::Input { name }),
    }
}

/// Why a cell was left out of the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NoOutputs,
    SequentialOutput,
    ClockInput,
    /// Same output mapping as the previously accepted cell
    DuplicateOutputs,
    /// Skipped under [`MalformedCellPolicy::Skip`]
    Malformed(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoOutputs => write!(f, "no output pins"),
            Rejection::SequentialOutput => write!(f, "has output pin {SEQUENTIAL_OUTPUT}"),
            Rejection::ClockInput => write!(f, "input pins contain {CLOCK_MARKER}"),
            Rejection::DuplicateOutputs => write!(f, "same outputs as previous accepted cell"),
            Rejection::Malformed(reason) => write!(f, "malformed: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedCell {
    pub name: String,
    pub reason: Rejection,
}

/// Catalog plus the cells that did not make it
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub catalog: CellCatalog,
    pub rejected: Vec<RejectedCell>,
}

/// What to do with a cell whose pins lack a name or function
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedCellPolicy {
    /// Fail the whole extraction
    #[default]
    Abort,
    /// Log, record as rejected and continue with the next cell
    Skip,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    pub malformed: MalformedCellPolicy,
}

/// Pins of one cell, split by direction
#[derive(Debug, Default)]
struct CellAccumulator {
    input_names: Vec<String>,
    output_map: BTreeMap<String, String>,
}

impl CellAccumulator {
    fn collect(cell_name: &str, cell: &LibGroup) -> Result<Self> {
        let mut acc = Self::default();
        for (index, pin) in cell.groups("pin").enumerate() {
            match classify_pin(cell_name, index, pin)? {
                PinClass::Output { name, function } => {
                    acc.output_map.insert(name, function);
                }
                PinClass::Input { name } => acc.input_names.push(name),
            }
        }
        Ok(acc)
    }
}

/// Acceptance rules against the output map of the last accepted cell
fn check_acceptance(
    input: &str,
    output_map: &BTreeMap<String, String>,
    baseline: &BTreeMap<String, String>,
) -> std::result::Result<(), Rejection> {
    if output_map.is_empty() {
        return Err(Rejection::NoOutputs);
    }
    if output_map.contains_key(SEQUENTIAL_OUTPUT) {
        return Err(Rejection::SequentialOutput);
    }
    // Substring test on the joined names: `CLKN` or `GCLK` match too.
    if input.contains(CLOCK_MARKER) {
        return Err(Rejection::ClockInput);
    }
    if output_map == baseline {
        return Err(Rejection::DuplicateOutputs);
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct CellExtractor {
    options: ExtractOptions,
}

impl CellExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn extract(&self, library: &LibGroup) -> Result<CellCatalog> {
        Ok(self.extract_detailed(library)?.catalog)
    }

    pub fn extract_detailed(&self, library: &LibGroup) -> Result<Extraction> {
        let mut extraction = Extraction::default();
        let mut baseline = BTreeMap::new();

        for (index, cell) in library.groups("cell").enumerate() {
            let collected = cell
                .name()
                .ok_or(CatalogError::MissingCellName { index })
                .and_then(|name| Ok((name, CellAccumulator::collect(name, cell)?)));

            let (name, acc) = match collected {
                Ok(collected) => collected,
                Err(e)
                    if e.is_malformed_cell()
                        && self.options.malformed == MalformedCellPolicy::Skip =>
                {
                    warn!("[WARN] Skipping cell #{index}: {e}");
                    extraction.rejected.push(RejectedCell {
                        name: cell.name().unwrap_or_default().to_string(),
                        reason: Rejection::Malformed(e.to_string()),
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            baseline = self.evaluate(name, acc, baseline, &mut extraction);
        }

        info!(
            "[INFO] Extracted {} cells, rejected {}",
            extraction.catalog.len(),
            extraction.rejected.len()
        );
        Ok(extraction)
    }

    /// Apply the acceptance rules to one cell and return the new baseline
    fn evaluate(
        &self,
        name: &str,
        acc: CellAccumulator,
        baseline: BTreeMap<String, String>,
        extraction: &mut Extraction,
    ) -> BTreeMap<String, String> {
        let input = join_pin_names(&acc.input_names);

        match check_acceptance(&input, &acc.output_map, &baseline) {
            Ok(()) => {
                debug!("[PASS] {name}: inputs '{input}', outputs {:?}", acc.output_map);
                let record = CellRecord {
                    input,
                    output: acc.output_map.clone(),
                };
                extraction.catalog.insert(name.to_string(), record);
                acc.output_map
            }
            Err(reason) => {
                debug!("[SKIP] {name}: {reason}");
                extraction.rejected.push(RejectedCell {
                    name: name.to_string(),
                    reason,
                });
                baseline
            }
        }
    }
}

/// Extract the cell catalog of `library` with default options
pub fn extract(library: &LibGroup) -> Result<CellCatalog> {
    CellExtractor::default().extract(library)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outputs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_classify_missing_direction_is_input() {
        let pin = LibGroup::new("pin").with_arg("A");
        assert_eq!(
            classify_pin("C", 0, &pin).unwrap(),
            PinClass::Input {
                name: "A".to_string()
            }
        );
    }

    #[test]
    fn test_classify_inout_is_input() {
        let pin = LibGroup::new("pin")
            .with_arg("IO")
            .with_attribute("direction", "inout");
        assert!(matches!(
            classify_pin("C", 0, &pin).unwrap(),
            PinClass::Input { .. }
        ));
    }

    #[test]
    fn test_classify_output() {
        let pin = LibGroup::new("pin")
            .with_arg("Y")
            .with_attribute("direction", "output")
            .with_attribute("function", "(A * B)");
        assert_eq!(
            classify_pin("C", 0, &pin).unwrap(),
            PinClass::Output {
                name: "Y".to_string(),
                function: "(A * B)".to_string()
            }
        );
    }

    #[test]
    fn test_classify_output_without_function_fails() {
        let pin = LibGroup::new("pin")
            .with_arg("Y")
            .with_attribute("direction", "output");
        assert!(matches!(
            classify_pin("C", 0, &pin),
            Err(CatalogError::MissingFunction { .. })
        ));
    }

    #[test]
    fn test_acceptance_rule_order() {
        let empty = BTreeMap::new();
        assert_eq!(
            check_acceptance("", &empty, &empty),
            Err(Rejection::NoOutputs)
        );
        assert_eq!(
            check_acceptance("CLK ", &outputs(&[("Q", "D")]), &empty),
            Err(Rejection::SequentialOutput)
        );
        assert_eq!(
            check_acceptance("CLKN ", &outputs(&[("Y", "A")]), &empty),
            Err(Rejection::ClockInput)
        );
        let y = outputs(&[("Y", "A")]);
        assert_eq!(
            check_acceptance("A ", &y, &y),
            Err(Rejection::DuplicateOutputs)
        );
        assert_eq!(check_acceptance("A ", &y, &empty), Ok(()));
    }
}
