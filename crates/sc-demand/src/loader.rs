//! CSV population-table loader.
//!
//! # CSV format
//!
//! One row per areal unit.  Column names follow the census extracts the
//! dashboard ships with; the generic names are accepted too.
//!
//! ```csv
//! LSOA21CD,Population
//! E01017953,1637
//! E01017954,
//! E01017955,2012
//! ```
//!
//! | Column                    | Meaning                                  |
//! |---------------------------|------------------------------------------|
//! | `code` / `LSOA21CD`       | areal-unit code                          |
//! | `population` / `Population` / `all ages` | residents; empty = unknown |
//!
//! Duplicate codes are rejected rather than silently overwritten.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{DemandError, DemandResult, DemandUnit, Population};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PopulationRecord {
    #[serde(alias = "LSOA21CD")]
    code:       String,
    #[serde(alias = "Population", alias = "all ages")]
    population: Option<u64>,
}

// ── PopulationTable ───────────────────────────────────────────────────────────

/// Population per unit code.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PopulationTable {
    by_code: HashMap<String, Population>,
}

impl PopulationTable {
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// `Unknown` both for codes listed without a figure and for codes not
    /// listed at all.
    pub fn get(&self, code: &str) -> Population {
        self.by_code.get(code).copied().unwrap_or(Population::Unknown)
    }

    /// Replace each unit's population with the table's figure.
    pub fn apply(&self, units: Vec<DemandUnit>) -> Vec<DemandUnit> {
        units
            .into_iter()
            .map(|u| {
                let p = self.get(&u.code);
                if !p.is_known() {
                    warn!(unit = %u.code, "no population figure for unit");
                }
                u.with_population(p)
            })
            .collect()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a population table from a CSV file.
pub fn load_population_csv(path: &Path) -> DemandResult<PopulationTable> {
    let file = std::fs::File::open(path).map_err(DemandError::Io)?;
    load_population_reader(file)
}

/// Like [`load_population_csv`] but accepts any `Read` source.
pub fn load_population_reader<R: Read>(reader: R) -> DemandResult<PopulationTable> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut by_code = HashMap::new();

    for result in csv_reader.deserialize::<PopulationRecord>() {
        let row = result.map_err(|e| DemandError::Parse(e.to_string()))?;
        let code = row.code.trim().to_owned();
        if code.is_empty() {
            return Err(DemandError::Parse("row with empty unit code".into()));
        }
        if by_code.insert(code.clone(), Population::from(row.population)).is_some() {
            return Err(DemandError::Parse(format!("duplicate unit code {code:?}")));
        }
    }

    debug!(units = by_code.len(), "loaded population table");
    Ok(PopulationTable { by_code })
}
