//! CSV input files. Rows are read as column-name to cell maps; short rows are
//! tolerated and missing cells behave like empty ones.

mod members;
mod scores;

pub use members::{IdentitySource, MemberRow, validate_member_header};
pub use scores::{
    MissingPercentage, problem_breakdown, snapshot_row, validate_ghost_score_header,
    validate_results_header,
};

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::{MigrateError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: HashMap<String, String>,
}

impl Row {
    pub fn new(cells: HashMap<String, String>) -> Self {
        Self { cells }
    }

    /// Trimmed cell value; `None` when the column is absent or the cell is empty.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn parse<T: FromStr>(&self, column: &str) -> Result<Option<T>> {
        self.get(column)
            .map(|raw| {
                raw.parse::<T>().map_err(|_| MigrateError::InvalidValue {
                    column: column.to_string(),
                    value: raw.to_string(),
                })
            })
            .transpose()
    }

    /// Like `parse::<f64>` but rejects `NaN` and infinities.
    pub fn parse_number(&self, column: &str) -> Result<Option<f64>> {
        match self.parse::<f64>(column)? {
            Some(number) if !number.is_finite() => Err(MigrateError::InvalidValue {
                column: column.to_string(),
                value: self.get(column).unwrap_or_default().to_string(),
            }),
            number => Ok(number),
        }
    }

    pub fn parse_bool(&self, column: &str) -> Result<Option<bool>> {
        self.get(column)
            .map(|raw| match raw.to_lowercase().as_str() {
                "1" | "true" | "yes" | "y" => Ok(true),
                "0" | "false" | "no" | "n" => Ok(false),
                _ => Err(MigrateError::InvalidValue {
                    column: column.to_string(),
                    value: raw.to_string(),
                }),
            })
            .transpose()
    }

    pub fn cells(&self) -> &HashMap<String, String> {
        &self.cells
    }
}

#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub header: Vec<String>,
    pub rows: Vec<Row>,
}

impl CsvTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let cells = header
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect();
            rows.push(Row::new(cells));
        }

        Ok(Self { header, rows })
    }

    pub fn open(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            MigrateError::setup(format!("Unable to read file \"{}\"", path.display()), e)
        })?;
        Self::from_reader(file)
    }
}
