//! Rust structs that represent database table mappings.
//!
//! `BreweryRow` is the typed view of one row of the `craft` table. Rows come
//! back from the store adapter as generic fixed-width value lists and are
//! decoded here before any report logic sees them.

use adapters::{Row, Value};
use thiserror::Error;

/// Report years, most recent first. Matches the column order of the table.
pub const YEARS: [u16; 10] = [2017, 2016, 2015, 2014, 2013, 2012, 2011, 2010, 2009, 2008];

pub const YEAR_COUNT: usize = YEARS.len();

/// Number of leading years summed for ranking.
pub const RANKING_YEARS: usize = 5;

/// `company`, `state`, then one column per year.
pub const COLUMN_COUNT: usize = 2 + YEAR_COUNT;

/// Year labels as shown on charts, in column order.
pub fn year_labels() -> Vec<String> {
    YEARS.iter().map(u16::to_string).collect()
}

/// Column name holding the barrel count of a given year.
pub fn barrels_column(year: u16) -> String {
    format!("barrels{year}")
}

#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("expected {expected} columns, got {found}")]
    Width { expected: usize, found: usize },

    #[error("column {column} should be {expected}, found {found}")]
    Type {
        column: usize,
        expected: &'static str,
        found: String,
    },
}

/// One company's yearly barrel production.
#[derive(Debug, Clone, PartialEq)]
pub struct BreweryRow {
    pub company: String,
    pub state: String,
    /// Indexed like [`YEARS`]; `None` where the year has no figure.
    pub barrels: [Option<f64>; YEAR_COUNT],
}

impl BreweryRow {
    /// Sum of the ranking years, `None` if any of them is missing.
    pub fn recent_total(&self) -> Option<f64> {
        self.barrels[..RANKING_YEARS]
            .iter()
            .copied()
            .sum::<Option<f64>>()
            .filter(|total| !total.is_nan())
    }
}

fn text_column(value: &Value, column: usize) -> Result<String, DecodeError> {
    match value {
        Value::Text(text) => Ok(text.clone()),
        Value::Null => Ok(String::new()),
        other => Err(DecodeError::Type {
            column,
            expected: "text",
            found: other.to_string(),
        }),
    }
}

fn number_column(value: &Value, column: usize) -> Result<Option<f64>, DecodeError> {
    match value {
        Value::Null => Ok(None),
        other => other.as_real().map(Some).ok_or_else(|| DecodeError::Type {
            column,
            expected: "number",
            found: other.to_string(),
        }),
    }
}

impl TryFrom<&Row> for BreweryRow {
    type Error = DecodeError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        let values = row.values();
        if values.len() != COLUMN_COUNT {
            return Err(DecodeError::Width {
                expected: COLUMN_COUNT,
                found: values.len(),
            });
        }

        let mut barrels = [None; YEAR_COUNT];
        for (offset, slot) in barrels.iter_mut().enumerate() {
            let column = offset + 2;
            *slot = number_column(&values[column], column)?;
        }

        Ok(Self {
            company: text_column(&values[0], 0)?,
            state: text_column(&values[1], 1)?,
            barrels,
        })
    }
}
