//! # Mock Dataset Decoding
//!
//! The mock data flow returns its rows as a JSON-encoded string; this module
//! is the caller-side decoder that turns that string into a typed row
//! sequence. Decoding failures are a `DataFormatError`, which is recoverable:
//! the generated SQL remains usable even when the dataset does not.

use serde_json::{Map, Value};
use thiserror::Error;

/// A single fabricated result row: a mapping from column name to value.
pub type MockRow = Map<String, Value>;

/// The mock data string could not be decoded into a row sequence.
#[derive(Error, Debug)]
pub enum DataFormatError {
    #[error("mock data is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("mock data is not a JSON array of objects")]
    NotAnArrayOfObjects,
}

/// A decoded sequence of fabricated result rows.
///
/// Rows should all share the same set of column names, but the model is not
/// guaranteed to honor that; [`MockDataset::has_consistent_columns`] reports
/// whether the invariant actually holds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MockDataset {
    rows: Vec<MockRow>,
}

impl MockDataset {
    /// Decodes a JSON-encoded array of objects into a dataset.
    pub fn parse(mock_data: &str) -> Result<Self, DataFormatError> {
        let value: Value = serde_json::from_str(mock_data)?;
        let items = value
            .as_array()
            .ok_or(DataFormatError::NotAnArrayOfObjects)?;

        let rows = items
            .iter()
            .map(|item| {
                item.as_object()
                    .cloned()
                    .ok_or(DataFormatError::NotAnArrayOfObjects)
            })
            .collect::<Result<Vec<MockRow>, _>>()?;

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[MockRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The column names of the first row; empty for an empty dataset.
    pub fn columns(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether every row carries exactly the first row's column set.
    ///
    /// A jagged dataset still renders, but a client should surface a warning
    /// instead of silently drawing a ragged table.
    pub fn has_consistent_columns(&self) -> bool {
        let Some(first) = self.rows.first() else {
            return true;
        };
        let reference: Vec<&String> = first.keys().collect();
        self.rows
            .iter()
            .all(|row| row.keys().collect::<Vec<_>>() == reference)
    }
}
