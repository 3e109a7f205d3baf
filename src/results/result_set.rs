use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::row::{CustomDbRow, index_columns};
use crate::types::RowValues;

/// Row id reported after an insert. Remote services may send it as a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastInsertRowid {
    Int(i64),
    Text(String),
}

impl LastInsertRowid {
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            LastInsertRowid::Int(id) => JsonValue::from(*id),
            LastInsertRowid::Text(id) => JsonValue::String(id.clone()),
        }
    }
}

/// A normalized statement result.
///
/// Every row holds exactly one value per column; `add_row_values` pads or truncates to keep it
/// that way.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the statement
    pub results: Vec<CustomDbRow>,
    /// Rows changed by a mutation, when the database reported it
    pub rows_affected: Option<u64>,
    /// Row id of the last insert, when the database reported it
    pub last_insert_rowid: Option<LastInsertRowid>,
    column_names: Arc<Vec<String>>,
    column_index: Arc<HashMap<String, usize>>,
}

impl ResultSet {
    /// Create a new result set with a known capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            ..ResultSet::default()
        }
    }

    /// Set the column names shared by all rows. Rows already added keep their old columns.
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index = Arc::new(index_columns(&column_names));
        self.column_names = column_names;
    }

    /// Get the column names for this result set
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Add a row, aligning it to the column count.
    pub fn add_row_values(&mut self, mut row_values: Vec<RowValues>) {
        row_values.resize(self.column_names.len(), RowValues::Null);
        self.results.push(CustomDbRow {
            column_names: Arc::clone(&self.column_names),
            rows: row_values,
            column_index_cache: Arc::clone(&self.column_index),
        });
    }

    /// Rows as JSON objects keyed by column name.
    #[must_use]
    pub fn to_json_rows(&self) -> Vec<JsonValue> {
        self.results.iter().map(CustomDbRow::to_json).collect()
    }
}

impl PartialEq for ResultSet {
    fn eq(&self, other: &Self) -> bool {
        self.column_names == other.column_names
            && self.results == other.results
            && self.rows_affected == other.rows_affected
            && self.last_insert_rowid == other.last_insert_rowid
    }
}
