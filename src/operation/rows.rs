use serde_json::{Map, Value as JsonValue};

use crate::error::SqlNodeError;
use crate::types::RowValues;

/// Where the rows of an insert or update come from.
#[derive(Debug, Clone, PartialEq)]
pub enum RowSource {
    /// A flat list of values, `columns.len()` per row.
    Values(Vec<RowValues>),
    /// Records from upstream items. An item that is an array of records yields one row per record.
    Items(Vec<JsonValue>),
}

impl Default for RowSource {
    fn default() -> Self {
        RowSource::Values(Vec::new())
    }
}

impl RowSource {
    /// Resolve the source into rows aligned with `columns`.
    ///
    /// # Errors
    /// Returns `SqlNodeError::Validation` when values cannot be grouped evenly or an item is not a
    /// record.
    pub fn rows(&self, columns: &[String]) -> Result<Vec<Vec<RowValues>>, SqlNodeError> {
        match self {
            RowSource::Values(values) => chunk_values(values, columns.len()),
            RowSource::Items(items) => rows_from_items(items, columns),
        }
    }
}

/// Group a flat value list into rows of `width` values.
///
/// Precondition: `width > 0` and `values.len()` is an exact multiple of `width`. Both are checked
/// and reported as validation errors; an empty list yields no rows.
///
/// # Errors
/// Returns `SqlNodeError::Validation` when the precondition does not hold.
pub fn chunk_values(
    values: &[RowValues],
    width: usize,
) -> Result<Vec<Vec<RowValues>>, SqlNodeError> {
    if width == 0 {
        return Err(SqlNodeError::validation("no columns to group values into"));
    }
    if values.len() % width != 0 {
        return Err(SqlNodeError::validation(format!(
            "{} values cannot be split into rows of {width} columns",
            values.len()
        )));
    }
    Ok(values.chunks_exact(width).map(<[RowValues]>::to_vec).collect())
}

/// Extract per-column values from record-like items. Missing keys become `Null`.
///
/// # Errors
/// Returns `SqlNodeError::Validation` when an item (or an entry of an array item) is not an
/// object.
pub fn rows_from_items(
    items: &[JsonValue],
    columns: &[String],
) -> Result<Vec<Vec<RowValues>>, SqlNodeError> {
    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            JsonValue::Object(record) => rows.push(project(record, columns)),
            JsonValue::Array(records) => {
                for record in records {
                    let JsonValue::Object(record) = record else {
                        return Err(SqlNodeError::validation(format!(
                            "item {index} contains an entry that is not a record"
                        )));
                    };
                    rows.push(project(record, columns));
                }
            }
            _ => {
                return Err(SqlNodeError::validation(format!(
                    "item {index} is not a record"
                )));
            }
        }
    }
    Ok(rows)
}

fn project(record: &Map<String, JsonValue>, columns: &[String]) -> Vec<RowValues> {
    columns
        .iter()
        .map(|column| record.get(column).map_or(RowValues::Null, RowValues::from_json))
        .collect()
}
