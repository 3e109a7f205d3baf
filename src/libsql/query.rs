use deadpool_libsql::libsql::{Row, Rows, Value};

use crate::executor::CapabilityFailure;
use crate::results::{RawColumn, RawResult, RawRow};
use crate::types::RowValues;

/// Drain libsql rows into a raw result.
///
/// # Errors
/// Returns `CapabilityFailure::Rejected` if stepping the statement or reading a value fails.
pub async fn build_raw_result(mut rows: Rows) -> Result<RawResult, CapabilityFailure> {
    let column_count = rows.column_count();
    let columns: Vec<RawColumn> = (0..column_count)
        .map(|i| match rows.column_name(i) {
            Some(name) => RawColumn::Name(name.to_string()),
            None => RawColumn::Described {
                name: None,
                decltype: None,
            },
        })
        .collect();

    let mut raw_rows = Vec::new();
    while let Some(row) = rows
        .next()
        .await
        .map_err(|e| super::executor::rejected(e, "Failed to get next row"))?
    {
        let mut row_values = Vec::with_capacity(columns.len());
        for idx in 0..column_count {
            row_values.push(libsql_extract_value(&row, idx)?);
        }
        raw_rows.push(RawRow::Positional(row_values));
    }

    Ok(RawResult {
        columns: Some(columns),
        rows: Some(raw_rows),
        rows_affected: None,
        last_insert_rowid: None,
    })
}

/// Extract a `RowValues` from a libsql row at the given index
fn libsql_extract_value(row: &Row, idx: i32) -> Result<RowValues, CapabilityFailure> {
    let value = row.get_value(idx).map_err(|e| {
        super::executor::rejected(e, &format!("Failed to get value at index {idx}"))
    })?;

    Ok(match value {
        Value::Null => RowValues::Null,
        Value::Integer(i) => RowValues::Int(i),
        Value::Real(f) => RowValues::Float(f),
        Value::Text(s) => RowValues::Text(s),
        Value::Blob(bytes) => RowValues::Blob(bytes),
    })
}
