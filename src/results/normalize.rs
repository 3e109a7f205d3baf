//! Result normalizer: coalesces whatever an execution capability returned into a [`ResultSet`].
//!
//! Nothing in here fails. Sparse responses (mutations without columns, services that omit
//! optional counters) degrade to empty or absent fields.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};

use super::result_set::{LastInsertRowid, ResultSet};
use crate::types::RowValues;

/// Column descriptor as returned by a capability.
#[derive(Debug, Clone, PartialEq)]
pub enum RawColumn {
    /// A bare column name.
    Name(String),
    /// A structured descriptor such as `{ "name": "id", "decltype": "INTEGER" }`.
    Described {
        name: Option<String>,
        decltype: Option<String>,
    },
}

impl RawColumn {
    fn into_name(self, index: usize) -> String {
        match self {
            RawColumn::Name(name) | RawColumn::Described { name: Some(name), .. } => name,
            RawColumn::Described { name: None, .. } => format!("column_{index}"),
        }
    }
}

/// Row as returned by a capability.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRow {
    /// Values in column order.
    Positional(Vec<RowValues>),
    /// Values keyed by column name.
    Keyed(Vec<(String, RowValues)>),
}

/// Unnormalized response of one statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawResult {
    pub columns: Option<Vec<RawColumn>>,
    pub rows: Option<Vec<RawRow>>,
    pub rows_affected: Option<u64>,
    pub last_insert_rowid: Option<LastInsertRowid>,
}

impl RawResult {
    /// Read a JSON response. Accepts camelCase and snake_case field names; anything
    /// unrecognized is ignored.
    #[must_use]
    pub fn from_json(value: &JsonValue) -> Self {
        let Some(object) = value.as_object() else {
            return RawResult::default();
        };

        let columns = field(object, &["columns", "cols"])
            .and_then(JsonValue::as_array)
            .map(|columns| columns.iter().map(raw_column).collect());
        let rows = field(object, &["rows"])
            .and_then(JsonValue::as_array)
            .map(|rows| rows.iter().map(raw_row).collect());
        let rows_affected = field(
            object,
            &["rowsAffected", "rows_affected", "affectedRowCount", "affected_row_count"],
        )
        .and_then(json_u64);
        let last_insert_rowid =
            field(object, &["lastInsertRowid", "last_insert_rowid"]).and_then(|id| match id {
                JsonValue::Number(n) => n.as_i64().map(LastInsertRowid::Int),
                JsonValue::String(s) => Some(LastInsertRowid::Text(s.clone())),
                _ => None,
            });

        RawResult {
            columns,
            rows,
            rows_affected,
            last_insert_rowid,
        }
    }
}

impl From<&ResultSet> for RawResult {
    fn from(result_set: &ResultSet) -> Self {
        RawResult {
            columns: Some(
                result_set
                    .column_names()
                    .iter()
                    .cloned()
                    .map(RawColumn::Name)
                    .collect(),
            ),
            rows: Some(
                result_set
                    .results
                    .iter()
                    .map(|row| RawRow::Positional(row.rows.clone()))
                    .collect(),
            ),
            rows_affected: result_set.rows_affected,
            last_insert_rowid: result_set.last_insert_rowid.clone(),
        }
    }
}

/// Normalize a capability response.
///
/// Columns are coalesced to names; when none are declared they are derived from the rows.
/// Positional rows are zipped with the columns and keyed rows projected onto them, so every row
/// ends up with exactly one value per column.
#[must_use]
pub fn normalize(raw: RawResult) -> ResultSet {
    let rows = raw.rows.unwrap_or_default();
    let mut columns: Vec<String> = raw
        .columns
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, column)| column.into_name(i))
        .collect();
    if columns.is_empty() {
        columns = derive_columns(&rows);
    }
    dedupe_columns(&mut columns);

    let columns = Arc::new(columns);
    let mut result_set = ResultSet::with_capacity(rows.len());
    result_set.set_column_names(Arc::clone(&columns));

    for row in rows {
        let values = match row {
            RawRow::Positional(values) => values,
            RawRow::Keyed(pairs) => columns
                .iter()
                .map(|column| {
                    pairs
                        .iter()
                        .find(|(name, _)| name == column)
                        .map_or(RowValues::Null, |(_, value)| value.clone())
                })
                .collect(),
        };
        result_set.add_row_values(values);
    }

    result_set.rows_affected = raw.rows_affected;
    result_set.last_insert_rowid = raw.last_insert_rowid;
    result_set
}

fn derive_columns(rows: &[RawRow]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut width = 0;
    for row in rows {
        match row {
            RawRow::Keyed(pairs) => {
                for (name, _) in pairs {
                    if !names.contains(name) {
                        names.push(name.clone());
                    }
                }
            }
            RawRow::Positional(values) => width = width.max(values.len()),
        }
    }
    for i in names.len()..width {
        names.push(format!("column_{i}"));
    }
    names
}

/// Rename repeated names (`SELECT a, a`, joins) to `a_1`, `a_2`, ... so row records keep one key
/// per column.
fn dedupe_columns(columns: &mut [String]) {
    let mut seen: HashSet<String> = HashSet::with_capacity(columns.len());
    for i in 0..columns.len() {
        if seen.insert(columns[i].clone()) {
            continue;
        }
        let mut suffix = 1;
        let renamed = loop {
            let candidate = format!("{}_{suffix}", columns[i]);
            if !seen.contains(&candidate) && !columns[i + 1..].contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        seen.insert(renamed.clone());
        columns[i] = renamed;
    }
}

fn field<'a>(object: &'a Map<String, JsonValue>, names: &[&str]) -> Option<&'a JsonValue> {
    names
        .iter()
        .find_map(|name| object.get(*name))
        .filter(|value| !value.is_null())
}

fn json_u64(value: &JsonValue) -> Option<u64> {
    match value {
        JsonValue::Number(n) => n.as_u64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn raw_column(value: &JsonValue) -> RawColumn {
    match value {
        JsonValue::String(name) => RawColumn::Name(name.clone()),
        JsonValue::Object(descriptor) => RawColumn::Described {
            name: descriptor
                .get("name")
                .and_then(JsonValue::as_str)
                .map(str::to_string),
            decltype: descriptor
                .get("decltype")
                .or_else(|| descriptor.get("type"))
                .and_then(JsonValue::as_str)
                .map(str::to_string),
        },
        _ => RawColumn::Described {
            name: None,
            decltype: None,
        },
    }
}

fn raw_row(value: &JsonValue) -> RawRow {
    match value {
        JsonValue::Array(values) => RawRow::Positional(values.iter().map(RowValues::from_json).collect()),
        JsonValue::Object(record) => RawRow::Keyed(
            record
                .iter()
                .map(|(name, value)| (name.clone(), RowValues::from_json(value)))
                .collect(),
        ),
        other => RawRow::Positional(vec![RowValues::from_json(other)]),
    }
}
