//! Operation descriptors: the closed set of things a node invocation can ask for.
//!
//! Descriptors deserialize from the host's JSON configuration (`"operation": "insertRows"`,
//! camelCase fields) and are then handed to [`crate::query_builder::build`].

use std::fmt;

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::SqlNodeError;
use crate::types::RowValues;

pub mod params;
mod rows;

pub use params::split_params;
pub use rows::{RowSource, chunk_values, rows_from_items};

/// One invocation's worth of work.
///
/// ```rust
/// use libsql_node::prelude::*;
///
/// let descriptor = OperationDescriptor::from_json_str(
///     r#"{"operation": "deleteRows", "table": "t", "whereClause": "id = ?", "whereArgs": "5"}"#,
/// )?;
/// assert_eq!(descriptor.kind(), OperationKind::DeleteRows);
/// # Ok::<(), SqlNodeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "operation", rename_all = "camelCase")]
pub enum OperationDescriptor {
    ExecuteQuery(ExecuteQuery),
    ExecuteBatch(ExecuteBatch),
    InsertRows(InsertRows),
    UpdateRows(UpdateRows),
    DeleteRows(DeleteRows),
    SelectRows(SelectRows),
    ListTables,
    DescribeTable(DescribeTable),
}

impl OperationDescriptor {
    #[must_use]
    pub fn kind(&self) -> OperationKind {
        match self {
            OperationDescriptor::ExecuteQuery(_) => OperationKind::ExecuteQuery,
            OperationDescriptor::ExecuteBatch(_) => OperationKind::ExecuteBatch,
            OperationDescriptor::InsertRows(_) => OperationKind::InsertRows,
            OperationDescriptor::UpdateRows(_) => OperationKind::UpdateRows,
            OperationDescriptor::DeleteRows(_) => OperationKind::DeleteRows,
            OperationDescriptor::SelectRows(_) => OperationKind::SelectRows,
            OperationDescriptor::ListTables => OperationKind::ListTables,
            OperationDescriptor::DescribeTable(_) => OperationKind::DescribeTable,
        }
    }

    /// Parse a descriptor from host configuration.
    ///
    /// # Errors
    /// Returns `SqlNodeError::Validation` when the configuration has the wrong shape.
    pub fn from_json(value: JsonValue) -> Result<Self, SqlNodeError> {
        serde_json::from_value(value)
            .map_err(|e| SqlNodeError::validation(format!("invalid operation descriptor: {e}")))
    }

    /// Parse a descriptor from a JSON string.
    ///
    /// # Errors
    /// Returns `SqlNodeError::Validation` when the text is not a valid descriptor.
    pub fn from_json_str(text: &str) -> Result<Self, SqlNodeError> {
        serde_json::from_str(text)
            .map_err(|e| SqlNodeError::validation(format!("invalid operation descriptor: {e}")))
    }
}

/// Fieldless discriminant of [`OperationDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    ExecuteQuery,
    ExecuteBatch,
    InsertRows,
    UpdateRows,
    DeleteRows,
    SelectRows,
    ListTables,
    DescribeTable,
}

impl OperationKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::ExecuteQuery => "executeQuery",
            OperationKind::ExecuteBatch => "executeBatch",
            OperationKind::InsertRows => "insertRows",
            OperationKind::UpdateRows => "updateRows",
            OperationKind::DeleteRows => "deleteRows",
            OperationKind::SelectRows => "selectRows",
            OperationKind::ListTables => "listTables",
            OperationKind::DescribeTable => "describeTable",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecuteQuery {
    pub query: String,
    #[serde(deserialize_with = "params::param_list")]
    pub params: Vec<RowValues>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExecuteBatch {
    pub queries: Vec<BatchEntry>,
}

/// One statement of a batch. `params` is the raw comma-separated string.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BatchEntry {
    pub query: String,
    pub params: String,
}

impl BatchEntry {
    pub fn new(query: impl Into<String>, params: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: params.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "RowsConfig")]
pub struct InsertRows {
    pub table: String,
    pub columns: Vec<String>,
    pub source: RowSource,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "RowsConfig")]
pub struct UpdateRows {
    pub table: String,
    pub columns: Vec<String>,
    pub source: RowSource,
    /// Raw SQL condition inserted after `WHERE`.
    pub where_clause: String,
    pub where_args: Vec<RowValues>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteRows {
    pub table: String,
    pub where_clause: String,
    #[serde(deserialize_with = "params::param_list")]
    pub where_args: Vec<RowValues>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "SelectConfig")]
pub struct SelectRows {
    pub table: String,
    pub columns: Vec<String>,
    /// Select `*`; `columns` is ignored when set.
    pub all_columns: bool,
    pub where_clause: Option<String>,
    pub where_args: Vec<RowValues>,
    pub order_by: Option<OrderBy>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = SqlNodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            other => Err(SqlNodeError::validation(format!(
                "invalid sort direction `{other}`"
            ))),
        }
    }
}

/// `LIMIT`/`OFFSET` literals. Validated by the builder, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DescribeTable {
    pub table: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RowsConfig {
    table: String,
    #[serde(deserialize_with = "params::column_list")]
    columns: Vec<String>,
    #[serde(deserialize_with = "optional_param_list")]
    values: Option<Vec<RowValues>>,
    items: Option<Vec<JsonValue>>,
    where_clause: String,
    #[serde(deserialize_with = "params::param_list")]
    where_args: Vec<RowValues>,
}

impl RowsConfig {
    fn source(
        values: Option<Vec<RowValues>>,
        items: Option<Vec<JsonValue>>,
    ) -> Result<RowSource, String> {
        match (values, items) {
            (Some(_), Some(_)) => Err("specify either `values` or `items`, not both".to_string()),
            (None, Some(items)) => Ok(RowSource::Items(items)),
            (values, None) => Ok(RowSource::Values(values.unwrap_or_default())),
        }
    }
}

fn optional_param_list<'de, D>(deserializer: D) -> Result<Option<Vec<RowValues>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    params::param_list(deserializer).map(Some)
}

impl TryFrom<RowsConfig> for InsertRows {
    type Error = String;

    fn try_from(config: RowsConfig) -> Result<Self, Self::Error> {
        Ok(InsertRows {
            source: RowsConfig::source(config.values, config.items)?,
            table: config.table,
            columns: config.columns,
        })
    }
}

impl TryFrom<RowsConfig> for UpdateRows {
    type Error = String;

    fn try_from(config: RowsConfig) -> Result<Self, Self::Error> {
        Ok(UpdateRows {
            source: RowsConfig::source(config.values, config.items)?,
            table: config.table,
            columns: config.columns,
            where_clause: config.where_clause,
            where_args: config.where_args,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SelectConfig {
    table: String,
    #[serde(deserialize_with = "params::column_list")]
    columns: Vec<String>,
    #[serde(alias = "returnAllColumns", alias = "selectAll")]
    all_columns: bool,
    where_clause: String,
    #[serde(deserialize_with = "params::param_list")]
    where_args: Vec<RowValues>,
    order_by: String,
    order_direction: String,
    use_limit: bool,
    #[serde(deserialize_with = "params::count")]
    limit: Option<i64>,
    #[serde(deserialize_with = "params::count")]
    offset: Option<i64>,
}

impl TryFrom<SelectConfig> for SelectRows {
    type Error = String;

    fn try_from(config: SelectConfig) -> Result<Self, Self::Error> {
        let order_by = if config.order_by.trim().is_empty() {
            None
        } else {
            let direction = config
                .order_direction
                .parse::<SortDirection>()
                .map_err(|e| e.to_string())?;
            Some(OrderBy {
                column: config.order_by.trim().to_string(),
                direction,
            })
        };
        let pagination = config.use_limit.then(|| Pagination {
            limit: config.limit.unwrap_or(0),
            offset: config.offset.unwrap_or(0),
        });
        let where_clause = Some(config.where_clause).filter(|clause| !clause.trim().is_empty());

        Ok(SelectRows {
            table: config.table,
            columns: config.columns,
            all_columns: config.all_columns,
            where_clause,
            where_args: config.where_args,
            order_by,
            pagination,
        })
    }
}
