use clap::ValueEnum;
use serde_json::{Map, Value as JsonValue, json};

use crate::error::SqlNodeError;
use crate::operation::OperationKind;
use crate::results::ResultSet;

/// What to do when an item fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FailurePolicy {
    /// Abort the remaining items and return the error.
    #[default]
    FailFast,
    /// Emit an error record for the item and keep going.
    Continue,
}

/// An item failure rendered for the output stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    /// `validation`, `capability`, `config` or `unknown`
    pub kind: &'static str,
    pub message: String,
    pub code: Option<String>,
    pub statement: Option<String>,
}

impl From<&SqlNodeError> for ErrorRecord {
    fn from(err: &SqlNodeError) -> Self {
        let (code, statement, message) = match err {
            SqlNodeError::Capability {
                code,
                statement,
                message,
                ..
            } => (code.clone(), statement.clone(), message.clone()),
            other => (None, None, other.to_string()),
        };
        ErrorRecord {
            kind: err.kind(),
            message,
            code,
            statement,
        }
    }
}

impl ErrorRecord {
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        let mut record = Map::new();
        record.insert("error".into(), JsonValue::String(self.message.clone()));
        record.insert("kind".into(), JsonValue::String(self.kind.to_string()));
        if let Some(code) = &self.code {
            record.insert("code".into(), JsonValue::String(code.clone()));
        }
        if let Some(statement) = &self.statement {
            record.insert("statement".into(), JsonValue::String(statement.clone()));
        }
        JsonValue::Object(record)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    /// One result set per submitted statement, in plan order.
    Completed(Vec<ResultSet>),
    Failed(ErrorRecord),
}

/// Output for one input work item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemOutput {
    /// Index of the originating input item.
    pub item_index: usize,
    pub operation: OperationKind,
    pub outcome: ItemOutcome,
}

impl ItemOutput {
    /// Render as host items: `{ "json": { .. }, "pairedItem": { "item": n } }`.
    ///
    /// Rows become one item each. A result without rows but with mutation counters becomes a
    /// single summary item. A statement that returned neither rows, columns nor counters becomes
    /// `{ "success": true }`; a query that matched nothing emits no items.
    #[must_use]
    pub fn to_host_items(&self) -> Vec<JsonValue> {
        let paired = json!({ "item": self.item_index });
        let wrap = |data: JsonValue| json!({ "json": data, "pairedItem": paired.clone() });

        match &self.outcome {
            ItemOutcome::Failed(record) => vec![wrap(record.to_json())],
            ItemOutcome::Completed(results) => results
                .iter()
                .flat_map(|result_set| result_items(result_set).into_iter().map(&wrap))
                .collect(),
        }
    }
}

/// Flatten a run's outputs into one host item stream.
#[must_use]
pub fn host_items(outputs: &[ItemOutput]) -> Vec<JsonValue> {
    outputs.iter().flat_map(ItemOutput::to_host_items).collect()
}

fn result_items(result_set: &ResultSet) -> Vec<JsonValue> {
    if !result_set.results.is_empty() {
        return result_set.to_json_rows();
    }

    let mut summary = Map::new();
    if let Some(rows_affected) = result_set.rows_affected {
        summary.insert("rowsAffected".into(), JsonValue::from(rows_affected));
    }
    if let Some(rowid) = &result_set.last_insert_rowid {
        summary.insert("lastInsertRowid".into(), rowid.to_json());
    }
    if !summary.is_empty() {
        return vec![JsonValue::Object(summary)];
    }
    if result_set.column_names().is_empty() {
        return vec![json!({ "success": true })];
    }
    Vec::new()
}
