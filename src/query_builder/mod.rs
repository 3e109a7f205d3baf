//! Statement builder: turns an [`OperationDescriptor`] into a [`StatementPlan`].
//!
//! Building is pure. It never talks to the database and fails only with
//! `SqlNodeError::Validation`.

use crate::error::SqlNodeError;
use crate::operation::{ExecuteBatch, ExecuteQuery, OperationDescriptor, OperationKind, split_params};
use crate::sql_text::parameter_count;
use crate::types::{QueryAndParams, RowValues};

mod dml;
mod select;

pub use select::LIST_TABLES_SQL;

/// Ordered statements to submit for one descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementPlan {
    pub operation: OperationKind,
    statements: Vec<QueryAndParams>,
}

impl StatementPlan {
    #[must_use]
    pub fn new(operation: OperationKind) -> Self {
        Self {
            operation,
            statements: Vec::new(),
        }
    }

    /// Append a statement, checking that its placeholders match `params`.
    ///
    /// # Errors
    /// Returns `SqlNodeError::Validation` when the statement expects a different number of
    /// arguments than supplied.
    pub fn push(
        &mut self,
        query: impl Into<String>,
        params: Vec<RowValues>,
    ) -> Result<(), SqlNodeError> {
        let query = query.into();
        let expected = parameter_count(&query);
        if expected != params.len() {
            return Err(SqlNodeError::validation(format!(
                "statement expects {expected} parameter(s) but {} were supplied: {query}",
                params.len()
            )));
        }
        self.statements.push(QueryAndParams::new(query, params));
        Ok(())
    }

    #[must_use]
    pub fn statements(&self) -> &[QueryAndParams] {
        &self.statements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    #[must_use]
    pub fn into_statements(self) -> Vec<QueryAndParams> {
        self.statements
    }
}

/// Build the statement plan for `descriptor`.
///
/// ```rust
/// use libsql_node::prelude::*;
///
/// let plan = build(&OperationDescriptor::DeleteRows(DeleteRows {
///     table: "t".into(),
///     where_clause: "id = ?".into(),
///     where_args: vec![RowValues::Text("5".into())],
/// }))?;
/// assert_eq!(plan.statements()[0].query, "DELETE FROM t WHERE id = ?");
/// # Ok::<(), SqlNodeError>(())
/// ```
///
/// # Errors
/// Returns `SqlNodeError::Validation` for missing or malformed descriptor fields.
pub fn build(descriptor: &OperationDescriptor) -> Result<StatementPlan, SqlNodeError> {
    match descriptor {
        OperationDescriptor::ExecuteQuery(op) => execute_query(op),
        OperationDescriptor::ExecuteBatch(op) => execute_batch(op),
        OperationDescriptor::InsertRows(op) => dml::insert_rows(op),
        OperationDescriptor::UpdateRows(op) => dml::update_rows(op),
        OperationDescriptor::DeleteRows(op) => dml::delete_rows(op),
        OperationDescriptor::SelectRows(op) => select::select_rows(op),
        OperationDescriptor::ListTables => select::list_tables(),
        OperationDescriptor::DescribeTable(op) => select::describe_table(op),
    }
}

fn execute_query(op: &ExecuteQuery) -> Result<StatementPlan, SqlNodeError> {
    if op.query.trim().is_empty() {
        return Err(SqlNodeError::validation("empty query"));
    }
    let mut plan = StatementPlan::new(OperationKind::ExecuteQuery);
    plan.push(op.query.clone(), op.params.clone())?;
    Ok(plan)
}

fn execute_batch(op: &ExecuteBatch) -> Result<StatementPlan, SqlNodeError> {
    if op.queries.is_empty() {
        return Err(SqlNodeError::validation("empty batch"));
    }
    let mut plan = StatementPlan::new(OperationKind::ExecuteBatch);
    for (index, entry) in op.queries.iter().enumerate() {
        if entry.query.trim().is_empty() {
            return Err(SqlNodeError::validation(format!(
                "empty query at batch entry {index}"
            )));
        }
        plan.push(entry.query.clone(), split_params(&entry.params))?;
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::BatchEntry;

    #[test]
    fn push_rejects_mismatched_params() {
        let mut plan = StatementPlan::new(OperationKind::ExecuteQuery);
        let err = plan
            .push("select ? + ?", vec![RowValues::Int(1)])
            .unwrap_err();
        assert!(err.to_string().contains("expects 2 parameter(s) but 1"));
        assert!(plan.is_empty());
    }

    #[test]
    fn execute_query_rejects_blank_text() {
        let op = ExecuteQuery {
            query: "   \n".into(),
            params: vec![],
        };
        assert!(matches!(execute_query(&op), Err(SqlNodeError::Validation(m)) if m == "empty query"));
    }

    #[test]
    fn batch_fails_as_a_whole_on_any_empty_query() {
        let op = ExecuteBatch {
            queries: vec![
                BatchEntry::new("insert into t values (?)", "1"),
                BatchEntry::new(" ", ""),
            ],
        };
        assert!(execute_batch(&op).is_err());
    }
}
