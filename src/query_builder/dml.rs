use crate::error::SqlNodeError;
use crate::operation::{DeleteRows, InsertRows, OperationKind, UpdateRows};
use crate::sql_text::validate_identifier;

use super::StatementPlan;

pub(super) fn insert_rows(op: &InsertRows) -> Result<StatementPlan, SqlNodeError> {
    let table = validate_identifier("table", &op.table)?;
    let columns = column_names(&op.columns)?;
    let placeholders = vec!["?"; columns.len()].join(", ");
    let sql = format!(
        "INSERT INTO {table} ({}) VALUES ({placeholders})",
        columns.join(", ")
    );

    let mut plan = StatementPlan::new(OperationKind::InsertRows);
    for row in op.source.rows(&op.columns)? {
        plan.push(sql.clone(), row)?;
    }
    Ok(plan)
}

pub(super) fn update_rows(op: &UpdateRows) -> Result<StatementPlan, SqlNodeError> {
    let table = validate_identifier("table", &op.table)?;
    let columns = column_names(&op.columns)?;
    let where_clause = required_where(&op.where_clause)?;
    let assignments = columns
        .iter()
        .map(|column| format!("{column} = ?"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!("UPDATE {table} SET {assignments} WHERE {where_clause}");

    let mut plan = StatementPlan::new(OperationKind::UpdateRows);
    for mut row in op.source.rows(&op.columns)? {
        // SET placeholders precede the WHERE placeholders in the statement text.
        row.extend(op.where_args.iter().cloned());
        plan.push(sql.clone(), row)?;
    }
    Ok(plan)
}

pub(super) fn delete_rows(op: &DeleteRows) -> Result<StatementPlan, SqlNodeError> {
    let table = validate_identifier("table", &op.table)?;
    let where_clause = required_where(&op.where_clause)?;

    let mut plan = StatementPlan::new(OperationKind::DeleteRows);
    plan.push(
        format!("DELETE FROM {table} WHERE {where_clause}"),
        op.where_args.clone(),
    )?;
    Ok(plan)
}

pub(super) fn column_names(columns: &[String]) -> Result<Vec<&str>, SqlNodeError> {
    if columns.is_empty() {
        return Err(SqlNodeError::validation("missing columns"));
    }
    columns
        .iter()
        .map(|column| validate_identifier("column", column))
        .collect()
}

/// Update and delete always carry a condition.
fn required_where(clause: &str) -> Result<&str, SqlNodeError> {
    let clause = clause.trim();
    if clause.is_empty() {
        return Err(SqlNodeError::validation("missing where clause"));
    }
    Ok(clause)
}
