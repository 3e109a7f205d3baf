use crate::error::SqlNodeError;
use crate::operation::{DescribeTable, OperationKind, SelectRows};
use crate::sql_text::validate_identifier;

use super::StatementPlan;
use super::dml::column_names;

/// Catalog query behind `listTables`; internal `sqlite_` and `libsql_` tables are hidden.
pub const LIST_TABLES_SQL: &str = "SELECT name FROM sqlite_master WHERE type = 'table' \
     AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
     AND name NOT LIKE 'libsql\\_%' ESCAPE '\\' \
     ORDER BY name";

pub(super) fn select_rows(op: &SelectRows) -> Result<StatementPlan, SqlNodeError> {
    let table = validate_identifier("table", &op.table)?;
    let column_clause = if op.all_columns {
        "*".to_string()
    } else {
        column_names(&op.columns)?.join(", ")
    };

    let mut sql = format!("SELECT {column_clause} FROM {table}");
    let mut params = Vec::new();

    if let Some(clause) = op.where_clause.as_deref().map(str::trim)
        && !clause.is_empty()
    {
        sql.push_str(" WHERE ");
        sql.push_str(clause);
        params.extend(op.where_args.iter().cloned());
    }

    if let Some(order_by) = &op.order_by {
        let column = validate_identifier("order by column", &order_by.column)?;
        sql.push_str(&format!(" ORDER BY {column} {}", order_by.direction.as_sql()));
    }

    if let Some(pagination) = op.pagination {
        if pagination.limit <= 0 {
            return Err(SqlNodeError::validation(format!(
                "limit must be greater than 0, got {}",
                pagination.limit
            )));
        }
        if pagination.offset < 0 {
            return Err(SqlNodeError::validation(format!(
                "offset must not be negative, got {}",
                pagination.offset
            )));
        }
        sql.push_str(&format!(" LIMIT {}", pagination.limit));
        if pagination.offset > 0 {
            sql.push_str(&format!(" OFFSET {}", pagination.offset));
        }
    }

    let mut plan = StatementPlan::new(OperationKind::SelectRows);
    plan.push(sql, params)?;
    Ok(plan)
}

pub(super) fn list_tables() -> Result<StatementPlan, SqlNodeError> {
    let mut plan = StatementPlan::new(OperationKind::ListTables);
    plan.push(LIST_TABLES_SQL, Vec::new())?;
    Ok(plan)
}

pub(super) fn describe_table(op: &DescribeTable) -> Result<StatementPlan, SqlNodeError> {
    // PRAGMA arguments cannot be bound, so the name is spliced in after validation.
    let table = validate_identifier("table", &op.table)?;
    let mut plan = StatementPlan::new(OperationKind::DescribeTable);
    plan.push(format!("PRAGMA table_info({table})"), Vec::new())?;
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{OrderBy, Pagination, SortDirection};
    use crate::types::RowValues;

    fn select(columns: &[&str]) -> SelectRows {
        SelectRows {
            table: "t".into(),
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            ..SelectRows::default()
        }
    }

    fn sql_of(plan: &StatementPlan) -> &str {
        &plan.statements()[0].query
    }

    #[test]
    fn limit_without_offset() {
        let mut op = select(&["a"]);
        op.pagination = Some(Pagination { limit: 10, offset: 0 });
        assert_eq!(sql_of(&select_rows(&op).unwrap()), "SELECT a FROM t LIMIT 10");
    }

    #[test]
    fn full_clause_order() {
        let mut op = select(&["a", "b"]);
        op.where_clause = Some("a > ? AND b = ?".into());
        op.where_args = vec![RowValues::Int(1), RowValues::Text("x".into())];
        op.order_by = Some(OrderBy {
            column: "b".into(),
            direction: SortDirection::Desc,
        });
        op.pagination = Some(Pagination { limit: 5, offset: 15 });
        let plan = select_rows(&op).unwrap();
        assert_eq!(
            sql_of(&plan),
            "SELECT a, b FROM t WHERE a > ? AND b = ? ORDER BY b DESC LIMIT 5 OFFSET 15"
        );
        assert_eq!(plan.statements()[0].params, op.where_args);
    }

    #[test]
    fn wildcard_ignores_column_list() {
        let mut op = select(&["a", "bad name"]);
        op.all_columns = true;
        assert_eq!(sql_of(&select_rows(&op).unwrap()), "SELECT * FROM t");
    }

    #[test]
    fn empty_columns_without_wildcard_fail() {
        assert!(select_rows(&select(&[])).is_err());
    }

    #[test]
    fn blank_where_clause_is_omitted() {
        let mut op = select(&["a"]);
        op.where_clause = Some("  ".into());
        assert_eq!(sql_of(&select_rows(&op).unwrap()), "SELECT a FROM t");
    }

    #[test]
    fn rejects_bad_limits_and_order_columns() {
        let mut op = select(&["a"]);
        op.pagination = Some(Pagination { limit: 0, offset: 0 });
        assert!(select_rows(&op).is_err());

        op.pagination = Some(Pagination { limit: 1, offset: -1 });
        assert!(select_rows(&op).is_err());

        op.pagination = None;
        op.order_by = Some(OrderBy {
            column: "a; drop table t".into(),
            direction: SortDirection::Asc,
        });
        assert!(select_rows(&op).is_err());
    }

    #[test]
    fn list_tables_has_no_placeholders() {
        let plan = list_tables().unwrap();
        assert_eq!(plan.len(), 1);
        assert!(sql_of(&plan).starts_with("SELECT name FROM sqlite_master"));
        assert!(plan.statements()[0].params.is_empty());
    }

    #[test]
    fn describe_table_validates_name() {
        let ok = describe_table(&DescribeTable { table: "users".into() }).unwrap();
        assert_eq!(sql_of(&ok), "PRAGMA table_info(users)");
        assert!(describe_table(&DescribeTable { table: "users)".into() }).is_err());
    }
}
