use libsql_node::prelude::*;
use serde_json::json;

fn text(values: &[&str]) -> Vec<RowValues> {
    values.iter().map(|v| RowValues::Text((*v).to_string())).collect()
}

#[test]
fn insert_two_rows_from_manual_values() -> Result<(), SqlNodeError> {
    let descriptor = OperationDescriptor::from_json(json!({
        "operation": "insertRows",
        "table": "t",
        "columns": "id, name",
        "values": "1, a, 2, b",
    }))?;
    let plan = build(&descriptor)?;

    assert_eq!(plan.operation, OperationKind::InsertRows);
    assert_eq!(
        plan.statements(),
        [
            QueryAndParams::new("INSERT INTO t (id, name) VALUES (?, ?)", text(&["1", "a"])),
            QueryAndParams::new("INSERT INTO t (id, name) VALUES (?, ?)", text(&["2", "b"])),
        ]
    );
    Ok(())
}

#[test]
fn insert_from_items_projects_columns() -> Result<(), SqlNodeError> {
    let descriptor = OperationDescriptor::from_json(json!({
        "operation": "insertRows",
        "table": "people",
        "columns": ["id", "name"],
        "items": [{"id": 1, "name": "ann", "extra": true}, {"id": 2}],
    }))?;
    let plan = build(&descriptor)?;

    assert_eq!(plan.len(), 2);
    assert_eq!(
        plan.statements()[0].params,
        vec![RowValues::Int(1), RowValues::Text("ann".into())]
    );
    assert_eq!(plan.statements()[1].params, vec![RowValues::Int(2), RowValues::Null]);
    Ok(())
}

#[test]
fn uneven_values_are_rejected() {
    let descriptor = OperationDescriptor::InsertRows(InsertRows {
        table: "t".into(),
        columns: vec!["a".into(), "b".into()],
        source: RowSource::Values(text(&["1", "2", "3"])),
    });
    assert!(matches!(build(&descriptor), Err(SqlNodeError::Validation(_))));
}

#[test]
fn empty_value_list_builds_nothing() -> Result<(), SqlNodeError> {
    let descriptor = OperationDescriptor::InsertRows(InsertRows {
        table: "t".into(),
        columns: vec!["a".into()],
        source: RowSource::Values(Vec::new()),
    });
    assert!(build(&descriptor)?.is_empty());
    Ok(())
}

#[test]
fn update_binds_row_values_before_where_args() -> Result<(), SqlNodeError> {
    let descriptor = OperationDescriptor::from_json(json!({
        "operation": "updateRows",
        "table": "t",
        "columns": "name, age",
        "values": ["bob", "41"],
        "whereClause": "id = ?",
        "whereArgs": "7",
    }))?;
    let plan = build(&descriptor)?;

    assert_eq!(plan.statements()[0].query, "UPDATE t SET name = ?, age = ? WHERE id = ?");
    assert_eq!(plan.statements()[0].params, text(&["bob", "41", "7"]));
    Ok(())
}

#[test]
fn every_updated_row_gets_the_where_args() -> Result<(), SqlNodeError> {
    let from_values = build(&OperationDescriptor::from_json(json!({
        "operation": "updateRows",
        "table": "t",
        "columns": "name, age",
        "values": "ann, 30, bob, 41, cy, 52",
        "whereClause": "team = ? AND active = ?",
        "whereArgs": "red, 1",
    }))?)?;
    assert_eq!(from_values.len(), 3);
    for (statement, row) in from_values.statements().iter().zip([["ann", "30"], ["bob", "41"], ["cy", "52"]]) {
        assert_eq!(statement.query, "UPDATE t SET name = ?, age = ? WHERE team = ? AND active = ?");
        assert_eq!(statement.params, text(&[row[0], row[1], "red", "1"]));
    }

    let from_items = build(&OperationDescriptor::from_json(json!({
        "operation": "updateRows",
        "table": "t",
        "columns": ["name"],
        "items": [[{"name": "ann"}, {"name": "bob"}], {"name": "cy"}],
        "whereClause": "id BETWEEN ? AND ?",
        "whereArgs": [1, 9],
    }))?)?;
    let params: Vec<&Vec<RowValues>> = from_items.statements().iter().map(|s| &s.params).collect();
    assert_eq!(
        params,
        [
            &vec![RowValues::Text("ann".into()), RowValues::Int(1), RowValues::Int(9)],
            &vec![RowValues::Text("bob".into()), RowValues::Int(1), RowValues::Int(9)],
            &vec![RowValues::Text("cy".into()), RowValues::Int(1), RowValues::Int(9)],
        ]
    );
    Ok(())
}

#[test]
fn update_and_delete_require_a_condition() {
    let update = OperationDescriptor::UpdateRows(UpdateRows {
        table: "t".into(),
        columns: vec!["a".into()],
        source: RowSource::Values(text(&["1"])),
        ..UpdateRows::default()
    });
    let delete = OperationDescriptor::DeleteRows(DeleteRows {
        table: "t".into(),
        where_clause: "   ".into(),
        where_args: Vec::new(),
    });
    assert!(build(&update).is_err());
    assert!(build(&delete).is_err());
}

#[test]
fn delete_with_condition() -> Result<(), SqlNodeError> {
    let plan = build(&OperationDescriptor::from_json(json!({
        "operation": "deleteRows",
        "table": "t",
        "whereClause": "id = ? AND kind = ?",
        "whereArgs": ["5", "x"],
    }))?)?;
    assert_eq!(plan.statements()[0].query, "DELETE FROM t WHERE id = ? AND kind = ?");
    assert_eq!(plan.statements()[0].params, text(&["5", "x"]));
    Ok(())
}

#[test]
fn select_with_limit_and_offset() -> Result<(), SqlNodeError> {
    let plan = build(&OperationDescriptor::from_json(json!({
        "operation": "selectRows",
        "table": "t",
        "columns": "a, b",
        "orderBy": "a",
        "orderDirection": "desc",
        "useLimit": true,
        "limit": "10",
        "offset": 20,
    }))?)?;
    assert_eq!(
        plan.statements()[0].query,
        "SELECT a, b FROM t ORDER BY a DESC LIMIT 10 OFFSET 20"
    );
    Ok(())
}

#[test]
fn select_limit_is_ignored_unless_enabled() -> Result<(), SqlNodeError> {
    let plan = build(&OperationDescriptor::from_json(json!({
        "operation": "selectRows",
        "table": "t",
        "returnAllColumns": true,
        "limit": 10,
    }))?)?;
    assert_eq!(plan.statements()[0].query, "SELECT * FROM t");
    Ok(())
}

#[test]
fn select_rejects_unsafe_order_direction() {
    let result = OperationDescriptor::from_json(json!({
        "operation": "selectRows",
        "table": "t",
        "columns": "a",
        "orderBy": "a",
        "orderDirection": "ASC; DROP TABLE t",
    }));
    assert!(matches!(result, Err(SqlNodeError::Validation(_))));
}

#[test]
fn unsafe_identifiers_are_rejected() {
    let bad_table = OperationDescriptor::DescribeTable(DescribeTable {
        table: "t; drop table t".into(),
    });
    let bad_column = OperationDescriptor::InsertRows(InsertRows {
        table: "t".into(),
        columns: vec!["a b".into()],
        source: RowSource::Values(text(&["1"])),
    });
    assert!(build(&bad_table).is_err());
    assert!(build(&bad_column).is_err());
}

#[test]
fn batch_entries_split_their_params() -> Result<(), SqlNodeError> {
    let plan = build(&OperationDescriptor::from_json(json!({
        "operation": "executeBatch",
        "queries": [
            {"query": "INSERT INTO t VALUES (?, ?)", "params": "1, a"},
            {"query": "DELETE FROM t WHERE id = ?", "params": "2"},
            {"query": "SELECT count(*) FROM t"},
        ],
    }))?)?;
    assert_eq!(plan.len(), 3);
    assert_eq!(plan.statements()[0].params, text(&["1", "a"]));
    assert_eq!(plan.statements()[1].params, text(&["2"]));
    assert!(plan.statements()[2].params.is_empty());
    Ok(())
}

#[test]
fn execute_query_counts_placeholders_outside_literals() -> Result<(), SqlNodeError> {
    let ok = OperationDescriptor::ExecuteQuery(ExecuteQuery {
        query: "SELECT '?' AS q, ? AS p -- trailing ?".into(),
        params: text(&["x"]),
    });
    assert_eq!(build(&ok)?.len(), 1);

    let mismatched = OperationDescriptor::ExecuteQuery(ExecuteQuery {
        query: "SELECT ?, ?".into(),
        params: text(&["x"]),
    });
    assert!(matches!(build(&mismatched), Err(SqlNodeError::Validation(_))));
    Ok(())
}

#[test]
fn list_and_describe_tables() -> Result<(), SqlNodeError> {
    let list = build(&OperationDescriptor::ListTables)?;
    assert_eq!(list.statements()[0].query, LIST_TABLES_SQL);

    let describe = build(&OperationDescriptor::from_json_str(
        r#"{"operation": "describeTable", "table": "users"}"#,
    )?)?;
    assert_eq!(describe.statements()[0].query, "PRAGMA table_info(users)");
    Ok(())
}
