use std::sync::Mutex;

use async_trait::async_trait;
use libsql_node::prelude::*;
use serde_json::json;
use tokio::runtime::Runtime;

/// Records every submitted statement and rejects any SQL containing `fail_on`.
#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<(String, Vec<RowValues>)>>,
    fail_on: Option<&'static str>,
}

impl Recorder {
    fn failing_on(pattern: &'static str) -> Self {
        Recorder {
            fail_on: Some(pattern),
            ..Recorder::default()
        }
    }

    fn calls(&self) -> Vec<(String, Vec<RowValues>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExecutionCapability for Recorder {
    async fn execute(&self, sql: &str, args: &[RowValues]) -> Result<RawResult, CapabilityFailure> {
        self.calls.lock().unwrap().push((sql.to_string(), args.to_vec()));
        if self.fail_on.is_some_and(|pattern| sql.contains(pattern)) {
            return Err(CapabilityFailure::rejected(
                Some("SQLITE_ERROR".into()),
                "no such table: missing",
            ));
        }
        if sql.starts_with("SELECT") {
            Ok(RawResult::from_json(&json!({
                "columns": ["id"],
                "rows": [[1], [2]],
            })))
        } else {
            Ok(RawResult {
                rows_affected: Some(1),
                ..RawResult::default()
            })
        }
    }
}

fn items() -> Result<Vec<OperationDescriptor>, SqlNodeError> {
    [
        json!({"operation": "executeQuery", "query": "SELECT id FROM t"}),
        json!({"operation": "deleteRows", "table": "missing", "whereClause": "id = ?", "whereArgs": "1"}),
        json!({"operation": "insertRows", "table": "t", "columns": "id", "values": "3, 4"}),
    ]
    .into_iter()
    .map(OperationDescriptor::from_json)
    .collect()
}

#[test]
fn continue_mode_keeps_going_and_tags_provenance() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let capability = Recorder::failing_on("missing");
        let outputs = run_items(&capability, &items()?, FailurePolicy::Continue).await?;

        assert_eq!(outputs.len(), 3);
        assert_eq!(capability.calls().len(), 4);
        assert!(matches!(&outputs[1].outcome, ItemOutcome::Failed(record) if record.kind == "capability"));
        assert!(matches!(&outputs[2].outcome, ItemOutcome::Completed(results) if results.len() == 2));

        let host = host_items(&outputs);
        assert_eq!(
            host,
            vec![
                json!({"json": {"id": 1}, "pairedItem": {"item": 0}}),
                json!({"json": {"id": 2}, "pairedItem": {"item": 0}}),
                json!({
                    "json": {
                        "error": "no such table: missing",
                        "kind": "capability",
                        "code": "SQLITE_ERROR",
                        "statement": "DELETE FROM missing WHERE id = ?",
                    },
                    "pairedItem": {"item": 1}
                }),
                json!({"json": {"rowsAffected": 1}, "pairedItem": {"item": 2}}),
                json!({"json": {"rowsAffected": 1}, "pairedItem": {"item": 2}}),
            ]
        );
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn fail_fast_stops_at_first_failure() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let capability = Recorder::failing_on("missing");
        let err = run_items(&capability, &items()?, FailurePolicy::FailFast)
            .await
            .unwrap_err();

        match err {
            SqlNodeError::Capability {
                operation,
                statement,
                ..
            } => {
                assert_eq!(operation, OperationKind::DeleteRows);
                assert_eq!(statement.as_deref(), Some("DELETE FROM missing WHERE id = ?"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(capability.calls().len(), 2);
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn invalid_batch_submits_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let capability = Recorder::default();
        let descriptor = OperationDescriptor::ExecuteBatch(ExecuteBatch {
            queries: vec![
                BatchEntry::new("INSERT INTO t VALUES (?)", "1"),
                BatchEntry::new("", ""),
            ],
        });
        let err = run_operation(&capability, &descriptor).await.unwrap_err();

        assert_eq!(err.kind(), "validation");
        assert!(capability.calls().is_empty());
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[test]
fn plan_statements_run_in_order_with_their_args() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let capability = Recorder::default();
        let descriptor = OperationDescriptor::from_json(json!({
            "operation": "executeBatch",
            "queries": [
                {"query": "INSERT INTO t VALUES (?)", "params": "a"},
                {"query": "UPDATE t SET v = ? WHERE v = ?", "params": "b, a"},
            ],
        }))?;
        let results = run_operation(&capability, &descriptor).await?;

        assert_eq!(results.len(), 2);
        let calls = capability.calls();
        assert_eq!(calls[0].0, "INSERT INTO t VALUES (?)");
        assert_eq!(
            calls[1].1,
            vec![RowValues::Text("b".into()), RowValues::Text("a".into())]
        );
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
