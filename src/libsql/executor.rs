use async_trait::async_trait;
use deadpool_libsql::libsql::Error as LibsqlError;

use super::config::LibsqlClient;
use super::params::Params;
use super::query::build_raw_result;
use crate::executor::{CapabilityFailure, ExecutionCapability};
use crate::results::{LastInsertRowid, RawResult};
use crate::sql_text::leading_keyword;
use crate::types::RowValues;

#[async_trait]
impl ExecutionCapability for LibsqlClient {
    async fn execute(&self, sql: &str, args: &[RowValues]) -> Result<RawResult, CapabilityFailure> {
        let conn = self.pool.get().await.map_err(|e| {
            CapabilityFailure::rejected(None, format!("Failed to get libsql connection: {e}"))
        })?;
        let params = Params::convert(args);
        // Connection counters are not reset by statements that change nothing.
        let total_before = conn.total_changes();
        let rowid_before = conn.last_insert_rowid();

        let rows = conn
            .query(sql, params.into_vec())
            .await
            .map_err(|e| rejected(e, "Failed to execute statement"))?;
        let mut raw = build_raw_result(rows).await?;

        if raw.columns.as_ref().is_none_or(Vec::is_empty) {
            if conn.total_changes() != total_before {
                raw.rows_affected = Some(conn.changes());
            } else if is_dml(sql) {
                raw.rows_affected = Some(0);
            }
            let rowid = conn.last_insert_rowid();
            if rowid != rowid_before {
                raw.last_insert_rowid = Some(LastInsertRowid::Int(rowid));
            }
        }

        Ok(raw)
    }
}

pub(super) fn rejected(err: LibsqlError, context: &str) -> CapabilityFailure {
    match err {
        LibsqlError::SqliteFailure(code, message) => {
            CapabilityFailure::rejected(Some(code.to_string()), format!("{context}: {message}"))
        }
        other => CapabilityFailure::rejected(None, format!("{context}: {other}")),
    }
}

fn is_dml(sql: &str) -> bool {
    leading_keyword(sql).is_some_and(|keyword| {
        ["INSERT", "UPDATE", "DELETE", "REPLACE", "WITH"]
            .iter()
            .any(|dml| keyword.eq_ignore_ascii_case(dml))
    })
}
