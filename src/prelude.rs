//! Convenient imports for common functionality.

pub use crate::error::SqlNodeError;
pub use crate::executor::{
    CapabilityFailure, ErrorRecord, ExecutionCapability, FailurePolicy, ItemOutcome, ItemOutput,
    execute_plan, host_items, run_items, run_operation,
};
pub use crate::operation::{
    BatchEntry, DeleteRows, DescribeTable, ExecuteBatch, ExecuteQuery, InsertRows,
    OperationDescriptor, OperationKind, OrderBy, Pagination, RowSource, SelectRows, SortDirection,
    UpdateRows,
};
pub use crate::query_builder::{LIST_TABLES_SQL, StatementPlan, build};
pub use crate::results::{
    CustomDbRow, LastInsertRowid, RawColumn, RawResult, RawRow, ResultSet, normalize,
};
pub use crate::types::{QueryAndParams, RowValues};

#[cfg(feature = "libsql")]
pub use crate::libsql::{LibsqlClient, LibsqlOptions, LibsqlOptionsBuilder, LibsqlTarget};
