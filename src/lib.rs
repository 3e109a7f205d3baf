//! Statement builder and result normalizer for workflow SQL nodes backed by libsql / Turso.
//!
//! A node invocation is described by an [`OperationDescriptor`]. [`build`] turns it into a
//! [`StatementPlan`] of SQL text plus positional arguments, an [`ExecutionCapability`] runs each
//! statement, and [`normalize`] reshapes every response into a [`ResultSet`].
//!
//! ```rust
//! use libsql_node::prelude::*;
//!
//! let descriptor = OperationDescriptor::InsertRows(InsertRows {
//!     table: "t".into(),
//!     columns: vec!["id".into(), "name".into()],
//!     source: RowSource::Values(vec!["1".into(), "a".into(), "2".into(), "b".into()]),
//! });
//! let plan = build(&descriptor)?;
//! assert_eq!(plan.len(), 2);
//! assert_eq!(plan.statements()[0].query, "INSERT INTO t (id, name) VALUES (?, ?)");
//! # Ok::<(), SqlNodeError>(())
//! ```

pub mod prelude;

pub mod error;
pub mod executor;
#[cfg(feature = "libsql")]
pub mod libsql;
pub mod operation;
pub mod query_builder;
pub mod results;
pub mod sql_text;
pub mod types;

pub use error::SqlNodeError;
pub use executor::{
    CapabilityFailure, ErrorRecord, ExecutionCapability, FailurePolicy, ItemOutcome, ItemOutput,
    execute_plan, host_items, run_items, run_operation,
};
#[cfg(feature = "libsql")]
pub use libsql::{LibsqlClient, LibsqlOptions, LibsqlOptionsBuilder, LibsqlTarget};
pub use operation::{OperationDescriptor, OperationKind};
pub use query_builder::{StatementPlan, build};
pub use results::{CustomDbRow, LastInsertRowid, RawResult, ResultSet, normalize};
pub use types::{QueryAndParams, RowValues};
