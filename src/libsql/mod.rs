//! `LibSQL` execution capability (remote Turso/sqld or a local file).
//!
//! - `config`: client options and pool setup
//! - `params`: argument conversion to `LibSQL` values
//! - `query`: raw result extraction
//! - `executor`: the `ExecutionCapability` implementation

pub mod config;
pub mod executor;
pub mod params;
pub mod query;

pub use config::{LibsqlClient, LibsqlOptions, LibsqlOptionsBuilder, LibsqlTarget};
pub use params::Params;
pub use query::build_raw_result;
