//! Execution seam: the capability trait and the sequential item runner built on it.

mod capability;
mod dispatch;
mod output;

pub use capability::{CapabilityFailure, ExecutionCapability};
pub use dispatch::{execute_plan, run_items, run_operation};
pub use output::{ErrorRecord, FailurePolicy, ItemOutcome, ItemOutput, host_items};
