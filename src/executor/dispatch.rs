use crate::error::SqlNodeError;
use crate::operation::OperationDescriptor;
use crate::query_builder::{StatementPlan, build};
use crate::results::{ResultSet, normalize};

use super::capability::ExecutionCapability;
use super::output::{ErrorRecord, FailurePolicy, ItemOutcome, ItemOutput};

/// Submit each statement of `plan` in order, awaiting each before the next.
///
/// Stops at the first failure; statements already submitted are not rolled back.
///
/// # Errors
/// Returns `SqlNodeError::Capability` (with the failing statement) or `SqlNodeError::Unknown`.
pub async fn execute_plan<C>(
    capability: &C,
    plan: &StatementPlan,
) -> Result<Vec<ResultSet>, SqlNodeError>
where
    C: ExecutionCapability + ?Sized,
{
    let mut results = Vec::with_capacity(plan.len());
    for (index, statement) in plan.statements().iter().enumerate() {
        tracing::debug!(
            operation = %plan.operation,
            statement = index,
            sql = %statement.query,
            params = statement.params.len(),
            "submitting statement"
        );
        let raw = capability
            .execute(&statement.query, &statement.params)
            .await
            .map_err(|failure| failure.into_error(plan.operation, &statement.query))?;
        results.push(normalize(raw));
    }
    Ok(results)
}

/// Build and execute one descriptor.
///
/// # Errors
/// Returns `SqlNodeError::Validation` before anything is submitted when the descriptor is
/// invalid, otherwise the first execution failure.
pub async fn run_operation<C>(
    capability: &C,
    descriptor: &OperationDescriptor,
) -> Result<Vec<ResultSet>, SqlNodeError>
where
    C: ExecutionCapability + ?Sized,
{
    let plan = build(descriptor)?;
    execute_plan(capability, &plan).await
}

/// Process work items one after another, tagging each output with its input index.
///
/// With `FailurePolicy::Continue` a failing item becomes an error record and the remaining items
/// still run. With `FailurePolicy::FailFast` the first failure is returned and later items are
/// not attempted.
///
/// # Errors
/// Only in fail-fast mode: the first item failure.
pub async fn run_items<C>(
    capability: &C,
    descriptors: &[OperationDescriptor],
    policy: FailurePolicy,
) -> Result<Vec<ItemOutput>, SqlNodeError>
where
    C: ExecutionCapability + ?Sized,
{
    let mut outputs = Vec::with_capacity(descriptors.len());
    for (item_index, descriptor) in descriptors.iter().enumerate() {
        let operation = descriptor.kind();
        match run_operation(capability, descriptor).await {
            Ok(results) => {
                tracing::info!(item = item_index, %operation, statements = results.len(), "item completed");
                outputs.push(ItemOutput {
                    item_index,
                    operation,
                    outcome: ItemOutcome::Completed(results),
                });
            }
            Err(err) => match policy {
                FailurePolicy::FailFast => {
                    tracing::error!(item = item_index, %operation, error = %err, "item failed");
                    return Err(err);
                }
                FailurePolicy::Continue => {
                    tracing::warn!(item = item_index, %operation, error = %err, "item failed, continuing");
                    outputs.push(ItemOutput {
                        item_index,
                        operation,
                        outcome: ItemOutcome::Failed(ErrorRecord::from(&err)),
                    });
                }
            },
        }
    }
    Ok(outputs)
}
