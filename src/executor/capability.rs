use async_trait::async_trait;
use thiserror::Error;

use crate::error::SqlNodeError;
use crate::operation::OperationKind;
use crate::results::RawResult;
use crate::types::RowValues;

/// Something that can run one SQL statement against the database.
///
/// Implementations own connection management, authentication and the wire protocol. They are
/// never asked to retry.
#[async_trait]
pub trait ExecutionCapability: Send + Sync {
    /// Run `sql` with positional `args` and return the unnormalized response.
    async fn execute(&self, sql: &str, args: &[RowValues]) -> Result<RawResult, CapabilityFailure>;
}

/// Failure reported by an [`ExecutionCapability`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityFailure {
    /// The database refused the statement (syntax error, constraint violation, connectivity).
    #[error("{message}")]
    Rejected {
        code: Option<String>,
        message: String,
    },
    #[error("{0}")]
    Unknown(String),
}

impl CapabilityFailure {
    pub fn rejected(code: Option<String>, message: impl Into<String>) -> Self {
        CapabilityFailure::Rejected {
            code,
            message: message.into(),
        }
    }

    pub(crate) fn into_error(self, operation: OperationKind, statement: &str) -> SqlNodeError {
        match self {
            CapabilityFailure::Rejected { code, message } => SqlNodeError::Capability {
                operation,
                statement: Some(statement.to_string()),
                code,
                message,
            },
            CapabilityFailure::Unknown(message) => SqlNodeError::Unknown(message),
        }
    }
}
