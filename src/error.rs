use thiserror::Error;

use crate::operation::OperationKind;

#[derive(Debug, Error)]
pub enum SqlNodeError {
    /// A descriptor field is missing or malformed. Raised before any statement is submitted.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The execution capability rejected a statement.
    #[error("{operation} failed{}: {message}", statement_suffix(.statement))]
    Capability {
        operation: OperationKind,
        statement: Option<String>,
        code: Option<String>,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl SqlNodeError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        SqlNodeError::Validation(message.into())
    }

    /// Short machine-readable tag for the error class.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            SqlNodeError::Validation(_) => "validation",
            SqlNodeError::Capability { .. } => "capability",
            SqlNodeError::Config(_) => "config",
            SqlNodeError::Unknown(_) => "unknown",
        }
    }
}

fn statement_suffix(statement: &Option<String>) -> String {
    match statement {
        Some(sql) => format!(" on `{sql}`"),
        None => String::new(),
    }
}
