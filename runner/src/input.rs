use std::io::Read;
use std::path::Path;

use libsql_node::{OperationDescriptor, SqlNodeError};
use serde_json::Value as JsonValue;

/// Read work items from `path` (`-` for stdin).
///
/// The document is one descriptor object or an array of them; each array element is one item.
pub(crate) fn load_operations(path: &Path) -> Result<Vec<OperationDescriptor>, SqlNodeError> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| SqlNodeError::Config(format!("failed to read stdin: {e}")))?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| {
            SqlNodeError::Config(format!("failed to read {}: {e}", path.display()))
        })?
    };
    parse_operations(&text)
}

pub(crate) fn parse_operations(text: &str) -> Result<Vec<OperationDescriptor>, SqlNodeError> {
    let document: JsonValue = serde_json::from_str(text)
        .map_err(|e| SqlNodeError::Config(format!("operations file is not valid JSON: {e}")))?;
    match document {
        JsonValue::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                OperationDescriptor::from_json(item).map_err(|err| match err {
                    SqlNodeError::Validation(msg) => {
                        SqlNodeError::Validation(format!("item {index}: {msg}"))
                    }
                    other => other,
                })
            })
            .collect(),
        single => Ok(vec![OperationDescriptor::from_json(single)?]),
    }
}
