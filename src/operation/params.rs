//! Coercion of loosely typed configuration fields.
//!
//! Hosts hand parameter lists over either as JSON arrays or as a single comma-separated string,
//! and numeric fields sometimes arrive as strings. Everything is coerced here so the descriptor
//! types can stay strongly typed.

use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value as JsonValue;

use crate::types::RowValues;

/// Split a comma-separated parameter string into text arguments.
///
/// Each piece is trimmed. A blank string yields no arguments. Commas inside values cannot be
/// escaped: `"a,b"` is always two arguments.
#[must_use]
pub fn split_params(raw: &str) -> Vec<RowValues> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',')
        .map(|piece| RowValues::Text(piece.trim().to_string()))
        .collect()
}

pub(crate) fn param_list<'de, D>(deserializer: D) -> Result<Vec<RowValues>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::Null => Vec::new(),
        JsonValue::String(raw) => split_params(&raw),
        JsonValue::Array(items) => items.iter().map(RowValues::from_json).collect(),
        other => vec![RowValues::from_json(&other)],
    })
}

pub(crate) fn column_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::Null => Ok(Vec::new()),
        JsonValue::String(raw) => Ok(raw
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()),
        JsonValue::Array(items) => items
            .into_iter()
            .map(|item| match item {
                JsonValue::String(name) => Ok(name.trim().to_string()),
                other => Err(D::Error::custom(format!(
                    "column names must be strings, got {other}"
                ))),
            })
            .collect(),
        other => Err(D::Error::custom(format!(
            "expected a column list, got {other}"
        ))),
    }
}

pub(crate) fn count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::Null => Ok(None),
        JsonValue::Number(n) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected an integer, got {n}"))),
        JsonValue::String(raw) if raw.trim().is_empty() => Ok(None),
        JsonValue::String(raw) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|e| D::Error::custom(format!("expected an integer, got `{raw}`: {e}"))),
        other => Err(D::Error::custom(format!("expected an integer, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims() {
        assert_eq!(
            split_params(" 1, a ,b"),
            vec![
                RowValues::Text("1".into()),
                RowValues::Text("a".into()),
                RowValues::Text("b".into()),
            ]
        );
    }

    #[test]
    fn blank_string_has_no_params() {
        assert!(split_params("").is_empty());
        assert!(split_params("   ").is_empty());
    }

    #[test]
    fn embedded_commas_are_not_escaped() {
        assert_eq!(split_params("'a,b'").len(), 2);
    }
}
