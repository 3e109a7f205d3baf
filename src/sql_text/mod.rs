//! Lexical helpers over SQL text: placeholder counting and the identifier allow-list.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::SqlNodeError;

mod parsers;
mod scanner;

use parsers::{
    is_block_comment_end, is_block_comment_start, is_identifier_byte, is_line_comment_start,
    try_named_parameter,
};
use scanner::{State, scan_digits};

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

/// Number of arguments SQLite expects for `sql`.
///
/// Follows `sqlite3_bind_parameter_count`: a bare `?` takes the next index after the highest
/// seen so far, `?NNN` pins an index, and each distinct `:name`/`@name`/`$name` takes a fresh
/// index on first use. Placeholders inside string literals, quoted identifiers and comments are
/// ignored.
#[must_use]
pub fn parameter_count(sql: &str) -> usize {
    let bytes = sql.as_bytes();
    let mut state = State::Normal;
    let mut highest = 0usize;
    let mut named: Vec<&str> = Vec::new();
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                b'[' => state = State::Bracketed,
                b'`' => state = State::Backticked,
                _ if is_line_comment_start(bytes, idx) => {
                    state = State::LineComment;
                    idx += 1;
                }
                _ if is_block_comment_start(bytes, idx) => {
                    state = State::BlockComment;
                    idx += 1;
                }
                b'?' => {
                    if let Some((digits_end, digits)) = scan_digits(bytes, idx + 1) {
                        if let Ok(n) = digits.parse::<usize>() {
                            highest = highest.max(n);
                        }
                        idx = digits_end - 1;
                    } else {
                        highest += 1;
                    }
                }
                b':' | b'@' | b'$' if idx == 0 || !is_identifier_byte(bytes[idx - 1]) => {
                    if let Some((name, last)) = try_named_parameter(bytes, idx) {
                        if !named.contains(&name) {
                            named.push(name);
                            highest += 1;
                        }
                        idx = last;
                    }
                }
                _ => {}
            },
            State::SingleQuoted => {
                if b == b'\'' {
                    if bytes.get(idx + 1) == Some(&b'\'') {
                        idx += 1; // skip escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::DoubleQuoted => {
                if b == b'"' {
                    if bytes.get(idx + 1) == Some(&b'"') {
                        idx += 1; // skip escaped quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::Bracketed => {
                if b == b']' {
                    state = State::Normal;
                }
            }
            State::Backticked => {
                if b == b'`' {
                    state = State::Normal;
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                if is_block_comment_end(bytes, idx) {
                    state = State::Normal;
                    idx += 1;
                }
            }
        }

        idx += 1;
    }

    highest
}

/// First keyword of `sql`, skipping leading whitespace and comments.
#[must_use]
pub fn leading_keyword(sql: &str) -> Option<&str> {
    let bytes = sql.as_bytes();
    let mut idx = 0;
    loop {
        while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
            idx += 1;
        }
        if is_line_comment_start(bytes, idx) {
            while idx < bytes.len() && bytes[idx] != b'\n' {
                idx += 1;
            }
        } else if is_block_comment_start(bytes, idx) {
            idx += 2;
            while idx < bytes.len() && !is_block_comment_end(bytes, idx) {
                idx += 1;
            }
            idx += 2;
        } else {
            break;
        }
    }
    let start = idx.min(bytes.len());
    let end = bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_alphabetic())
        .map_or(bytes.len(), |len| start + len);
    (end > start).then(|| &sql[start..end])
}

/// Whether `name` is safe to splice into statement text as a bare identifier.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Reject anything but `[A-Za-z_][A-Za-z0-9_]*`; `what` names the field in the error.
///
/// # Errors
/// Returns `SqlNodeError::Validation` when `name` is empty or contains other characters.
pub fn validate_identifier<'a>(what: &str, name: &'a str) -> Result<&'a str, SqlNodeError> {
    if name.is_empty() {
        return Err(SqlNodeError::validation(format!("missing {what}")));
    }
    if !is_identifier(name) {
        return Err(SqlNodeError::validation(format!(
            "invalid {what} `{name}`: only letters, digits and underscores are allowed"
        )));
    }
    Ok(name)
}
