pub(super) fn is_line_comment_start(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'-') && bytes.get(idx + 1) == Some(&b'-')
}

pub(super) fn is_block_comment_start(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'/') && bytes.get(idx + 1) == Some(&b'*')
}

pub(super) fn is_block_comment_end(bytes: &[u8], idx: usize) -> bool {
    bytes.get(idx) == Some(&b'*') && bytes.get(idx + 1) == Some(&b'/')
}

/// `:name`, `@name` and `$name` parameters. Returns the name and the index of its last byte.
pub(super) fn try_named_parameter(bytes: &[u8], start: usize) -> Option<(&str, usize)> {
    let mut idx = start + 1;
    while idx < bytes.len() && (bytes[idx].is_ascii_alphanumeric() || bytes[idx] == b'_') {
        idx += 1;
    }
    if idx == start + 1 {
        return None;
    }
    std::str::from_utf8(&bytes[start..idx])
        .ok()
        .map(|name| (name, idx - 1))
}

/// Bytes that may continue an identifier, so a following `:`/`@`/`$` is part of the name.
pub(super) fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}
