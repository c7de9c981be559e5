//! Shared utility functions.

/// Truncate a string to at most `max_bytes` without splitting a UTF-8
/// character boundary.
///
/// Returns a sub-slice of the original string. If the string is shorter than
/// `max_bytes`, the entire string is returned unchanged.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// `true` when the string is empty or only whitespace.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_timestamp() {
        assert_eq!(truncate_str("2024-03-01 10:15:42.123456", 16), "2024-03-01 10:15");
    }

    #[test]
    fn truncate_no_op_when_short() {
        assert_eq!(truncate_str("2024-03-01", 16), "2024-03-01");
    }

    #[test]
    fn truncate_multibyte_boundary() {
        // 'の' is 3 bytes (U+306E)
        let s = "あのね";
        assert_eq!(truncate_str(s, 4), "あ");
        assert_eq!(truncate_str(s, 6), "あの");
    }

    #[test]
    fn blank_strings() {
        assert!(is_blank(""));
        assert!(is_blank("  \n"));
        assert!(!is_blank(" frontend "));
    }
}
