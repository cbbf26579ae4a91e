use crate::data::{Term, DEFAULT_MAX_TERM_LEN};

/// Reduce a raw token to its index term: keep the ASCII letters, lower-cased, in order.
///
/// Every other byte is dropped. A token with no letters yields an empty string, which
/// callers treat as "no term". The result is truncated to [`DEFAULT_MAX_TERM_LEN`] bytes.
pub fn normalize<T: AsRef<[u8]>>(raw: T) -> Term {
    normalize_bounded(raw, DEFAULT_MAX_TERM_LEN)
}

/// [`normalize`] with an explicit length bound.
pub fn normalize_bounded<T: AsRef<[u8]>>(raw: T, max_len: usize) -> Term {
    raw.as_ref()
        .iter()
        .filter(|b| b.is_ascii_alphabetic())
        .take(max_len)
        .map(|b| b.to_ascii_lowercase() as char)
        .collect()
}

/// Truncate a document name to at most `max_len` bytes without splitting a character.
pub fn truncate_name(name: &str, max_len: usize) -> &str {
    if name.len() <= max_len {
        return name;
    }
    let mut end = max_len;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_and_lowercases() {
        assert_eq!(normalize("Hello,"), "hello");
        assert_eq!(normalize("don't"), "dont");
        assert_eq!(normalize("C3PO"), "cpo");
    }

    #[test]
    fn test_normalize_non_alphabetic_is_empty() {
        assert_eq!(normalize("1234"), "");
        assert_eq!(normalize("--"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_drops_non_ascii_bytes() {
        assert_eq!(normalize("café"), "caf");
        assert_eq!(normalize(&[0xffu8, b'A', 0x00, b'b'][..]), "ab");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize("Search-Engine!");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_normalize_bounded_truncates() {
        assert_eq!(normalize_bounded("abcdef", 3), "abc");
        let long = "x".repeat(DEFAULT_MAX_TERM_LEN + 40);
        assert_eq!(normalize(&long).len(), DEFAULT_MAX_TERM_LEN);
    }

    #[test]
    fn test_truncate_name_respects_char_boundary() {
        assert_eq!(truncate_name("short.txt", 64), "short.txt");
        assert_eq!(truncate_name("abcdef", 4), "abcd");
        assert_eq!(truncate_name("ab\u{e9}cd", 3), "ab");
    }
}
