//! External search links for recommended titles.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const DEFAULT_SEARCH_BASE: &str = "https://www.goodreads.com/search";

/// Bytes left as-is in a query component: `A-Z a-z 0-9 - _ . ~`.
/// Space is handled separately and becomes `+`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode a title as a query-string value, spaces as `+`.
pub fn encode_query(value: &str) -> String {
    value
        .split(' ')
        .map(|part| utf8_percent_encode(part, QUERY_COMPONENT).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

/// Inverse of [`encode_query`]. Returns `None` if the bytes are not UTF-8.
pub fn decode_query(encoded: &str) -> Option<String> {
    let spaced = encoded.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

/// `<search_base>?q=<encoded title>`
pub fn search_link(search_base: &str, title: &str) -> String {
    format!("{}?q={}", search_base, encode_query(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_become_plus() {
        assert_eq!(
            search_link(DEFAULT_SEARCH_BASE, "Snow Crash"),
            "https://www.goodreads.com/search?q=Snow+Crash"
        );
    }

    #[test]
    fn test_reserved_characters_are_escaped() {
        assert_eq!(encode_query("A+B & C/D?"), "A%2BB+%26+C%2FD%3F");
        assert_eq!(encode_query("Harry Potter (Book 1)"), "Harry+Potter+%28Book+1%29");
        assert_eq!(encode_query("safe-_.~"), "safe-_.~");
    }

    #[test]
    fn test_non_ascii_is_utf8_encoded() {
        assert_eq!(encode_query("Café"), "Caf%C3%A9");
    }

    #[test]
    fn test_decode_inverts_encode() {
        for title in ["Dune", "Brave New World", "1+1=2", "Ästhetik & Kritik", "  padded  "] {
            assert_eq!(decode_query(&encode_query(title)).as_deref(), Some(title));
        }
    }

    #[test]
    fn test_distinct_titles_give_distinct_links() {
        let a = search_link(DEFAULT_SEARCH_BASE, "A B");
        let b = search_link(DEFAULT_SEARCH_BASE, "A+B");
        assert_ne!(a, b);
        assert_eq!(a, search_link(DEFAULT_SEARCH_BASE, "A B"));
    }
}
