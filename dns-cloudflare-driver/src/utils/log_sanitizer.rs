//! Log sanitization utilities
//!
//! Prevents sensitive data (API tokens, large response bodies) from being
//! fully exposed in debug/error logs.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Replacement text for masked secrets.
const MASK: &str = "***";

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit,
/// otherwise returns the first `TRUNCATE_LIMIT` characters with a suffix
/// indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask the values of the given keys in an encoded query string.
///
/// `"a=stats&tkn=abc"` with `["tkn"]` becomes `"a=stats&tkn=***"`.
pub fn mask_query_params(query: &str, secret_keys: &[&str]) -> String {
    query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if secret_keys.contains(&key) => format!("{key}={MASK}"),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_unchanged() {
        let s = "hello world";
        assert_eq!(truncate_for_log(s), s);
    }

    #[test]
    fn exactly_at_limit() {
        let s = "a".repeat(TRUNCATE_LIMIT);
        assert_eq!(truncate_for_log(&s), s);
    }

    #[test]
    fn over_limit_truncated() {
        let s = "a".repeat(TRUNCATE_LIMIT + 100);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
        assert!(result.contains(&format!("{} bytes]", TRUNCATE_LIMIT + 100)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn multibyte_chars_safe() {
        let s = "你".repeat(200);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
    }

    #[test]
    fn masks_token_only() {
        let masked = mask_query_params("a=stats&tkn=abc123&u=ops%40example.com", &["tkn"]);
        assert_eq!(masked, "a=stats&tkn=***&u=ops%40example.com");
    }

    #[test]
    fn mask_leaves_keys_that_merely_contain_secret_name() {
        let masked = mask_query_params("xtkn=1&tkn=2", &["tkn"]);
        assert_eq!(masked, "xtkn=1&tkn=***");
    }

    #[test]
    fn mask_empty_query() {
        assert_eq!(mask_query_params("", &["tkn"]), "");
    }
}
