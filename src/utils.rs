//! Encoding and string helpers
//!
//! Percent-encoding for query strings and `application/x-www-form-urlencoded`
//! bodies, plus UTF-8 safe truncation used when response bodies are embedded
//! in error messages.

use std::fmt::Write;

/// Percent-encode a string for a query or form value.
///
/// Preserves unreserved characters per RFC 3986 and encodes every other byte,
/// so multi-byte UTF-8 text is encoded byte by byte.
///
/// # Example
/// ```
/// use line_notify_client::utils::url_encode;
///
/// assert_eq!(url_encode("hi there"), "hi%20there");
/// assert_eq!(url_encode("https://example.com/cb"), "https%3A%2F%2Fexample.com%2Fcb");
/// ```
#[must_use]
pub fn url_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(byte as char);
            }
            _ => {
                // Writing into a String cannot fail
                let _ = write!(result, "%{byte:02X}");
            }
        }
    }
    result
}

/// Encode key/value pairs as `k1=v1&k2=v2`, percent-encoding every value.
///
/// Keys are emitted verbatim; callers only pass fixed parameter names.
#[must_use]
pub fn encode_pairs(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={}", url_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Safely truncate a string at a UTF-8 character boundary.
///
/// Returns a slice of at most `max_bytes` bytes.
#[inline]
#[must_use]
pub fn safe_truncate(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut boundary = max_bytes;
    while boundary > 0 && !s.is_char_boundary(boundary) {
        boundary -= 1;
    }

    &s[..boundary]
}

/// Truncate a string for display, appending "..." if anything was cut.
///
/// # Example
/// ```
/// use line_notify_client::utils::truncate_for_display;
///
/// assert_eq!(truncate_for_display("invalid access token", 7), "invalid...");
/// assert_eq!(truncate_for_display("ok", 7), "ok");
/// ```
#[must_use]
pub fn truncate_for_display(s: &str, max_bytes: usize) -> String {
    let truncated = safe_truncate(s, max_bytes);
    if truncated.len() < s.len() {
        format!("{truncated}...")
    } else {
        truncated.to_string()
    }
}
