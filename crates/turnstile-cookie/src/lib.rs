//! Inbound `Cookie:` header parsing for Turnstile.
//!
//! The session registry deliberately never touches raw HTTP headers — it
//! only exchanges opaque session ids. This crate is the collaborator-side
//! helper: the hosting framework hands it the value of an inbound `Cookie`
//! header, and gets back either the full name→value map or just the session
//! id stored under the conventional [`SESSION_COOKIE`] name.
//!
//! The grammar handled here is the classic `Cookie` request header:
//! semicolon-separated `name=value` pairs with optional surrounding
//! whitespace, e.g. `theme=dark; session=4f2a...; lang=en`.

use std::collections::BTreeMap;

/// The cookie name under which Turnstile hosts store the session id.
pub const SESSION_COOKIE: &str = "session";

/// Errors raised while parsing a `Cookie` header value.
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    /// A fragment between semicolons was not a single `name=value` pair.
    #[error("malformed cookie pair: {0:?}")]
    MalformedPair(String),
}

/// Parses a `Cookie` header value into a name→value map.
///
/// Empty fragments (as produced by a trailing `;`) are skipped; names and
/// values are trimmed of surrounding whitespace. A fragment that is not
/// exactly one `name=value` pair is an error — a client sending garbage
/// here is a client we want to reject loudly, not guess at.
pub fn parse_cookie_header(header: &str) -> Result<BTreeMap<String, String>, CookieError> {
    let mut cookies = BTreeMap::new();

    for fragment in header.split(';') {
        if fragment.trim().is_empty() {
            continue;
        }

        let Some((name, value)) = fragment.split_once('=') else {
            return Err(CookieError::MalformedPair(fragment.trim().to_string()));
        };
        if value.contains('=') {
            return Err(CookieError::MalformedPair(fragment.trim().to_string()));
        }

        cookies.insert(name.trim().to_string(), value.trim().to_string());
    }

    Ok(cookies)
}

/// Extracts the session id from a `Cookie` header value, if present.
///
/// `Ok(None)` when the header parses but carries no [`SESSION_COOKIE`];
/// `Err` when the header is malformed.
pub fn session_id(header: &str) -> Result<Option<String>, CookieError> {
    let mut cookies = parse_cookie_header(header)?;
    Ok(cookies.remove(SESSION_COOKIE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie_header_splits_pairs() {
        let cookies =
            parse_cookie_header("theme=dark; session=abc123; lang=en").expect("well-formed");

        assert_eq!(cookies.len(), 3);
        assert_eq!(cookies.get("theme").map(String::as_str), Some("dark"));
        assert_eq!(cookies.get("session").map(String::as_str), Some("abc123"));
        assert_eq!(cookies.get("lang").map(String::as_str), Some("en"));
    }

    #[test]
    fn test_parse_cookie_header_trims_whitespace() {
        let cookies = parse_cookie_header("  session = abc123 ").expect("well-formed");

        assert_eq!(cookies.get("session").map(String::as_str), Some("abc123"));
    }

    #[test]
    fn test_parse_cookie_header_skips_empty_fragments() {
        let cookies = parse_cookie_header("session=abc123;; lang=en;").expect("well-formed");

        assert_eq!(cookies.len(), 2);
    }

    #[test]
    fn test_parse_cookie_header_rejects_pair_without_equals() {
        let result = parse_cookie_header("session=abc123; garbage");

        assert!(matches!(result, Err(CookieError::MalformedPair(f)) if f == "garbage"));
    }

    #[test]
    fn test_parse_cookie_header_rejects_pair_with_extra_equals() {
        let result = parse_cookie_header("a=b=c");

        assert!(matches!(result, Err(CookieError::MalformedPair(_))));
    }

    #[test]
    fn test_parse_cookie_header_empty_input_yields_empty_map() {
        assert!(parse_cookie_header("").expect("well-formed").is_empty());
    }

    #[test]
    fn test_session_id_finds_the_session_cookie() {
        let id = session_id("lang=en; session=4f2a9c").expect("well-formed");

        assert_eq!(id.as_deref(), Some("4f2a9c"));
    }

    #[test]
    fn test_session_id_none_when_cookie_absent() {
        let id = session_id("lang=en; theme=dark").expect("well-formed");

        assert_eq!(id, None);
    }
}
