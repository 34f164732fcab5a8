//! # Response parsing
//!
//! Strict JSON parsing for response bodies. Failures keep a short, single-line
//! excerpt of the body so a malformed payload can be diagnosed without
//! echoing all of it.

use serde_json::Value;
use thiserror::Error;

/// Maximum number of body characters kept in an excerpt.
const EXCERPT_CHARS: usize = 200;

/// Parses a response body as JSON.
///
/// On failure the error names the HTTP status (when known) and carries an
/// excerpt of the body with whitespace runs collapsed to single spaces.
/// Callers surfacing the message should still pass it through
/// [`redact_sensitive`](crate::redact_sensitive).
///
/// ```rust
/// use bitbucket_util::parse_response_json_strict;
///
/// let value = parse_response_json_strict(r#"{"name": "v1"}"#, Some(200)).unwrap();
/// assert_eq!(value["name"], "v1");
///
/// let err = parse_response_json_strict("<html>", Some(200)).unwrap_err();
/// assert_eq!(err.body_preview(), "<html>");
/// ```
pub fn parse_response_json_strict(text: &str, status: Option<u16>) -> Result<Value, JsonParseError> {
    serde_json::from_str(text).map_err(|source| JsonParseError {
        status,
        source,
        excerpt: excerpt(text),
    })
}

fn excerpt(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return "<empty>".to_string();
    }
    match collapsed.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &collapsed[..cut]),
        None => collapsed,
    }
}

/// A response body that was not valid JSON.
#[derive(Debug, Error)]
#[error("response{} is not valid JSON: {source}; body starts with: {excerpt}", status_label(*.status))]
pub struct JsonParseError {
    status: Option<u16>,
    #[source]
    source: serde_json::Error,
    excerpt: String,
}

impl JsonParseError {
    /// The collapsed, truncated body excerpt.
    pub fn body_preview(&self) -> &str {
        &self.excerpt
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

fn status_label(status: Option<u16>) -> String {
    match status {
        Some(code) => format!(" with status {code}"),
        None => String::new(),
    }
}
