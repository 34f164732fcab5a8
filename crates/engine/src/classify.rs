//! Maps transport failures and HTTP statuses onto the read error taxonomy.

use bitbucket_api::{TokenError, TransportError};
use bitbucket_types::{BindingSpec, ErrorKind, ReadError};
use bitbucket_util::redact_sensitive;
use reqwest::StatusCode;
use serde_json::Value;

use crate::bind::BoundParams;

/// Classifies a failure raised before a response status was available.
pub fn classify_transport(spec: &BindingSpec, error: &TransportError) -> ReadError {
    match error {
        TransportError::Token(TokenError::Rejected { status: 401 }) => ReadError::new(
            ErrorKind::Unauthorized,
            spec.name,
            "the OAuth token endpoint rejected the configured client credentials",
        ),
        TransportError::Token(TokenError::Rejected { status: 403 }) => ReadError::new(
            ErrorKind::Forbidden,
            spec.name,
            "the OAuth consumer is not permitted to obtain an access token",
        ),
        TransportError::InvalidPath { .. } => ReadError::contract(spec.name, error.to_string()),
        other => ReadError::transport(other.cause(), spec.name, redact_sensitive(&other.to_string())),
    }
}

/// Classifies a non-success status; returns `None` for 2xx.
///
/// `body` is the (possibly empty) error body; a Bitbucket `error.message`
/// found in it is passed through `redact` and appended to the detail.
pub fn classify_status<R>(
    spec: &BindingSpec,
    params: &BoundParams,
    status: StatusCode,
    retry_after: Option<String>,
    body: &[u8],
    redact: R,
) -> Option<ReadError>
where
    R: Fn(&str) -> String,
{
    if status.is_success() {
        return None;
    }
    let (kind, detail) = match status.as_u16() {
        404 => (
            ErrorKind::NotFound,
            format!("{} not found for {}", entity_name(spec), params.describe()),
        ),
        401 => (
            ErrorKind::Unauthorized,
            "the request was not authorized; check the provider credentials".to_string(),
        ),
        403 => (
            ErrorKind::Forbidden,
            "the configured credentials are not permitted to read this resource".to_string(),
        ),
        429 => (ErrorKind::RateLimited, "rate limit exceeded".to_string()),
        code if status.is_server_error() => (ErrorKind::Server, format!("server returned status {code}")),
        code => (ErrorKind::UnexpectedStatus(code), format!("unexpected status {code}")),
    };

    let detail = match remote_message(body) {
        Some(message) => format!("{detail}: {}", redact(&message)),
        None => detail,
    };
    let retry_after = if kind == ErrorKind::RateLimited { retry_after } else { None };
    Some(ReadError::new(kind, spec.name, detail).with_retry_after(retry_after))
}

/// Human name of what a binding reads, e.g. `commit comments`.
fn entity_name(spec: &BindingSpec) -> String {
    spec.name.trim_start_matches("bitbucket_").replace('_', " ")
}

/// Extracts `error.message` from a Bitbucket error body, cut to 200 chars.
fn remote_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let message = value.get("error")?.get("message")?.as_str()?.trim();
    (!message.is_empty()).then(|| message.chars().take(200).collect())
}
