//! Error taxonomy surfaced to the host runtime.
//!
//! Every failed read produces one [`ReadError`]. Errors carry the binding name
//! and the resolved URL so a diagnostic can be traced back to a request, but
//! never the credential that was attached to it.

use std::fmt;

use serde::Serialize;

/// Sub-kind of a transport failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportCause {
    /// DNS, TCP, TLS, or protocol failure
    Network,
    /// The per-request deadline elapsed
    Timeout,
    /// The host runtime tripped the cancellation token
    Cancelled,
    /// The response body exceeded the configured limit
    BodyTooLarge,
}

/// Classification of a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    Transport(TransportCause),
    EmptyResponse,
    NotFound,
    Unauthorized,
    Forbidden,
    RateLimited,
    Server,
    Decode,
    Contract,
    /// Any other non-success status, kept verbatim.
    UnexpectedStatus(u16),
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration error",
            ErrorKind::Transport(TransportCause::Cancelled) => "request cancelled",
            ErrorKind::Transport(TransportCause::Timeout) => "request timed out",
            ErrorKind::Transport(TransportCause::BodyTooLarge) => "response too large",
            ErrorKind::Transport(TransportCause::Network) => "transport error",
            ErrorKind::EmptyResponse => "empty response",
            ErrorKind::NotFound => "not found",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::RateLimited => "rate limited",
            ErrorKind::Server => "server error",
            ErrorKind::Decode => "decode error",
            ErrorKind::Contract => "contract error",
            ErrorKind::UnexpectedStatus(_) => "unexpected status",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ErrorKind::Transport(TransportCause::Cancelled))
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnexpectedStatus(code) => write!(f, "{} ({code})", self.label()),
            _ => f.write_str(self.label()),
        }
    }
}

/// A failed read of one binding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReadError {
    pub kind: ErrorKind,
    /// Stable name of the binding that failed
    pub binding: String,
    /// One-line human readable detail
    pub detail: String,
    /// Resolved request URL, when the failure happened after URL construction
    pub url: Option<String>,
    /// `Retry-After` header value, verbatim, for rate-limited responses
    pub retry_after: Option<String>,
}

impl ReadError {
    pub fn new(kind: ErrorKind, binding: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            binding: binding.into(),
            detail: detail.into(),
            url: None,
            retry_after: None,
        }
    }

    /// Create a contract error.
    pub fn contract(binding: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Contract, binding, detail)
    }

    /// Create a decode error.
    pub fn decode(binding: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, binding, detail)
    }

    /// Create a transport error with the given sub-kind.
    pub fn transport(cause: TransportCause, binding: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport(cause), binding, detail)
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_retry_after(mut self, retry_after: Option<String>) -> Self {
        self.retry_after = retry_after;
        self
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.binding, self.kind, self.detail)?;
        if let Some(retry_after) = &self.retry_after {
            write!(f, " (retry after {retry_after})")?;
        }
        if let Some(url) = &self.url {
            write!(f, " [GET {url}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for ReadError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A diagnostic handed back to the host runtime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    /// Binding the diagnostic belongs to; `None` for provider-level diagnostics
    pub binding: Option<String>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
            binding: None,
        }
    }

    pub fn for_binding(mut self, binding: impl Into<String>) -> Self {
        self.binding = Some(binding.into());
        self
    }
}

impl From<&ReadError> for Diagnostic {
    fn from(error: &ReadError) -> Self {
        Diagnostic::error(format!("{}: {}", error.binding, error.kind), error.to_string()).for_binding(error.binding.clone())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.summary, self.detail)
    }
}
