//! Error types for provider configuration and the authenticated transport.

use bitbucket_types::{AuthGroup, CredentialKey, Diagnostic, TransportCause};
use thiserror::Error;

/// Fatal errors raised while configuring the provider.
///
/// These are the only errors that prevent the provider from starting; every
/// other failure is reported per read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "conflicting authentication attributes {}: {} are mutually exclusive, configure exactly one authentication mode",
        join(.keys),
        join(.groups)
    )]
    Conflict {
        keys: Vec<CredentialKey>,
        groups: Vec<AuthGroup>,
    },

    #[error("incomplete {group} credentials: '{missing}' must be set (or {}) together with {}", .missing.env_var(), join(.group.keys()))]
    Incomplete { group: AuthGroup, missing: CredentialKey },

    #[error("unknown provider attribute '{name}'")]
    UnknownAttribute { name: String },

    #[error("provider attribute '{name}' must be a string")]
    InvalidAttribute { name: String },

    #[error("'{key}' contains characters that cannot be sent in an HTTP header")]
    InvalidCredentialValue { key: CredentialKey },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: String, reason: String },

    #[error("could not build the HTTP client: {0}")]
    HttpClient(String),
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

impl From<&ConfigError> for Diagnostic {
    fn from(error: &ConfigError) -> Self {
        Diagnostic::error("invalid provider configuration", error.to_string())
    }
}

/// Errors raised while obtaining an OAuth access token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token request cancelled")]
    Cancelled,

    #[error("token request timed out")]
    Timeout,

    #[error("token endpoint unreachable: {0}")]
    Network(String),

    #[error("token endpoint rejected the client credentials with status {status}")]
    Rejected { status: u16 },

    #[error("token endpoint returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("unsupported token type '{0}', expected bearer")]
    UnsupportedTokenType(String),
}

/// Errors raised by [`BitbucketClient`](crate::BitbucketClient) before a
/// response status is available.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request cancelled")]
    Cancelled,

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("response body exceeds the {limit} byte limit")]
    BodyTooLarge { limit: usize },

    #[error("invalid request path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl TransportError {
    /// Transport sub-kind reported to the host runtime.
    pub fn cause(&self) -> TransportCause {
        match self {
            TransportError::Cancelled | TransportError::Token(TokenError::Cancelled) => TransportCause::Cancelled,
            TransportError::Timeout | TransportError::Token(TokenError::Timeout) => TransportCause::Timeout,
            TransportError::BodyTooLarge { .. } => TransportCause::BodyTooLarge,
            _ => TransportCause::Network,
        }
    }
}
