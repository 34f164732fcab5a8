//! Bitbucket API credentials and authenticated transport.
//!
//! This crate turns the provider's five authentication attributes into a
//! ready-to-use HTTP client:
//!
//! - [`resolve_credentials`] selects exactly one authentication mode, falling
//!   back to `BITBUCKET_*` environment variables
//! - [`ClientSettings`] carries the validated base URL, token endpoint,
//!   default deadline and body limit
//! - [`BitbucketClient`] attaches the resolved credential to every request,
//!   obtaining OAuth tokens through a shared [`TokenSource`] when needed
//! - [`ProviderConfig`] bundles the result for the lifetime of a provider
//!
//! # Example
//!
//! ```no_run
//! use bitbucket_api::{ClientSettings, OutboundRequest, ProviderConfig, ProviderConfigInput};
//! use bitbucket_types::CredentialKey;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let input = ProviderConfigInput::new().with(CredentialKey::OAuthToken, "token");
//! let config = ProviderConfig::new(&input, ClientSettings::from_env()?)?;
//! let response = config
//!     .client()
//!     .send(OutboundRequest::get("2.0/user"), &CancellationToken::new())
//!     .await?;
//! println!("status: {}", response.status());
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod credentials;
mod error;
mod secret;
mod settings;
mod token_source;

pub use client::{BitbucketClient, OutboundRequest};
pub use config::ProviderConfig;
pub use credentials::{AuthMode, Credentials, ProviderConfigInput, resolve_credentials, resolve_credentials_with};
pub use error::{ConfigError, TokenError, TransportError};
pub use secret::SecretString;
pub use settings::{
    API_BASE_ENV, ClientSettings, DEFAULT_API_BASE, DEFAULT_MAX_BODY_BYTES, DEFAULT_TIMEOUT, DEFAULT_TOKEN_URL,
    TIMEOUT_ENV, TOKEN_URL_ENV, validate_base_url, validate_endpoint_url,
};
pub use token_source::{DEFAULT_TOKEN_TTL, REFRESH_SKEW, TokenSource};
