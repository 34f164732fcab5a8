//! OAuth client-credentials token source.
//!
//! Exchanges a client id and secret for a bearer token, caches it until it is
//! close to expiry, and serialises refreshes so concurrent reads that find the
//! cache stale wait on a single token request.

use std::time::{Duration, Instant};

use base64::{Engine as _, engine::general_purpose};
use bitbucket_types::CredentialKey;
use bitbucket_util::redact_sensitive;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;
use zeroize::Zeroizing;

use crate::{ConfigError, SecretString, TokenError};

/// Lifetime assumed when the token endpoint omits `expires_in`.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);
/// Tokens this close to expiry are treated as expired.
pub const REFRESH_SKEW: Duration = Duration::from_secs(30);

const GRANT_BODY: &str = "grant_type=client_credentials";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    token_type: Option<String>,
}

struct CachedToken {
    access_token: SecretString,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        now + REFRESH_SKEW < self.expires_at
    }
}

pub struct TokenSource {
    http: reqwest::Client,
    token_url: Url,
    /// Precomputed `Basic base64(id:secret)` client authentication header.
    client_auth: HeaderValue,
    cache: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSource")
            .field("token_url", &self.token_url.as_str())
            .field("client_auth", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl TokenSource {
    pub fn new(
        http: reqwest::Client,
        token_url: Url,
        client_id: &str,
        client_secret: &SecretString,
    ) -> Result<Self, ConfigError> {
        let credentials = Zeroizing::new(format!("{}:{}", client_id, client_secret.expose()));
        let encoded = Zeroizing::new(general_purpose::STANDARD.encode(credentials.as_bytes()));
        let mut client_auth =
            HeaderValue::from_str(&format!("Basic {}", &*encoded)).map_err(|_| ConfigError::InvalidCredentialValue {
                key: CredentialKey::OAuthClientSecret,
            })?;
        client_auth.set_sensitive(true);

        Ok(Self {
            http,
            token_url,
            client_auth,
            cache: Mutex::new(None),
        })
    }

    /// Returns a bearer token, refreshing it when missing or near expiry.
    ///
    /// Only one refresh runs at a time; callers arriving during a refresh wait
    /// for it and then reuse its result. Cancellation is observed while
    /// waiting for the lock and while the token request is in flight.
    pub async fn bearer(&self, cancel: &CancellationToken) -> Result<SecretString, TokenError> {
        let mut cache = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TokenError::Cancelled),
            guard = self.cache.lock() => guard,
        };

        if let Some(token) = cache.as_ref()
            && token.is_fresh(Instant::now())
        {
            return Ok(token.access_token.clone());
        }

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TokenError::Cancelled),
            result = self.fetch() => result?,
        };
        let access_token = fetched.access_token.clone();
        *cache = Some(fetched);
        Ok(access_token)
    }

    async fn fetch(&self) -> Result<CachedToken, TokenError> {
        debug!(token_url = %self.token_url, "requesting oauth access token");
        let requested_at = Instant::now();

        let response = self
            .http
            .post(self.token_url.clone())
            .header(AUTHORIZATION, self.client_auth.clone())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(GRANT_BODY)
            .send()
            .await
            .map_err(token_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = %status, "token endpoint rejected the request");
            return Err(TokenError::Rejected { status: status.as_u16() });
        }

        let body = response.bytes().await.map_err(token_transport_error)?;
        let parsed: TokenResponse =
            serde_json::from_slice(&body).map_err(|e| TokenError::InvalidResponse(e.to_string()))?;

        if let Some(token_type) = parsed.token_type.as_deref()
            && !token_type.eq_ignore_ascii_case("bearer")
        {
            return Err(TokenError::UnsupportedTokenType(token_type.to_string()));
        }
        if parsed.access_token.trim().is_empty() {
            return Err(TokenError::InvalidResponse("access_token is empty".to_string()));
        }

        let ttl = parsed.expires_in.map(Duration::from_secs).unwrap_or(DEFAULT_TOKEN_TTL);
        debug!(expires_in = ttl.as_secs(), "oauth access token refreshed");
        Ok(CachedToken {
            access_token: SecretString::new(parsed.access_token),
            expires_at: requested_at + ttl,
        })
    }
}

fn token_transport_error(error: reqwest::Error) -> TokenError {
    if error.is_timeout() {
        TokenError::Timeout
    } else {
        TokenError::Network(redact_sensitive(&error.to_string()))
    }
}
