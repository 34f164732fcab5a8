//! Authenticated transport shared by every read of a provider instance.

use std::time::{Duration, Instant};

use base64::{Engine as _, engine::general_purpose};
use bitbucket_types::CredentialKey;
use bitbucket_util::{encode_query, redact_secrets, redact_sensitive};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Response};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;
use zeroize::Zeroizing;

use crate::{AuthMode, ClientSettings, ConfigError, Credentials, SecretString, TokenError, TokenSource, TransportError};

/// How the `Authorization` header is produced for each request.
#[derive(Debug)]
enum Authenticator {
    None,
    /// Fixed header for basic and token modes; marked sensitive.
    Static(HeaderValue),
    TokenSource(TokenSource),
}

/// One outbound call handed to [`BitbucketClient::send`].
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    /// Path relative to the API base, e.g. `2.0/repositories/w/r`
    pub path: String,
    /// Query pairs in order; pairs with empty values are dropped.
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
    /// Overrides the client default deadline.
    pub timeout: Option<Duration>,
}

impl OutboundRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_header(mut self, name: header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client with the resolved credential baked in.
///
/// Built once per provider instance and shared read-only across concurrent
/// reads. Every request is resolved against the validated base URL, carries
/// the default `Accept` and `User-Agent` headers, and at most one
/// `Authorization` header produced by the selected mode.
#[derive(Debug)]
pub struct BitbucketClient {
    settings: ClientSettings,
    http: Client,
    auth: Authenticator,
    mode: AuthMode,
    /// Configured credential values, removed from remote-supplied text.
    secrets: Vec<SecretString>,
}

impl BitbucketClient {
    pub fn new(credentials: &Credentials, settings: ClientSettings) -> Result<Self, ConfigError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let user_agent = HeaderValue::from_str(&settings.user_agent).map_err(|e| ConfigError::InvalidSetting {
            name: "user_agent".to_string(),
            reason: e.to_string(),
        })?;
        default_headers.insert(header::USER_AGENT, user_agent);

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let auth = match credentials {
            Credentials::Basic { username, password } => {
                let pair = Zeroizing::new(format!("{}:{}", username, password.expose()));
                let encoded = Zeroizing::new(general_purpose::STANDARD.encode(pair.as_bytes()));
                Authenticator::Static(sensitive_header(&format!("Basic {}", &*encoded), CredentialKey::Password)?)
            }
            Credentials::OAuthToken { token } => Authenticator::Static(sensitive_header(
                &format!("Bearer {}", token.expose()),
                CredentialKey::OAuthToken,
            )?),
            Credentials::ClientCredentials {
                client_id,
                client_secret,
            } => Authenticator::TokenSource(TokenSource::new(
                http.clone(),
                settings.token_url.clone(),
                client_id,
                client_secret,
            )?),
            Credentials::Unauthenticated => Authenticator::None,
        };

        debug!(mode = credentials.mode().name(), base_url = %settings.base_url, "http client built");
        Ok(Self {
            settings,
            http,
            auth,
            mode: credentials.mode(),
            secrets: credentials.secret_values().into_iter().map(SecretString::new).collect(),
        })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.mode
    }

    /// Redacts text that originated from a remote response, such as an
    /// error message or a body excerpt.
    ///
    /// Configured credential values are replaced literally, so this must
    /// not be applied to text the provider composed itself.
    pub fn redact_remote(&self, text: &str) -> String {
        let literal: Vec<&str> = self.secrets.iter().map(SecretString::expose).collect();
        redact_secrets(text, &literal)
    }

    /// Resolves an API-relative path and query against the base URL.
    ///
    /// Paths that would leave the base URL (absolute URLs or `..` segments
    /// climbing above it) are rejected.
    pub fn resolve_url(&self, path: &str, query: &[(String, String)]) -> Result<Url, TransportError> {
        let invalid = |reason: &str| TransportError::InvalidPath {
            path: path.to_string(),
            reason: reason.to_string(),
        };
        let relative = path.trim_start_matches('/');
        if relative.contains("://") {
            return Err(invalid("path must be relative to the API base"));
        }
        let mut url = self.settings.base_url.join(relative).map_err(|e| invalid(&e.to_string()))?;
        if url.origin() != self.settings.base_url.origin() || !url.path().starts_with(self.settings.base_url.path()) {
            return Err(invalid("path resolves outside the API base"));
        }

        let encoded = encode_query(query);
        url.set_query((!encoded.is_empty()).then_some(encoded.as_str()));
        Ok(url)
    }

    /// Sends a request with the credential attached.
    ///
    /// Cancellation is observed before the request is built, while a token is
    /// obtained, and while waiting for the response head. No retries are made.
    pub async fn send(&self, request: OutboundRequest, cancel: &CancellationToken) -> Result<Response, TransportError> {
        if cancel.is_cancelled() {
            return Err(TransportError::Cancelled);
        }
        let OutboundRequest {
            method,
            path,
            query,
            mut headers,
            body,
            timeout,
        } = request;
        let url = self.resolve_url(&path, &query)?;
        headers.remove(header::AUTHORIZATION);

        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .headers(headers)
            .timeout(timeout.unwrap_or(self.settings.timeout));
        if let Some(authorization) = self.authorization(cancel).await? {
            builder = builder.header(header::AUTHORIZATION, authorization);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        debug!(method = %method, path = %url.path(), "http request started");
        let started = Instant::now();
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(TransportError::Cancelled),
            result = builder.send() => result.map_err(transport_error)?,
        };
        debug!(
            method = %method,
            path = %url.path(),
            status = %response.status(),
            duration_ms = started.elapsed().as_millis() as u64,
            "http request completed"
        );
        Ok(response)
    }

    /// Reads a response body chunk by chunk, enforcing the body limit and
    /// observing cancellation between chunks.
    pub async fn read_body(&self, mut response: Response, cancel: &CancellationToken) -> Result<Vec<u8>, TransportError> {
        let limit = self.settings.max_body_bytes;
        if let Some(length) = response.content_length()
            && length > limit as u64
        {
            return Err(TransportError::BodyTooLarge { limit });
        }

        let mut body = Vec::new();
        loop {
            let chunk = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(TransportError::Cancelled),
                chunk = response.chunk() => chunk.map_err(transport_error)?,
            };
            let Some(chunk) = chunk else {
                break;
            };
            if body.len() + chunk.len() > limit {
                return Err(TransportError::BodyTooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }
        debug!(bytes = body.len(), "response body read");
        Ok(body)
    }

    async fn authorization(&self, cancel: &CancellationToken) -> Result<Option<HeaderValue>, TransportError> {
        match &self.auth {
            Authenticator::None => Ok(None),
            Authenticator::Static(value) => Ok(Some(value.clone())),
            Authenticator::TokenSource(source) => {
                let token = source.bearer(cancel).await?;
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose())).map_err(|_| {
                    TokenError::InvalidResponse("access token contains characters not allowed in a header".to_string())
                })?;
                value.set_sensitive(true);
                Ok(Some(value))
            }
        }
    }
}

fn sensitive_header(value: &str, key: CredentialKey) -> Result<HeaderValue, ConfigError> {
    let mut header_value = HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidCredentialValue { key })?;
    header_value.set_sensitive(true);
    Ok(header_value)
}

fn transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(redact_sensitive(&error.to_string()))
    }
}
