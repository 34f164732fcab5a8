//! Transport settings that live outside the provider schema.
//!
//! The base API URL, token endpoint, and default timeout can be overridden
//! from the environment for testing against a local double or a proxy.

use std::env;
use std::time::Duration;

use url::Url;

use crate::ConfigError;

pub const DEFAULT_API_BASE: &str = "https://api.bitbucket.org/";
pub const DEFAULT_TOKEN_URL: &str = "https://bitbucket.org/site/oauth2/access_token";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Largest response body read before the request is abandoned.
pub const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

pub const API_BASE_ENV: &str = "BITBUCKET_API_BASE";
pub const TOKEN_URL_ENV: &str = "BITBUCKET_OAUTH_TOKEN_URL";
pub const TIMEOUT_ENV: &str = "BITBUCKET_HTTP_TIMEOUT_SECS";

/// Hostnames (and their subdomains) accepted for non-local base URLs.
const ALLOWED_BITBUCKET_DOMAINS: &[&str] = &["bitbucket.org"];
/// Hostnames allowed for local development regardless of scheme.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub token_url: Url,
    /// Per-request deadline applied when the host does not supply one
    pub timeout: Duration,
    pub max_body_bytes: usize,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            token_url: Url::parse(DEFAULT_TOKEN_URL).expect("default token URL is a valid URL"),
            timeout: DEFAULT_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            user_agent: format!("terraform-provider-bitbucket/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        }
    }
}

impl ClientSettings {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads overrides through `lookup`; unset or blank values keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut settings = Self::default();
        if let Some(base) = read(API_BASE_ENV) {
            settings = settings.with_base_url(&base)?;
        }
        if let Some(token_url) = read(TOKEN_URL_ENV) {
            settings = settings.with_token_url(&token_url)?;
        }
        if let Some(raw) = read(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidSetting {
                name: TIMEOUT_ENV.to_string(),
                reason: format!("'{raw}' is not a whole number of seconds"),
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidSetting {
                    name: TIMEOUT_ENV.to_string(),
                    reason: "timeout must be greater than zero".to_string(),
                });
            }
            settings.timeout = Duration::from_secs(secs);
        }
        Ok(settings)
    }

    pub fn with_base_url(mut self, base: &str) -> Result<Self, ConfigError> {
        self.base_url = validate_base_url(base)?;
        Ok(self)
    }

    pub fn with_token_url(mut self, token_url: &str) -> Result<Self, ConfigError> {
        self.token_url = validate_endpoint_url(token_url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }
}

/// Validate that a base URL is acceptable and normalise it to end with `/`,
/// so relative paths such as `2.0/user` join beneath it.
pub fn validate_base_url(base: &str) -> Result<Url, ConfigError> {
    let mut parsed_base_url = validate_endpoint_url(base)?;
    if !parsed_base_url.path().ends_with('/') {
        let path = format!("{}/", parsed_base_url.path());
        parsed_base_url.set_path(&path);
    }
    Ok(parsed_base_url)
}

/// Validate that an endpoint URL may receive credentials.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS, and host must be `bitbucket.org` or a
///   subdomain of it
pub fn validate_endpoint_url(base: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: base.to_string(),
        reason,
    };
    let parsed_base_url = Url::parse(base.trim()).map_err(|e| invalid(e.to_string()))?;

    let host_name = parsed_base_url
        .host_str()
        .ok_or_else(|| invalid("URL must include a host".to_string()))?
        .to_string();

    let is_local = LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed));

    if !is_local {
        if parsed_base_url.scheme() != "https" {
            return Err(invalid(format!(
                "must use https for non-localhost hosts; got '{}://'",
                parsed_base_url.scheme()
            )));
        }
        let is_allowed_domain = ALLOWED_BITBUCKET_DOMAINS.iter().any(|&allowed_domain| {
            host_name.eq_ignore_ascii_case(allowed_domain) || host_name.to_ascii_lowercase().ends_with(&format!(".{}", allowed_domain))
        });
        if !is_allowed_domain {
            return Err(invalid(format!(
                "host '{}' is not allowed; must be one of {:?} or a subdomain, or localhost",
                host_name, ALLOWED_BITBUCKET_DOMAINS
            )));
        }
    }

    Ok(parsed_base_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_point_at_public_api() {
        let settings = ClientSettings::default();
        assert_eq!(settings.base_url.as_str(), DEFAULT_API_BASE);
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert!(settings.user_agent.starts_with("terraform-provider-bitbucket/"));
    }

    #[test]
    fn accepts_bitbucket_subdomains_over_https() {
        assert!(validate_base_url("https://api.bitbucket.org").is_ok());
        assert!(validate_base_url("https://bitbucket.org/site").is_ok());
    }

    #[test]
    fn rejects_plain_http_and_foreign_hosts() {
        assert!(matches!(
            validate_base_url("http://api.bitbucket.org"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(validate_base_url("https://bitbucket.org.evil.com").is_err());
        assert!(validate_base_url("https://notbitbucket.org").is_err());
        assert!(validate_base_url("not a url").is_err());
    }

    #[test]
    fn localhost_allows_any_scheme_and_gets_trailing_slash() {
        let url = validate_base_url("http://127.0.0.1:8080/api").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/");
        assert_eq!(url.join("2.0/user").unwrap().as_str(), "http://127.0.0.1:8080/api/2.0/user");
    }

    #[test]
    fn token_url_keeps_its_path() {
        let settings = ClientSettings::default().with_token_url("http://localhost:9000/site/oauth2/access_token").unwrap();
        assert_eq!(settings.token_url.as_str(), "http://localhost:9000/site/oauth2/access_token");
    }

    #[test]
    fn lookup_overrides_defaults() {
        let env: HashMap<&str, &str> = HashMap::from([
            (API_BASE_ENV, "http://localhost:9000"),
            (TIMEOUT_ENV, "5"),
            (TOKEN_URL_ENV, " "),
        ]);
        let settings = ClientSettings::from_lookup(|name| env.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(settings.base_url.as_str(), "http://localhost:9000/");
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.token_url.as_str(), DEFAULT_TOKEN_URL);
    }

    #[test]
    fn invalid_timeout_is_a_configuration_error() {
        for raw in ["abc", "0"] {
            let err = ClientSettings::from_lookup(|name| (name == TIMEOUT_ENV).then(|| raw.to_string())).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidSetting { .. }), "{raw}: {err:?}");
        }
    }
}
