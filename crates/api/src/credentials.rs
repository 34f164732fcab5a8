//! Credential resolution.
//!
//! The provider block accepts five optional attributes, each with an
//! environment fallback. Exactly one authentication group may be present;
//! conflicts are detected over every present key before any group is
//! inspected for completeness.

use std::collections::{BTreeMap, BTreeSet};
use std::env;

use bitbucket_types::{AuthGroup, CredentialKey};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::{ConfigError, SecretString};

/// Raw authentication attributes as supplied by the host runtime.
#[derive(Clone, Debug, Default)]
pub struct ProviderConfigInput {
    values: BTreeMap<CredentialKey, SecretString>,
}

impl ProviderConfigInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: CredentialKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: CredentialKey, value: impl Into<String>) {
        self.values.insert(key, SecretString::new(value));
    }

    pub fn get(&self, key: CredentialKey) -> Option<&SecretString> {
        self.values.get(&key)
    }

    /// Builds the input from attribute-name/value pairs.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnknownAttribute`] for any name that is not one
    /// of the five provider attributes.
    pub fn from_attributes<I, K, V>(attributes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut input = Self::new();
        for (name, value) in attributes {
            let name = name.as_ref();
            let key = CredentialKey::from_attribute_name(name).ok_or_else(|| ConfigError::UnknownAttribute { name: name.to_string() })?;
            input.set(key, value);
        }
        Ok(input)
    }

    /// Builds the input from a JSON object; `null` attributes are treated as
    /// absent.
    pub fn from_json(config: &Value) -> Result<Self, ConfigError> {
        let Some(object) = config.as_object() else {
            return if config.is_null() {
                Ok(Self::new())
            } else {
                Err(ConfigError::InvalidAttribute {
                    name: "<provider>".to_string(),
                })
            };
        };
        let mut input = Self::new();
        for (name, value) in object {
            let key = CredentialKey::from_attribute_name(name).ok_or_else(|| ConfigError::UnknownAttribute { name: name.clone() })?;
            match value {
                Value::Null => {}
                Value::String(text) => input.set(key, text.as_str()),
                _ => return Err(ConfigError::InvalidAttribute { name: name.clone() }),
            }
        }
        Ok(input)
    }
}

/// The authentication mode selected for a provider instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    Basic,
    OAuthToken,
    OAuthClientCredentials,
    Unauthenticated,
}

impl AuthMode {
    pub fn name(&self) -> &'static str {
        match self {
            AuthMode::Basic => "basic",
            AuthMode::OAuthToken => "oauth-token",
            AuthMode::OAuthClientCredentials => "oauth-client-credentials",
            AuthMode::Unauthenticated => "unauthenticated",
        }
    }
}

/// Resolved credentials; exactly one variant is active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    Basic { username: String, password: SecretString },
    OAuthToken { token: SecretString },
    ClientCredentials { client_id: String, client_secret: SecretString },
    Unauthenticated,
}

impl Credentials {
    pub fn mode(&self) -> AuthMode {
        match self {
            Credentials::Basic { .. } => AuthMode::Basic,
            Credentials::OAuthToken { .. } => AuthMode::OAuthToken,
            Credentials::ClientCredentials { .. } => AuthMode::OAuthClientCredentials,
            Credentials::Unauthenticated => AuthMode::Unauthenticated,
        }
    }

    /// Literal secret values, redacted from remote-supplied text.
    pub fn secret_values(&self) -> Vec<&str> {
        match self {
            Credentials::Basic { password, .. } => vec![password.expose()],
            Credentials::OAuthToken { token } => vec![token.expose()],
            Credentials::ClientCredentials { client_secret, .. } => vec![client_secret.expose()],
            Credentials::Unauthenticated => Vec::new(),
        }
    }
}

/// Resolve credentials from the input, falling back to the process environment.
pub fn resolve_credentials(input: &ProviderConfigInput) -> Result<Credentials, ConfigError> {
    resolve_credentials_with(input, |name| env::var(name).ok())
}

/// Resolve credentials with an explicit environment lookup.
///
/// # Errors
/// - [`ConfigError::Conflict`] when present keys span more than one group;
///   every present key is named.
/// - [`ConfigError::Incomplete`] when the single present group lacks a key.
pub fn resolve_credentials_with<F>(input: &ProviderConfigInput, env_lookup: F) -> Result<Credentials, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut present: BTreeMap<CredentialKey, SecretString> = BTreeMap::new();
    for key in CredentialKey::ALL {
        let configured = input.get(key).filter(|value| !value.is_empty()).cloned();
        let value = configured.or_else(|| {
            env_lookup(key.env_var())
                .filter(|value| !value.trim().is_empty())
                .map(SecretString::from)
        });
        if let Some(value) = value {
            present.insert(key, value);
        }
    }

    let groups: BTreeSet<AuthGroup> = present.keys().map(CredentialKey::group).collect();
    if groups.len() > 1 {
        return Err(ConfigError::Conflict {
            keys: present.keys().copied().collect(),
            groups: groups.into_iter().collect(),
        });
    }
    let Some(group) = groups.into_iter().next() else {
        debug!("no credentials configured; using unauthenticated mode");
        return Ok(Credentials::Unauthenticated);
    };

    let mut take = |key: CredentialKey| present.remove(&key).ok_or(ConfigError::Incomplete { group, missing: key });
    let credentials = match group {
        AuthGroup::Basic => {
            let username = take(CredentialKey::Username)?;
            let password = take(CredentialKey::Password)?;
            Credentials::Basic {
                username: username.expose().to_string(),
                password,
            }
        }
        AuthGroup::ClientCredentials => {
            let client_id = take(CredentialKey::OAuthClientId)?;
            let client_secret = take(CredentialKey::OAuthClientSecret)?;
            Credentials::ClientCredentials {
                client_id: client_id.expose().to_string(),
                client_secret,
            }
        }
        AuthGroup::Token => Credentials::OAuthToken {
            token: take(CredentialKey::OAuthToken)?,
        },
    };
    debug!(mode = credentials.mode().name(), "resolved provider credentials");
    Ok(credentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn input(pairs: &[(CredentialKey, &str)]) -> ProviderConfigInput {
        pairs.iter().fold(ProviderConfigInput::new(), |acc, (key, value)| acc.with(*key, *value))
    }

    #[test]
    fn empty_configuration_is_unauthenticated() {
        let credentials = resolve_credentials_with(&ProviderConfigInput::new(), no_env).unwrap();
        assert_eq!(credentials, Credentials::Unauthenticated);
        assert!(credentials.secret_values().is_empty());
    }

    #[test]
    fn basic_group_resolves() {
        let credentials = resolve_credentials_with(
            &input(&[(CredentialKey::Username, "u"), (CredentialKey::Password, "p")]),
            no_env,
        )
        .unwrap();
        assert_eq!(credentials.mode(), AuthMode::Basic);
        assert_eq!(credentials.secret_values(), vec!["p"]);
    }

    #[test]
    fn every_pair_of_groups_conflicts() {
        let one_of_each = [
            (AuthGroup::Basic, vec![(CredentialKey::Username, "u"), (CredentialKey::Password, "p")]),
            (
                AuthGroup::ClientCredentials,
                vec![(CredentialKey::OAuthClientId, "id"), (CredentialKey::OAuthClientSecret, "cs")],
            ),
            (AuthGroup::Token, vec![(CredentialKey::OAuthToken, "T")]),
        ];
        for (left_group, left) in &one_of_each {
            for (right_group, right) in &one_of_each {
                if left_group == right_group {
                    continue;
                }
                let pairs: Vec<_> = left.iter().chain(right.iter()).copied().collect();
                let err = resolve_credentials_with(&input(&pairs), no_env).unwrap_err();
                match err {
                    ConfigError::Conflict { keys, groups } => {
                        assert!(groups.contains(left_group) && groups.contains(right_group));
                        assert_eq!(keys.len(), pairs.len(), "every present key is named");
                    }
                    other => panic!("expected conflict, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn conflict_detection_is_total_even_for_incomplete_groups() {
        let err = resolve_credentials_with(
            &input(&[(CredentialKey::Password, "p"), (CredentialKey::OAuthClientId, "id")]),
            no_env,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Conflict { .. }), "{err:?}");
    }

    #[test]
    fn incomplete_groups_name_the_missing_key() {
        let cases = [
            (CredentialKey::Username, CredentialKey::Password),
            (CredentialKey::Password, CredentialKey::Username),
            (CredentialKey::OAuthClientId, CredentialKey::OAuthClientSecret),
            (CredentialKey::OAuthClientSecret, CredentialKey::OAuthClientId),
        ];
        for (given, expected_missing) in cases {
            let err = resolve_credentials_with(&input(&[(given, "value")]), no_env).unwrap_err();
            match err {
                ConfigError::Incomplete { missing, .. } => assert_eq!(missing, expected_missing),
                other => panic!("expected incomplete for {given}, got {other:?}"),
            }
        }
    }

    #[test]
    fn environment_fills_absent_and_empty_attributes() {
        let env: HashMap<&str, &str> = HashMap::from([("BITBUCKET_PASSWORD", "from-env")]);
        let credentials = resolve_credentials_with(
            &input(&[(CredentialKey::Username, "u"), (CredentialKey::Password, "")]),
            |name| env.get(name).map(|v| v.to_string()),
        )
        .unwrap();
        assert_eq!(
            credentials,
            Credentials::Basic {
                username: "u".to_string(),
                password: SecretString::new("from-env"),
            }
        );
    }

    #[test]
    fn environment_keys_participate_in_conflict_detection() {
        let env: HashMap<&str, &str> = HashMap::from([("BITBUCKET_OAUTH_TOKEN", "T")]);
        let err = resolve_credentials_with(
            &input(&[(CredentialKey::Username, "u"), (CredentialKey::Password, "p")]),
            |name| env.get(name).map(|v| v.to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Conflict { .. }));
    }

    #[test]
    fn resolve_credentials_reads_process_environment() {
        temp_env::with_vars(
            [
                ("BITBUCKET_USERNAME", None),
                ("BITBUCKET_PASSWORD", None),
                ("BITBUCKET_OAUTH_CLIENT_ID", None),
                ("BITBUCKET_OAUTH_CLIENT_SECRET", None),
                ("BITBUCKET_OAUTH_TOKEN", Some("env-token")),
            ],
            || {
                let credentials = resolve_credentials(&ProviderConfigInput::new()).unwrap();
                assert_eq!(credentials.mode(), AuthMode::OAuthToken);
            },
        );
    }

    #[test]
    fn from_attributes_rejects_unknown_names() {
        let err = ProviderConfigInput::from_attributes([("token", "T")]).unwrap_err();
        assert_eq!(err, ConfigError::UnknownAttribute { name: "token".into() });
        let ok = ProviderConfigInput::from_attributes([("oauth_token", "T")]).unwrap();
        assert_eq!(ok.get(CredentialKey::OAuthToken).map(SecretString::expose), Some("T"));
    }

    #[test]
    fn from_json_skips_nulls_and_rejects_non_strings() {
        let input = ProviderConfigInput::from_json(&serde_json::json!({"username": "u", "password": null})).unwrap();
        assert!(input.get(CredentialKey::Username).is_some());
        assert!(input.get(CredentialKey::Password).is_none());

        let err = ProviderConfigInput::from_json(&serde_json::json!({"username": 1})).unwrap_err();
        assert_eq!(err, ConfigError::InvalidAttribute { name: "username".into() });
    }
}
