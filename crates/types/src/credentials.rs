//! Names of the provider's authentication attributes.

use std::fmt;

use serde::Serialize;

/// One of the five authentication attributes of the provider block.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKey {
    Username,
    Password,
    OAuthClientId,
    OAuthClientSecret,
    OAuthToken,
}

impl CredentialKey {
    pub const ALL: [CredentialKey; 5] = [
        CredentialKey::Username,
        CredentialKey::Password,
        CredentialKey::OAuthClientId,
        CredentialKey::OAuthClientSecret,
        CredentialKey::OAuthToken,
    ];

    /// Attribute name in the provider configuration block.
    pub fn attribute_name(&self) -> &'static str {
        match self {
            CredentialKey::Username => "username",
            CredentialKey::Password => "password",
            CredentialKey::OAuthClientId => "oauth_client_id",
            CredentialKey::OAuthClientSecret => "oauth_client_secret",
            CredentialKey::OAuthToken => "oauth_token",
        }
    }

    /// Environment variable consulted when the attribute is absent or empty.
    pub fn env_var(&self) -> &'static str {
        match self {
            CredentialKey::Username => "BITBUCKET_USERNAME",
            CredentialKey::Password => "BITBUCKET_PASSWORD",
            CredentialKey::OAuthClientId => "BITBUCKET_OAUTH_CLIENT_ID",
            CredentialKey::OAuthClientSecret => "BITBUCKET_OAUTH_CLIENT_SECRET",
            CredentialKey::OAuthToken => "BITBUCKET_OAUTH_TOKEN",
        }
    }

    pub fn is_sensitive(&self) -> bool {
        matches!(
            self,
            CredentialKey::Password | CredentialKey::OAuthClientSecret | CredentialKey::OAuthToken
        )
    }

    pub fn group(&self) -> AuthGroup {
        match self {
            CredentialKey::Username | CredentialKey::Password => AuthGroup::Basic,
            CredentialKey::OAuthClientId | CredentialKey::OAuthClientSecret => AuthGroup::ClientCredentials,
            CredentialKey::OAuthToken => AuthGroup::Token,
        }
    }

    pub fn from_attribute_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.attribute_name() == name)
    }
}

impl fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute_name())
    }
}

/// A mutually-exclusive group of credential attributes.
///
/// The unauthenticated mode is the absence of every group.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthGroup {
    Basic,
    ClientCredentials,
    Token,
}

impl AuthGroup {
    pub const ALL: [AuthGroup; 3] = [AuthGroup::Basic, AuthGroup::ClientCredentials, AuthGroup::Token];

    /// Keys that must all be present for the group to be complete.
    pub fn keys(&self) -> &'static [CredentialKey] {
        match self {
            AuthGroup::Basic => &[CredentialKey::Username, CredentialKey::Password],
            AuthGroup::ClientCredentials => &[CredentialKey::OAuthClientId, CredentialKey::OAuthClientSecret],
            AuthGroup::Token => &[CredentialKey::OAuthToken],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AuthGroup::Basic => "basic",
            AuthGroup::ClientCredentials => "oauth-client-credentials",
            AuthGroup::Token => "oauth-token",
        }
    }
}

impl fmt::Display for AuthGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
