use std::sync::Arc;

use tracing::info;

use crate::{AuthMode, BitbucketClient, ClientSettings, ConfigError, Credentials, ProviderConfigInput};
use crate::resolve_credentials_with;

/// Per-instance provider state: the selected auth mode and the transport
/// with that credential baked in.
///
/// Immutable once built. Clones share the same transport.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    auth_mode: AuthMode,
    client: Arc<BitbucketClient>,
}

impl ProviderConfig {
    /// Resolves credentials (with process environment fallback) and builds
    /// the transport.
    pub fn new(input: &ProviderConfigInput, settings: ClientSettings) -> Result<Self, ConfigError> {
        Self::with_env(input, settings, |name| std::env::var(name).ok())
    }

    pub fn with_env<F>(input: &ProviderConfigInput, settings: ClientSettings, env_lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = resolve_credentials_with(input, env_lookup)?;
        Self::from_credentials(&credentials, settings)
    }

    pub fn from_credentials(credentials: &Credentials, settings: ClientSettings) -> Result<Self, ConfigError> {
        let client = BitbucketClient::new(credentials, settings)?;
        info!(mode = credentials.mode().name(), "provider configured");
        Ok(Self {
            auth_mode: credentials.mode(),
            client: Arc::new(client),
        })
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    pub fn client(&self) -> &BitbucketClient {
        &self.client
    }
}
