use std::fmt;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use bitbucket_api::{ClientSettings, ConfigError, ProviderConfig, ProviderConfigInput};
use bitbucket_engine::{Inputs, ReadOptions, ReadOutcome, read};
use bitbucket_registry::{Registry, RegistryError};
use bitbucket_types::{Diagnostic, ErrorKind, ReadError};
use serde_json::Value;
use tracing::{info, warn};

use crate::service::{ProviderService, Schemas};

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// The Bitbucket provider: one registration table and, once configured, one
/// shared transport used by every read.
pub struct BitbucketProvider {
    registry: Registry,
    settings: Option<ClientSettings>,
    env_lookup: EnvLookup,
    config: OnceLock<ProviderConfig>,
}

impl fmt::Debug for BitbucketProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitbucketProvider")
            .field("data_sources", &self.registry.data_source_names().count())
            .field("config", &self.config.get())
            .finish_non_exhaustive()
    }
}

impl BitbucketProvider {
    /// Builds the provider with the built-in catalog.
    ///
    /// Transport settings are read from the environment at configure time
    /// unless [`with_settings`](Self::with_settings) supplies them.
    pub fn new() -> Result<Self, RegistryError> {
        Ok(Self::with_registry(Registry::builtin()?))
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            settings: None,
            env_lookup: Arc::new(|name| std::env::var(name).ok()),
            config: OnceLock::new(),
        }
    }

    pub fn with_settings(mut self, settings: ClientSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Replaces the process environment used for credential fallback.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env_lookup = Arc::new(lookup);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The active configuration, once [`configure`](ProviderService::configure) succeeded.
    pub fn config(&self) -> Option<&ProviderConfig> {
        self.config.get()
    }

    fn build_config(&self, config: &Value) -> Result<ProviderConfig, ConfigError> {
        let input = ProviderConfigInput::from_json(config)?;
        let settings = match &self.settings {
            Some(settings) => settings.clone(),
            None => ClientSettings::from_env()?,
        };
        let lookup = Arc::clone(&self.env_lookup);
        ProviderConfig::with_env(&input, settings, move |name| lookup(name))
    }
}

/// Remote-supplied text in `error` was already redacted by the engine.
fn read_failure(error: &ReadError) -> Vec<Diagnostic> {
    warn!(binding = %error.binding, kind = %error.kind, "data source read failed");
    vec![Diagnostic::from(error)]
}

/// Converts a host input object into binding inputs; `null` means no inputs.
fn inputs_from_json(binding: &str, inputs: &Value) -> Result<Inputs, ReadError> {
    match inputs {
        Value::Null => Ok(Inputs::new()),
        Value::Object(object) => Ok(object.iter().map(|(name, value)| (name.clone(), value.clone())).collect()),
        _ => Err(ReadError::contract(binding, "data source inputs must be an object")),
    }
}

#[async_trait]
impl ProviderService for BitbucketProvider {
    fn schema(&self) -> Schemas {
        Schemas {
            provider: self.registry.provider_schema(),
            data_sources: self
                .registry
                .data_source_names()
                .filter_map(|name| Some((name, self.registry.data_source_schema(name)?)))
                .collect(),
            resources: self.registry.resource_names().collect(),
        }
    }

    async fn configure(&self, config: &Value) -> Vec<Diagnostic> {
        if self.config.get().is_some() {
            return vec![Diagnostic::error(
                "provider already configured",
                "configure may be called only once per provider instance",
            )];
        }
        let provider_config = match self.build_config(config) {
            Ok(provider_config) => provider_config,
            Err(error) => {
                warn!(error = %error, "provider configuration rejected");
                return vec![Diagnostic::from(&error)];
            }
        };
        let mode = provider_config.auth_mode();
        if self.config.set(provider_config).is_err() {
            return vec![Diagnostic::error(
                "provider already configured",
                "configure may be called only once per provider instance",
            )];
        }
        info!(
            mode = mode.name(),
            data_sources = self.registry.data_source_names().count(),
            "provider ready"
        );
        Vec::new()
    }

    async fn read_data_source(
        &self,
        name: &str,
        inputs: &Value,
        options: &ReadOptions,
    ) -> Result<ReadOutcome, Vec<Diagnostic>> {
        let Some(spec) = self.registry.data_source(name) else {
            return Err(vec![Diagnostic::error(
                "unknown data source",
                format!("'{name}' is not a data source of this provider"),
            )]);
        };
        let Some(config) = self.config.get() else {
            let error = ReadError::new(
                ErrorKind::Configuration,
                spec.name,
                "the provider has not been configured",
            );
            return Err(read_failure(&error));
        };
        let inputs = inputs_from_json(spec.name, inputs).map_err(|error| read_failure(&error))?;
        read(config.client(), spec, &inputs, options)
            .await
            .map_err(|error| read_failure(&error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitbucket_api::AuthMode;
    use serde_json::json;

    fn provider() -> BitbucketProvider {
        BitbucketProvider::new()
            .unwrap()
            .with_settings(ClientSettings::default())
            .with_env_lookup(|_| None)
    }

    #[tokio::test]
    async fn configure_selects_the_mode_once() {
        let provider = provider();
        assert!(provider.configure(&json!({"oauth_token": "T"})).await.is_empty());
        assert_eq!(provider.config().unwrap().auth_mode(), AuthMode::OAuthToken);

        let diagnostics = provider.configure(&json!({"username": "u", "password": "p"})).await;
        assert_eq!(diagnostics[0].summary, "provider already configured");
        assert_eq!(provider.config().unwrap().auth_mode(), AuthMode::OAuthToken);
    }

    #[tokio::test]
    async fn configuration_errors_become_diagnostics() {
        let provider = provider();
        let diagnostics = provider.configure(&json!({"username": "u"})).await;
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].summary, "invalid provider configuration");
        assert!(provider.config().is_none());

        let diagnostics = provider.configure(&json!({"region": "eu"})).await;
        assert!(diagnostics[0].detail.contains("region"), "{}", diagnostics[0].detail);
    }

    #[tokio::test]
    async fn environment_fallback_uses_the_injected_lookup() {
        let provider = BitbucketProvider::new()
            .unwrap()
            .with_settings(ClientSettings::default())
            .with_env_lookup(|name| (name == "BITBUCKET_OAUTH_TOKEN").then(|| "from-env".to_string()));
        assert!(provider.configure(&Value::Null).await.is_empty());
        assert_eq!(provider.config().unwrap().auth_mode(), AuthMode::OAuthToken);
    }

    #[tokio::test]
    async fn reads_require_a_known_name_and_a_configuration() {
        let provider = provider();
        let options = ReadOptions::default();

        let diagnostics = provider.read_data_source("bitbucket_nope", &json!({}), &options).await.unwrap_err();
        assert_eq!(diagnostics[0].summary, "unknown data source");

        let diagnostics = provider.read_data_source("bitbucket_tag", &json!({}), &options).await.unwrap_err();
        assert_eq!(diagnostics[0].binding.as_deref(), Some("bitbucket_tag"));
        assert!(diagnostics[0].detail.contains("not been configured"));
    }

    #[tokio::test]
    async fn non_object_inputs_are_a_contract_error() {
        let provider = provider();
        provider.configure(&Value::Null).await;
        let diagnostics = provider
            .read_data_source("bitbucket_tag", &json!(["w", "r"]), &ReadOptions::default())
            .await
            .unwrap_err();
        assert!(diagnostics[0].summary.contains("contract"), "{}", diagnostics[0].summary);
    }

    #[test]
    fn schema_lists_every_registered_name() {
        let provider = provider();
        let schemas = provider.schema();
        assert_eq!(schemas.data_sources.len(), provider.registry().data_source_names().count());
        assert!(schemas.data_sources.contains_key("bitbucket_pipelines"));
        assert!(schemas.resources.contains(&"bitbucket_repository"));
        assert_eq!(schemas.provider.attributes.len(), 5);
    }
}
