use async_trait::async_trait;
use bitbucket_engine::{ReadOptions, ReadOutcome};
use bitbucket_registry::{DataSourceSchema, ProviderSchema};
use bitbucket_types::Diagnostic;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Everything the host needs to validate configuration blocks up front.
#[derive(Clone, Debug, Serialize)]
pub struct Schemas {
    pub provider: ProviderSchema,
    pub data_sources: IndexMap<&'static str, DataSourceSchema>,
    /// Stable resource names; their lifecycle belongs to the host
    pub resources: Vec<&'static str>,
}

/// The seam between a host runtime and a provider implementation.
///
/// Failures never cross this boundary as panics or opaque errors: every one
/// comes back as a list of diagnostics.
#[async_trait]
pub trait ProviderService: Send + Sync {
    fn schema(&self) -> Schemas;

    /// Resolves credentials and builds the transport. Called once per
    /// provider instance; an empty list means success.
    async fn configure(&self, config: &Value) -> Vec<Diagnostic>;

    /// Reads one data source by its stable name.
    async fn read_data_source(
        &self,
        name: &str,
        inputs: &Value,
        options: &ReadOptions,
    ) -> Result<ReadOutcome, Vec<Diagnostic>>;
}
