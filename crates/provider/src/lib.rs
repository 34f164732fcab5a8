//! # Bitbucket Provider
//!
//! Provider registration and the host seam. A host runtime drives the
//! provider through [`ProviderService`]:
//!
//! 1. [`schema`](ProviderService::schema) publishes the configuration
//!    attributes, every data source schema and the resource names
//! 2. [`configure`](ProviderService::configure) resolves one authentication
//!    mode and builds the shared transport
//! 3. [`read_data_source`](ProviderService::read_data_source) runs the generic
//!    read pipeline for one binding; reads may run concurrently
//!
//! Every failure reaches the host as a [`Diagnostic`]; credential values are
//! scrubbed from any text the remote side supplied.
//!
//! ```no_run
//! use bitbucket_provider::{BitbucketProvider, ProviderService, ReadOptions, init_tracing};
//! use serde_json::json;
//!
//! # async fn run() -> anyhow::Result<()> {
//! init_tracing();
//! let provider = BitbucketProvider::new()?;
//! let diagnostics = provider.configure(&json!({"oauth_token": "..."})).await;
//! assert!(diagnostics.is_empty());
//!
//! let inputs = json!({"workspace": "w", "repo_slug": "r", "tag_name": "v1"});
//! match provider.read_data_source("bitbucket_tag", &inputs, &ReadOptions::default()).await {
//!     Ok(outcome) => println!("{} {:?}", outcome.id, outcome.attributes),
//!     Err(diagnostics) => diagnostics.iter().for_each(|d| eprintln!("{d}")),
//! }
//! # Ok(())
//! # }
//! ```

pub mod logging;
mod provider;
mod service;

pub use logging::{LOG_ENV, env_filter, init_tracing, try_init_tracing};
pub use provider::BitbucketProvider;
pub use service::{ProviderService, Schemas};

pub use bitbucket_api::{AuthMode, ClientSettings};
pub use bitbucket_engine::{ReadOptions, ReadOutcome};
pub use bitbucket_types::{Diagnostic, ErrorKind, Severity, TransportCause};
