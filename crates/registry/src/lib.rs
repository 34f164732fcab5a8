//! Registration table of the Bitbucket provider.
//!
//! This crate holds the static catalog of data source descriptors, the names
//! of the mutating resources, and the provider configuration schema. The
//! catalog is validated once when a [`Registry`] is built.

pub mod catalog;
pub mod error;
pub mod models;
mod resources;
pub mod schema;

pub use error::RegistryError;
pub use models::{Registry, validate_binding};
pub use schema::{AttributeMode, AttributeSchema, DataSourceSchema, ProviderAttribute, ProviderSchema};
