use std::collections::HashSet;

use bitbucket_types::{BindingSpec, ParamLocation, ResourceSpec};
use bitbucket_util::{placeholders, render_template};
use indexmap::IndexMap;

use crate::{DataSourceSchema, ProviderSchema, RegistryError, catalog, resources::RESOURCES};

const NAME_PREFIX: &str = "bitbucket_";
const PATH_PREFIX: &str = "2.0/";

/// The provider's registration table: every data source and resource by
/// stable public name.
///
/// Built once per provider instance and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Registry {
    data_sources: IndexMap<&'static str, &'static BindingSpec>,
    resources: IndexMap<&'static str, &'static ResourceSpec>,
}

impl Registry {
    /// Registry of every built-in binding.
    ///
    /// # Errors
    /// A [`RegistryError`] when a built-in descriptor is malformed.
    ///
    /// ```rust
    /// use bitbucket_registry::Registry;
    ///
    /// let registry = Registry::builtin().expect("catalog is valid");
    /// assert!(registry.data_source("bitbucket_commit_comments").is_some());
    /// ```
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_parts(catalog::all(), RESOURCES.iter())
    }

    /// Builds and validates a registry from arbitrary descriptors.
    pub fn from_parts<D, R>(data_sources: D, resources: R) -> Result<Self, RegistryError>
    where
        D: IntoIterator<Item = &'static BindingSpec>,
        R: IntoIterator<Item = &'static ResourceSpec>,
    {
        let mut registry = Registry {
            data_sources: IndexMap::new(),
            resources: IndexMap::new(),
        };
        for spec in data_sources {
            check_name("data source", spec.name)?;
            validate_binding(spec)?;
            if registry.data_sources.insert(spec.name, spec).is_some() {
                return Err(duplicate("data source", spec.name));
            }
        }
        for spec in resources {
            check_name("resource", spec.name)?;
            if registry.resources.insert(spec.name, spec).is_some() {
                return Err(duplicate("resource", spec.name));
            }
        }
        tracing::debug!(
            data_sources = registry.data_sources.len(),
            resources = registry.resources.len(),
            "registry built"
        );
        Ok(registry)
    }

    pub fn data_source(&self, name: &str) -> Option<&'static BindingSpec> {
        self.data_sources.get(name).copied()
    }

    pub fn resource(&self, name: &str) -> Option<&'static ResourceSpec> {
        self.resources.get(name).copied()
    }

    /// Data source names in registration order.
    pub fn data_source_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.data_sources.keys().copied()
    }

    pub fn resource_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    pub fn data_sources(&self) -> impl Iterator<Item = &'static BindingSpec> + '_ {
        self.data_sources.values().copied()
    }

    pub fn provider_schema(&self) -> ProviderSchema {
        ProviderSchema::new()
    }

    pub fn data_source_schema(&self, name: &str) -> Option<DataSourceSchema> {
        self.data_source(name).map(DataSourceSchema::from_binding)
    }
}

fn duplicate(kind: &'static str, name: &str) -> RegistryError {
    RegistryError::DuplicateName {
        kind,
        name: name.to_string(),
    }
}

fn check_name(kind: &'static str, name: &str) -> Result<(), RegistryError> {
    let valid = name.strip_prefix(NAME_PREFIX).is_some_and(|rest| {
        !rest.is_empty() && rest.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    });
    if valid {
        Ok(())
    } else {
        Err(RegistryError::InvalidName {
            kind,
            name: name.to_string(),
        })
    }
}

/// Checks one descriptor for internal consistency.
pub fn validate_binding(spec: &BindingSpec) -> Result<(), RegistryError> {
    let binding = || spec.name.to_string();

    if !spec.path.starts_with(PATH_PREFIX) {
        return Err(RegistryError::InvalidPath {
            binding: binding(),
            path: spec.path.to_string(),
        });
    }
    for template in [spec.path, spec.identity] {
        render_template(template, |_| Some(String::new())).map_err(|source| RegistryError::Template {
            binding: binding(),
            source,
        })?;
    }

    let mut seen = HashSet::new();
    if let Some(param) = spec.params.iter().find(|param| !seen.insert(param.name)) {
        return Err(RegistryError::DuplicateParam {
            binding: binding(),
            param: param.name.to_string(),
        });
    }

    let path_placeholders = placeholders(spec.path);
    for placeholder in &path_placeholders {
        let declared = spec.param(placeholder).is_some_and(|param| param.location == ParamLocation::Path);
        if !declared {
            return Err(RegistryError::UndeclaredPlaceholder {
                binding: binding(),
                placeholder: placeholder.to_string(),
            });
        }
    }
    if let Some(param) = spec.path_params().find(|param| !path_placeholders.contains(&param.name)) {
        return Err(RegistryError::UnusedPathParam {
            binding: binding(),
            param: param.name.to_string(),
        });
    }

    let outputs = spec.response.attribute_names();
    for placeholder in placeholders(spec.identity) {
        if spec.param(placeholder).is_none() && !outputs.contains(&placeholder) {
            return Err(RegistryError::UnboundIdentity {
                binding: binding(),
                placeholder: placeholder.to_string(),
            });
        }
    }
    Ok(())
}
