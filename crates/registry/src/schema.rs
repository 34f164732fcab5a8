//! Host-facing attribute schemas derived from the static descriptors.

use bitbucket_types::{AttrType, AuthGroup, BindingSpec, CredentialKey, FieldSpec, PAGINATION_FIELDS, ParamType, ResponseShape};
use serde::Serialize;

/// How the host treats an attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    Required,
    Optional,
    Computed,
}

/// One attribute of the provider configuration block.
#[derive(Clone, Debug, Serialize)]
pub struct ProviderAttribute {
    pub name: &'static str,
    pub description: String,
    pub sensitive: bool,
    /// Environment variable used when the attribute is absent or empty
    pub env_var: &'static str,
    /// Attributes of the other authentication modes
    pub conflicts_with: Vec<&'static str>,
    /// Attributes that complete the same authentication mode
    pub required_with: Vec<&'static str>,
}

/// Configuration schema of the provider block.
///
/// Every attribute is an optional string; the conflict and pairing lists let
/// the host reject mixed authentication modes before calling configure.
#[derive(Clone, Debug, Serialize)]
pub struct ProviderSchema {
    pub attributes: Vec<ProviderAttribute>,
}

impl ProviderSchema {
    pub fn new() -> Self {
        let attributes = CredentialKey::ALL
            .iter()
            .map(|key| {
                let group = key.group();
                ProviderAttribute {
                    name: key.attribute_name(),
                    description: format!(
                        "{} for {} authentication. Defaults to the {} environment variable.",
                        describe(*key),
                        group,
                        key.env_var()
                    ),
                    sensitive: key.is_sensitive(),
                    env_var: key.env_var(),
                    conflicts_with: AuthGroup::ALL
                        .iter()
                        .filter(|other| **other != group)
                        .flat_map(|other| other.keys())
                        .map(CredentialKey::attribute_name)
                        .collect(),
                    required_with: group
                        .keys()
                        .iter()
                        .filter(|other| *other != key)
                        .map(CredentialKey::attribute_name)
                        .collect(),
                }
            })
            .collect();
        Self { attributes }
    }

    pub fn attribute(&self, name: &str) -> Option<&ProviderAttribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }
}

impl Default for ProviderSchema {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(key: CredentialKey) -> &'static str {
    match key {
        CredentialKey::Username => "Account username",
        CredentialKey::Password => "App password",
        CredentialKey::OAuthClientId => "OAuth consumer key",
        CredentialKey::OAuthClientSecret => "OAuth consumer secret",
        CredentialKey::OAuthToken => "OAuth access token",
    }
}

/// One attribute of a data source schema.
#[derive(Clone, Debug, Serialize)]
pub struct AttributeSchema {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub type_label: &'static str,
    pub mode: AttributeMode,
    pub sensitive: bool,
    /// Element or object attributes for `object` and `list(object)` types
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<AttributeSchema>,
}

/// Schema the host uses to validate data source blocks.
#[derive(Clone, Debug, Serialize)]
pub struct DataSourceSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub attributes: Vec<AttributeSchema>,
}

impl DataSourceSchema {
    /// Derives the schema: inputs from the parameters, computed outputs from
    /// the response shape, and a computed `id`.
    pub fn from_binding(spec: &BindingSpec) -> Self {
        let mut attributes = vec![AttributeSchema {
            name: "id",
            type_label: "string",
            mode: AttributeMode::Computed,
            sensitive: false,
            nested: Vec::new(),
        }];
        attributes.extend(spec.params.iter().map(|param| AttributeSchema {
            name: param.name,
            type_label: match param.param_type {
                ParamType::String => "string",
                ParamType::Integer => "integer",
            },
            mode: if param.required { AttributeMode::Required } else { AttributeMode::Optional },
            sensitive: param.sensitive,
            nested: Vec::new(),
        }));
        match spec.response {
            ResponseShape::Collection { attribute, item } => {
                attributes.push(AttributeSchema {
                    name: attribute,
                    type_label: "list(object)",
                    mode: AttributeMode::Computed,
                    sensitive: false,
                    nested: computed(item),
                });
                attributes.extend(computed(PAGINATION_FIELDS));
            }
            ResponseShape::Scalar { fields } => attributes.extend(computed(fields)),
            ResponseShape::Summary { attribute } => attributes.push(AttributeSchema {
                name: attribute,
                type_label: AttrType::Map.label(),
                mode: AttributeMode::Computed,
                sensitive: false,
                nested: Vec::new(),
            }),
        }
        Self {
            name: spec.name,
            description: spec.summary,
            attributes,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }
}

fn computed(fields: &[FieldSpec]) -> Vec<AttributeSchema> {
    fields
        .iter()
        .map(|field| AttributeSchema {
            name: field.name,
            type_label: field.attr_type.label(),
            mode: AttributeMode::Computed,
            sensitive: false,
            nested: match field.attr_type {
                AttrType::Object(nested) | AttrType::List(nested) => computed(nested),
                _ => Vec::new(),
            },
        })
        .collect()
}
