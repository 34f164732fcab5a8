//! Shared type definitions for the Bitbucket provider.
//!
//! Binding descriptors are plain static data: a path template, the parameters
//! that fill it, the shape of the JSON response, and an identity template.
//! Every data source the provider exposes is one [`BindingSpec`], and one
//! generic read implementation interprets all of them.

use serde::Serialize;

pub mod credentials;
pub mod error;

pub use credentials::{AuthGroup, CredentialKey};
pub use error::{Diagnostic, ErrorKind, ReadError, Severity, TransportCause};

/// Primitive type of a binding parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
}

/// Where a bound parameter ends up in the outbound request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    /// Substituted into a `{name}` placeholder of the path template.
    Path,
    /// Appended to the query string when non-empty.
    Query,
}

/// A named input of a binding.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ParamSpec {
    /// Attribute name the host runtime uses (e.g. `repo_slug`)
    pub name: &'static str,
    /// Key used on the wire; differs from `name` only for query keys such as `target.branch`
    pub wire_name: &'static str,
    pub param_type: ParamType,
    pub location: ParamLocation,
    pub required: bool,
    /// Sensitive values are never formatted into logs or diagnostics.
    pub sensitive: bool,
}

impl ParamSpec {
    /// A required string path parameter.
    pub const fn path(name: &'static str) -> Self {
        Self {
            name,
            wire_name: name,
            param_type: ParamType::String,
            location: ParamLocation::Path,
            required: true,
            sensitive: false,
        }
    }

    /// A required integer path parameter.
    pub const fn path_int(name: &'static str) -> Self {
        Self {
            param_type: ParamType::Integer,
            ..Self::path(name)
        }
    }

    /// An optional string query parameter.
    pub const fn query(name: &'static str) -> Self {
        Self {
            name,
            wire_name: name,
            param_type: ParamType::String,
            location: ParamLocation::Query,
            required: false,
            sensitive: false,
        }
    }

    /// An optional integer query parameter.
    pub const fn query_int(name: &'static str) -> Self {
        Self {
            param_type: ParamType::Integer,
            ..Self::query(name)
        }
    }

    /// Sends the parameter under a different key than its attribute name.
    pub const fn wire(self, wire_name: &'static str) -> Self {
        Self { wire_name, ..self }
    }

    pub const fn required(self) -> Self {
        Self { required: true, ..self }
    }

    pub const fn sensitive(self) -> Self {
        Self { sensitive: true, ..self }
    }
}

/// Type of a host attribute produced from a response field.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(tag = "type", content = "fields", rename_all = "snake_case")]
pub enum AttrType {
    String,
    Integer,
    Number,
    Bool,
    /// Opaque map of dynamic values; unknown keys are preserved verbatim.
    Map,
    StringList,
    Object(&'static [FieldSpec]),
    /// List of objects, flattened element-wise.
    List(&'static [FieldSpec]),
}

impl AttrType {
    /// Short name used in diagnostics and schema output.
    pub fn label(&self) -> &'static str {
        match self {
            AttrType::String => "string",
            AttrType::Integer => "integer",
            AttrType::Number => "number",
            AttrType::Bool => "bool",
            AttrType::Map => "map",
            AttrType::StringList => "list(string)",
            AttrType::Object(_) => "object",
            AttrType::List(_) => "list(object)",
        }
    }
}

/// Maps one response field onto one host attribute.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct FieldSpec {
    /// Host attribute name
    pub name: &'static str,
    /// Dotted path into the JSON object (`target.hash`); equals `name` unless renamed
    pub source: &'static str,
    pub attr_type: AttrType,
    /// Absent required fields are a contract error instead of a zero value.
    pub required: bool,
}

impl FieldSpec {
    const fn new(name: &'static str, attr_type: AttrType) -> Self {
        Self {
            name,
            source: name,
            attr_type,
            required: false,
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, AttrType::String)
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, AttrType::Integer)
    }

    pub const fn number(name: &'static str) -> Self {
        Self::new(name, AttrType::Number)
    }

    pub const fn bool(name: &'static str) -> Self {
        Self::new(name, AttrType::Bool)
    }

    pub const fn map(name: &'static str) -> Self {
        Self::new(name, AttrType::Map)
    }

    pub const fn strings(name: &'static str) -> Self {
        Self::new(name, AttrType::StringList)
    }

    pub const fn object(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self::new(name, AttrType::Object(fields))
    }

    pub const fn list(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self::new(name, AttrType::List(fields))
    }

    /// Reads the attribute from a different (possibly nested) JSON path.
    pub const fn from(self, source: &'static str) -> Self {
        Self { source, ..self }
    }

    pub const fn required(self) -> Self {
        Self { required: true, ..self }
    }
}

/// The three response shapes a read binding can decode.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseShape {
    /// A `values` array plus opaque `page`, `size` and `next` markers.
    Collection {
        attribute: &'static str,
        item: &'static [FieldSpec],
    },
    /// A single object whose fields flatten into top-level attributes.
    Scalar { fields: &'static [FieldSpec] },
    /// A flat map of primitives exposed as one map attribute.
    Summary { attribute: &'static str },
}

/// Pagination markers preserved on collection bindings.
pub const PAGINATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::integer("page"),
    FieldSpec::integer("size"),
    FieldSpec::string("next"),
];

impl ResponseShape {
    pub fn kind(&self) -> &'static str {
        match self {
            ResponseShape::Collection { .. } => "collection",
            ResponseShape::Scalar { .. } => "scalar",
            ResponseShape::Summary { .. } => "summary",
        }
    }

    /// Names of the top-level attributes this shape produces, in order.
    pub fn attribute_names(&self) -> Vec<&'static str> {
        match self {
            ResponseShape::Collection { attribute, .. } => {
                let mut names = vec![*attribute];
                names.extend(PAGINATION_FIELDS.iter().map(|field| field.name));
                names
            }
            ResponseShape::Scalar { fields } => fields.iter().map(|field| field.name).collect(),
            ResponseShape::Summary { attribute } => vec![*attribute],
        }
    }
}

/// Static descriptor of one read-only data source.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct BindingSpec {
    /// Stable public name (e.g. `bitbucket_commit_comments`); part of the external contract
    pub name: &'static str,
    pub summary: &'static str,
    /// Path template relative to the API base, e.g. `2.0/repositories/{workspace}/{repo_slug}`
    pub path: &'static str,
    pub params: &'static [ParamSpec],
    pub response: ResponseShape,
    /// Identity template; placeholders resolve against inputs first, then outputs.
    pub identity: &'static str,
}

impl BindingSpec {
    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|param| param.name == name)
    }

    pub fn path_params(&self) -> impl Iterator<Item = &'static ParamSpec> {
        self.params.iter().filter(|param| param.location == ParamLocation::Path)
    }

    pub fn query_params(&self) -> impl Iterator<Item = &'static ParamSpec> {
        self.params.iter().filter(|param| param.location == ParamLocation::Query)
    }

    /// Name reported in decode errors, e.g. `bitbucket_tag::scalar`.
    pub fn decoder_name(&self) -> String {
        format!("{}::{}", self.name, self.response.kind())
    }

    /// Whether a parameter with this name is marked sensitive.
    pub fn is_sensitive(&self, name: &str) -> bool {
        self.param(name).is_some_and(|param| param.sensitive)
    }
}

/// Stable name and endpoint of a mutating resource binding.
///
/// Only registration data lives here; create/update/delete semantics are
/// prescribed by the host runtime.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ResourceSpec {
    pub name: &'static str,
    pub summary: &'static str,
    /// Collection endpoint the resource is created under
    pub path: &'static str,
    pub identity: &'static str,
}
