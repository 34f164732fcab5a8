//! Parameter binding: turns host-supplied inputs into a concrete request.

use bitbucket_types::{BindingSpec, ParamLocation, ParamSpec, ParamType, ReadError};
use bitbucket_util::{TemplateError, build_path};
use indexmap::IndexMap;
use serde_json::Value;

/// Placeholder printed instead of a sensitive parameter value.
pub const REDACTED: &str = "<redacted>";

/// Host-supplied input attributes of one read.
pub type Inputs = IndexMap<String, Value>;

/// Parameters of one read after coercion, in descriptor order.
#[derive(Debug, Clone)]
pub struct BoundParams {
    spec: &'static BindingSpec,
    values: IndexMap<&'static str, String>,
}

impl BoundParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bound values with every sensitive parameter replaced by `<redacted>`.
    pub fn sanitized(&self) -> IndexMap<&'static str, &str> {
        self.values
            .iter()
            .map(|(name, value)| {
                let shown = if self.spec.is_sensitive(name) { REDACTED } else { value.as_str() };
                (*name, shown)
            })
            .collect()
    }

    /// Sanitized `name="value"` list used in diagnostics.
    pub fn describe(&self) -> String {
        self.sanitized()
            .iter()
            .map(|(name, value)| format!("{name}=\"{value}\""))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Substitutes path parameters into the path template, percent-encoding each.
    pub fn path(&self) -> Result<String, ReadError> {
        build_path(self.spec.path, |name| {
            self.spec
                .param(name)
                .filter(|param| param.location == ParamLocation::Path)
                .and_then(|param| self.values.get(param.name).cloned())
        })
        .map_err(|e| template_error(self.spec, "path", e))
    }

    /// Query pairs for every bound, non-empty query parameter.
    pub fn query(&self) -> Vec<(String, String)> {
        self.spec
            .query_params()
            .filter_map(|param| {
                self.values
                    .get(param.name)
                    .filter(|value| !value.is_empty())
                    .map(|value| (param.wire_name.to_string(), value.clone()))
            })
            .collect()
    }
}

/// Reads and coerces every parameter the descriptor declares.
///
/// # Errors
/// A contract error, raised before any request is made, when:
/// - a required parameter is absent, `null`, or empty
/// - a value cannot be coerced to the declared type
/// - an input names no parameter of the binding
pub fn bind_params(spec: &'static BindingSpec, inputs: &Inputs) -> Result<BoundParams, ReadError> {
    if let Some(unknown) = inputs.keys().find(|name| spec.param(name).is_none()) {
        return Err(ReadError::contract(
            spec.name,
            format!("unknown input '{unknown}'; expected one of {}", param_names(spec)),
        ));
    }

    let mut values = IndexMap::with_capacity(spec.params.len());
    for param in spec.params {
        match inputs.get(param.name).map(|value| coerce(spec, param, value)).transpose()? {
            Some(value) if !value.is_empty() => {
                values.insert(param.name, value);
            }
            _ if param.required => {
                return Err(ReadError::contract(
                    spec.name,
                    format!("required input '{}' is missing", param.name),
                ));
            }
            _ => {}
        }
    }
    Ok(BoundParams { spec, values })
}

fn coerce(spec: &BindingSpec, param: &ParamSpec, value: &Value) -> Result<String, ReadError> {
    let mismatch = |found: &str| {
        ReadError::contract(
            spec.name,
            format!("input '{}' must be {}, got {found}", param.name, type_name(param.param_type)),
        )
    };
    match (param.param_type, value) {
        (_, Value::Null) => Ok(String::new()),
        (ParamType::String, Value::String(text)) => Ok(text.clone()),
        (ParamType::String, Value::Number(number)) => Ok(number.to_string()),
        (ParamType::String, Value::Bool(flag)) => Ok(flag.to_string()),
        (ParamType::Integer, Value::Number(number)) => number
            .as_i64()
            .map(|n| n.to_string())
            .ok_or_else(|| mismatch("a non-integer number")),
        (ParamType::Integer, Value::String(text)) if text.trim().is_empty() => Ok(String::new()),
        (ParamType::Integer, Value::String(text)) => text
            .trim()
            .parse::<i64>()
            .map(|n| n.to_string())
            .map_err(|_| mismatch(if param.sensitive { "a non-numeric string" } else { text.as_str() })),
        (_, Value::Array(_)) => Err(mismatch("a list")),
        (_, Value::Object(_)) => Err(mismatch("an object")),
        (ParamType::Integer, Value::Bool(_)) => Err(mismatch("a bool")),
    }
}

fn type_name(param_type: ParamType) -> &'static str {
    match param_type {
        ParamType::String => "a string",
        ParamType::Integer => "an integer",
    }
}

fn param_names(spec: &BindingSpec) -> String {
    let names: Vec<&str> = spec.params.iter().map(|param| param.name).collect();
    if names.is_empty() { "none".to_string() } else { names.join(", ") }
}

pub(crate) fn template_error(spec: &BindingSpec, template: &str, error: TemplateError) -> ReadError {
    ReadError::contract(spec.name, format!("{template} template: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitbucket_types::{FieldSpec, ResponseShape};
    use bitbucket_types::ErrorKind;
    use serde_json::json;

    static ISSUE: BindingSpec = BindingSpec {
        name: "bitbucket_issue",
        summary: "",
        path: "2.0/repositories/{workspace}/{repo_slug}/issues/{issue_id}",
        params: &[
            ParamSpec::path("workspace"),
            ParamSpec::path("repo_slug"),
            ParamSpec::path_int("issue_id"),
            ParamSpec::query("q"),
            ParamSpec::query("secret_filter").wire("filter.secret").sensitive(),
        ],
        response: ResponseShape::Scalar {
            fields: &[FieldSpec::integer("id")],
        },
        identity: "{workspace}/{repo_slug}/issues/{issue_id}",
    };

    fn inputs(value: Value) -> Inputs {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn integer_strings_are_coerced() {
        let bound = bind_params(&ISSUE, &inputs(json!({"workspace": "w", "repo_slug": "r", "issue_id": " 99"}))).unwrap();
        assert_eq!(bound.get("issue_id"), Some("99"));
        assert_eq!(bound.path().unwrap(), "2.0/repositories/w/r/issues/99");
        assert!(bound.query().is_empty());
    }

    #[test]
    fn missing_required_input_is_a_contract_error() {
        for value in [json!({"workspace": "w", "issue_id": 1}), json!({"workspace": "w", "repo_slug": "", "issue_id": 1})] {
            let err = bind_params(&ISSUE, &inputs(value)).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Contract);
            assert!(err.detail.contains("repo_slug"), "{}", err.detail);
        }
    }

    #[test]
    fn non_integer_is_rejected() {
        let err = bind_params(&ISSUE, &inputs(json!({"workspace": "w", "repo_slug": "r", "issue_id": "abc"}))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Contract);
        assert!(err.detail.contains("must be an integer"));
    }

    #[test]
    fn unknown_inputs_are_rejected() {
        let err = bind_params(&ISSUE, &inputs(json!({"workspace": "w", "repo_slug": "r", "issue_id": 1, "issue": 2}))).unwrap_err();
        assert!(err.detail.contains("unknown input 'issue'"));
    }

    #[test]
    fn query_uses_wire_names_and_sanitizes_sensitive_values() {
        let bound = bind_params(
            &ISSUE,
            &inputs(json!({"workspace": "w", "repo_slug": "r", "issue_id": 1, "q": "", "secret_filter": "hush"})),
        )
        .unwrap();
        assert_eq!(bound.query(), vec![("filter.secret".to_string(), "hush".to_string())]);
        assert_eq!(bound.sanitized().get("secret_filter"), Some(&REDACTED));
        assert!(!bound.describe().contains("hush"));
        assert!(bound.describe().contains("issue_id=\"1\""));
    }
}
