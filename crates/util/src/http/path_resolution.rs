use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;

/// Bytes escaped in a path placeholder value: everything except RFC3986
/// unreserved characters.
const PATH_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Error raised when a template references a value that was not supplied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template variable '{name}' is unbound")]
    Unbound { name: String },

    #[error("unterminated placeholder in template '{template}'")]
    Unterminated { template: String },
}

/// Returns the placeholder names of a `{name}` style template, in order of
/// appearance.
///
/// ```rust
/// use bitbucket_util::placeholders;
///
/// let names = placeholders("2.0/repositories/{workspace}/{repo_slug}/refs");
/// assert_eq!(names, vec!["workspace", "repo_slug"]);
/// ```
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut remainder = template;
    while let Some(start) = remainder.find('{') {
        let after_start = &remainder[start + 1..];
        let Some(end) = after_start.find('}') else {
            break;
        };
        let name = after_start[..end].trim();
        if !name.is_empty() {
            names.push(name);
        }
        remainder = &after_start[end + 1..];
    }
    names
}

/// Renders a `{name}` template by looking each placeholder up in `lookup`.
///
/// Values are inserted verbatim. Any placeholder the lookup cannot resolve is
/// an error; nothing is left half-substituted.
pub fn render_template<F>(template: &str, mut lookup: F) -> Result<String, TemplateError>
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len());
    let mut remainder = template;
    while let Some(start) = remainder.find('{') {
        out.push_str(&remainder[..start]);
        let after_start = &remainder[start + 1..];
        let end = after_start.find('}').ok_or_else(|| TemplateError::Unterminated {
            template: template.to_string(),
        })?;
        let name = after_start[..end].trim();
        let value = lookup(name).ok_or_else(|| TemplateError::Unbound { name: name.to_string() })?;
        out.push_str(&value);
        remainder = &after_start[end + 1..];
    }
    out.push_str(remainder);
    Ok(out)
}

/// Resolves a path template, percent-encoding every substituted value.
///
/// # Examples
/// ```rust
/// use bitbucket_util::build_path;
///
/// let path = build_path("2.0/repositories/{workspace}/{repo_slug}", |name| match name {
///     "workspace" => Some("my team".to_string()),
///     "repo_slug" => Some("api".to_string()),
///     _ => None,
/// })
/// .unwrap();
/// assert_eq!(path, "2.0/repositories/my%20team/api");
/// ```
pub fn build_path<F>(template: &str, mut lookup: F) -> Result<String, TemplateError>
where
    F: FnMut(&str) -> Option<String>,
{
    render_template(template, |name| lookup(name).map(|value| encode_path_placeholder_value(&value)))
}

/// Percent-encodes a path placeholder value while preserving RFC3986 unreserved bytes.
pub fn encode_path_placeholder_value(value: &str) -> String {
    utf8_percent_encode(value, PATH_VALUE).to_string()
}
