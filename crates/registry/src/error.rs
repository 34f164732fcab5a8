use bitbucket_util::TemplateError;
use thiserror::Error;

/// A descriptor that fails validation.
///
/// These are programming errors in the catalog; they surface once, when the
/// registry is built, never during a read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("duplicate {kind} name '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    #[error("{kind} name '{name}' must start with 'bitbucket_'")]
    InvalidName { kind: &'static str, name: String },

    #[error("{binding}: path template '{path}' must start with '2.0/'")]
    InvalidPath { binding: String, path: String },

    #[error("{binding}: path placeholder '{{{placeholder}}}' is not a declared path parameter")]
    UndeclaredPlaceholder { binding: String, placeholder: String },

    #[error("{binding}: path parameter '{param}' does not appear in the path template")]
    UnusedPathParam { binding: String, param: String },

    #[error("{binding}: parameter '{param}' is declared more than once")]
    DuplicateParam { binding: String, param: String },

    #[error("{binding}: identity placeholder '{{{placeholder}}}' is neither an input nor an output attribute")]
    UnboundIdentity { binding: String, placeholder: String },

    #[error("{binding}: {source}")]
    Template {
        binding: String,
        #[source]
        source: TemplateError,
    },
}
