use once_cell::sync::Lazy;
use regex::Regex;

pub mod http;

pub use http::*;

static SENSITIVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(authorization: )([\w\-\.=:/+]+( [\w\-\.=:/+]+)?)",
        r"\b((?:Basic|Bearer) )([A-Za-z0-9\-\._~+/]{6,}=*)",
        r"(?i)([A-Z0-9_]*?(KEY|TOKEN|SECRET|PASSWORD)=)([^\s&]+)",
        r#"(?i)("(access_token|refresh_token|client_secret|password)"\s*:\s*)("[^"]*")"#,
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("redaction pattern should compile"))
    .collect()
});

/// Redacts values that look like secrets in a string.
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for re in SENSITIVE_PATTERNS.iter() {
        redacted = re
            .replace_all(&redacted, |caps: &regex::Captures| {
                let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{}<redacted>", prefix)
            })
            .to_string();
    }
    redacted
}

/// Replaces every literal occurrence of the given secrets, then applies
/// [`redact_sensitive`].
///
/// Empty secrets are skipped.
pub fn redact_secrets<S: AsRef<str>>(input: &str, secrets: &[S]) -> String {
    let mut redacted = input.to_string();
    for secret in secrets {
        let secret = secret.as_ref();
        if !secret.is_empty() {
            redacted = redacted.replace(secret, "<redacted>");
        }
    }
    redact_sensitive(&redacted)
}
