//! Tracing setup for the provider process.
//!
//! Stdout belongs to the host protocol, so log lines always go to stderr.

use std::env;

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// Filter directives read before `RUST_LOG`.
pub const LOG_ENV: &str = "BITBUCKET_PROVIDER_LOG";
const DEFAULT_DIRECTIVES: &str = "info";

/// Builds the filter from `BITBUCKET_PROVIDER_LOG`, then `RUST_LOG`, then `info`.
///
/// Directives that fail to parse fall back to `info` rather than silencing
/// the provider.
pub fn env_filter() -> EnvFilter {
    filter_from(|name| env::var(name).ok())
}

fn filter_from<F>(lookup: F) -> EnvFilter
where
    F: Fn(&str) -> Option<String>,
{
    let directives = [LOG_ENV, "RUST_LOG"]
        .into_iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string());
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Installs the global subscriber.
///
/// # Errors
/// Fails when a global subscriber is already installed.
pub fn try_init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow!("failed to install tracing subscriber: {error}"))
}

/// Installs the global subscriber; repeated calls are harmless.
pub fn init_tracing() {
    let _ = try_init_tracing();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| pairs.iter().find(|(key, _)| *key == name).map(|(_, value)| value.to_string())
    }

    #[test]
    fn provider_variable_wins_over_rust_log() {
        let filter = filter_from(lookup(&[(LOG_ENV, "debug"), ("RUST_LOG", "error")]));
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn blank_provider_variable_falls_through() {
        let filter = filter_from(lookup(&[(LOG_ENV, "  "), ("RUST_LOG", "warn")]));
        assert_eq!(filter.to_string(), "warn");
        assert_eq!(filter_from(lookup(&[])).to_string(), "info");
    }

    #[test]
    fn repeated_initialisation_is_harmless() {
        init_tracing();
        init_tracing();
        assert!(try_init_tracing().is_err());
    }
}
