use anyhow::{bail, Context, Result};

use crate::sync::SyncSettings;

pub const API_URL_ENV: &str = "RAILWATCH_API_URL";
pub const DEBUG_ENV: &str = "RAILWATCH_DEBUG";

/// Startup configuration, resolved once from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub debug: bool,
    pub sync: SyncSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw_url = lookup(API_URL_ENV)
            .with_context(|| format!("{API_URL_ENV} must point at the report backend"))?;
        let api_base_url = normalize_base_url(&raw_url)
            .with_context(|| format!("invalid {API_URL_ENV}"))?;

        let debug = lookup(DEBUG_ENV)
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(Self {
            api_base_url,
            debug,
            sync: SyncSettings::default(),
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        bail!("base URL is empty");
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        bail!("base URL '{trimmed}' must start with http:// or https://");
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_url_and_debug_flag() {
        let config = AppConfig::from_lookup(lookup(&[
            (API_URL_ENV, " https://rail.example.org/ "),
            (DEBUG_ENV, "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "https://rail.example.org");
        assert!(config.debug);
        assert_eq!(config.sync, SyncSettings::default());
    }

    #[test]
    fn missing_url_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains(API_URL_ENV));
    }

    #[test]
    fn rejects_url_without_scheme() {
        assert!(AppConfig::from_lookup(lookup(&[(API_URL_ENV, "localhost:8000")])).is_err());
    }

    #[test]
    fn debug_defaults_off() {
        let config =
            AppConfig::from_lookup(lookup(&[(API_URL_ENV, "http://localhost:8000")])).unwrap();
        assert!(!config.debug);
    }
}
