//! Adapter configuration.
//!
//! Built once by the caller and handed to the adapter, so tests can force
//! the mock path or point at another endpoint without touching the process env.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Older name kept from the web build.
pub const LEGACY_API_KEY_ENV: &str = "VITE_GEMINI_API_KEY";
pub const MODEL_ENV: &str = "TRAFFIC_AI_MODEL";
pub const BASE_URL_ENV: &str = "TRAFFIC_AI_BASE_URL";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// `None` switches the adapter into the mock branch.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Used for both the structured and the grounding call.
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

impl AiConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: normalize_key(Some(api_key.into())),
            ..Self::default()
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as `from_env`, with the variable source supplied by the caller.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = normalize_key(lookup(API_KEY_ENV))
            .or_else(|| normalize_key(lookup(LEGACY_API_KEY_ENV)));

        let model = lookup(MODEL_ENV)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(default_model);
        let base_url = lookup(BASE_URL_ENV)
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(default_base_url);

        tracing::debug!(
            has_key = api_key.is_some(),
            model = %model,
            base_url = %base_url,
            "loaded ai config from environment"
        );

        Self {
            api_key,
            model,
            base_url,
        }
    }

    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("read config file: {}", path.display()))?;
        let mut config: AiConfig = serde_json::from_str(&data)
            .with_context(|| format!("parse config json: {}", path.display()))?;
        config.api_key = normalize_key(config.api_key.take());
        Ok(config)
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// `generateContent` endpoint for the configured model.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

// blank keys count as absent
fn normalize_key(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_empty_env_means_mock_branch() {
        let config = AiConfig::from_lookup(lookup(&[]));
        assert!(!config.has_credential());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_blank_key_is_absent() {
        let config = AiConfig::from_lookup(lookup(&[(API_KEY_ENV, "   ")]));
        assert!(!config.has_credential());
        assert!(!AiConfig::with_api_key("").has_credential());
    }

    #[test]
    fn test_legacy_key_fallback() {
        let config = AiConfig::from_lookup(lookup(&[(LEGACY_API_KEY_ENV, "abc")]));
        assert_eq!(config.api_key.as_deref(), Some("abc"));

        let config =
            AiConfig::from_lookup(lookup(&[(API_KEY_ENV, "new"), (LEGACY_API_KEY_ENV, "old")]));
        assert_eq!(config.api_key.as_deref(), Some("new"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let printed = format!("{:?}", AiConfig::with_api_key("super-secret"));
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains(DEFAULT_MODEL));

        let printed = format!("{:?}", AiConfig::default());
        assert!(printed.contains("api_key: None"));
    }

    #[test]
    fn test_generate_url() {
        let mut config = AiConfig::with_api_key("k");
        config.base_url = "http://localhost:8080/v1beta/".into();
        config.model = "gemini-test".into();
        assert_eq!(
            config.generate_url(),
            "http://localhost:8080/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_load_from_file_with_defaults() {
        let path = std::path::Path::new("target/test_ai_config.json");
        fs::create_dir_all("target").unwrap();
        fs::write(path, r#"{ "api_key": "secret" }"#).unwrap();

        let config = AiConfig::load(path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let err = AiConfig::load("target/does_not_exist.json").unwrap_err();
        assert!(err.to_string().contains("read config file"));
    }
}
