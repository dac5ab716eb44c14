//! Configuration for the Cascade fallback client.
//!
//! Maps directly to `cascade.toml`: one `[general]` section plus one table
//! per provider. API keys may be given inline or sourced from the
//! conventional environment variables at load time; a provider without a
//! key is simply omitted from the available set, never treated as failed.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::provider::ProviderId;

/// Top-level Cascade configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CascadeConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Claude adapter settings.
    #[serde(default)]
    pub claude: ProviderConfig,
    /// Gemini adapter settings.
    #[serde(default)]
    pub gemini: ProviderConfig,
    /// OpenAI adapter settings.
    #[serde(default)]
    pub openai: ProviderConfig,
}

impl CascadeConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Settings for one provider.
    #[must_use]
    pub fn provider(&self, id: ProviderId) -> &ProviderConfig {
        match id {
            ProviderId::Claude => &self.claude,
            ProviderId::Gemini => &self.gemini,
            ProviderId::OpenAi => &self.openai,
        }
    }

    fn provider_mut(&mut self, id: ProviderId) -> &mut ProviderConfig {
        match id {
            ProviderId::Claude => &mut self.claude,
            ProviderId::Gemini => &mut self.gemini,
            ProviderId::OpenAi => &mut self.openai,
        }
    }

    /// Fill missing API keys from the process environment
    /// (`ANTHROPIC_API_KEY`, `GEMINI_API_KEY`, `OPENAI_API_KEY`).
    /// Keys set inline in the TOML win over the environment.
    #[must_use]
    pub fn overlay_env_keys(self) -> Self {
        self.overlay_keys_with(|var| std::env::var(var).ok())
    }

    /// Same as [`CascadeConfig::overlay_env_keys`] with an injectable
    /// lookup, so tests don't have to mutate the process environment.
    #[must_use]
    pub fn overlay_keys_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        for id in ProviderId::ALL {
            let slot = self.provider_mut(id);
            if slot.api_key.is_none() {
                slot.api_key = lookup(api_key_env(id)).filter(|key| !key.is_empty());
            }
        }
        self
    }

    /// Providers with an API key, in the fixed default priority order.
    #[must_use]
    pub fn configured_providers(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|id| self.provider(*id).is_configured())
            .collect()
    }
}

/// Environment variable holding the API key for a provider.
#[must_use]
pub const fn api_key_env(id: ProviderId) -> &'static str {
    match id {
        ProviderId::Claude => "ANTHROPIC_API_KEY",
        ProviderId::Gemini => "GEMINI_API_KEY",
        ProviderId::OpenAi => "OPENAI_API_KEY",
    }
}

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Settings for one provider adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key. Absent means the adapter is not constructed.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Override for the adapter's default API base URL.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Override for the adapter's default model name.
    #[serde(default)]
    pub model: Option<String>,
    /// Per-request HTTP timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ProviderConfig {
    /// Whether this provider has a key and should be constructed.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = CascadeConfig::from_toml("").expect("empty config");
        assert_eq!(config.general.log_level, "info");
        for id in ProviderId::ALL {
            assert!(!config.provider(id).is_configured());
            assert_eq!(config.provider(id).timeout_ms, 30_000);
        }
        assert!(config.configured_providers().is_empty());
    }

    #[test]
    fn provider_tables_parse() {
        let config = CascadeConfig::from_toml(
            r#"
            [claude]
            api_key = "sk-test"
            model = "claude-sonnet-4-20250514"
            timeout_ms = 10000

            [openai]
            api_key = "sk-oai"
            base_url = "http://localhost:8080"
        "#,
        )
        .expect("valid config");

        assert_eq!(config.claude.timeout_ms, 10_000);
        assert_eq!(config.claude.model.as_deref(), Some("claude-sonnet-4-20250514"));
        assert_eq!(config.openai.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(
            config.configured_providers(),
            vec![ProviderId::Claude, ProviderId::OpenAi]
        );
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = CascadeConfig::from_toml("claude = 3").expect_err("must fail");
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn env_overlay_fills_only_missing_keys() {
        let config = CascadeConfig::from_toml(
            r#"
            [claude]
            api_key = "inline-key"
        "#,
        )
        .expect("valid config")
        .overlay_keys_with(|var| match var {
            "ANTHROPIC_API_KEY" => Some("env-claude".to_string()),
            "GEMINI_API_KEY" => Some("env-gemini".to_string()),
            _ => None,
        });

        // Inline key wins; Gemini picked up from the environment; OpenAI
        // stays unconfigured.
        assert_eq!(config.claude.api_key.as_deref(), Some("inline-key"));
        assert_eq!(config.gemini.api_key.as_deref(), Some("env-gemini"));
        assert!(!config.openai.is_configured());
    }

    #[test]
    fn empty_env_value_does_not_configure() {
        let config = CascadeConfig::default()
            .overlay_keys_with(|var| (var == "OPENAI_API_KEY").then(String::new));
        assert!(!config.openai.is_configured());
    }

    #[test]
    fn from_file_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cascade.toml");
        std::fs::write(&path, "[gemini]\napi_key = \"g\"\n").expect("write");

        let config = CascadeConfig::from_file(&path).expect("load");
        assert_eq!(config.configured_providers(), vec![ProviderId::Gemini]);

        let missing = CascadeConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(CoreError::Io(_))));
    }
}
