//! Core configuration types
//!
//! This module defines the data structures that represent a cmdgen config file.
//! Every field has a default, so an empty file (or no file) is a valid config.

use serde::{Deserialize, Serialize};

/// Default base URL of the completion service
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default completion model
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";

/// Default environment variable holding the API key
pub const DEFAULT_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// Default file name for scripts without a filename marker
pub const DEFAULT_FALLBACK_FILENAME: &str = "script.sh";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Remote completion service settings
    #[serde(default)]
    pub api: ApiSettings,

    /// API key lookup settings
    #[serde(default)]
    pub credential: CredentialSettings,

    /// Script-mode settings
    #[serde(default)]
    pub script: ScriptSettings,
}

/// Remote completion service settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Base URL; `/completions` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Upper bound on generated tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout; no timeout when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// API key lookup settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CredentialSettings {
    /// Environment variable checked before prompting
    #[serde(default = "default_key_env_var")]
    pub env_var: String,

    /// Interactive attempts before giving up (0 = unbounded)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

/// Script-mode settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScriptSettings {
    /// File name used when the script carries no filename marker
    #[serde(default = "default_fallback_filename")]
    pub fallback_filename: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: None,
        }
    }
}

impl Default for CredentialSettings {
    fn default() -> Self {
        CredentialSettings {
            env_var: default_key_env_var(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl Default for ScriptSettings {
    fn default() -> Self {
        ScriptSettings {
            fallback_filename: default_fallback_filename(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.7
}

fn default_key_env_var() -> String {
    DEFAULT_KEY_ENV_VAR.to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_fallback_filename() -> String {
    DEFAULT_FALLBACK_FILENAME.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.max_tokens, 1000);
        assert_eq!(config.api.timeout_secs, None);
        assert_eq!(config.credential.env_var, "OPENAI_API_KEY");
        assert_eq!(config.credential.max_attempts, 3);
        assert_eq!(config.script.fallback_filename, "script.sh");
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let yaml = r#"
api:
  model: my-model
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api.model, "my-model");
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert!((config.api.temperature - 0.7).abs() < f32::EPSILON);
    }
}
