//! Configuration validation
//!
//! This module provides validation logic for loaded configuration.

use crate::config::types::{ApiSettings, Config, ScriptSettings};
use crate::error::{ConfigError, ConfigResult};

/// Validate a complete configuration
pub fn validate_config(config: &Config) -> ConfigResult<()> {
    validate_api(&config.api)?;
    validate_script(&config.script)?;

    if config.credential.env_var.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "credential.env_var must not be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validate remote service settings
pub fn validate_api(api: &ApiSettings) -> ConfigResult<()> {
    if api.base_url.trim().is_empty() {
        return Err(ConfigError::Invalid("api.base_url must not be empty".to_string()));
    }
    if api.model.trim().is_empty() {
        return Err(ConfigError::Invalid("api.model must not be empty".to_string()));
    }
    if api.max_tokens == 0 {
        return Err(ConfigError::Invalid(
            "api.max_tokens must be greater than zero".to_string(),
        ));
    }
    if !(0.0..=2.0).contains(&api.temperature) {
        return Err(ConfigError::Invalid(format!(
            "api.temperature must be between 0.0 and 2.0, got {}",
            api.temperature
        )));
    }

    Ok(())
}

/// Validate script settings
pub fn validate_script(script: &ScriptSettings) -> ConfigResult<()> {
    let name = script.fallback_filename.trim();
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ConfigError::Invalid(format!(
            "script.fallback_filename must be a plain file name, got '{}'",
            script.fallback_filename
        )));
    }

    Ok(())
}
