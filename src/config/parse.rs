//! Configuration file discovery and parsing

use crate::config::schema::validate_config;
use crate::config::types::Config;
use crate::error::{CmdgenError, ConfigError};
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CMDGEN_CONFIG";

/// Environment variable overriding `api.base_url`
pub const API_BASE_ENV_VAR: &str = "CMDGEN_API_BASE";

/// Configuration file names to search for in the config directory
const CONFIG_FILE_NAMES: &[&str] = &["config.yml", "config.yaml"];

/// Platform config directory for cmdgen (e.g. `~/.config/cmdgen` on Linux)
pub fn default_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cmdgen").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Find a config file inside a directory
pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Parse a configuration file from a path
pub fn parse_config_file(path: &Path) -> Result<Config, CmdgenError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    parse_config(&contents)
}

/// Parse configuration from a string
pub fn parse_config(yaml: &str) -> Result<Config, CmdgenError> {
    if yaml.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(yaml)?;
    Ok(config)
}

/// Apply environment overrides on top of file values
pub fn apply_env_overrides(config: &mut Config, api_base: Option<String>) {
    if let Some(base) = api_base.filter(|b| !b.trim().is_empty()) {
        config.api.base_url = base.trim().to_string();
    }
}

/// Load, override and validate the configuration
///
/// An explicit path (argument or `CMDGEN_CONFIG`) must exist. Without one,
/// the platform config directory is searched and a missing file means defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>), CmdgenError> {
    let requested = explicit
        .map(Path::to_path_buf)
        .or_else(|| env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

    let found = match requested {
        Some(path) => Some(path),
        None => default_config_dir().and_then(|dir| find_config_file_in(&dir)),
    };

    let mut config = match &found {
        Some(path) => parse_config_file(path)?,
        None => Config::default(),
    };

    apply_env_overrides(&mut config, env::var(API_BASE_ENV_VAR).ok());
    validate_config(&config)?;

    Ok((config, found))
}
