//! Error types for cmdgen

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cmdgen operations
pub type Result<T> = std::result::Result<T, CmdgenError>;

/// Main error type for cmdgen
#[derive(Error, Debug)]
pub enum CmdgenError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No usable API key
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    /// The remote completion call failed
    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    /// Saving the generated script failed
    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to read config file '{path}': {error}")]
    Read { path: PathBuf, error: String },
}

/// Credential resolution errors
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("No API key was provided")]
    Missing,

    #[error("No valid API key after {0} attempt(s)")]
    AttemptsExhausted(u32),

    #[error("Failed to read API key: {0}")]
    Prompt(String),
}

/// Remote completion errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Service returned no completion")]
    EmptyResponse,
}

/// Script persistence errors
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write '{path}': {error}")]
    Write { path: PathBuf, error: String },

    #[error("Failed to set permissions on '{path}': {error}")]
    Permissions { path: PathBuf, error: String },
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for credential operations
pub type CredentialResult<T> = std::result::Result<T, CredentialError>;

/// Specialized result type for completion operations
pub type CompletionResult<T> = std::result::Result<T, CompletionError>;

/// Specialized result type for output operations
pub type OutputResult<T> = std::result::Result<T, OutputError>;

