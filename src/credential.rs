//! API key resolution
//!
//! The key is looked up in the environment first and validated with a one-token
//! call. Otherwise the user is prompted until a key validates or the attempt
//! limit runs out. The accepted key is returned as a value and never written
//! back into the process environment.

use crate::config::CredentialSettings;
use crate::error::{CompletionResult, CredentialError, CredentialResult};
use crate::runner::Context;
use std::env;
use std::fmt;
use std::io::{self, BufRead, Write};

/// Text shown when asking for a key
pub const KEY_PROMPT: &str = "Please enter your OpenAI API key: ";

/// An API key; `Debug` never shows the secret
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        ApiKey(key.into())
    }

    /// The raw secret, for the Authorization header
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Checks whether the remote service accepts a key
pub trait KeyValidator {
    fn validate(&self, key: &ApiKey) -> CompletionResult<()>;
}

/// Source of interactive answers
pub trait Prompter {
    /// Show `message` and read one line; `None` at end of input
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>>;
}

/// Prompter reading from stdin and writing to stdout
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        print!("{}", message);
        io::stdout().flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Resolves a validated key from the environment or the user
pub struct CredentialResolver {
    /// Value of the configured environment variable, if set
    env_key: Option<String>,

    /// Interactive attempts allowed (0 = unbounded)
    max_attempts: u32,
}

impl CredentialResolver {
    /// Read the configured variable from the process environment
    pub fn from_env(settings: &CredentialSettings) -> Self {
        Self::new(env::var(&settings.env_var).ok(), settings.max_attempts)
    }

    pub fn new(env_key: Option<String>, max_attempts: u32) -> Self {
        CredentialResolver {
            env_key: env_key
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            max_attempts,
        }
    }

    /// Produce a key the validator accepts
    pub fn resolve(
        &self,
        validator: &dyn KeyValidator,
        prompter: &mut dyn Prompter,
        ctx: &Context,
    ) -> CredentialResult<ApiKey> {
        match &self.env_key {
            Some(raw) => {
                let key = ApiKey::new(raw.clone());
                match validator.validate(&key) {
                    Ok(()) => {
                        ctx.print_debug("Using API key from the environment");
                        return Ok(key);
                    }
                    Err(e) => ctx.print_error(&format!(
                        "An error occurred while validating the API key: {}",
                        e
                    )),
                }
            }
            None => ctx.print_info("No API key found in the environment"),
        }

        let mut attempts = 0;
        loop {
            let entered = prompter
                .prompt(KEY_PROMPT)
                .map_err(|e| CredentialError::Prompt(e.to_string()))?
                .ok_or(CredentialError::Missing)?;
            attempts += 1;

            let entered = entered.trim();
            if !entered.is_empty() {
                let key = ApiKey::new(entered);
                match validator.validate(&key) {
                    Ok(()) => return Ok(key),
                    Err(e) => ctx.print_error(&format!(
                        "An error occurred while validating the API key: {}",
                        e
                    )),
                }
            }

            if self.max_attempts != 0 && attempts >= self.max_attempts {
                return Err(CredentialError::AttemptsExhausted(attempts));
            }
            println!("Invalid API key. Please try again.");
        }
    }
}
