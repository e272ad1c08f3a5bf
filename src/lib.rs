//! cmdgen - shell commands and scripts from plain-language descriptions
//!
//! A description is wrapped in a fixed prompt together with the current shell
//! and operating system, sent to a text-completion service, and the answer is
//! either printed as a command or saved as an executable script.

// Public modules
pub mod cli;
pub mod completion;
pub mod config;
pub mod credential;
pub mod error;
pub mod output;
pub mod runner;
pub mod system;

// Re-export commonly used types
pub use error::{CmdgenError, Result};

/// Current version of cmdgen
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
