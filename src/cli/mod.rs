//! CLI interface and argument parsing
//!
//! This module handles command-line parsing, help generation, shell
//! completion output and wiring the stages of an invocation together.

pub mod app;

// Re-export main types
pub use app::*;
