//! Configuration loading and validation
//!
//! This module handles locating and parsing the optional YAML config file
//! and validating its values.

pub mod parse;
pub mod schema;
pub mod types;

// Re-export main types
pub use parse::*;
pub use schema::*;
pub use types::*;
