//! Prompt construction and the remote completion call

pub mod client;
pub mod prompt;

// Re-export main types
pub use client::*;
pub use prompt::*;
