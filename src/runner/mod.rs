//! Invocation runtime
//!
//! This module holds the execution context and the generation pass that ties
//! the prompt builder, the remote client and the output handler together.

pub mod context;
pub mod generate;

// Re-export main types
pub use context::*;
pub use generate::*;
