//! Utility modules for common functionality.
//!
//! - logging: Logging setup and the shared error context
//! - parsing: Parsing helpers for command-line input

pub mod logging;
pub mod parsing;

pub use parsing::*;
