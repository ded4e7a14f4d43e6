//! CLI command handlers
//!
//! This module contains all CLI-related functionality including:
//! - Argument parsing structures
//! - Command routing
//! - Command implementations

pub mod args;
pub mod commands;
pub mod router;

// Re-export the main CLI structures for convenience
pub use args::{Cli, Commands};
pub use router::execute_command;
