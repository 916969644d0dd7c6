//! CLI command implementations for smaps-top.
//!
//! This module provides implementations for all CLI subcommands:
//! - `check`: Memory map access and parsing validation
//! - `config`: Configuration file generation

pub mod check;
pub mod config;

// Re-export command functions
pub use check::command_check;
pub use config::command_config;
