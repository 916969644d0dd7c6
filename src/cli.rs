//! CLI arguments and subcommands for smaps-top.
//!
//! This module defines the command-line interface structure using the clap library,
//! including all flags, options, and subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use smaps_top::OutputFormat;
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration format options for output
#[derive(Debug, Clone, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "smaps-top",
    about = "Summarize process memory usage from /proc/<pid>/smaps",
    long_about = "Summarize process memory usage from /proc/<pid>/smaps.\n\n\
                  Reads the memory map of a process, totals the size, RSS and PSS of \
                  every mapping and lists the mappings with the largest PSS. Mappings \
                  can be narrowed down with a regular expression on their path.",
    author = "Michael Moll <exporter@herakles.now> - Herakles",
    version = "0.1.0",
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Process id to inspect (default: this process)
    #[arg(long)]
    pub pid: Option<u32>,

    /// Only include mappings whose path matches this regular expression
    #[arg(long)]
    pub filter: Option<String>,

    /// Number of mappings to list, ranked by PSS
    #[arg(short = 'n', long)]
    pub top_n: Option<usize>,

    /// Report output format
    #[arg(short = 'o', long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Log level (default: warn)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,
}

/// Subcommands for additional functionality
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the memory map of a process can be read and parsed
    Check {
        /// Process id to check (default: this process)
        #[arg(long)]
        pid: Option<u32>,
    },

    /// Generate configuration files
    Config {
        /// Output file path ("-" for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ConfigFormat,

        /// Include comments and examples
        #[arg(long)]
        commented: bool,
    },
}
