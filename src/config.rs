//! Configuration management for smaps-top.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use crate::cli::{Args, ConfigFormat, LogLevel};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use smaps_top::report::DEFAULT_TOP_N;
use smaps_top::smaps::compile_filter;
use smaps_top::OutputFormat;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Warn;

/// Default config file locations, searched in order.
const DEFAULT_CONFIG_PATHS: [&str; 6] = [
    "/etc/smaps-top/config.yaml",
    "/etc/smaps-top/config.yml",
    "/etc/smaps-top/config.json",
    "./smaps-top.yaml",
    "./smaps-top.yml",
    "./smaps-top.json",
];

/// Effective configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Regular expression applied to mapping paths
    pub filter: Option<String>,
    /// Number of mappings listed in the ranking
    #[serde(alias = "top-n")]
    pub top_n: Option<usize>,
    /// text | json | yaml
    pub output: Option<OutputFormat>,
    /// off | error | warn | info | debug | trace
    #[serde(alias = "log-level")]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filter: None,
            top_n: Some(DEFAULT_TOP_N),
            output: Some(OutputFormat::Text),
            log_level: Some("warn".into()),
        }
    }
}

impl Config {
    /// Filter pattern, with an empty string treated as no filter.
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref().filter(|f| !f.is_empty())
    }

    pub fn top_n(&self) -> usize {
        self.top_n.unwrap_or(DEFAULT_TOP_N)
    }

    pub fn output(&self) -> OutputFormat {
        self.output.unwrap_or_default()
    }
}

/// Parses a log level name, ignoring case.
pub fn parse_log_level(name: &str) -> Option<LogLevel> {
    LogLevel::from_str(name, true).ok()
}

/// Effective log level: CLI > config file > default.
pub fn effective_log_level(cfg: &Config, args: &Args) -> LogLevel {
    args.log_level
        .or_else(|| cfg.log_level.as_deref().and_then(parse_log_level))
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if cfg.top_n == Some(0) {
        return Err("top_n must be greater than 0".into());
    }

    if let Some(level) = cfg.log_level.as_deref() {
        if parse_log_level(level).is_none() {
            return Err(format!(
                "Invalid log_level '{}', expected one of off/error/warn/info/debug/trace",
                level
            )
            .into());
        }
    }

    compile_filter(cfg.filter())?;

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(filter) = &args.filter {
        config.filter = Some(filter.clone());
    }
    if let Some(n) = args.top_n {
        config.top_n = Some(n);
    }
    if let Some(output) = args.output {
        config.output = Some(output);
    }

    Ok(config)
}

/// Enhanced configuration loading with multiple format support
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(format!("Config file not found: {}", p.display()).into());
            }
            p.to_path_buf()
        }
        None => match DEFAULT_CONFIG_PATHS.iter().find(|p| Path::new(p).exists()) {
            Some(p) => PathBuf::from(p),
            None => return Ok(Config::default()),
        },
    };

    let content = fs::read_to_string(&path)?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => {
            let config: Config = serde_json::from_str(&content)?;
            info!("Loaded JSON configuration from: {}", path.display());
            Ok(config)
        }
        Some("toml") => {
            let config: Config = toml::from_str(&content)?;
            info!("Loaded TOML configuration from: {}", path.display());
            Ok(config)
        }
        _ => {
            // Default to YAML
            let config: Config = serde_yaml::from_str(&content)?;
            info!("Loaded YAML configuration from: {}", path.display());
            Ok(config)
        }
    }
}

/// Serializes configuration in the requested format.
pub fn config_to_string(
    config: &Config,
    format: &ConfigFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}

/// Shows configuration in requested format
pub fn show_config(config: &Config, format: &ConfigFormat) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", config_to_string(config, format)?);
    Ok(())
}
