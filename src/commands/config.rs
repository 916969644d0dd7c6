//! Config command implementation.
//!
//! Generates configuration files in various formats.

use std::fs;
use std::path::PathBuf;

use crate::cli::ConfigFormat;
use crate::config::{config_to_string, Config};

/// Generates configuration files.
pub fn command_config(
    output: Option<PathBuf>,
    format: ConfigFormat,
    commented: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let output = output.unwrap_or_else(|| PathBuf::from("smaps-top.yaml"));

    let mut content = config_to_string(&config, &format)?;
    if commented && matches!(format, ConfigFormat::Yaml) {
        content = add_config_comments(content);
    }

    if output.to_string_lossy() == "-" {
        print!("{}", content);
    } else {
        fs::write(&output, content)?;
        println!("✅ Configuration written to: {}", output.display());
    }

    Ok(())
}

/// Adds comments to YAML configuration.
fn add_config_comments(yaml: String) -> String {
    let comments = r#"# smaps-top Configuration
# =======================
#
# filter: null                 # Regex on mapping paths (null = all mappings)
#                              # Anonymous mappings never match a filter
# top_n: 10                    # Mappings listed in the PSS ranking
# output: "text"               # text, json, yaml
# log_level: "warn"            # off, error, warn, info, debug, trace
"#;

    format!("{comments}\n{yaml}")
}
