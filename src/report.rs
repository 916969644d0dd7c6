//! Presentation of an [`AggregateResult`]: summary totals and the mappings
//! with the largest PSS.

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::smaps::{AggregateResult, MappingRecord};

/// Number of ranked mappings shown when nothing else is configured.
pub const DEFAULT_TOP_N: usize = 10;

const KB: u64 = 1024;
const MB: u64 = 1024 * KB;
const GB: u64 = 1024 * MB;

/// Output format of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Summary plus ranked mappings, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub count: u64,
    pub total_size: u64,
    pub total_rss: u64,
    pub total_pss: u64,
    pub top_n: usize,
    pub top: Vec<MappingRecord>,
}

impl Report {
    pub fn new(result: &AggregateResult, top_n: usize) -> Self {
        Self {
            count: result.count(),
            total_size: result.total_size(),
            total_rss: result.total_rss(),
            total_pss: result.total_pss(),
            top_n,
            top: top_mappings(result, top_n).into_iter().cloned().collect(),
        }
    }
}

/// Formats a byte count with the largest unit it strictly exceeds.
/// Values are truncated, never rounded: 2047 bytes is "1 KB".
pub fn format_memory(bytes: u64) -> String {
    if bytes > GB {
        format!("{} GB", bytes / GB)
    } else if bytes > MB {
        format!("{} MB", bytes / MB)
    } else if bytes > KB {
        format!("{} KB", bytes / KB)
    } else {
        format!("{} Bytes", bytes)
    }
}

/// Returns up to `n` mappings ordered by descending PSS.
/// Mappings with equal PSS keep their order from the smaps file.
pub fn top_mappings(result: &AggregateResult, n: usize) -> Vec<&MappingRecord> {
    let mut ranked: Vec<&MappingRecord> = result.mappings().iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.pss.cmp(&a.pss));
    ranked.truncate(n);
    ranked
}

/// Renders the report as plain text.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();

    writeln!(out, "Summary:").ok();
    writeln!(out, "  Total mappings: {}", report.count).ok();
    writeln!(out, "  Total size: {}", format_memory(report.total_size)).ok();
    writeln!(out, "  Total RSS: {}", format_memory(report.total_rss)).ok();
    writeln!(out, "  Total PSS: {}", format_memory(report.total_pss)).ok();

    writeln!(out, "Top {} mappings:", report.top_n).ok();
    for (i, m) in report.top.iter().enumerate() {
        writeln!(
            out,
            "  {}. {{{}}} PSS: {}, RSS: {}, Size: {}",
            i + 1,
            m.name,
            format_memory(m.pss),
            format_memory(m.rss),
            format_memory(m.size)
        )
        .ok();
    }

    out
}

/// Renders the report in the requested format.
pub fn render(report: &Report, format: OutputFormat) -> Result<String, Box<dyn std::error::Error>> {
    let output = match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Json => serde_json::to_string_pretty(report)? + "\n",
        OutputFormat::Yaml => serde_yaml::to_string(report)?,
    };
    Ok(output)
}
