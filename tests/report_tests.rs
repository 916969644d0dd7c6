//! Integration tests for report rendering on top of the reader.

use smaps_top::report::DEFAULT_TOP_N;
use smaps_top::{read_memory_map_file, render, render_text, top_mappings, OutputFormat, Report};
use std::path::{Path, PathBuf};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/smaps.txt")
}

#[test]
fn test_ranking_by_pss() {
    let result = read_memory_map_file(&fixture(), None).unwrap();
    let ranked: Vec<(&str, u64)> = top_mappings(&result, DEFAULT_TOP_N)
        .iter()
        .map(|m| (m.name.as_str(), m.pss / 1024))
        .collect();

    assert_eq!(
        ranked,
        vec![
            ("[heap]", 1468),
            ("/usr/bin/bash", 164),
            ("/usr/bin/bash", 32),
            ("[stack]", 24),
            // equal PSS: file order wins
            ("/usr/lib/x86_64-linux-gnu/libc.so.6", 20),
            ("anonymous", 20),
            ("/usr/lib/x86_64-linux-gnu/libc.so.6", 4),
        ]
    );
}

#[test]
fn test_text_report() {
    let result = read_memory_map_file(&fixture(), None).unwrap();
    let text = render_text(&Report::new(&result, 3));

    let expected = "\
Summary:
  Total mappings: 7
  Total size: 4 MB
  Total RSS: 3 MB
  Total PSS: 1 MB
Top 3 mappings:
  1. {[heap]} PSS: 1 MB, RSS: 1 MB, Size: 1 MB
  2. {/usr/bin/bash} PSS: 164 KB, RSS: 820 KB, Size: 824 KB
  3. {/usr/bin/bash} PSS: 32 KB, RSS: 160 KB, Size: 160 KB
";
    assert_eq!(text, expected);
}

#[test]
fn test_empty_report() {
    let result = read_memory_map_file(&fixture(), Some("nothing-matches")).unwrap();
    let text = render_text(&Report::new(&result, DEFAULT_TOP_N));
    assert_eq!(
        text,
        "Summary:\n  Total mappings: 0\n  Total size: 0 Bytes\n  Total RSS: 0 Bytes\n  Total PSS: 0 Bytes\nTop 10 mappings:\n"
    );
}

#[test]
fn test_structured_reports() {
    let result = read_memory_map_file(&fixture(), Some("libc")).unwrap();
    let report = Report::new(&result, DEFAULT_TOP_N);

    let json = render(&report, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["count"], 2);
    assert_eq!(value["total_size"], 1780 * 1024);
    assert_eq!(value["top"][0]["pss"], 20 * 1024);

    let yaml = render(&report, OutputFormat::Yaml).unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(value["count"].as_u64(), Some(2));
    assert_eq!(value["top"][1]["pss"].as_u64(), Some(4 * 1024));
}
