//! smaps-top library
//!
//! This library reads the Linux `/proc/<pid>/smaps` format and aggregates the
//! size, RSS and PSS of every mapping. It is the engine behind the
//! `smaps-top` binary but can be used on its own against any smaps content.
//!
//! # Features
//!
//! - **Streaming parser**: one pass, line by line, no look-ahead
//! - **Name filtering**: keep only mappings whose path matches a regex
//! - **Strict format checking**: malformed input aborts the read, no partial results
//! - **Reporting**: human readable summary and top-N ranking by PSS
//!
//! # Usage
//!
//! ```rust
//! use smaps_top::{read_memory_map, Report, render_text};
//!
//! let smaps = "\
//! 7f00a0000000-7f00a0004000 rw-s 00000000 00:1f 42 /tmp/m.txt
//! Size:                 16 kB
//! Rss:                   4 kB
//! Pss:                   4 kB
//! VmFlags: rd wr sh mr mw me ms sd
//! ";
//!
//! let result = read_memory_map(smaps.as_bytes(), Some("m.txt")).unwrap();
//! assert_eq!(result.count(), 1);
//! assert_eq!(result.total_size(), 16 * 1024);
//!
//! let report = Report::new(&result, 10);
//! println!("{}", render_text(&report));
//! ```

pub mod report;
pub mod smaps;

// Re-export main types for convenience
pub use report::{format_memory, render, render_text, top_mappings, OutputFormat, Report};
pub use smaps::{
    read_memory_map, read_memory_map_file, read_process_smaps, AggregateResult, MappingRecord,
    SmapsError,
};
