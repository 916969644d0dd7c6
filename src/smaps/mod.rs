//! smaps parsing and aggregation.
//!
//! This module provides:
//! - `reader`: the line-driven state machine over the smaps format
//! - `units`: value line parsing and kB/mB/gB conversion
//! - `source`: locating `/proc/<pid>/smaps`
//! - `types`: per-mapping records and the aggregate result
//! - `error`: the error type shared by all of the above

pub mod error;
pub mod reader;
pub mod source;
pub mod types;
pub mod units;

// Re-export commonly used types
pub use error::SmapsError;
pub use reader::{compile_filter, read_memory_map, read_memory_map_file, read_with_filter};
pub use source::{read_process_smaps, resolve_pid, smaps_path};
pub use types::{AggregateResult, MappingRecord, ANONYMOUS};
