//! Locating the smaps file of a process.

use std::path::PathBuf;

use tracing::debug;

use super::error::SmapsError;
use super::reader::read_memory_map_file;
use super::types::AggregateResult;

/// Root of the proc filesystem.
pub const PROC_ROOT: &str = "/proc";

/// Path of the smaps file for `pid`.
pub fn smaps_path(pid: u32) -> PathBuf {
    PathBuf::from(PROC_ROOT).join(pid.to_string()).join("smaps")
}

/// Resolves an optional pid, defaulting to the calling process.
pub fn resolve_pid(pid: Option<u32>) -> u32 {
    pid.unwrap_or_else(std::process::id)
}

/// Reads and aggregates `/proc/<pid>/smaps`. `None` selects the current process.
pub fn read_process_smaps(
    pid: Option<u32>,
    filter: Option<&str>,
) -> Result<AggregateResult, SmapsError> {
    let pid = resolve_pid(pid);
    let path = smaps_path(pid);
    debug!("Reading memory map of pid {} from {}", pid, path.display());
    read_memory_map_file(&path, filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smaps_path() {
        assert_eq!(smaps_path(1), PathBuf::from("/proc/1/smaps"));
        assert_eq!(smaps_path(4242), PathBuf::from("/proc/4242/smaps"));
    }

    #[test]
    fn test_resolve_pid_defaults_to_self() {
        assert_eq!(resolve_pid(None), std::process::id());
        assert_eq!(resolve_pid(Some(7)), 7);
    }

    #[test]
    fn test_invalid_filter_reported_before_open() {
        // u32::MAX is above any real pid_max, so the file cannot exist.
        let err = read_process_smaps(Some(u32::MAX), Some("[")).unwrap_err();
        assert!(matches!(err, SmapsError::InvalidFilter { .. }));

        let err = read_process_smaps(Some(u32::MAX), None).unwrap_err();
        assert!(matches!(err, SmapsError::SourceUnavailable { .. }));
    }
}
