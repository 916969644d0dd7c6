//! Reads the memory map of the test process itself while it maps a temp file.
//!
//! Kept in its own test binary so no other test adds mappings concurrently.

#![cfg(target_os = "linux")]

use nix::sys::mman::{mmap, MapFlags, ProtFlags};
use smaps_top::{read_process_smaps, SmapsError};
use std::num::NonZeroUsize;
use std::path::Path;

const MAP_LEN: usize = 16 * 1024;

fn map_shared(file: &std::fs::File) {
    let len = NonZeroUsize::new(MAP_LEN).unwrap();
    // Never dereferenced, and left mapped until the test process exits.
    let _addr = unsafe {
        mmap(
            None,
            len,
            ProtFlags::PROT_READ | ProtFlags::PROT_WRITE,
            MapFlags::MAP_SHARED,
            file,
            0,
        )
    }
    .unwrap();
}

#[test]
fn test_own_process_mapped_file() {
    if !Path::new("/proc/self/smaps").exists() {
        return;
    }

    let file = tempfile::NamedTempFile::new().unwrap();
    file.as_file().set_len(MAP_LEN as u64).unwrap();
    let file_name = file.path().file_name().unwrap().to_str().unwrap().to_string();
    let filter = regex::escape(&file_name);

    // Not mapped yet
    let result = read_process_smaps(None, Some(&filter)).unwrap();
    assert_eq!(result.count(), 0);

    map_shared(file.as_file());
    let result = read_process_smaps(None, Some(&filter)).unwrap();
    assert_eq!(result.count(), 1);
    let m = &result.mappings()[0];
    assert!(m.name.ends_with(&file_name));
    assert!(m.size >= MAP_LEN as u64);
    assert!(m.rss <= m.size);
    assert!(m.pss <= m.rss);

    // Same file mapped a second time shows up as its own mapping
    map_shared(file.as_file());
    let result = read_process_smaps(None, Some(&filter)).unwrap();
    assert_eq!(result.count(), 2);
    assert_eq!(result.total_size(), 2 * m.size);

    // The unfiltered read sees both mappings plus everything else
    let all = read_process_smaps(None, None).unwrap();
    assert!(all.count() > 2);
    assert_eq!(all.count(), all.mappings().len() as u64);
    let ours = all
        .mappings()
        .iter()
        .filter(|m| m.name.ends_with(&file_name))
        .count();
    assert_eq!(ours, 2);
}

#[test]
fn test_invalid_filter_against_live_process() {
    let err = read_process_smaps(None, Some("*")).unwrap_err();
    assert!(matches!(err, SmapsError::InvalidFilter { .. }));
}
