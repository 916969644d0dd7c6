//! Requirement validation for smaps-top.
//!
//! This module checks that the memory map of the target process is reachable
//! before it is parsed, so permission problems can be told apart from
//! malformed input.

use nix::unistd::geteuid;
use smaps_top::smaps::smaps_path;
use std::fs;
use tracing::{debug, error, info, warn};

/// Validate all runtime requirements for reading the memory map of `pid`.
pub fn validate_requirements(pid: u32) -> Result<(), ValidationError> {
    info!("🔍 Validating runtime requirements for pid {}...", pid);

    check_user_privileges(pid);
    check_smaps_access(pid)?;

    info!("✅ All runtime requirements validated");
    Ok(())
}

/// Warn when inspecting another process without root privileges.
fn check_user_privileges(pid: u32) {
    if geteuid().is_root() {
        debug!("Running as root (uid=0)");
    } else if pid != std::process::id() {
        warn!("⚠️  Not running as root - the smaps file of pid {} may not be readable", pid);
        warn!("   Recommendation: run as the owner of the process or as root");
    }
}

/// Check that /proc/<pid>/smaps exists and can be opened.
fn check_smaps_access(pid: u32) -> Result<(), ValidationError> {
    let path = smaps_path(pid);

    match fs::File::open(&path) {
        Ok(_) => {
            info!("✅ {} is readable", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            error!("❌ {} not found - is pid {} running?", path.display(), pid);
            Err(ValidationError::ProcessNotFound(pid))
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            error!("❌ Cannot read {} - insufficient permissions", path.display());
            error!("   Solutions:");
            error!("   1. Run as root or as the owner of pid {}", pid);
            error!("   2. Grant capabilities:");
            error!("      setcap cap_dac_read_search,cap_sys_ptrace+ep /path/to/binary");
            Err(ValidationError::InsufficientPermissions(e.to_string()))
        }
        Err(e) => {
            error!("❌ Cannot open {}: {}", path.display(), e);
            Err(ValidationError::Unreadable(e.to_string()))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("No such process: {0}")]
    ProcessNotFound(u32),

    #[error("Insufficient permissions: {0}")]
    InsufficientPermissions(String),

    #[error("smaps file not readable: {0}")]
    Unreadable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_process_is_readable() {
        if !smaps_path(std::process::id()).exists() {
            return;
        }
        assert!(validate_requirements(std::process::id()).is_ok());
    }

    #[test]
    fn test_missing_process() {
        if !std::path::Path::new("/proc/self/smaps").exists() {
            return;
        }
        assert!(matches!(
            validate_requirements(u32::MAX),
            Err(ValidationError::ProcessNotFound(_))
        ));
    }
}
