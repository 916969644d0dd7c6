//! Check command implementation.
//!
//! Validates that a process memory map can be read and parsed.

use smaps_top::smaps::{read_memory_map_file, resolve_pid, smaps_path};
use smaps_top::format_memory;

use crate::config::{validate_effective_config, Config};
use crate::startup_checks::validate_requirements;

/// Validates system requirements and configuration.
pub fn command_check(pid: Option<u32>, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let pid = resolve_pid(pid);

    println!("🔍 smaps-top - System Check (pid {})", pid);
    println!("=======================================");

    let mut all_ok = true;

    println!("\n📁 Checking memory map access...");
    match validate_requirements(pid) {
        Ok(()) => println!("   ✅ {} is readable", smaps_path(pid).display()),
        Err(e) => {
            println!("   ❌ {}", e);
            all_ok = false;
        }
    }

    if all_ok {
        println!("\n💾 Checking memory map parsing...");
        match read_memory_map_file(&smaps_path(pid), config.filter()) {
            Ok(result) => {
                println!(
                    "   ✅ Parsed {} mappings: Size={}, RSS={}, PSS={}",
                    result.count(),
                    format_memory(result.total_size()),
                    format_memory(result.total_rss()),
                    format_memory(result.total_pss())
                );
            }
            Err(e) => {
                println!("   ❌ Memory map parsing failed: {}", e);
                all_ok = false;
            }
        }
    }

    println!("\n⚙️  Checking configuration...");
    match validate_effective_config(config) {
        Ok(_) => {
            println!("   ✅ Configuration is valid");
        }
        Err(e) => {
            println!("   ❌ Configuration invalid: {}", e);
            all_ok = false;
        }
    }

    println!("\n📋 Summary:");
    if all_ok {
        println!("   ✅ All checks passed");
        Ok(())
    } else {
        println!("   ❌ Some checks failed - please review errors");
        std::process::exit(1);
    }
}
