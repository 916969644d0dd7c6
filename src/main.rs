//! smaps-top - version 0.1.0
//!
//! Prints the memory usage summary of a process and its largest mappings.
//! This is the main entry point that resolves configuration, sets up logging
//! and handles subcommands.

mod cli;
mod commands;
mod config;
mod startup_checks;

use clap::Parser;
use smaps_top::{read_process_smaps, render, Report};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};

use cli::{Args, Commands, LogLevel};
use commands::{command_check, command_config};
use config::{effective_log_level, resolve_config, show_config, validate_effective_config, Config};

/// Initializes tracing logging subsystem with the given level.
/// Logs go to stderr so that stdout only carries the report.
fn setup_logging(level: LogLevel) -> Result<(), Box<dyn std::error::Error>> {
    let filter = match level {
        LogLevel::Off => LevelFilter::OFF,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    debug!("Logging initialized with level: {:?}", level);
    Ok(())
}

/// Helper function to load and validate configuration.
/// Exits the process with error code 1 if validation fails.
fn load_validated_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let config = resolve_config(args)?;
    if let Err(e) = validate_effective_config(&config) {
        eprintln!("❌ Configuration invalid: {}", e);
        std::process::exit(1);
    }
    Ok(config)
}

/// Main application entry point.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Early config resolution for show/check modes
    if args.show_config || args.check_config {
        let config = resolve_config(&args)?;

        if args.check_config {
            if let Err(e) = validate_effective_config(&config) {
                eprintln!("❌ Configuration invalid: {}", e);
                std::process::exit(1);
            }
            println!("✅ Configuration is valid");
            return Ok(());
        }

        return show_config(&config, &args.config_format);
    }

    // Config generation does not need the effective config
    if let Some(Commands::Config {
        output,
        format,
        commented,
    }) = &args.command
    {
        return command_config(output.clone(), format.clone(), *commented);
    }

    let config = load_validated_config(&args)?;
    setup_logging(effective_log_level(&config, &args))?;

    if let Some(Commands::Check { pid }) = &args.command {
        return command_check(pid.or(args.pid), &config);
    }

    info!("Reading memory map (pid={:?}, filter={:?})", args.pid, config.filter());

    let result = match read_process_smaps(args.pid, config.filter()) {
        Ok(result) => result,
        Err(e) => {
            error!("Failed to read memory map: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let report = Report::new(&result, config.top_n());
    print!("{}", render(&report, config.output())?);

    Ok(())
}
