#![deny(missing_docs)]
//! Shared logging utilities for the directory workspace.
//!
//! This crate provides the `dir_*` logging macros used across the codebase,
//! the logger initializer used by the terminal front end, and a minimal test
//! initializer for the global logger.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Default log file, relative to the current working directory.
pub const DEFAULT_LOG_FILE: &str = "./directory.log";

/// Logs a trace-level message under the `directory` target.
#[macro_export]
macro_rules! dir_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: "directory", $($arg)*);
    }};
}

/// Logs a debug-level message under the `directory` target.
#[macro_export]
macro_rules! dir_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: "directory", $($arg)*);
    }};
}

/// Logs an info-level message under the `directory` target.
#[macro_export]
macro_rules! dir_info {
    ($($arg:tt)*) => {{
        log::info!(target: "directory", $($arg)*);
    }};
}

/// Logs a warn-level message under the `directory` target.
#[macro_export]
macro_rules! dir_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: "directory", $($arg)*);
    }};
}

/// Logs an error-level message under the `directory` target.
#[macro_export]
macro_rules! dir_error {
    ($($arg:tt)*) => {{
        log::error!(target: "directory", $($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    /// Write to the log file only. Keeps the terminal free for rendering.
    #[default]
    File,
    /// Write to the terminal (stderr for warnings and errors).
    Terminal,
    /// Write to both the log file and the terminal.
    Both,
    /// Discard all log output.
    Off,
}

/// Initialize the global logger.
///
/// File destinations write to `log_file`, truncating it. A file that cannot
/// be created is reported on stderr and skipped; logging then continues with
/// whatever other sinks remain.
pub fn initialize(destination: LogDestination, level: LevelFilter, log_file: &Path) {
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::Off => return,
        LogDestination::File => match create_file_logger(level, config, log_file) {
            Some(file_logger) => vec![file_logger],
            None => return,
        },
        LogDestination::Terminal => vec![TermLogger::new(
            level,
            config,
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )],
        LogDestination::Both => {
            let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
                level,
                config.clone(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            )];
            if let Some(file_logger) = create_file_logger(level, config, log_file) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_file: &Path,
) -> Option<Box<WriteLogger<File>>> {
    let log_path = PathBuf::from(log_file);
    match File::create(&log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}
