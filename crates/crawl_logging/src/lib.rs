#![deny(missing_docs)]
//! Shared logging setup for the crawler workspace.
//!
//! This crate wires the `log` facade to `simplelog` for the CLI and provides
//! a minimal initializer for tests.

use std::fs::File;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Log file created next to the process when file logging is on.
pub const LOG_FILE: &str = "crawl.log";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the terminal (stdout).
    Terminal,
    /// Write to [`LOG_FILE`] in the current directory.
    File,
    /// Write to both terminal and file.
    Both,
}

impl LogDestination {
    fn wants_terminal(self) -> bool {
        matches!(self, Self::Terminal | Self::Both)
    }

    fn wants_file(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }
}

/// Initializes the global logger with the given destination and level.
///
/// Safe to call more than once; only the first initialization wins. A log
/// file that cannot be created is reported on stderr and skipped rather
/// than failing the run.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if destination.wants_terminal() {
        loggers.push(TermLogger::new(
            level,
            config(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if destination.wants_file() {
        match File::create(LOG_FILE) {
            Ok(file) => loggers.push(WriteLogger::new(level, config(), file)),
            Err(err) => eprintln!("Warning: could not create {LOG_FILE}: {err}"),
        }
    }

    let _ = CombinedLogger::init(loggers);
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
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

fn config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
