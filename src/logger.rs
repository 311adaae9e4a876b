//! Colored stderr logger for the command line tool.
//!
//! stdout only ever carries score lines, so every log record goes to stderr.

use colored::Colorize;
use log::{Level, LevelFilter, Metadata, Record};

pub struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_string = match record.level() {
            Level::Error => record.level().to_string().red(),
            Level::Warn => record.level().to_string().yellow(),
            Level::Info => record.level().to_string().cyan(),
            Level::Debug => record.level().to_string().purple(),
            Level::Trace => record.level().to_string().normal(),
        };

        eprintln!("{:<5} {}", level_string, record.args());
    }

    fn flush(&self) {}
}

/// Install the logger. A second call keeps the first logger and only updates the level.
pub fn init(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
