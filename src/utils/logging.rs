//! `log` backend for the binary.
//!
//! Warnings and errors always reach stderr; `--verbose` adds the per-request
//! debug records emitted by the library.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

pub fn log_error(msg: &str) {
    eprintln!("Error: {}", msg);
}

pub fn log_warning(msg: &str) {
    eprintln!("Warning: {}", msg);
}

pub struct VerboseLogger {
    enabled: bool,
}

impl VerboseLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn max_level(&self) -> LevelFilter {
        if self.enabled {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }

    fn format(record: &Record<'_>) -> String {
        let prefix = match record.level() {
            Level::Error => "Error",
            Level::Warn => "Warning",
            Level::Info => "Info",
            Level::Debug | Level::Trace => "Verbose",
        };
        format!("{}: {}", prefix, record.args())
    }
}

impl Log for VerboseLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", Self::format(record));
        }
    }

    fn flush(&self) {}
}

/// Install [`VerboseLogger`] as the global `log` backend.
pub fn init(verbose: bool) -> Result<(), SetLoggerError> {
    let logger = VerboseLogger::new(verbose);
    let level = logger.max_level();
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_logger_keeps_warnings() {
        let logger = VerboseLogger::new(false);
        assert!(!logger.is_enabled());
        assert_eq!(logger.max_level(), LevelFilter::Warn);

        let warn = Metadata::builder().level(Level::Warn).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&debug));
    }

    #[test]
    fn test_verbose_logger_shows_debug() {
        let logger = VerboseLogger::new(true);
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&debug));
    }

    #[test]
    fn test_record_prefix() {
        let line = VerboseLogger::format(
            &Record::builder()
                .level(Level::Debug)
                .args(format_args!("GET http://localhost"))
                .build(),
        );
        assert_eq!(line, "Verbose: GET http://localhost");
    }
}
