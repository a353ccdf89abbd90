use std::io::Write;
use std::time::Instant;

use log::{Log, Metadata, Record, SetLoggerError};
use parking_lot::Mutex;

/// Logs to stderr, and to a file when one is given.
///
/// Stdout is reserved for echoed command lines, so nothing here writes to it.
struct LintLogger {
    file: Option<Mutex<std::fs::File>>,
    filter: log::LevelFilter,
    start: Instant,
}

impl Log for LintLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        eprintln!("lintrun: {}: {}", record.level(), record.args());

        if let Some(ref file) = self.file {
            let elapsed = self.start.elapsed().as_secs_f64();
            let _ = writeln!(
                file.lock(),
                "[{elapsed:.3}s] [{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Some(ref file) = self.file {
            let _ = file.lock().flush();
        }
    }
}

/// Parse a `RUST_LOG`-style level, defaulting to `warn`.
#[must_use]
pub fn parse_filter(value: Option<&str>) -> log::LevelFilter {
    value
        .and_then(|s| s.parse().ok())
        .unwrap_or(log::LevelFilter::Warn)
}

/// Initialize the global logger.
///
/// # Errors
///
/// Returns `SetLoggerError` if a logger is already installed.
pub fn init(log_file: Option<std::fs::File>) -> Result<(), SetLoggerError> {
    let filter = parse_filter(std::env::var("RUST_LOG").ok().as_deref());

    let logger = LintLogger {
        file: log_file.map(Mutex::new),
        filter,
        start: Instant::now(),
    };

    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(parse_filter(None), log::LevelFilter::Warn);
        assert_eq!(parse_filter(Some("debug")), log::LevelFilter::Debug);
        assert_eq!(parse_filter(Some("nonsense")), log::LevelFilter::Warn);
    }

    #[test]
    fn test_file_sink_receives_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lintrun.log");
        let logger = LintLogger {
            file: Some(Mutex::new(std::fs::File::create(&path).unwrap())),
            filter: log::LevelFilter::Debug,
            start: Instant::now(),
        };
        logger.log(
            &Record::builder()
                .args(format_args!("running mypy"))
                .level(log::Level::Debug)
                .target("lintrun::check")
                .build(),
        );
        logger.flush();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[DEBUG] lintrun::check - running mypy"));
    }
}
