//! Rolling Logger
//!
//! A `log` backend that keeps the most recent lines in a circular buffer
//! and forwards every line to a pluggable sink (e.g. the browser console).

use std::collections::VecDeque;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Where formatted lines are written in addition to the buffer
pub type Sink = Box<dyn Fn(Level, &str) + Send + Sync>;

/// Logger settings
#[derive(Debug, Clone, Copy)]
pub struct LoggerConfig {
    /// Maximum number of lines kept in memory
    pub capacity: usize,
    /// Most verbose level that is recorded
    pub level: LevelFilter,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            capacity: 200,
            level: LevelFilter::Info,
        }
    }
}

pub struct RollingLogger {
    config: LoggerConfig,
    lines: Mutex<VecDeque<String>>,
    sink: Sink,
}

impl RollingLogger {
    pub fn new(config: LoggerConfig, sink: Sink) -> Self {
        Self {
            config,
            lines: Mutex::new(VecDeque::with_capacity(config.capacity)),
            sink,
        }
    }

    /// Snapshot of the buffered lines, oldest first
    pub fn recent(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    fn push(&self, line: String) {
        if self.config.capacity == 0 {
            return;
        }
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        while lines.len() >= self.config.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }
}

fn format_line(record: &Record) -> String {
    format!(
        "{} [{}] {}: {}",
        chrono::Local::now().format("%H:%M:%S%.3f"),
        record.level(),
        record.target(),
        record.args()
    )
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.config.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record);
        (self.sink)(record.level(), &line);
        self.push(line);
    }

    fn flush(&self) {}
}

/// Install the logger globally. Returns the leaked instance so callers can
/// read `recent()` later.
pub fn init(config: LoggerConfig, sink: Sink) -> Result<&'static RollingLogger, SetLoggerError> {
    let logger: &'static RollingLogger = Box::leak(Box::new(RollingLogger::new(config, sink)));
    log::set_logger(logger)?;
    log::set_max_level(config.level);
    Ok(logger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn record_line(logger: &RollingLogger, level: Level, msg: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target("test")
                .args(format_args!("{}", msg))
                .build(),
        );
    }

    #[test]
    fn test_buffer_drops_oldest_lines() {
        let logger = RollingLogger::new(
            LoggerConfig { capacity: 2, level: LevelFilter::Debug },
            Box::new(|_, _| {}),
        );

        record_line(&logger, Level::Info, "one");
        record_line(&logger, Level::Info, "two");
        record_line(&logger, Level::Info, "three");

        let recent = logger.recent();
        assert_eq!(recent.len(), 2);
        assert!(recent[0].ends_with("test: two"));
        assert!(recent[1].ends_with("test: three"));
    }

    #[test]
    fn test_level_filter_skips_sink_and_buffer() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = seen.clone();
        let logger = RollingLogger::new(
            LoggerConfig { capacity: 10, level: LevelFilter::Warn },
            Box::new(move |level, line| sink_seen.lock().unwrap().push((level, line.to_string()))),
        );

        record_line(&logger, Level::Debug, "hidden");
        record_line(&logger, Level::Warn, "shown");

        assert_eq!(logger.recent().len(), 1);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, Level::Warn);
        assert!(seen[0].1.contains("[WARN]"));
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let logger = RollingLogger::new(
            LoggerConfig { capacity: 0, level: LevelFilter::Trace },
            Box::new(|_, _| {}),
        );
        record_line(&logger, Level::Error, "boom");
        assert!(logger.recent().is_empty());
    }
}
