//! Rolling Logger
//!
//! `log` backend that writes each record to the console (browser console on
//! wasm32, stderr elsewhere) and keeps the most recent records in a circular
//! buffer so the app can show them later.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// Fixed-capacity FIFO; pushing past capacity drops the oldest entry
#[derive(Debug)]
pub struct RingBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> RingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Oldest first
    pub fn snapshot(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

/// A formatted log line kept in the buffer
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    pub fn line(&self, app_name: &str) -> String {
        format!(
            "[{}] [{}] {} {}: {}",
            self.timestamp, self.level, app_name, self.target, self.message
        )
    }
}

pub struct RollingLogger {
    app_name: String,
    level: LevelFilter,
    buffer: Mutex<RingBuffer<LogEntry>>,
}

impl RollingLogger {
    pub fn new(app_name: &str, capacity: usize, level: LevelFilter) -> Self {
        Self {
            app_name: app_name.to_string(),
            level,
            buffer: Mutex::new(RingBuffer::new(capacity)),
        }
    }

    /// Buffered entries, oldest first
    pub fn recent(&self) -> Vec<LogEntry> {
        match self.buffer.lock() {
            Ok(buffer) => buffer.snapshot(),
            Err(poisoned) => poisoned.into_inner().snapshot(),
        }
    }

    /// Formatted lines at `level` or more severe, oldest first
    pub fn lines_at_least(&self, level: Level) -> Vec<String> {
        self.recent()
            .iter()
            .filter(|entry| entry.level <= level)
            .map(|entry| entry.line(&self.app_name))
            .collect()
    }

    fn emit(&self, entry: &LogEntry) {
        let line = entry.line(&self.app_name);

        #[cfg(target_arch = "wasm32")]
        {
            match entry.level {
                Level::Error => web_sys::console::error_1(&line.as_str().into()),
                Level::Warn => web_sys::console::warn_1(&line.as_str().into()),
                Level::Info => web_sys::console::info_1(&line.as_str().into()),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&line.as_str().into()),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("{}", line);
    }
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let entry = LogEntry {
            timestamp: chrono::Local::now().format("%H:%M:%S%.3f").to_string(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        self.emit(&entry);

        let mut buffer = match self.buffer.lock() {
            Ok(buffer) => buffer,
            Err(poisoned) => poisoned.into_inner(),
        };
        buffer.push(entry);
    }

    fn flush(&self) {}
}

/// Install the global logger. Fails if a logger is already set.
pub fn init_logger(app_name: &str, capacity: usize, level: LevelFilter) -> Result<&'static RollingLogger, SetLoggerError> {
    let logger = LOGGER.get_or_init(|| RollingLogger::new(app_name, capacity, level));
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(logger)
}

/// Lines buffered by the global logger at `level` or worse; empty before `init_logger`
pub fn recent_lines(level: Level) -> Vec<String> {
    LOGGER
        .get()
        .map(|logger| logger.lines_at_least(level))
        .unwrap_or_default()
}
