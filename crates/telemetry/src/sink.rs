use std::sync::Mutex;

use tracing::Level;

use crate::name::LoggerName;

/// Destination for messages emitted through a [`LoggerHandle`](crate::LoggerHandle).
pub trait LogSink: Send + Sync {
    fn emit(&self, logger: &LoggerName, level: Level, message: &str);
}

/// Forwards messages to the installed `tracing` subscriber.
///
/// The logger name travels as the `logger` field since tracing targets must
/// be static.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, logger: &LoggerName, level: Level, message: &str) {
        let logger = logger.as_str();
        match level {
            Level::TRACE => tracing::trace!(logger, "{message}"),
            Level::DEBUG => tracing::debug!(logger, "{message}"),
            Level::INFO => tracing::info!(logger, "{message}"),
            Level::WARN => tracing::warn!(logger, "{message}"),
            _ => tracing::error!(logger, "{message}"),
        }
    }
}

/// A message captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub logger: String,
    pub level: Level,
    pub message: String,
}

/// Keeps every message in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records captured so far.
    pub fn records(&self) -> Vec<Record> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl LogSink for MemorySink {
    fn emit(&self, logger: &LoggerName, level: Level, message: &str) {
        let record = Record {
            logger: logger.to_string(),
            level,
            message: message.to_string(),
        };
        match self.records.lock() {
            Ok(mut records) => records.push(record),
            Err(poisoned) => poisoned.into_inner().push(record),
        }
    }
}
