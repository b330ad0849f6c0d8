//! Injected logging capability.
//!
//! The fetcher, filter, orchestrator and the downloader process plumbing all
//! log through a `&dyn SyncLogger` handed to them, never through a global.
//! Production wires [`TracingLogger`]; tests use [`MemoryLogger`].

use std::sync::Mutex;

/// Severity of a recorded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// Sink for diagnostic messages. `Send + Sync` so downloader output can be
/// forwarded from a reader thread.
pub trait SyncLogger: Send + Sync {
    fn debug(&self, msg: &str);
    fn info(&self, msg: &str);
    fn warning(&self, msg: &str);
    fn error(&self, msg: &str);

    fn log(&self, level: LogLevel, msg: &str) {
        match level {
            LogLevel::Debug => self.debug(msg),
            LogLevel::Info => self.info(msg),
            LogLevel::Warning => self.warning(msg),
            LogLevel::Error => self.error(msg),
        }
    }
}

/// Forwards to the `tracing` subscriber installed by the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl SyncLogger for TracingLogger {
    fn debug(&self, msg: &str) {
        tracing::debug!("{}", msg);
    }

    fn info(&self, msg: &str) {
        tracing::info!("{}", msg);
    }

    fn warning(&self, msg: &str) {
        tracing::warn!("{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!("{}", msg);
    }
}

/// Keeps every message in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records so far.
    pub fn records(&self) -> Vec<(LogLevel, String)> {
        self.records
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Messages recorded at exactly `level`.
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    /// True if any message at `level` contains `needle`.
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.messages_at(level).iter().any(|m| m.contains(needle))
    }

    fn push(&self, level: LogLevel, msg: &str) {
        let mut records = match self.records.lock() {
            Ok(r) => r,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.push((level, msg.to_string()));
    }
}

impl SyncLogger for MemoryLogger {
    fn debug(&self, msg: &str) {
        self.push(LogLevel::Debug, msg);
    }

    fn info(&self, msg: &str) {
        self.push(LogLevel::Info, msg);
    }

    fn warning(&self, msg: &str) {
        self.push(LogLevel::Warning, msg);
    }

    fn error(&self, msg: &str) {
        self.push(LogLevel::Error, msg);
    }
}
