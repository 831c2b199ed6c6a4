//! Human-readable output sinks

use std::sync::Mutex;

/// Log target used by [`LogLogger`]
pub const LOG_TARGET: &str = "tidemark";

/// Destination for progress lines (`OK`/`EMPTY`, status rows, version lines)
pub trait Logger: Send + Sync {
    /// Emit one line
    fn print(&self, line: &str);
}

/// Forwards lines to the `log` facade at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLogger;

impl Logger for LogLogger {
    fn print(&self, line: &str) {
        log::info!(target: LOG_TARGET, "{}", line);
    }
}

/// Captures lines in memory
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogger {
    /// Create an empty logger
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines printed so far
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Drop captured lines
    pub fn clear(&self) {
        match self.lines.lock() {
            Ok(mut lines) => lines.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl Logger for MemoryLogger {
    fn print(&self, line: &str) {
        match self.lines.lock() {
            Ok(mut lines) => lines.push(line.to_string()),
            Err(poisoned) => poisoned.into_inner().push(line.to_string()),
        }
    }
}
