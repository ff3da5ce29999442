//! Session-wide design error log
//!
//! A capacity-bounded ring buffer of [`DesignError`]s. The provider and the
//! error boundary hold an [`ErrorLog`] handle; [`ErrorLog::global`] is the
//! handle shared by the whole session when nothing is injected.

use crate::error::{DesignError, DesignErrorKind, StorageError};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

/// Default number of entries retained before the oldest are evicted
pub const DEFAULT_LOG_CAPACITY: usize = 50;

/// Global session log instance
static ERROR_LOG: OnceLock<ErrorLog> = OnceLock::new();

/// A logged error with its insertion sequence number
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorLogEntry {
    pub sequence: u64,
    #[serde(flatten)]
    pub error: DesignError,
}

/// Aggregate view over the buffer
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorStats {
    pub total_errors: usize,
    pub errors_by_type: FxHashMap<DesignErrorKind, usize>,
    pub last_error: Option<DesignError>,
}

struct LogBuffer {
    entries: VecDeque<ErrorLogEntry>,
    capacity: usize,
    next_sequence: u64,
}

/// Cloneable handle to a bounded error log
#[derive(Clone)]
pub struct ErrorLog {
    inner: Arc<Mutex<LogBuffer>>,
}

impl ErrorLog {
    /// Create a log holding at most `capacity` entries (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Mutex::new(LogBuffer {
                entries: VecDeque::with_capacity(capacity),
                capacity,
                next_sequence: 0,
            })),
        }
    }

    /// Session-wide log, created on first use with [`DEFAULT_LOG_CAPACITY`]
    pub fn global() -> &'static ErrorLog {
        ERROR_LOG.get_or_init(|| ErrorLog::new(DEFAULT_LOG_CAPACITY))
    }

    /// Install the session-wide log with a custom capacity.
    ///
    /// Safe to call multiple times; the first call wins. Returns the log that
    /// is actually installed.
    pub fn init_global(capacity: usize) -> &'static ErrorLog {
        ERROR_LOG.get_or_init(|| ErrorLog::new(capacity))
    }

    // A panic while holding the lock must not disable logging.
    fn buffer(&self) -> MutexGuard<'_, LogBuffer> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn capacity(&self) -> usize {
        self.buffer().capacity
    }

    pub fn len(&self) -> usize {
        self.buffer().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer().entries.is_empty()
    }

    /// Append an error, evicting the oldest entry when full
    pub fn log_error(&self, error: DesignError) {
        tracing::warn!(
            kind = %error.kind,
            fallback = ?error.fallback_used.map(|b| b.key()),
            "design error: {}",
            error.message
        );

        let mut buf = self.buffer();
        let sequence = buf.next_sequence;
        buf.next_sequence += 1;
        if buf.entries.len() == buf.capacity {
            buf.entries.pop_front();
        }
        buf.entries.push_back(ErrorLogEntry { sequence, error });
    }

    /// Most recent first, at most `n` entries
    pub fn recent_errors(&self, n: usize) -> Vec<DesignError> {
        self.buffer()
            .entries
            .iter()
            .rev()
            .take(n)
            .map(|e| e.error.clone())
            .collect()
    }

    /// Oldest first, with sequence numbers
    pub fn entries(&self) -> Vec<ErrorLogEntry> {
        self.buffer().entries.iter().cloned().collect()
    }

    pub fn error_stats(&self) -> ErrorStats {
        let buf = self.buffer();
        let mut errors_by_type = FxHashMap::default();
        for entry in &buf.entries {
            *errors_by_type.entry(entry.error.kind).or_insert(0) += 1;
        }
        ErrorStats {
            total_errors: buf.entries.len(),
            errors_by_type,
            last_error: buf.entries.back().map(|e| e.error.clone()),
        }
    }

    /// Snapshot of the buffer as a pretty-printed JSON array
    pub fn export_errors(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.entries())
    }

    /// Write the export document to `path`
    pub fn export_to_file(&self, path: &Path) -> Result<(), StorageError> {
        let json = self.export_errors()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn clear_errors(&self) {
        let mut buf = self.buffer();
        tracing::debug!("ErrorLog::clear_errors - dropping {} entries", buf.entries.len());
        buf.entries.clear();
    }
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

impl std::fmt::Debug for ErrorLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let buf = self.buffer();
        f.debug_struct("ErrorLog")
            .field("len", &buf.entries.len())
            .field("capacity", &buf.capacity)
            .finish()
    }
}

/// Export the session-wide log for download
pub fn export_design_errors() -> Result<String, serde_json::Error> {
    ErrorLog::global().export_errors()
}
