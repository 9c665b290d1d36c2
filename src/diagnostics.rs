//! Diagnostic log sink for operational errors raised inside hooks.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::error;

/// Receives `(title, message)` entries. Entries never reach the caller.
pub trait DiagnosticLog: Send + Sync {
    fn log_error(&self, title: &str, message: &str);
}

impl<T: DiagnosticLog + ?Sized> DiagnosticLog for Arc<T> {
    fn log_error(&self, title: &str, message: &str) {
        (**self).log_error(title, message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticEntry {
    pub title: String,
    pub message: String,
    pub logged_at: DateTime<Utc>,
}

/// Emits every entry through `tracing` and keeps the most recent ones in memory.
#[derive(Debug)]
pub struct ErrorLog {
    capacity: usize,
    entries: Mutex<VecDeque<DiagnosticEntry>>,
}

impl ErrorLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<DiagnosticEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Retained entries, oldest first.
    pub fn entries(&self) -> Vec<DiagnosticEntry> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new(100)
    }
}

impl DiagnosticLog for ErrorLog {
    fn log_error(&self, title: &str, message: &str) {
        error!(title, "{}", message);

        if self.capacity == 0 {
            return;
        }
        let mut entries = self.lock();
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(DiagnosticEntry {
            title: title.to_string(),
            message: message.to_string(),
            logged_at: Utc::now(),
        });
    }
}
