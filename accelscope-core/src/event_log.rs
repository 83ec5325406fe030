//! User-Visible Event Log
//!
//! ## Overview
//!
//! The dashboard shows a short feed of notable state transitions: startup,
//! link bring-up, configuration changes. The log is append-only and bounded:
//!
//! - New entries go to the **front** (most-recent-first)
//! - Beyond [`MAX_LOG_ENTRIES`] the oldest entry is dropped from the back
//! - Entries are never mutated after creation
//!
//! Searching and filtering belong to the presentation layer; the log only
//! records.
//!
//! This feed is separate from diagnostic logging through the `log` facade,
//! which the engine also emits for operators.

use core::fmt;

use heapless::Deque;
use serde::{Deserialize, Serialize, Serializer};

use crate::constants::MAX_LOG_ENTRIES;
use crate::time::Timestamp;

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum LogLevel {
    Info = 0,
    Success = 1,
    Warning = 2,
    Error = 3,
}

impl LogLevel {
    pub const fn name(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One immutable log record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: Timestamp,
    pub level: LogLevel,
    pub message: String,
}

/// Bounded, most-recent-first log
#[derive(Debug, Clone)]
pub struct EventLog<const N: usize = MAX_LOG_ENTRIES> {
    entries: Deque<LogEntry, N>,
}

impl<const N: usize> EventLog<N> {
    pub const fn new() -> Self {
        Self {
            entries: Deque::new(),
        }
    }

    /// Prepend an entry, dropping the oldest when full
    ///
    /// Returns a copy of the stored entry for notification.
    pub fn append(
        &mut self,
        timestamp: Timestamp,
        level: LogLevel,
        message: impl Into<String>,
    ) -> LogEntry {
        let entry = LogEntry {
            timestamp,
            level,
            message: message.into(),
        };
        if self.entries.is_full() {
            self.entries.pop_back();
        }
        // Room was made above, so this cannot hand the entry back
        let _ = self.entries.push_front(entry.clone());
        entry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest entry
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    /// Iterate newest to oldest
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        self.entries.iter()
    }
}

impl<const N: usize> Default for EventLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Serialize for EventLog<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}
