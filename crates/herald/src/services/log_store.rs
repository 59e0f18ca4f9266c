//! Activity Log Store
//!
//! Bounded, append-with-eviction record of recent bot activity, shared
//! across concurrent command handlers. `append` takes a plain mutex and
//! never awaits, so concurrent handlers can interleave around their own
//! suspension points without ever observing a partially applied write.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::Utc;
use tracing::{error, info};

use crate::domain::entities::{LogEntry, LogFilter, LogKind};

/// Maximum number of entries retained
pub const LOG_CAPACITY: usize = 100;

/// Bounded in-memory activity log
///
/// Process-wide singleton by construction: built once at startup and
/// injected (`Arc<LogStore>`) wherever entries are written or read.
pub struct LogStore {
    capacity: usize,
    entries: Mutex<VecDeque<LogEntry>>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Append an entry stamped with the current time, evicting the oldest
    /// entry once the store is over capacity. Always succeeds.
    ///
    /// The entry is mirrored to the tracing sink for operator visibility.
    pub fn append(&self, kind: LogKind, message: impl Into<String>) {
        let entry = LogEntry {
            kind,
            message: message.into(),
            timestamp: Utc::now(),
        };

        match kind {
            LogKind::Error => error!(kind = %kind, "{}", entry.message),
            _ => info!(kind = %kind, "{}", entry.message),
        }

        let mut entries = self.entries.lock().expect("log store lock poisoned");
        entries.push_back(entry);
        if entries.len() > self.capacity {
            entries.pop_front();
        }
    }

    /// Snapshot the entries matching `filter`, oldest first
    ///
    /// An empty store or a filter with zero matches yields an empty vec;
    /// callers render that as "no logs", not as an error.
    pub fn query(&self, filter: LogFilter) -> Vec<LogEntry> {
        let entries = self.entries.lock().expect("log store lock poisoned");
        match filter {
            LogFilter::All => entries.iter().cloned().collect(),
            LogFilter::Kind(kind) => entries
                .iter()
                .filter(|entry| entry.kind == kind)
                .cloned()
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("log store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_retains_insertion_order() {
        let store = LogStore::new();
        store.append(LogKind::Info, "first");
        store.append(LogKind::Success, "second");
        store.append(LogKind::Error, "third");

        let entries = store.query(LogFilter::All);
        let messages: Vec<&str> = entries.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let store = LogStore::new();
        for i in 0..150 {
            store.append(LogKind::Info, format!("entry {i}"));
        }

        let entries = store.query(LogFilter::All);
        assert_eq!(entries.len(), LOG_CAPACITY);
        assert_eq!(entries.first().unwrap().message, "entry 50");
        assert_eq!(entries.last().unwrap().message, "entry 149");
    }

    #[test]
    fn test_query_filters_by_kind_preserving_order() {
        let store = LogStore::new();
        store.append(LogKind::Success, "sent a");
        store.append(LogKind::Error, "failed b");
        store.append(LogKind::Success, "sent c");
        store.append(LogKind::Info, "summary");

        let successes = store.query(LogFilter::Kind(LogKind::Success));
        let messages: Vec<&str> = successes.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["sent a", "sent c"]);

        let errors = store.query(LogFilter::Kind(LogKind::Error));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_empty_store_and_zero_matches_yield_empty() {
        let store = LogStore::new();
        assert!(store.query(LogFilter::All).is_empty());

        store.append(LogKind::Info, "only info");
        assert!(store.query(LogFilter::Kind(LogKind::Error)).is_empty());
    }

    #[test]
    fn test_small_capacity_store() {
        let store = LogStore::with_capacity(2);
        store.append(LogKind::Info, "a");
        store.append(LogKind::Info, "b");
        store.append(LogKind::Info, "c");

        let messages: Vec<String> = store
            .query(LogFilter::All)
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(messages, vec!["b".to_string(), "c".to_string()]);
    }
}
