use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use log::info;

use crate::models::chat::ChatMessage;
use crate::models::record::Dataset;
use crate::models::response::{CleaningLog, LogLevel};

#[derive(Debug)]
struct DatasetState {
    raw: Dataset,
    cleaned: Dataset,
    logs: Vec<CleaningLog>,
}

/// In-memory home of the raw and cleaned datasets.
///
/// Both datasets are swapped as whole values under the lock; a replace is
/// atomic and never merges with what was there before. Seeded at startup with
/// the built-in sample so the query surface works before any upload.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    state: Arc<Mutex<DatasetState>>,
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetStore {
    pub fn new() -> Self {
        let sample = Dataset::sample();
        info!(
            "💾 Dataset store seeded with {} sample transactions",
            sample.len()
        );
        Self {
            state: Arc::new(Mutex::new(DatasetState {
                raw: Dataset::default(),
                cleaned: sample,
                logs: vec![
                    CleaningLog::new(LogLevel::Success, "Sample Raymond sales data loaded successfully"),
                    CleaningLog::new(LogLevel::Info, "Data schema validated - 5 transactions processed"),
                    CleaningLog::new(LogLevel::Success, "Column mapping completed for Raymond data structure"),
                ],
            })),
        }
    }

    pub fn replace_raw(&self, dataset: Dataset, logs: Vec<CleaningLog>) -> Result<()> {
        let mut state = self.lock()?;
        info!("📥 Raw dataset replaced: {} rows", dataset.len());
        state.raw = dataset;
        state.logs = logs;
        Ok(())
    }

    pub fn raw(&self) -> Result<Dataset> {
        Ok(self.lock()?.raw.clone())
    }

    pub fn replace_cleaned(&self, dataset: Dataset, logs: Vec<CleaningLog>) -> Result<()> {
        let mut state = self.lock()?;
        info!("✅ Cleaned dataset replaced: {} rows", dataset.len());
        state.cleaned = dataset;
        state.logs = logs;
        Ok(())
    }

    pub fn cleaned(&self) -> Result<Dataset> {
        Ok(self.lock()?.cleaned.clone())
    }

    pub fn logs(&self) -> Result<Vec<CleaningLog>> {
        Ok(self.lock()?.logs.clone())
    }

    /// Replace the log lines without touching either dataset.
    pub fn record_logs(&self, logs: Vec<CleaningLog>) -> Result<()> {
        self.lock()?.logs = logs;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, DatasetState>> {
        self.state
            .lock()
            .map_err(|_| anyhow!("Failed to acquire lock on dataset store"))
    }
}

/// In-memory store for chat session transcripts. Transcripts are append-only
/// and scoped to the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct ChatStore {
    sessions: Arc<Mutex<HashMap<String, Vec<ChatMessage>>>>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append messages to a session transcript, creating the session on first
    /// use.
    pub fn append(&self, session_id: &str, messages: &[ChatMessage]) -> Result<()> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| anyhow!("Failed to acquire lock on chat sessions"))?;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .extend(messages.iter().cloned());
        Ok(())
    }

    pub fn transcript(&self, session_id: &str) -> Result<Option<Vec<ChatMessage>>> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|_| anyhow!("Failed to acquire lock on chat sessions"))?;
        Ok(sessions.get(session_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ingest;

    const CSV: &str = "brand,quantity\nRAYMOND,2\nOther,1\n";

    #[test]
    fn store_starts_with_the_sample_dataset() {
        let store = DatasetStore::new();
        let cleaned = store.cleaned().expect("cleaned dataset");
        assert_eq!(cleaned.len(), 5);
        assert!(store.raw().expect("raw dataset").is_empty());
        assert_eq!(store.logs().expect("logs").len(), 3);
    }

    #[test]
    fn replacing_with_the_same_csv_twice_is_idempotent() {
        let store = DatasetStore::new();

        let first = ingest::parse_csv(CSV);
        store.replace_raw(first.clone(), Vec::new()).expect("replace");
        let snapshot_a = store.raw().expect("raw");

        let second = ingest::parse_csv(CSV);
        store.replace_raw(second, Vec::new()).expect("replace again");
        let snapshot_b = store.raw().expect("raw");

        // Replacement swaps the whole dataset: no accumulation, no duplication.
        assert_eq!(snapshot_a, snapshot_b);
        assert_eq!(snapshot_b.len(), 2);
    }

    #[test]
    fn transcripts_append_in_order() {
        let store = ChatStore::new();
        store
            .append("s1", &[ChatMessage::user("hi"), ChatMessage::assistant("hello", None)])
            .expect("append");
        store
            .append("s1", &[ChatMessage::user("again")])
            .expect("append");

        let transcript = store.transcript("s1").expect("lookup").expect("session");
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2].content, "again");
        assert!(store.transcript("missing").expect("lookup").is_none());
    }
}
