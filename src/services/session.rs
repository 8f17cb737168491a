// src/services/session.rs
use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::models::{AnalysisRecord, HistoryEntry};

/// Append-only record of past analyses. Owned by whoever runs the
/// analyses; the calculator never sees it.
#[derive(Debug, Default, Clone)]
pub struct AnalysisLog {
    entries: Vec<HistoryEntry>,
}

impl AnalysisLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, analysis: AnalysisRecord) -> &HistoryEntry {
        self.entries.push(HistoryEntry {
            recorded_at: Utc::now(),
            analysis,
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub email: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// In-memory state for the running server: analysis history plus form
/// submissions. Nothing here outlives the process.
#[derive(Debug, Default)]
pub struct SessionStore {
    history: Mutex<AnalysisLog>,
    inbox: Mutex<Vec<ContactMessage>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_analysis(&self, analysis: AnalysisRecord) {
        let mut history = self.history.lock().await;
        history.record(analysis);
        info!("Recorded analysis #{} in session history", history.len());
    }

    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.history.lock().await.entries().to_vec()
    }

    pub async fn add_contact(&self, contact: ContactMessage) {
        let mut inbox = self.inbox.lock().await;
        inbox.push(contact);
        info!("Stored contact submission ({} total)", inbox.len());
    }

    pub async fn contacts(&self) -> Vec<ContactMessage> {
        self.inbox.lock().await.clone()
    }
}
