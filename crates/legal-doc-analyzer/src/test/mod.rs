//! Shared doubles for unit tests

use crate::database::{DocumentRecord, DocumentStore};
use crate::utils::error::ApiError;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

/// In-memory `DocumentStore` following the same match policy as the SQL store.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<DocumentRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn save(&self, document: &str, analysis: &str) -> Result<DocumentRecord, ApiError> {
        let mut records = self.records.lock().unwrap();
        let record = DocumentRecord {
            id: records.len() as i32 + 1,
            document: document.to_string(),
            analysis: analysis.to_string(),
            created_at: Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn fetch_all(&self) -> Result<Vec<DocumentRecord>, ApiError> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn fetch_by_id(&self, id: i32) -> Result<Option<DocumentRecord>, ApiError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn search_by_keyword(&self, keyword: &str) -> Result<Vec<DocumentRecord>, ApiError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.contains_keyword(keyword))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), ApiError> {
        Ok(())
    }
}
