use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// One row of `legal_documents`. Never updated after insert.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct DocumentRecord {
    pub id: i32,
    pub document: String,
    /// JSON array of clause analyses
    pub analysis: String,
    pub created_at: DateTime<Utc>,
}

impl DocumentRecord {
    /// Case-sensitive substring match, the same policy the SQL search uses.
    pub fn contains_keyword(&self, keyword: &str) -> bool {
        !self.matched_fields(keyword).is_empty()
    }

    /// Which fields contain `keyword` ("document", "analysis").
    pub fn matched_fields(&self, keyword: &str) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.document.contains(keyword) {
            fields.push("document");
        }
        if self.analysis.contains(keyword) {
            fields.push("analysis");
        }
        fields
    }
}
