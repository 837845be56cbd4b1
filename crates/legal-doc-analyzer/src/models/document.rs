use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::DocumentRecord;
use crate::utils::preview::{truncate_preview, PREVIEW_CHARS};

// ===== REQUEST MODELS =====

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub keyword: String,
}

// ===== RESPONSE MODELS =====

/// Browse/search rendering of a stored record
#[derive(Debug, Serialize)]
pub struct DocumentPreview {
    pub document_id: i32,
    pub created_at: DateTime<Utc>,
    pub document_preview: String,
    pub analysis_preview: String,
    pub document_chars: usize,
    pub analysis_chars: usize,
}

impl From<&DocumentRecord> for DocumentPreview {
    fn from(record: &DocumentRecord) -> Self {
        Self {
            document_id: record.id,
            created_at: record.created_at,
            document_preview: truncate_preview(&record.document, PREVIEW_CHARS),
            analysis_preview: truncate_preview(&record.analysis, PREVIEW_CHARS),
            document_chars: record.document.chars().count(),
            analysis_chars: record.analysis.chars().count(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListDocumentsResponse {
    pub documents: Vec<DocumentPreview>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub preview: DocumentPreview,
    pub matched_in: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub keyword: String,
    pub results: Vec<SearchHit>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_from_record() {
        let record = DocumentRecord {
            id: 7,
            document: "d".repeat(600),
            analysis: "short analysis".to_string(),
            created_at: Utc::now(),
        };

        let preview = DocumentPreview::from(&record);
        assert_eq!(preview.document_id, 7);
        assert_eq!(preview.document_preview.chars().count(), 503);
        assert!(preview.document_preview.ends_with("..."));
        assert_eq!(preview.analysis_preview, "short analysis");
        assert_eq!(preview.document_chars, 600);
    }
}
