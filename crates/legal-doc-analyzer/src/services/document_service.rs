use crate::database::{DocumentRecord, DocumentStore};
use crate::document::split_clauses;
use crate::models::analysis::{serialize_results, AnalysisResult};
use crate::services::AnalysisService;
use crate::utils::error::ApiError;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A stored record together with the per-clause results that produced it.
#[derive(Debug)]
pub struct AnalyzedDocument {
    pub record: DocumentRecord,
    pub results: Vec<AnalysisResult>,
}

pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
    analysis: Arc<AnalysisService>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStore>, analysis: Arc<AnalysisService>) -> Self {
        Self { store, analysis }
    }

    /// Split -> analyze each clause in order -> save once.
    ///
    /// A failing clause aborts the whole pass before anything is written.
    pub async fn analyze_document(&self, text: &str) -> Result<AnalyzedDocument, ApiError> {
        if text.trim().is_empty() {
            return Err(ApiError::BadRequest("Document text is empty".to_string()));
        }

        let clauses = split_clauses(text);
        info!(
            "Analyzing document: {} chars, {} clauses",
            text.len(),
            clauses.len()
        );

        if clauses.is_empty() {
            warn!("No clause headings found; saving document with empty analysis");
        }

        let mut results = Vec::with_capacity(clauses.len());
        for (idx, clause) in clauses.into_iter().enumerate() {
            debug!("Clause {}: {}", idx + 1, clause.heading);
            let analysis = self.analysis.analyze_clause(&clause.body).await?;
            results.push(AnalysisResult {
                heading: clause.heading,
                body: clause.body,
                analysis,
            });
        }

        let serialized = serialize_results(&results)
            .map_err(|e| ApiError::InternalError(format!("Failed to serialize analysis: {}", e)))?;
        let record = self.store.save(text, &serialized).await?;

        info!(
            "Document {} saved with {} clause analyses",
            record.id,
            results.len()
        );

        Ok(AnalyzedDocument { record, results })
    }

    /// Ad hoc question over a document; nothing is persisted.
    pub async fn chat(&self, document: &str, question: &str) -> Result<String, ApiError> {
        if question.trim().is_empty() {
            return Err(ApiError::BadRequest("question required".to_string()));
        }
        if document.trim().is_empty() {
            return Err(ApiError::BadRequest("Document text is empty".to_string()));
        }

        self.analysis.answer_question(document, question).await
    }
}
