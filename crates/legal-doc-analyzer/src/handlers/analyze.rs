use crate::handlers::upload::UploadForm;
use crate::models::analysis::{AnalyzeRequest, AnalyzeResponse};
use crate::services::{AnalyzedDocument, DocumentService};
use crate::utils::error::ApiError;
use axum::{
    extract::{
        multipart::MultipartRejection, rejection::JsonRejection,
        Multipart, State,
    },
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

impl From<AnalyzedDocument> for AnalyzeResponse {
    fn from(analyzed: AnalyzedDocument) -> Self {
        Self {
            document_id: analyzed.record.id,
            created_at: analyzed.record.created_at,
            clause_count: analyzed.results.len(),
            clauses: analyzed.results,
        }
    }
}

/// Pasted text
pub async fn analyze_handler(
    State(document_service): State<Arc<DocumentService>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let start_time = Instant::now();
    let Json(request) = payload?;
    info!("Analyze request: {} chars pasted", request.document.len());

    let analyzed = document_service.analyze_document(&request.document).await?;

    info!(
        "Document {} analyzed in {}ms",
        analyzed.record.id,
        start_time.elapsed().as_millis()
    );
    Ok(Json(analyzed.into()))
}

/// Uploaded .txt or .pdf
pub async fn analyze_upload_handler(
    State(document_service): State<Arc<DocumentService>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let start_time = Instant::now();
    info!("Analyze upload request received");

    let mut form = UploadForm::read(multipart?).await?;
    let text = form.require_file()?.into_text()?;

    let analyzed = document_service.analyze_document(&text).await?;

    info!(
        "Document {} analyzed in {}ms",
        analyzed.record.id,
        start_time.elapsed().as_millis()
    );
    Ok(Json(analyzed.into()))
}
