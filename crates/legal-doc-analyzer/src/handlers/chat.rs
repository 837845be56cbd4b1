use crate::handlers::upload::UploadForm;
use crate::models::chat::ChatResponse;
use crate::services::DocumentService;
use crate::utils::error::ApiError;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Multipart `file` + `question`. The conversation is not stored.
pub async fn chat_handler(
    State(document_service): State<Arc<DocumentService>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let start_time = Instant::now();

    let mut form = UploadForm::read(multipart?).await?;
    let question = form
        .field("question")
        .map(|q| q.trim().to_string())
        .ok_or_else(|| ApiError::BadRequest("question required".to_string()))?;
    let document = form.require_file()?.into_text()?;

    info!(
        "Chat request: question_len={}, document_chars={}",
        question.len(),
        document.chars().count()
    );

    let answer = document_service.chat(&document, &question).await?;

    info!("Chat answered in {}ms", start_time.elapsed().as_millis());

    Ok(Json(ChatResponse {
        question,
        answer,
        document_chars: document.chars().count(),
    }))
}
