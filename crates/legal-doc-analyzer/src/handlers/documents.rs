use crate::database::{DocumentRecord, DocumentStore};
use crate::models::document::{
    DocumentPreview, ListDocumentsResponse, SearchHit, SearchQuery, SearchResponse,
};
use crate::utils::error::ApiError;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

pub async fn list_documents_handler(
    State(store): State<Arc<dyn DocumentStore>>,
) -> Result<Json<ListDocumentsResponse>, ApiError> {
    let records = store.fetch_all().await?;
    info!("List documents: {} records", records.len());

    let documents: Vec<DocumentPreview> = records.iter().map(DocumentPreview::from).collect();
    let total = documents.len();

    Ok(Json(ListDocumentsResponse { documents, total }))
}

pub async fn get_document_handler(
    State(store): State<Arc<dyn DocumentStore>>,
    Path(document_id): Path<i32>,
) -> Result<Json<DocumentRecord>, ApiError> {
    store
        .fetch_by_id(document_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Document {} not found", document_id)))
}

pub async fn search_handler(
    State(store): State<Arc<dyn DocumentStore>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    if query.keyword.is_empty() {
        return Err(ApiError::BadRequest("keyword required".to_string()));
    }

    info!("Search request: {:?}", query.keyword);

    let records = store.search_by_keyword(&query.keyword).await?;
    let results: Vec<SearchHit> = records
        .iter()
        .map(|record| SearchHit {
            preview: DocumentPreview::from(record),
            matched_in: record.matched_fields(&query.keyword),
        })
        .collect();
    let total = results.len();

    Ok(Json(SearchResponse {
        keyword: query.keyword,
        results,
        total,
    }))
}
