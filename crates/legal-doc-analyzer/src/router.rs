use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let health_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check));

    let api_routes = Router::new()
        .route("/api/analyze", post(handlers::analyze::analyze_handler))
        .route(
            "/api/analyze/upload",
            post(handlers::analyze::analyze_upload_handler),
        )
        .route("/api/documents", get(handlers::documents::list_documents_handler))
        .route(
            "/api/documents/search",
            get(handlers::documents::search_handler),
        )
        .route(
            "/api/documents/{id}",
            get(handlers::documents::get_document_handler),
        )
        .route("/api/chat", post(handlers::chat::chat_handler));

    Router::new()
        .merge(health_routes)
        .merge(api_routes)
        // Single-page UI (index.html + assets)
        .fallback_service(ServeDir::new(&server.static_dir))
        .with_state(state)
        // CORS
        .layer(CorsLayer::permissive())
        // Tracing
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        // Body limit (upload)
        .layer(DefaultBodyLimit::max(server.max_upload_bytes))
}
