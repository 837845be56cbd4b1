use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use legal_doc_analyzer::config::Settings;
use legal_doc_analyzer::database::{DbPool, DocumentStore, Repository};
use legal_doc_analyzer::router::build_router;
use legal_doc_analyzer::services::{AnalysisService, DocumentService, LlmProvider, LlmService};
use legal_doc_analyzer::state::AppState;
use legal_doc_analyzer::utils::logger::init_logger;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let _log_guard = init_logger()?;

    info!("🚀 Starting Legal Document Analyzer...");

    // Load configuration (fails fast on missing keys)
    let settings = Settings::load()?;
    info!("✅ Configuration loaded (model: {})", settings.llm.model);

    // Initialize database pool
    let db_pool = DbPool::new(&settings.database).await?;
    info!(
        "✅ Database connection established ({}:{}/{})",
        settings.database.host, settings.database.port, settings.database.name
    );

    let repository = Repository::new(db_pool.clone());
    repository.init_schema().await?;
    let store: Arc<dyn DocumentStore> = Arc::new(repository);

    // Initialize services
    let llm: Arc<dyn LlmProvider> = Arc::new(LlmService::new(settings.llm.clone())?);
    let analysis_service = Arc::new(AnalysisService::new(llm, settings.prompts.clone()));
    let document_service = Arc::new(DocumentService::new(store.clone(), analysis_service));

    let app = build_router(
        AppState {
            store,
            document_service,
        },
        &settings.server,
    );

    // Host may be an IP or a hostname such as "localhost"
    let listener = bind_listener(&settings.server.host, settings.server.port).await?;
    info!("🎯 Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;
    info!("👋 Database pool closed, bye");

    Ok(())
}

async fn bind_listener(host: &str, port: u16) -> Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind server.host={} server.port={}", host, port))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
