use super::{DbPool, DocumentRecord};
use crate::utils::error::ApiError;
use async_trait::async_trait;
use tracing::{debug, info};

/// Persistence for analyzed documents. Insert and read only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one row; id and created_at are assigned by the store.
    async fn save(&self, document: &str, analysis: &str) -> Result<DocumentRecord, ApiError>;

    async fn fetch_all(&self) -> Result<Vec<DocumentRecord>, ApiError>;

    async fn fetch_by_id(&self, id: i32) -> Result<Option<DocumentRecord>, ApiError>;

    /// Rows whose document or analysis contains `keyword` (case-sensitive).
    async fn search_by_keyword(&self, keyword: &str) -> Result<Vec<DocumentRecord>, ApiError>;

    async fn ping(&self) -> Result<(), ApiError>;
}

pub struct Repository {
    pub pool: DbPool,
}

impl Repository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Idempotent schema bootstrap, run on every start
    pub async fn init_schema(&self) -> Result<(), ApiError> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS legal_documents (
                id SERIAL PRIMARY KEY,
                document TEXT NOT NULL,
                analysis TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )"#,
        )
        .execute(self.pool.get_pool())
        .await?;

        info!("Schema ready: legal_documents");
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for Repository {
    async fn save(&self, document: &str, analysis: &str) -> Result<DocumentRecord, ApiError> {
        let record = sqlx::query_as::<_, DocumentRecord>(
            r#"INSERT INTO legal_documents (document, analysis)
               VALUES ($1, $2)
               RETURNING id, document, analysis, created_at"#,
        )
        .bind(document)
        .bind(analysis)
        .fetch_one(self.pool.get_pool())
        .await?;

        debug!("Saved document {} ({} chars)", record.id, document.len());
        Ok(record)
    }

    async fn fetch_all(&self) -> Result<Vec<DocumentRecord>, ApiError> {
        let records = sqlx::query_as::<_, DocumentRecord>(
            r#"SELECT id, document, analysis, created_at
               FROM legal_documents
               ORDER BY id"#,
        )
        .fetch_all(self.pool.get_pool())
        .await?;

        Ok(records)
    }

    async fn fetch_by_id(&self, id: i32) -> Result<Option<DocumentRecord>, ApiError> {
        let record = sqlx::query_as::<_, DocumentRecord>(
            r#"SELECT id, document, analysis, created_at
               FROM legal_documents
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(self.pool.get_pool())
        .await?;

        Ok(record)
    }

    async fn search_by_keyword(&self, keyword: &str) -> Result<Vec<DocumentRecord>, ApiError> {
        // strpos keeps '%' and '_' literal and compares case-sensitively
        let records = sqlx::query_as::<_, DocumentRecord>(
            r#"SELECT id, document, analysis, created_at
               FROM legal_documents
               WHERE strpos(document, $1) > 0 OR strpos(analysis, $1) > 0
               ORDER BY id"#,
        )
        .bind(keyword)
        .fetch_all(self.pool.get_pool())
        .await?;

        debug!("Keyword {:?} matched {} documents", keyword, records.len());
        Ok(records)
    }

    async fn ping(&self) -> Result<(), ApiError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.get_pool())
            .await?;
        Ok(())
    }
}
