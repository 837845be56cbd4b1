pub mod analysis_service;
pub mod document_service;
pub mod llm_service;

pub use analysis_service::AnalysisService;
pub use document_service::{AnalyzedDocument, DocumentService};
pub use llm_service::{LlmProvider, LlmService};
