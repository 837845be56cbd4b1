use crate::config::PromptsConfig;
use crate::models::chat::ChatMessage;
use crate::services::llm_service::LlmProvider;
use crate::utils::error::ApiError;
use std::sync::Arc;
use tracing::debug;

/// Prompt construction for the two model calls the analyzer makes.
pub struct AnalysisService {
    llm: Arc<dyn LlmProvider>,
    prompts: PromptsConfig,
}

impl AnalysisService {
    pub fn new(llm: Arc<dyn LlmProvider>, prompts: PromptsConfig) -> Self {
        Self { llm, prompts }
    }

    pub fn clause_messages(&self, clause_body: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.prompts.analysis_system_prompt.as_str()),
            ChatMessage::user(format!("Analyze this legal document:\n\n{}", clause_body)),
        ]
    }

    pub fn question_messages(&self, document: &str, question: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.prompts.chat_system_prompt.as_str()),
            ChatMessage::user(format!(
                "Based on the following document, {}\n\nDocument:\n{}",
                question, document
            )),
        ]
    }

    /// Reply is returned verbatim.
    pub async fn analyze_clause(&self, clause_body: &str) -> Result<String, ApiError> {
        debug!("Analyzing clause ({} chars)", clause_body.len());
        self.llm.complete(&self.clause_messages(clause_body)).await
    }

    pub async fn answer_question(&self, document: &str, question: &str) -> Result<String, ApiError> {
        debug!(
            "Answering question over document ({} chars): {}",
            document.len(),
            question
        );
        self.llm
            .complete(&self.question_messages(document, question))
            .await
    }
}
