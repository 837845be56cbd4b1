use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ===== REQUEST MODELS =====

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub document: String,
}

// ===== RESPONSE MODELS =====

/// Model output for one clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub heading: String,
    pub body: String,
    pub analysis: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub document_id: i32,
    pub created_at: DateTime<Utc>,
    pub clause_count: usize,
    pub clauses: Vec<AnalysisResult>,
}

/// Serialize the ordered results into the single string stored with the document.
pub fn serialize_results(results: &[AnalysisResult]) -> serde_json::Result<String> {
    serde_json::to_string(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_results_serialize_to_empty_array() {
        assert_eq!(serialize_results(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_serialized_results_keep_order() {
        let results = vec![
            AnalysisResult {
                heading: "Section 1:".into(),
                body: "Payment terms apply.".into(),
                analysis: "Standard payment clause.".into(),
            },
            AnalysisResult {
                heading: "Section 2:".into(),
                body: "Termination on notice.".into(),
                analysis: "Either party may terminate.".into(),
            },
        ];

        let stored = serialize_results(&results).unwrap();
        assert!(stored.find("Section 1:").unwrap() < stored.find("Section 2:").unwrap());

        let parsed: Vec<AnalysisResult> = serde_json::from_str(&stored).unwrap();
        assert_eq!(parsed, results);
    }
}
