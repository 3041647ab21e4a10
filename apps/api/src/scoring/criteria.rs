//! Criteria extraction: job description text in, ordered criterion names out.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::ModelClient;
use crate::scoring::prompts::{criteria_prompt, CRITERIA_SYSTEM};

/// Ordered evaluation dimensions. Serializes as `{"criteria": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaSet {
    pub criteria: Vec<String>,
}

pub async fn extract_criteria(
    text: &str,
    model: &dyn ModelClient,
) -> Result<CriteriaSet, AppError> {
    let reply = model
        .complete_json(CRITERIA_SYSTEM, &criteria_prompt(text))
        .await
        .map_err(|e| AppError::ModelProcessing(format!("Failed to extract criteria: {e}")))?;

    let parsed = parse_criteria(&reply)?;
    info!(count = parsed.criteria.len(), "Extracted criteria");
    Ok(parsed)
}

fn parse_criteria(reply: &str) -> Result<CriteriaSet, AppError> {
    let parsed: CriteriaSet = serde_json::from_str(reply)
        .map_err(|e| AppError::ModelProcessing(format!("Failed to extract criteria: {e}")))?;

    Ok(CriteriaSet {
        criteria: parsed
            .criteria
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::testing::StubModel;

    #[tokio::test]
    async fn test_extracts_criteria_list() {
        let model = StubModel::replying(r#"{"criteria": ["A", "B"]}"#);
        let set = extract_criteria("job description", &model).await.unwrap();
        assert_eq!(set.criteria, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_prompt_carries_job_description() {
        let model = StubModel::replying(r#"{"criteria": []}"#);
        extract_criteria("Staff Rust Engineer in Oslo", &model)
            .await
            .unwrap();

        let (system, prompt) = model.last_call().unwrap();
        assert_eq!(system, CRITERIA_SYSTEM);
        assert!(prompt.contains("Staff Rust Engineer in Oslo"));
    }

    #[test]
    fn test_blank_entries_are_dropped_and_order_kept() {
        let set = parse_criteria(r#"{"criteria": [" Rust ", "", "Kubernetes", "  "]}"#).unwrap();
        assert_eq!(set.criteria, vec!["Rust", "Kubernetes"]);
    }

    #[test]
    fn test_missing_key_is_model_error() {
        let err = parse_criteria(r#"{"requirements": ["Rust"]}"#).unwrap_err();
        assert!(matches!(err, AppError::ModelProcessing(_)));
    }

    #[tokio::test]
    async fn test_non_json_reply_is_model_error() {
        let model = StubModel::replying("Sure! Here are the criteria: Rust, Go");
        let err = extract_criteria("jd", &model).await.unwrap_err();
        assert!(matches!(err, AppError::ModelProcessing(ref m) if m.starts_with("Failed to extract criteria")));
    }

    #[tokio::test]
    async fn test_transport_failure_is_model_error() {
        let model = StubModel::failing();
        let err = extract_criteria("jd", &model).await.unwrap_err();
        assert!(matches!(err, AppError::ModelProcessing(ref m) if m.contains("empty content")));
    }
}
