//! Model-backed suggestion generation with rule-based fallback.
//!
//! A `SuggestionModel` turns a prompt into raw text. This module builds the
//! prompt, pulls the JSON object out of whatever the model returns, repairs it
//! into a complete `SuggestionRecord`, and falls back to the rule-based
//! generator on any failure. The model is never retried here.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use crate::llm_client::LlmError;
use crate::model::prompts::build_suggestion_prompt;
use crate::suggestions::{generate, SuggestionRecord};

pub mod prompts;
pub mod provider;

pub use provider::ModelProvider;

/// A generative backend that answers a prompt with free text.
///
/// Implemented by `LlmClient`; tests substitute canned implementations.
#[async_trait]
pub trait SuggestionModel: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    async fn invoke(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Asks the model for suggestions, falling back to `generate` on any failure.
pub async fn generate_with_model(
    model: &dyn SuggestionModel,
    resume_text: &str,
    job_description: &str,
) -> SuggestionRecord {
    let prompt = build_suggestion_prompt(resume_text, job_description);
    let result = model.invoke(&prompt).await;
    finish(model.name(), result, resume_text, job_description)
}

/// Same as `generate_with_model`, treating a call slower than `timeout` as a failure.
pub async fn generate_with_timeout(
    model: &dyn SuggestionModel,
    resume_text: &str,
    job_description: &str,
    timeout: Duration,
) -> SuggestionRecord {
    let prompt = build_suggestion_prompt(resume_text, job_description);
    let result = match tokio::time::timeout(timeout, model.invoke(&prompt)).await {
        Ok(result) => result,
        Err(_) => Err(LlmError::Timeout(timeout.as_secs())),
    };
    finish(model.name(), result, resume_text, job_description)
}

fn finish(
    model_name: &str,
    result: Result<String, LlmError>,
    resume_text: &str,
    job_description: &str,
) -> SuggestionRecord {
    match result.and_then(|raw| parse_model_output(&raw)) {
        Ok(record) => {
            info!("Suggestions generated by model {model_name}");
            record
        }
        Err(e) => {
            warn!("Model {model_name} failed ({e}); using rule-based generator");
            generate(resume_text, job_description)
        }
    }
}

/// Parses raw model text into a repaired record.
pub fn parse_model_output(raw: &str) -> Result<SuggestionRecord, LlmError> {
    let json_text = extract_json_object(raw.trim());
    let value: Value = serde_json::from_str(json_text)?;
    SuggestionRecord::from_model_value(value).ok_or(LlmError::NotAnObject)
}

/// Slices from the first `{` to the last `}`, dropping commentary around the
/// object. Returns the input unchanged when there is no such pair.
pub fn extract_json_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestions::record::PLACEHOLDER;

    const RESUME: &str = "Experienced Python developer, 5 years experience, built internal tools";
    const JD: &str = "Looking for Python, AWS, Docker, Kubernetes engineer with CI/CD experience";

    struct CannedModel(&'static str);

    #[async_trait]
    impl SuggestionModel for CannedModel {
        fn name(&self) -> &str {
            "canned"
        }

        async fn invoke(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl SuggestionModel for FailingModel {
        fn name(&self) -> &str {
            "failing"
        }

        async fn invoke(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            })
        }
    }

    struct SlowModel;

    #[async_trait]
    impl SuggestionModel for SlowModel {
        fn name(&self) -> &str {
            "slow"
        }

        async fn invoke(&self, _prompt: &str) -> Result<String, LlmError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(r#"{"missing_skills": ["never"]}"#.to_string())
        }
    }

    #[test]
    fn test_extract_json_object_strips_commentary() {
        let raw = "Sure! Here you go:\n{\"a\": {\"b\": 1}}\nHope that helps.";
        assert_eq!(extract_json_object(raw), "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn test_extract_json_object_without_braces_returns_input() {
        assert_eq!(extract_json_object("no json here"), "no json here");
        assert_eq!(extract_json_object("} backwards {"), "} backwards {");
    }

    #[tokio::test]
    async fn test_failing_model_falls_back_to_rules() {
        let record = generate_with_model(&FailingModel, RESUME, JD).await;
        assert_eq!(record, generate(RESUME, JD));
    }

    #[tokio::test]
    async fn test_malformed_json_falls_back_to_rules() {
        let model = CannedModel(r#"{"missing_skills": ["terraform",]"#);
        let record = generate_with_model(&model, RESUME, JD).await;
        assert_eq!(record.to_json(), generate(RESUME, JD).to_json());
    }

    #[tokio::test]
    async fn test_non_object_json_falls_back_to_rules() {
        let model = CannedModel(r#"["terraform", "helm"]"#);
        let record = generate_with_model(&model, RESUME, JD).await;
        assert_eq!(record, generate(RESUME, JD));
    }

    #[tokio::test]
    async fn test_model_output_is_repaired() {
        let model = CannedModel(
            "Here is the analysis:\n```json\n{\"missing_skills\": [\"terraform\"], \
             \"keywords_to_add\": \"observability\", \"score\": 80}\n```",
        );
        let record = generate_with_model(&model, RESUME, JD).await;

        assert_eq!(record.missing_skills, vec!["terraform"]);
        assert_eq!(record.keywords_to_add, vec!["observability"]);
        assert_eq!(record.ats_optimization, vec![PLACEHOLDER]);
        for (key, values) in record.sections() {
            assert!(!values.is_empty(), "{key} empty");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back_to_rules() {
        let record =
            generate_with_timeout(&SlowModel, RESUME, JD, Duration::from_secs(5)).await;
        assert_eq!(record, generate(RESUME, JD));
    }

    #[tokio::test]
    async fn test_fast_model_within_timeout_is_used() {
        let model = CannedModel(r#"{"missing_skills": ["terraform"]}"#);
        let record = generate_with_timeout(&model, RESUME, JD, Duration::from_secs(5)).await;
        assert_eq!(record.missing_skills, vec!["terraform"]);
    }
}
