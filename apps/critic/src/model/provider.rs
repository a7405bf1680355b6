//! Lazily-initialized, process-wide holder for the optional model backend.
//!
//! The backend is built on first use and reused by every later request.
//! `teardown` releases it; dropping the provider does the same.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::model::{generate_with_timeout, SuggestionModel};
use crate::suggestions::{generate, SuggestionRecord};

#[derive(Debug, Clone)]
struct ModelSettings {
    api_key: String,
    model: String,
}

pub struct ModelProvider {
    settings: Option<ModelSettings>,
    timeout: Duration,
    model: OnceCell<Option<Arc<dyn SuggestionModel>>>,
}

impl ModelProvider {
    /// Provider for the configured backend. Without an API key every request
    /// uses the rule-based generator.
    pub fn from_config(config: &Config) -> Self {
        let settings = config.anthropic_api_key.clone().map(|api_key| ModelSettings {
            api_key,
            model: config.llm_model.clone(),
        });
        Self {
            settings,
            timeout: config.model_timeout(),
            model: OnceCell::new(),
        }
    }

    /// Provider that never offers a model.
    pub fn disabled() -> Self {
        Self {
            settings: None,
            timeout: Duration::ZERO,
            model: OnceCell::new_with(Some(None)),
        }
    }

    /// Provider pre-initialized with an existing backend.
    pub fn with_model(model: Arc<dyn SuggestionModel>, timeout: Duration) -> Self {
        Self {
            settings: None,
            timeout,
            model: OnceCell::new_with(Some(Some(model))),
        }
    }

    /// Returns the backend, building it on the first call.
    pub async fn get(&self) -> Option<Arc<dyn SuggestionModel>> {
        self.model
            .get_or_init(|| async { self.load() })
            .await
            .clone()
    }

    fn load(&self) -> Option<Arc<dyn SuggestionModel>> {
        let Some(settings) = &self.settings else {
            warn!("No ANTHROPIC_API_KEY configured; model-backed suggestions unavailable");
            return None;
        };
        match LlmClient::new(settings.api_key.clone(), settings.model.clone()) {
            Ok(client) => {
                info!("LLM client initialized (model: {})", client.model());
                Some(Arc::new(client))
            }
            Err(e) => {
                warn!("Model load failed, falling back to rule-based generator: {e}");
                None
            }
        }
    }

    /// Produces suggestions, through the model when requested and available.
    pub async fn suggest(
        &self,
        resume_text: &str,
        job_description: &str,
        use_model: bool,
    ) -> SuggestionRecord {
        if use_model {
            if let Some(model) = self.get().await {
                return generate_with_timeout(
                    model.as_ref(),
                    resume_text,
                    job_description,
                    self.timeout,
                )
                .await;
            }
        }
        generate(resume_text, job_description)
    }

    /// Releases the backend. A later `get` initializes it again.
    pub fn teardown(&mut self) {
        if let Some(Some(model)) = self.model.take() {
            info!("Releasing model backend {}", model.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingModel {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SuggestionModel for CountingModel {
        fn name(&self) -> &str {
            "counting"
        }

        async fn invoke(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(r#"{"missing_skills": ["terraform"]}"#.to_string())
        }
    }

    #[tokio::test]
    async fn test_disabled_provider_uses_rules() {
        let provider = ModelProvider::disabled();
        assert!(provider.get().await.is_none());
        let record = provider.suggest("python", "python aws", true).await;
        assert_eq!(record, generate("python", "python aws"));
    }

    #[tokio::test]
    async fn test_unconfigured_provider_initializes_to_none() {
        let provider = ModelProvider::from_config(&Config::default());
        assert!(provider.get().await.is_none());
    }

    #[tokio::test]
    async fn test_model_only_used_when_requested() {
        let model = Arc::new(CountingModel {
            calls: AtomicUsize::new(0),
        });
        let provider = ModelProvider::with_model(model.clone(), Duration::from_secs(5));

        let rules = provider.suggest("python", "python aws", false).await;
        assert_eq!(rules, generate("python", "python aws"));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);

        let modeled = provider.suggest("python", "python aws", true).await;
        assert_eq!(modeled.missing_skills, vec!["terraform"]);
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_teardown_releases_backend() {
        let model = Arc::new(CountingModel {
            calls: AtomicUsize::new(0),
        });
        let mut provider = ModelProvider::with_model(model.clone(), Duration::from_secs(5));
        assert_eq!(Arc::strong_count(&model), 2);

        provider.teardown();
        assert_eq!(Arc::strong_count(&model), 1);
        // Re-initialization goes through settings, which are absent here.
        assert!(provider.get().await.is_none());
    }
}
