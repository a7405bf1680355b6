use std::sync::Arc;

use crate::config::Config;
use crate::extraction::{TesseractOcr, TextExtractor};
use crate::model::ModelProvider;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds only immutable configuration and the lazily-built model backend;
/// analyses share no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub extractor: TextExtractor,
    pub models: Arc<ModelProvider>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let extractor = TextExtractor::new(TesseractOcr::new(config.tesseract_cmd.clone()));
        let models = Arc::new(ModelProvider::from_config(&config));
        Self {
            config,
            extractor,
            models,
        }
    }
}
