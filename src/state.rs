use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::translate::{DeepTranslateClient, TranslationProvider};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: Arc<dyn TranslationProvider>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let translator = Arc::new(DeepTranslateClient::new(&config.upstream));
        Self::with_provider(config, translator)
    }

    pub fn with_provider(config: Config, translator: Arc<dyn TranslationProvider>) -> Self {
        Self {
            config: Arc::new(config),
            translator,
        }
    }

    pub fn generate_request_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
