use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, warn};

use super::interface::{extract_translated_text, TranslationProvider, UpstreamRequest};
use crate::config::UpstreamConfig;
use crate::error::ProxyError;

/// Client for the Deep Translate API on RapidAPI.
#[derive(Debug, Clone)]
pub struct DeepTranslateClient {
    client: Client,
    url: String,
    host: String,
    api_key: Option<String>,
}

impl DeepTranslateClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self {
            client: Client::new(),
            url: config.url.clone(),
            host: config.host.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl TranslationProvider for DeepTranslateClient {
    async fn translate(&self, request: &UpstreamRequest) -> Result<String, ProxyError> {
        debug!("Forwarding translation {} -> {} to {}", request.source, request.target, self.url);

        let response = self
            .client
            .post(&self.url)
            .header("x-rapidapi-host", &self.host)
            .header("x-rapidapi-key", self.api_key.as_deref().unwrap_or_default())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream responded with status {}", status);
        }

        let payload: Value = response.json().await?;

        match extract_translated_text(&payload) {
            Some(text) => Ok(text),
            None => {
                error!("Unexpected response format: {}", payload);
                Err(ProxyError::UpstreamShape)
            }
        }
    }

    fn is_configured(&self) -> bool {
        self.api_key.as_deref().map_or(false, |k| !k.trim().is_empty())
    }
}
