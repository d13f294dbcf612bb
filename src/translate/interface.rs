use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProxyError;

/// Body accepted by `POST /translate`.
///
/// Every field is optional at the serde level so a missing field surfaces as
/// [`ProxyError::MissingFields`] instead of a deserialization rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    /// Accepted for compatibility, never forwarded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl TranslateRequest {
    pub fn new(q: &str, source: &str, target: &str) -> Self {
        Self {
            q: Some(q.to_string()),
            source: Some(source.to_string()),
            target: Some(target.to_string()),
            format: Some("text".to_string()),
        }
    }

    /// Checks that `q`, `source` and `target` are all present and non-empty.
    pub fn validate(&self) -> Result<UpstreamRequest, ProxyError> {
        fn present(field: &Option<String>) -> Option<&str> {
            field.as_deref().filter(|v| !v.is_empty())
        }

        match (present(&self.q), present(&self.source), present(&self.target)) {
            (Some(q), Some(source), Some(target)) => Ok(UpstreamRequest {
                q: q.to_string(),
                source: source.to_string(),
                target: target.to_string(),
            }),
            _ => Err(ProxyError::MissingFields),
        }
    }
}

/// Exactly what is forwarded upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamRequest {
    pub q: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateResponse {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

/// Upstream translation provider.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Forward one request and return the translated text. Called exactly once
    /// per client request.
    async fn translate(&self, request: &UpstreamRequest) -> Result<String, ProxyError>;

    /// Whether a credential is available.
    fn is_configured(&self) -> bool;
}

/// Pulls `data.translations.translatedText` out of a provider response. Some
/// deployments return `translations` as an array, in which case the first
/// entry is used.
pub fn extract_translated_text(payload: &Value) -> Option<String> {
    let translations = payload.pointer("/data/translations")?;
    let entry = match translations {
        Value::Array(items) => items.first()?,
        other => other,
    };
    entry
        .get("translatedText")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
