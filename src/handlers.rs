use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};
use tracing::{error, info, info_span, warn, Instrument};

use crate::error::ProxyError;
use crate::languages::{Language, LANGUAGES};
use crate::state::AppState;
use crate::translate::{TranslateRequest, TranslateResponse};

/// `POST /translate`: validate, forward once, reshape.
pub async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ProxyError> {
    let span = info_span!("translate", request_id = %state.generate_request_id());

    async move {
        let Json(request) = payload.map_err(|rejection| {
            warn!("Rejected request body: {}", rejection.body_text());
            ProxyError::InvalidBody
        })?;
        info!(
            q = ?request.q,
            source = ?request.source,
            target = ?request.target,
            format = ?request.format,
            "Request body received"
        );

        let upstream = request.validate().map_err(|e| {
            warn!("{}", e);
            e
        })?;

        match state.translator.translate(&upstream).await {
            Ok(translated_text) => {
                info!("Translated text: {}", translated_text);
                Ok(Json(TranslateResponse { translated_text }))
            }
            Err(e) => {
                match &e {
                    ProxyError::Transport(source) => error!("Upstream call failed: {}", source),
                    other => error!("Translation failed: {}", other),
                }
                Err(e)
            }
        }
    }
    .instrument(span)
    .await
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "upstream_configured": state.translator.is_configured()
    }))
}

pub async fn list_languages() -> Json<&'static [Language]> {
    Json(LANGUAGES)
}
