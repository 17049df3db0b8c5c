//! HTTP surface consumed by the game front end.
//!
//! - `GET  /health`
//! - `POST /classify`  `{ "text": "..." }` → classification + highlight spans
//! - `GET  /saved`     saved sentences, most recent first
//! - `POST /saved`     `{ "text": "..." }` → classify server-side and keep
//! - `GET  /prompts`   sample sentences (`?limit=n` for the first n)
//! - `GET  /emotions`  label/emoji/color per emotion
//! - `GET  /settings`  input cap and debounce delay the front end should apply

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::classify::{ClassificationResult, EmotionClassifier, EmotionDisplay};
use crate::config::AppConfig;
use crate::emotion::Emotion;
use crate::highlight::{render_highlighted, result_spans, KeywordSpan};
use crate::metrics::{record_classification, record_rejected_input};
use crate::prompts::sample_prompts;
use crate::saved::{SaveError, SavedSentence, SavedSentences};
use crate::telemetry::dev_log_classification;

const NEUTRAL_LABEL: &str = "Neutral";
const NEUTRAL_EMOJI: &str = "🤔";

#[derive(Clone)]
pub struct AppState {
    classifier: EmotionClassifier<'static>,
    saved: Arc<SavedSentences>,
    max_input_chars: usize,
    debounce_ms: u64,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Self {
        Self {
            classifier: EmotionClassifier::new(),
            saved: Arc::new(SavedSentences::with_capacity(cfg.create_mode.saved_capacity)),
            max_input_chars: cfg.create_mode.max_input_chars,
            debounce_ms: cfg.debounce().as_millis() as u64,
        }
    }

    /// Enforce the caller contract (at most `max_input_chars` characters).
    fn check_len<'t>(&self, text: &'t str) -> Result<&'t str, ApiError> {
        let len = text.chars().count();
        if len > self.max_input_chars {
            record_rejected_input("too_long");
            return Err(ApiError::InputTooLong {
                len,
                max: self.max_input_chars,
            });
        }
        Ok(text)
    }

    /// Label and emoji from the lexicon; neutral has no lexicon entry.
    fn display(&self, emotion: Emotion) -> (String, String) {
        match self.classifier.lexicon().get(emotion) {
            Some(l) => (l.display.label.clone(), l.display.emoji.clone()),
            None => (NEUTRAL_LABEL.to_string(), NEUTRAL_EMOJI.to_string()),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/classify", post(classify_text))
        .route("/saved", get(list_saved).post(save_sentence))
        .route("/prompts", get(prompts))
        .route("/emotions", get(emotions))
        .route("/settings", get(settings))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Body missing, not JSON, or `text` is not a string.
    #[error("invalid input: {message}")]
    InvalidInput { status: StatusCode, message: String },
    #[error("sentence is too long: {len} characters (max {max})")]
    InputTooLong { len: usize, max: usize },
    #[error(transparent)]
    Save(#[from] SaveError),
}

impl From<JsonRejection> for ApiError {
    fn from(rej: JsonRejection) -> Self {
        record_rejected_input("invalid_body");
        ApiError::InvalidInput {
            status: rej.status(),
            message: rej.body_text(),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput { status, .. } => *status,
            ApiError::InputTooLong { .. } | ApiError::Save(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(%status, error = %self, "request rejected");
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Deserialize)]
struct TextReq {
    text: String,
}

#[derive(Serialize)]
struct ClassifyResp {
    #[serde(flatten)]
    result: ClassificationResult,
    label: String,
    emoji: String,
    /// Byte offsets of `keywords` in the submitted text.
    spans: Vec<KeywordSpan>,
    /// Escaped HTML with `<mark>` around each span.
    highlighted: String,
}

async fn classify_text(
    State(state): State<AppState>,
    payload: Result<Json<TextReq>, JsonRejection>,
) -> Result<Json<ClassifyResp>, ApiError> {
    let Json(body) = payload?;
    let text = state.check_len(&body.text)?;

    let result = state.classifier.classify(text);
    dev_log_classification(text, &result);
    record_classification(&result);

    let spans = result_spans(text, &result);
    let highlighted = render_highlighted(text, &spans, result.emotion);
    let (label, emoji) = state.display(result.emotion);

    Ok(Json(ClassifyResp {
        result,
        label,
        emoji,
        spans,
        highlighted,
    }))
}

async fn list_saved(State(state): State<AppState>) -> Json<Vec<SavedSentence>> {
    Json(state.saved.snapshot())
}

async fn save_sentence(
    State(state): State<AppState>,
    payload: Result<Json<TextReq>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedSentence>), ApiError> {
    let Json(body) = payload?;
    let text = state.check_len(&body.text)?;

    let result = state.classifier.classify(text);
    let saved = state.saved.save(text, &result)?;
    Ok((StatusCode::CREATED, Json(saved)))
}

#[derive(Deserialize)]
struct PromptsQuery {
    limit: Option<usize>,
}

async fn prompts(Query(q): Query<PromptsQuery>) -> Json<Vec<&'static str>> {
    Json(sample_prompts(q.limit.unwrap_or(usize::MAX)).to_vec())
}

async fn emotions(State(state): State<AppState>) -> Json<Vec<EmotionDisplay>> {
    Json(state.classifier.lexicon().display())
}

#[derive(Serialize)]
struct SettingsResp {
    max_input_chars: usize,
    debounce_ms: u64,
    saved_capacity: usize,
}

async fn settings(State(state): State<AppState>) -> Json<SettingsResp> {
    Json(SettingsResp {
        max_input_chars: state.max_input_chars,
        debounce_ms: state.debounce_ms,
        saved_capacity: state.saved.capacity(),
    })
}

/// Resolve once `signal` reports shutdown. If the signal source itself fails,
/// log it and keep serving instead of exiting right away.
pub async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
