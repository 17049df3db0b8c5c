// src/telemetry.rs
//! Tracing setup and privacy-safe classification logging.
//!
//! Sentences typed by children are never logged. Dev logs identify a sentence
//! only by a short SHA-256 prefix.

use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::classify::ClassificationResult;

pub const ENV_DEV_LOG: &str = "EMOTION_DEV_LOG";
pub const ENV_APP_ENV: &str = "APP_ENV";

const DEFAULT_FILTER: &str = "emotion_detective=info,tower_http=warn,warn";

/// Install the global subscriber (compact fmt + `RUST_LOG` filter).
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

/// Dev logging gate: EMOTION_DEV_LOG=1 AND dev env (debug build or APP_ENV in {local,development,dev}).
pub fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var(ENV_APP_ENV)
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// 12 hex chars of SHA-256; stable id for a sentence without revealing it.
pub fn anon_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Log one classification outcome (dev only). Keywords are lexicon words, not user text.
pub fn dev_log_classification(text: &str, result: &ClassificationResult) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(text);
    let keywords: Vec<&str> = result.keywords.iter().take(5).map(String::as_str).collect();
    info!(
        target: "classify",
        %id,
        emotion = %result.emotion,
        confidence = result.confidence,
        negated = result.has_negation,
        contextual = result.is_contextual,
        chars = text.chars().count(),
        keywords = ?keywords,
        "classified"
    );
}
