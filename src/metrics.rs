use axum::{routing::get, Router};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::classify::ClassificationResult;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder. Fails if a recorder is already installed.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| anyhow::anyhow!("prometheus: install recorder: {e}"))?;
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// Count one classification. No-op when no recorder is installed (tests, library use).
pub fn record_classification(result: &ClassificationResult) {
    counter!("emotion_classifications_total", "emotion" => result.emotion.as_str()).increment(1);
    if result.has_negation {
        counter!("emotion_negation_flips_total").increment(1);
    }
    if result.is_contextual {
        counter!("emotion_contextual_guesses_total").increment(1);
    }
    histogram!("emotion_confidence").record(result.confidence as f64);
}

pub fn record_rejected_input(reason: &'static str) {
    counter!("emotion_rejected_inputs_total", "reason" => reason).increment(1);
}
