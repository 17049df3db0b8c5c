//! Emotion Detective service: binary entrypoint.
//! Loads config, installs tracing and metrics, and serves the JSON API.

use anyhow::Context;
use tracing::info;

use emotion_detective::api::{self, AppState};
use emotion_detective::config::AppConfig;
use emotion_detective::metrics::Metrics;
use emotion_detective::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    telemetry::init_tracing();

    let cfg = AppConfig::load()?;
    let metrics = Metrics::init()?;

    // Force the lexicon to compile before the first request.
    let emotions = emotion_detective::classify::lexicon().display().len();

    let state = AppState::new(&cfg);
    let app = api::router(state).merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(&cfg.server.bind_addr)
        .await
        .with_context(|| format!("binding {}", cfg.server.bind_addr))?;
    info!(
        addr = %cfg.server.bind_addr,
        emotions,
        max_input_chars = cfg.create_mode.max_input_chars,
        "emotion detective listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    api::shutdown_on(tokio::signal::ctrl_c()).await;
}
