// src/lib.rs
// Public library surface for the binary, integration tests and front-end hosts.

pub mod classify;
pub mod emotion;

// Create Mode helpers around the classifier (caller-side concerns)
pub mod debounce;
pub mod highlight;
pub mod prompts;
pub mod saved;

// Game flow
pub mod session;

// Service plumbing
pub mod api;
pub mod config;
pub mod metrics;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::classify::{classify, ClassificationResult, EmotionClassifier};
pub use crate::emotion::Emotion;
