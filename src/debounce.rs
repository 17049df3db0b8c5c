//! Caller-side debounce for live re-classification while the user types.
//!
//! Every `push` restarts the delay; `on_settled` runs once with the latest text
//! after the input stayed unchanged for `delay`. Dropping the [`Debouncer`]
//! cancels whatever is pending. The classifier itself knows nothing about this.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::classify::{classify, ClassificationResult};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct Debouncer {
    tx: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl Debouncer {
    /// Spawn the timer task on the current tokio runtime.
    pub fn spawn<F>(delay: Duration, mut on_settled: F) -> Self
    where
        F: FnMut(String) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let task = tokio::spawn(async move {
            while let Some(mut latest) = rx.recv().await {
                loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(text) => latest = text,
                            // sender gone: drop the pending input
                            None => return,
                        },
                        _ = tokio::time::sleep(delay) => {
                            on_settled(latest);
                            break;
                        }
                    }
                }
            }
        });

        Self { tx, task }
    }

    /// Submit new input. Returns false once the timer task has stopped.
    pub fn push(&self, text: impl Into<String>) -> bool {
        self.tx.send(text.into()).is_ok()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Debouncer that classifies settled, non-blank input and hands the result to `sink`.
/// Blank input yields `None` (the result card is cleared, nothing is classified).
pub fn create_mode_debouncer<F>(delay: Duration, mut sink: F) -> Debouncer
where
    F: FnMut(Option<ClassificationResult>) + Send + 'static,
{
    Debouncer::spawn(delay, move |text| {
        if text.trim().is_empty() {
            sink(None);
            return;
        }
        let result = classify(&text);
        debug!(target: "create_mode", emotion = %result.emotion, "debounced classification");
        sink(Some(result));
    })
}
