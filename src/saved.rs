//! Bounded, most-recent-first list of sentences the user kept in Create Mode.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::ClassificationResult;
use crate::emotion::Emotion;

pub const DEFAULT_SAVED_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSentence {
    pub id: u64,
    pub text: String,
    pub emotion: Emotion,
    pub confidence: f32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("sentence is empty")]
    EmptyText,
    #[error("no emotion detected; only sentences with a detected emotion can be saved")]
    NoEmotion,
}

#[derive(Debug)]
pub struct SavedSentences {
    inner: Mutex<VecDeque<SavedSentence>>,
    cap: usize,
    next_id: AtomicU64,
}

impl Default for SavedSentences {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SAVED_CAPACITY)
    }
}

impl SavedSentences {
    pub fn with_capacity(cap: usize) -> Self {
        let cap = cap.clamp(1, 1_000);
        Self {
            inner: Mutex::new(VecDeque::with_capacity(cap)),
            cap,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Store `text` with its classification at the front; the oldest entry
    /// falls off once capacity is exceeded.
    pub fn save(&self, text: &str, result: &ClassificationResult) -> Result<SavedSentence, SaveError> {
        self.save_at(text, result, Utc::now())
    }

    pub fn save_at(
        &self,
        text: &str,
        result: &ClassificationResult,
        at: DateTime<Utc>,
    ) -> Result<SavedSentence, SaveError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SaveError::EmptyText);
        }
        if result.emotion == Emotion::Neutral {
            return Err(SaveError::NoEmotion);
        }

        let entry = SavedSentence {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            text: text.to_string(),
            emotion: result.emotion,
            confidence: result.confidence,
            timestamp: at,
        };

        let mut v = self.inner.lock().expect("saved sentences mutex poisoned");
        v.push_front(entry.clone());
        v.truncate(self.cap);
        Ok(entry)
    }

    /// Most recent first.
    pub fn snapshot(&self) -> Vec<SavedSentence> {
        let v = self.inner.lock().expect("saved sentences mutex poisoned");
        v.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("saved sentences mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    #[test]
    fn keeps_most_recent_first_and_bounded() {
        let saved = SavedSentences::with_capacity(3);
        for i in 0..5 {
            let text = format!("I am happy {i}");
            saved.save(&text, &classify(&text)).unwrap();
        }
        let snap = saved.snapshot();
        assert_eq!(snap.len(), 3);
        assert_eq!(snap[0].text, "I am happy 4");
        assert_eq!(snap[2].text, "I am happy 2");
        assert!(snap[0].id > snap[1].id);
    }

    #[test]
    fn rejects_blank_and_neutral() {
        let saved = SavedSentences::default();
        assert_eq!(saved.save("   ", &classify("glad")), Err(SaveError::EmptyText));
        assert_eq!(
            saved.save("the table", &classify("the table")),
            Err(SaveError::NoEmotion)
        );
        assert!(saved.is_empty());
    }

    #[test]
    fn stores_trimmed_text_and_result_fields() {
        let saved = SavedSentences::default();
        let r = classify("so scared");
        let s = saved.save("  so scared  ", &r).unwrap();
        assert_eq!(s.text, "so scared");
        assert_eq!(s.emotion, Emotion::Fear);
        assert_eq!(s.confidence, r.confidence);
        assert_eq!(saved.capacity(), DEFAULT_SAVED_CAPACITY);
    }
}
