//! Fallback heuristics for sentences with no lexicon keyword.
//!
//! Rules run in order and the first hit wins:
//! 1. `!!!` anywhere: surprise when a `?` is also present (0.6), else happy (0.7)
//! 2. interrogative surprise phrases ("what?", "really?", ...) → surprise (0.6)
//! 3. topic words by substring ("spider" → fear, ...) → that emotion (0.5, contextual)
//!
//! Nothing fires → neutral, confidence 0, with coaching suggestions.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ClassificationResult;
use crate::emotion::Emotion;

pub const EXCITED_CONFIDENCE: f32 = 0.7;
pub const CONFUSED_CONFIDENCE: f32 = 0.6;
pub const INTERROGATIVE_CONFIDENCE: f32 = 0.6;
pub const CONTEXT_CONFIDENCE: f32 = 0.5;

/// Topic word → emotion, tested by substring in this order.
pub const CONTEXT_CLUES: [(&str, Emotion); 16] = [
    ("birthday", Emotion::Happy),
    ("party", Emotion::Happy),
    ("vacation", Emotion::Happy),
    ("test", Emotion::Fear),
    ("exam", Emotion::Fear),
    ("homework", Emotion::Sad),
    ("hospital", Emotion::Fear),
    ("doctor", Emotion::Fear),
    ("dentist", Emotion::Fear),
    ("thunder", Emotion::Fear),
    ("lightning", Emotion::Fear),
    ("spider", Emotion::Fear),
    ("snake", Emotion::Fear),
    ("moving", Emotion::Sad),
    ("goodbye", Emotion::Sad),
    ("funeral", Emotion::Sad),
];

/// The leading `\b` keeps words that merely end in a question word
/// ("somewhat?", "anyhow?") from reading as surprise.
static INTERROGATIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:what|how|why|really|seriously)\?").expect("interrogative regex")
});

static SENTENCE_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]").expect("punctuation regex"));

/// Try the fallback rules; `None` when none of them fires.
pub fn detect_subtle(normalized: &str) -> Option<ClassificationResult> {
    if normalized.contains("!!!") {
        return Some(if normalized.contains('?') {
            subtle(
                Emotion::Surprise,
                CONFUSED_CONFIDENCE,
                "Multiple exclamation marks with questions often show surprise or confusion!",
                vec!["!!!".into(), "?".into()],
            )
        } else {
            subtle(
                Emotion::Happy,
                EXCITED_CONFIDENCE,
                "Multiple exclamation marks usually show excitement or strong positive emotion!",
                vec!["!!!".into()],
            )
        });
    }

    let mut asked: Vec<String> = Vec::new();
    for m in INTERROGATIVE_RE.find_iter(normalized) {
        if !asked.iter().any(|a| a == m.as_str()) {
            asked.push(m.as_str().to_string());
        }
    }
    if !asked.is_empty() {
        return Some(subtle(
            Emotion::Surprise,
            INTERROGATIVE_CONFIDENCE,
            "Questions with surprise words like \"what?\" or \"really?\" often show amazement!",
            asked,
        ));
    }

    CONTEXT_CLUES
        .iter()
        .find(|(word, _)| normalized.contains(word))
        .map(|&(word, emotion)| {
            let mut r = subtle(
                emotion,
                CONTEXT_CONFIDENCE,
                &format!(
                    "The word \"{word}\" often relates to {emotion} emotions. Context clues help detect feelings!"
                ),
                vec![word.to_string()],
            );
            r.is_contextual = true;
            r
        })
}

/// Neutral result with coaching suggestions for `normalized`.
pub fn no_emotion(normalized: &str) -> ClassificationResult {
    ClassificationResult {
        suggestions: suggestions(normalized),
        ..ClassificationResult::neutral()
    }
}

/// Coaching tips shown when nothing was detected. Advisory only.
pub fn suggestions(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    if text.chars().count() < 10 {
        out.push("Try writing a longer sentence with more details!".to_string());
    }
    if !SENTENCE_PUNCT_RE.is_match(text) {
        out.push("Add some punctuation like ! or ? to show emotion!".to_string());
    }
    out.push("Try words like: excited, disappointed, frustrated, amazed, or worried".to_string());
    out
}

fn subtle(emotion: Emotion, confidence: f32, why: &str, keywords: Vec<String>) -> ClassificationResult {
    ClassificationResult {
        emotion,
        confidence,
        explanation: why.to_string(),
        keywords,
        has_negation: false,
        original_emotion: None,
        is_contextual: false,
        suggestions: Vec::new(),
    }
}
