// src/classify/mod.rs
//! Free-text emotion classifier used by Create Mode.
//!
//! Pipeline (pure, deterministic, no shared mutable state):
//! 1) normalize (lower-case, typographic apostrophes → `'`)
//! 2) keyword matching over all five lexicons
//! 3) some emotion scored → dominant by score (ties: happy, sad, angry, fear, surprise),
//!    then the negation resolver may flip it
//! 4) nothing scored → fallback heuristics, then words inside neutral idioms,
//!    else neutral with suggestions

pub mod explain;
pub mod fallback;
pub mod lexicon;
pub mod matcher;
pub mod negation;

use serde::{Deserialize, Serialize};

use crate::emotion::Emotion;

pub use explain::explain;
pub use lexicon::{lexicon, EmotionDisplay, Lexicon};
pub use matcher::{match_emotions, match_idiom_words, MatchResult, MatchSet};
pub use negation::{flip_target, FlipReason, NegationFlip};

/// Added to the dominant emotion's confidence for a direct keyword hit.
pub const DIRECT_CONFIDENCE_BOOST: f32 = 0.2;
/// Upper bound for a negation-flipped result.
pub const NEGATION_CONFIDENCE_CAP: f32 = 0.9;

/// The classifier's single output type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub emotion: Emotion,
    /// Heuristic strength in [0, 1]; not a calibrated probability.
    pub confidence: f32,
    pub explanation: String,
    /// Matched words/phrases (lower-cased) that justify the result.
    pub keywords: Vec<String>,
    pub has_negation: bool,
    /// Pre-flip emotion; present only when `has_negation`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_emotion: Option<Emotion>,
    /// Set when a topic word (not a feeling word) decided the result.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_contextual: bool,
    /// Coaching tips; only filled on the neutral path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl ClassificationResult {
    /// Nothing detected: neutral, zero confidence, no keywords.
    pub fn neutral() -> Self {
        Self {
            emotion: Emotion::Neutral,
            confidence: 0.0,
            explanation: explain::NEUTRAL_EXPLANATION.to_string(),
            keywords: Vec::new(),
            has_negation: false,
            original_emotion: None,
            is_contextual: false,
            suggestions: Vec::new(),
        }
    }
}

/// Lower-case and unify apostrophes so "Can’t" matches "can't".
pub fn normalize(text: &str) -> String {
    text.to_lowercase().replace(['\u{2018}', '\u{2019}'], "'")
}

/// Stateless classifier over a lexicon (the embedded one by default).
#[derive(Debug, Clone, Copy)]
pub struct EmotionClassifier<'a> {
    lexicon: &'a Lexicon,
}

impl Default for EmotionClassifier<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl EmotionClassifier<'static> {
    pub fn new() -> Self {
        Self {
            lexicon: lexicon::lexicon(),
        }
    }
}

impl<'a> EmotionClassifier<'a> {
    pub fn with_lexicon(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &'a Lexicon {
        self.lexicon
    }

    /// Classify one sentence. Any string is valid input, including `""`.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let normalized = normalize(text);
        let mut matches = match_emotions(&normalized, self.lexicon);
        if matches.is_empty() {
            if let Some(subtle) = fallback::detect_subtle(&normalized) {
                return subtle;
            }
            matches = match_idiom_words(&normalized, self.lexicon);
        }

        let Some(dominant) = matches.dominant() else {
            return fallback::no_emotion(&normalized);
        };

        if let Some(mut flipped) = negation::resolve(&normalized, &matches) {
            flipped.confidence = flipped.confidence.min(NEGATION_CONFIDENCE_CAP);
            return flipped;
        }

        ClassificationResult {
            emotion: dominant.emotion,
            confidence: (dominant.confidence + DIRECT_CONFIDENCE_BOOST).min(1.0),
            explanation: explain(dominant.emotion, &dominant.matches, None),
            keywords: dominant.matches.clone(),
            has_negation: false,
            original_emotion: None,
            is_contextual: false,
            suggestions: Vec::new(),
        }
    }
}

/// Classify with the embedded lexicon.
pub fn classify(text: &str) -> ClassificationResult {
    EmotionClassifier::new().classify(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_match_boosts_confidence() {
        let r = classify("I love spending time with my family.");
        assert_eq!(r.emotion, Emotion::Happy);
        assert_eq!(r.keywords, vec!["love"]);
        assert!((r.confidence - (1.0 / 3.0 + 0.2)).abs() < 1e-6);
        assert!(!r.has_negation);
        assert!(r.original_emotion.is_none());
    }

    #[test]
    fn confidence_saturates_at_one() {
        let r = classify("happy happy happy joy joy");
        assert_eq!(r.confidence, 1.0);
    }

    #[test]
    fn curly_apostrophes_normalize() {
        assert_eq!(normalize("I CAN’T"), "i can't");
        let r = classify("I can’t stand it");
        assert_eq!(r.original_emotion, Some(Emotion::Angry));
    }

    #[test]
    fn negated_confidence_is_capped() {
        let r = classify("I am not scared");
        assert!(r.confidence <= NEGATION_CONFIDENCE_CAP);
        assert!((r.confidence - 0.8).abs() < 1e-6);
    }

    #[test]
    fn greetings_keep_their_feeling_word() {
        let r = classify("Good morning!");
        assert_eq!(r.emotion, Emotion::Happy);
        assert_eq!(r.keywords, vec!["good"]);
        assert_eq!(classify("I had a good night").emotion, Emotion::Happy);
    }

    #[test]
    fn idiom_words_are_a_last_resort() {
        // nothing else decides: "best" counts
        let r = classify("My best friend gave me a present");
        assert_eq!(r.emotion, Emotion::Happy);
        assert_eq!(r.keywords, vec!["best"]);

        // a topic word decides first
        let r = classify("My best friend is moving away");
        assert_eq!(r.emotion, Emotion::Sad);
        assert!(r.is_contextual);

        // a real feeling word outside the idiom wins
        let r = classify("My best friend is so sad");
        assert_eq!(r.emotion, Emotion::Sad);
        assert_eq!(r.keywords, vec!["sad"]);

        // negation still applies to the idiom word
        let r = classify("My best friend is not here");
        assert_eq!(r.emotion, Emotion::Sad);
        assert_eq!(r.original_emotion, Some(Emotion::Happy));
    }

    #[test]
    fn empty_is_neutral() {
        let r = classify("");
        assert_eq!(r.emotion, Emotion::Neutral);
        assert_eq!(r.confidence, 0.0);
        assert!(r.keywords.is_empty());
        assert!(!r.suggestions.is_empty());
    }

    #[test]
    fn wire_format_is_camel_case() {
        let v = serde_json::to_value(classify("I'm not afraid")).unwrap();
        assert_eq!(v["hasNegation"], true);
        assert_eq!(v["originalEmotion"], "fear");
        assert!(v.get("isContextual").is_none());
        assert!(v.get("suggestions").is_none());

        let v = serde_json::to_value(classify("glad")).unwrap();
        assert!(v.get("originalEmotion").is_none());
    }
}
