//! Negation resolver.
//!
//! If any negation marker appears anywhere in the sentence and some emotion
//! matched, the dominant emotion is remapped through a fixed flip table.
//! Detection is sentence-wide: a marker in one clause also flips a keyword
//! in another clause ("I am not hungry but I am very sad" reads as happy).
//! A marker that is part of a keyword phrase ("can't believe") also counts.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::explain::explain;
use super::matcher::MatchSet;
use super::ClassificationResult;
use crate::emotion::Emotion;

pub const NEGATION_MARKERS: [&str; 15] = [
    "not", "never", "no", "don't", "won't", "can't", "isn't", "aren't", "wasn't", "weren't",
    "haven't", "hasn't", "wouldn't", "shouldn't", "couldn't",
];

/// Confidence assigned to a flipped result (before the orchestrator's 0.9 cap).
pub const FLIP_CONFIDENCE: f32 = 0.8;

static NEGATION_RE: Lazy<Regex> = Lazy::new(|| {
    let alts = NEGATION_MARKERS
        .iter()
        .map(|m| regex::escape(m))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alts})\b")).expect("negation regex")
});

/// Why a negated emotion becomes another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipReason {
    Relief,
    Disappointment,
    ExpectationViolated,
}

impl FlipReason {
    pub fn label(self) -> &'static str {
        match self {
            FlipReason::Relief => "relief",
            FlipReason::Disappointment => "disappointment",
            FlipReason::ExpectationViolated => "expectation violated",
        }
    }
}

/// A negation that changed the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegationFlip {
    /// The marker as found in the text, e.g. `"never"`.
    pub marker: String,
    pub from: Emotion,
    pub to: Emotion,
    pub reason: FlipReason,
}

/// Fixed flip table. Total over the five lexicon emotions; `Neutral` has no flip.
pub fn flip_target(emotion: Emotion) -> Option<(Emotion, FlipReason)> {
    match emotion {
        Emotion::Fear | Emotion::Sad | Emotion::Angry => Some((Emotion::Happy, FlipReason::Relief)),
        Emotion::Happy => Some((Emotion::Sad, FlipReason::Disappointment)),
        Emotion::Surprise => Some((Emotion::Neutral, FlipReason::ExpectationViolated)),
        Emotion::Neutral => None,
    }
}

/// First negation marker in the (lower-cased) text, if any.
pub fn find_negation(normalized: &str) -> Option<&str> {
    NEGATION_RE.find(normalized).map(|m| m.as_str())
}

/// Flip the dominant emotion when a negation marker is present.
/// Returns `None` (pass-through) when nothing matched or no marker is found.
pub fn resolve(normalized: &str, matches: &MatchSet) -> Option<ClassificationResult> {
    let dominant = matches.dominant()?;
    let marker = find_negation(normalized)?;
    let (to, reason) = flip_target(dominant.emotion)?;

    let flip = NegationFlip {
        marker: marker.to_string(),
        from: dominant.emotion,
        to,
        reason,
    };

    Some(ClassificationResult {
        emotion: to,
        confidence: FLIP_CONFIDENCE,
        explanation: explain(to, &dominant.matches, Some(&flip)),
        keywords: dominant.matches.clone(),
        has_negation: true,
        original_emotion: Some(dominant.emotion),
        is_contextual: false,
        suggestions: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::lexicon::lexicon;
    use crate::classify::matcher::match_emotions;

    #[test]
    fn flip_table_is_total() {
        for e in Emotion::PRIORITY {
            assert!(flip_target(e).is_some(), "{e} must have a flip target");
        }
        assert_eq!(flip_target(Emotion::Neutral), None);
        assert_eq!(
            flip_target(Emotion::Surprise),
            Some((Emotion::Neutral, FlipReason::ExpectationViolated))
        );
    }

    #[test]
    fn markers_are_whole_words() {
        assert_eq!(find_negation("i knot the rope"), None);
        assert_eq!(find_negation("nobody came"), None);
        assert_eq!(find_negation("i won't go, not now"), Some("won't"));
    }

    #[test]
    fn no_marker_passes_through() {
        let text = "i am scared";
        let m = match_emotions(text, lexicon());
        assert!(resolve(text, &m).is_none());
    }

    #[test]
    fn no_match_passes_through() {
        let text = "i do not know";
        let m = match_emotions(text, lexicon());
        assert!(resolve(text, &m).is_none());
    }

    #[test]
    fn flips_dominant_and_names_marker() {
        let text = "i was never scared of the dark";
        let m = match_emotions(text, lexicon());
        let r = resolve(text, &m).expect("flip");
        assert_eq!(r.emotion, Emotion::Happy);
        assert_eq!(r.original_emotion, Some(Emotion::Fear));
        assert!(r.has_negation);
        assert_eq!(r.keywords, vec!["scared", "dark"]);
        assert!(r.explanation.contains("\"never\""));
        assert!(r.explanation.contains("relief"));
    }

    #[test]
    fn sentence_wide_scope_flips_other_clause() {
        let text = "i am not hungry but i am very sad";
        let m = match_emotions(text, lexicon());
        let r = resolve(text, &m).expect("flip");
        assert_eq!(r.original_emotion, Some(Emotion::Sad));
        assert_eq!(r.emotion, Emotion::Happy);
    }
}
