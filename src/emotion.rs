//! The closed set of emotion tags shared by the classifier, the
//! saved-sentence list and the HTTP layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Emotion tag produced by the classifier.
///
/// `Neutral` is never a lexicon category; it only appears as a classification
/// outcome (nothing matched, or a surprise sentence was negated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Fear,
    Surprise,
    Neutral,
}

impl Emotion {
    /// Lexicon categories in tie-break priority order.
    /// When two emotions score the same, the one listed first wins.
    pub const PRIORITY: [Emotion; 5] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Fear,
        Emotion::Surprise,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
        }
    }

    /// Position in [`Emotion::PRIORITY`]; `Neutral` sorts last.
    pub fn priority(self) -> usize {
        Self::PRIORITY
            .iter()
            .position(|e| *e == self)
            .unwrap_or(Self::PRIORITY.len())
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        let s = serde_json::to_string(&Emotion::Surprise).unwrap();
        assert_eq!(s, "\"surprise\"");
        let e: Emotion = serde_json::from_str("\"fear\"").unwrap();
        assert_eq!(e, Emotion::Fear);
    }

    #[test]
    fn priority_follows_declaration_order() {
        assert_eq!(Emotion::Happy.priority(), 0);
        assert_eq!(Emotion::Surprise.priority(), 4);
        assert_eq!(Emotion::Neutral.priority(), 5);
    }
}
