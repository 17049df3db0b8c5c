//! Kid-friendly rationale strings for classification results.

use super::negation::NegationFlip;
use crate::emotion::Emotion;

/// How many keywords are quoted verbatim in an explanation.
pub const QUOTED_KEYWORDS: usize = 3;

pub const NEUTRAL_EXPLANATION: &str = "No clear emotion detected. Try adding more descriptive feeling words like \"happy\", \"sad\", \"angry\", \"scared\", or \"surprised\"!";

/// Build the explanation for `emotion` from its evidence.
///
/// With a negation flip, the explanation names the marker, both emotions and
/// the flip reason. Otherwise it quotes up to three keywords. Never panics on
/// an empty keyword list.
pub fn explain(emotion: Emotion, keywords: &[String], negation: Option<&NegationFlip>) -> String {
    if let Some(flip) = negation {
        return format!(
            "The word \"{}\" flipped the emotion from {} to {} ({})! Negation words can completely change the meaning.",
            flip.marker,
            flip.from,
            flip.to,
            flip.reason.label()
        );
    }

    if keywords.is_empty() {
        return match emotion {
            Emotion::Neutral => NEUTRAL_EXPLANATION.to_string(),
            other => format!("I sensed {other} in this sentence, even without a clear feeling word."),
        };
    }

    let list = keywords
        .iter()
        .take(QUOTED_KEYWORDS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\", \"");

    let mut out = match emotion {
        Emotion::Happy => format!("I detected happiness from words like \"{list}\"! These words express joy, excitement, or positive feelings."),
        Emotion::Sad => format!("I found sadness in words like \"{list}\"! These words show disappointment, sorrow, or negative feelings."),
        Emotion::Angry => format!("I sensed anger from words like \"{list}\"! These words express frustration, rage, or being upset."),
        Emotion::Fear => format!("I detected fear in words like \"{list}\"! These words show worry, anxiety, or being scared."),
        Emotion::Surprise => format!("I found surprise from words like \"{list}\"! These words show unexpected events or amazement."),
        Emotion::Neutral => "Interesting sentence! Keep experimenting with emotion words.".to_string(),
    };

    if keywords.len() > QUOTED_KEYWORDS {
        out.push_str(" I also found other emotion words that strengthen this feeling!");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::negation::FlipReason;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn quotes_at_most_three() {
        let s = explain(Emotion::Happy, &kw(&["happy", "fun", "love", "yay"]), None);
        assert!(s.contains("\"happy\", \"fun\", \"love\""));
        assert!(!s.contains("yay"));
        assert!(s.ends_with("strengthen this feeling!"));

        let s = explain(Emotion::Sad, &kw(&["sad"]), None);
        assert!(s.starts_with("I found sadness in words like \"sad\"!"));
        assert!(!s.contains("also found"));
    }

    #[test]
    fn empty_keywords_are_fine() {
        assert_eq!(explain(Emotion::Neutral, &[], None), NEUTRAL_EXPLANATION);
        assert!(explain(Emotion::Fear, &[], None).contains("fear"));
    }

    #[test]
    fn negation_names_both_emotions() {
        let flip = NegationFlip {
            marker: "not".into(),
            from: Emotion::Happy,
            to: Emotion::Sad,
            reason: FlipReason::Disappointment,
        };
        let s = explain(Emotion::Sad, &kw(&["happy"]), Some(&flip));
        assert_eq!(
            s,
            "The word \"not\" flipped the emotion from happy to sad (disappointment)! Negation words can completely change the meaning."
        );
    }
}
