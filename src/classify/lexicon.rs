//! Per-emotion keyword lexicons, embedded at build time from `lexicon/emotions.json`.
//!
//! JSON shape:
//! {
//!   "emotions": [
//!     { "emotion": "happy", "label": "Happy", "emoji": "😊", "color": "green",
//!       "keywords": ["happy", ...], "intensifiers": ["very", ...] },
//!     ...
//!   ]
//! }
//!
//! Every keyword is compiled once into a whole-word regex. The lexicon is
//! immutable after load; all classification calls share the same instance.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::emotion::Emotion;

static LEXICON: Lazy<Lexicon> = Lazy::new(|| {
    let raw = include_str!("../../lexicon/emotions.json");
    Lexicon::from_json_str(raw).expect("valid emotion lexicon")
});

/// The process-wide lexicon.
pub fn lexicon() -> &'static Lexicon {
    &LEXICON
}

#[derive(Debug, Clone, Deserialize)]
struct LexiconFile {
    emotions: Vec<LexiconEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct LexiconEntry {
    emotion: Emotion,
    label: String,
    emoji: String,
    color: String,
    keywords: Vec<String>,
    #[serde(default)]
    intensifiers: Vec<String>,
}

/// Display metadata the front end uses for labels, badges and highlight colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionDisplay {
    pub emotion: Emotion,
    pub label: String,
    pub emoji: String,
    pub color: String,
}

/// A lexicon keyword with its compiled whole-word pattern.
#[derive(Debug, Clone)]
pub struct Keyword {
    pub text: String,
    re: Regex,
}

impl Keyword {
    fn compile(text: &str) -> anyhow::Result<Self> {
        let pattern = word_bounded(text, regex::escape(text));
        let re = Regex::new(&pattern)
            .map_err(|e| anyhow::anyhow!("keyword `{}` regex error: {}", text, e))?;
        Ok(Self {
            text: text.to_string(),
            re,
        })
    }

    /// Byte ranges of every occurrence in already-normalized text.
    pub fn find_iter<'a>(&'a self, normalized: &'a str) -> impl Iterator<Item = (usize, usize)> + 'a {
        self.re.find_iter(normalized).map(|m| (m.start(), m.end()))
    }
}

/// One emotion's keywords, intensifiers and display metadata.
#[derive(Debug, Clone)]
pub struct EmotionLexicon {
    pub emotion: Emotion,
    pub display: EmotionDisplay,
    pub keywords: Vec<Keyword>,
    pub intensifiers: Vec<String>,
}

impl EmotionLexicon {
    pub fn is_intensifier(&self, token: &str) -> bool {
        self.intensifiers.iter().any(|i| i == token)
    }
}

/// All five emotion lexicons, stored in tie-break priority order.
#[derive(Debug, Clone)]
pub struct Lexicon {
    emotions: Vec<EmotionLexicon>,
}

impl Lexicon {
    /// Parse and validate a lexicon document.
    ///
    /// Each of the five lexicon emotions must appear exactly once; `neutral`
    /// is rejected. Keywords are lower-cased and compiled here.
    pub fn from_json_str(raw: &str) -> anyhow::Result<Self> {
        let file: LexiconFile = serde_json::from_str(raw)?;

        let mut emotions = Vec::with_capacity(Emotion::PRIORITY.len());
        for entry in file.emotions {
            if entry.emotion == Emotion::Neutral {
                anyhow::bail!("lexicon must not define the neutral emotion");
            }
            if emotions
                .iter()
                .any(|e: &EmotionLexicon| e.emotion == entry.emotion)
            {
                anyhow::bail!("lexicon defines `{}` twice", entry.emotion);
            }
            if entry.keywords.is_empty() {
                anyhow::bail!("lexicon `{}` has no keywords", entry.emotion);
            }

            let keywords = entry
                .keywords
                .iter()
                .map(|k| Keyword::compile(&k.trim().to_lowercase()))
                .collect::<anyhow::Result<Vec<_>>>()?;

            emotions.push(EmotionLexicon {
                emotion: entry.emotion,
                display: EmotionDisplay {
                    emotion: entry.emotion,
                    label: entry.label,
                    emoji: entry.emoji,
                    color: entry.color,
                },
                keywords,
                intensifiers: entry
                    .intensifiers
                    .iter()
                    .map(|i| i.trim().to_lowercase())
                    .collect(),
            });
        }

        for e in Emotion::PRIORITY {
            if !emotions.iter().any(|l| l.emotion == e) {
                anyhow::bail!("lexicon is missing `{}`", e);
            }
        }
        emotions.sort_by_key(|l| l.emotion.priority());

        Ok(Self { emotions })
    }

    /// Lexicons in priority order (happy, sad, angry, fear, surprise).
    pub fn iter(&self) -> impl Iterator<Item = &EmotionLexicon> {
        self.emotions.iter()
    }

    pub fn get(&self, emotion: Emotion) -> Option<&EmotionLexicon> {
        self.emotions.iter().find(|l| l.emotion == emotion)
    }

    pub fn display(&self) -> Vec<EmotionDisplay> {
        self.emotions.iter().map(|l| l.display.clone()).collect()
    }
}

/// Wrap an escaped pattern body in `\b` on each side whose edge character is a
/// word character. Edges like `?` or `!` get no boundary, otherwise they could
/// never match at end of input.
pub(crate) fn word_bounded(literal: &str, body: String) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let lead = literal.chars().next().is_some_and(is_word);
    let trail = literal.chars().last().is_some_and(is_word);
    format!(
        "{}{}{}",
        if lead { r"\b" } else { "" },
        body,
        if trail { r"\b" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: &str = r#"{
      "emotions": [
        { "emotion": "surprise", "label": "Surprise", "emoji": "x", "color": "orange", "keywords": ["Wow"] },
        { "emotion": "happy", "label": "Happy", "emoji": "x", "color": "green", "keywords": ["glad"], "intensifiers": ["VERY"] },
        { "emotion": "sad", "label": "Sad", "emoji": "x", "color": "blue", "keywords": ["sad"] },
        { "emotion": "angry", "label": "Angry", "emoji": "x", "color": "red", "keywords": ["mad"] },
        { "emotion": "fear", "label": "Fear", "emoji": "x", "color": "purple", "keywords": ["scared"] }
      ]
    }"#;

    #[test]
    fn embedded_lexicon_loads_in_priority_order() {
        let order: Vec<Emotion> = lexicon().iter().map(|l| l.emotion).collect();
        assert_eq!(order, Emotion::PRIORITY.to_vec());
        assert!(lexicon()
            .get(Emotion::Angry)
            .unwrap()
            .keywords
            .iter()
            .any(|k| k.text == "can't stand"));
    }

    #[test]
    fn sorts_and_lowercases() {
        let lex = Lexicon::from_json_str(TINY).expect("tiny lexicon");
        assert_eq!(lex.iter().next().unwrap().emotion, Emotion::Happy);
        let surprise = lex.get(Emotion::Surprise).unwrap();
        assert_eq!(surprise.keywords[0].text, "wow");
        assert!(lex.get(Emotion::Happy).unwrap().is_intensifier("very"));
    }

    #[test]
    fn rejects_missing_and_neutral() {
        let missing = r#"{ "emotions": [
            { "emotion": "happy", "label": "Happy", "emoji": "x", "color": "g", "keywords": ["glad"] }
        ] }"#;
        assert!(Lexicon::from_json_str(missing).is_err());

        let neutral = TINY.replace("\"surprise\"", "\"neutral\"");
        assert!(Lexicon::from_json_str(&neutral).is_err());
    }

    #[test]
    fn keyword_is_whole_word() {
        let k = Keyword::compile("mad").unwrap();
        assert_eq!(k.find_iter("i admire madrid").count(), 0);
        assert_eq!(k.find_iter("so mad, really mad").count(), 2);
    }

    #[test]
    fn boundary_only_on_word_edges() {
        assert_eq!(word_bounded("what?", "what\\?".into()), r"\bwhat\?");
        assert_eq!(word_bounded("!!!", "!!!".into()), "!!!");
    }
}
