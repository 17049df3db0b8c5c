//! Keyword matcher: scans normalized text against every emotion lexicon.
//!
//! Score per emotion = keyword occurrences + 0.5 when an intensifier sits
//! right before one of the matched keywords (at most one word in between).
//! The bonus is applied once per emotion, not per intensifier.
//!
//! Words inside a neutral idiom ("my best friend") are weak evidence: the
//! first pass ignores them, and [`match_idiom_words`] only counts them when
//! nothing else in the sentence decides the emotion.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

use super::lexicon::{EmotionLexicon, Lexicon};
use crate::emotion::Emotion;

pub const INTENSIFIER_BONUS: f32 = 0.5;
/// Max token distance from intensifier to keyword (1 = adjacent).
pub const INTENSIFIER_WINDOW: usize = 2;
/// Score at which confidence saturates to 1.0.
pub const SATURATION_SCORE: f32 = 3.0;

/// Fixed expressions whose adjective names a relationship, not a feeling.
static NEUTRAL_IDIOMS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bbest friends?\b").expect("idiom regex"));

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w']+").expect("token regex"));

/// Per-emotion match outcome for a single classification call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub emotion: Emotion,
    /// Unique matched keywords, in order of first appearance in the text.
    pub matches: Vec<String>,
    /// Raw occurrence count (duplicates included).
    pub count: usize,
    pub intensified: bool,
    pub score: f32,
    /// `score / 3`, capped at 1.
    pub confidence: f32,
}

/// Match results for every emotion that matched at least once, in priority order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchSet {
    results: Vec<MatchResult>,
}

impl MatchSet {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchResult> {
        self.results.iter()
    }

    pub fn get(&self, emotion: Emotion) -> Option<&MatchResult> {
        self.results.iter().find(|r| r.emotion == emotion)
    }

    /// Highest score wins; ties go to the emotion earlier in priority order.
    pub fn dominant(&self) -> Option<&MatchResult> {
        let mut best: Option<&MatchResult> = None;
        for r in &self.results {
            match best {
                Some(b) if r.score <= b.score => {}
                _ => best = Some(r),
            }
        }
        best
    }
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| Token {
            text: m.as_str(),
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

/// Blank out neutral idioms with spaces so byte offsets stay aligned.
pub fn mask_idioms(normalized: &str) -> String {
    NEUTRAL_IDIOMS
        .replace_all(normalized, |caps: &Captures| " ".repeat(caps[0].len()))
        .into_owned()
}

/// Run every lexicon over `normalized` (already lower-cased) text, skipping
/// words that sit inside a neutral idiom.
pub fn match_emotions(normalized: &str, lexicon: &Lexicon) -> MatchSet {
    match_in(&mask_idioms(normalized), lexicon)
}

/// Second pass: match the text as-is, idiom words included.
pub fn match_idiom_words(normalized: &str, lexicon: &Lexicon) -> MatchSet {
    match_in(normalized, lexicon)
}

fn match_in(text: &str, lexicon: &Lexicon) -> MatchSet {
    let tokens = tokenize(text);
    let results = lexicon
        .iter()
        .filter_map(|lex| match_one(text, &tokens, lex))
        .collect();
    MatchSet { results }
}

fn match_one(text: &str, tokens: &[Token<'_>], lex: &EmotionLexicon) -> Option<MatchResult> {
    let mut occurrences: Vec<(usize, usize)> = lex
        .keywords
        .iter()
        .flat_map(|k| k.find_iter(text))
        .collect();
    if occurrences.is_empty() {
        return None;
    }
    // first position wins; on equal start the longer phrase comes first
    occurrences.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut matches: Vec<String> = Vec::new();
    for &(s, e) in &occurrences {
        let found = &text[s..e];
        if !matches.iter().any(|m| m == found) {
            matches.push(found.to_string());
        }
    }

    let intensified = intensifier_before(tokens, &occurrences, lex);
    let score = occurrences.len() as f32 + if intensified { INTENSIFIER_BONUS } else { 0.0 };

    Some(MatchResult {
        emotion: lex.emotion,
        matches,
        count: occurrences.len(),
        intensified,
        score,
        confidence: (score / SATURATION_SCORE).min(1.0),
    })
}

fn intensifier_before(
    tokens: &[Token<'_>],
    occurrences: &[(usize, usize)],
    lex: &EmotionLexicon,
) -> bool {
    let keyword_tokens: Vec<usize> = occurrences
        .iter()
        .filter_map(|&(start, _)| tokens.iter().position(|t| t.start <= start && start < t.end))
        .collect();

    tokens.iter().enumerate().any(|(i, t)| {
        lex.is_intensifier(t.text)
            && keyword_tokens
                .iter()
                .any(|&k| k > i && k - i <= INTENSIFIER_WINDOW)
    })
}
