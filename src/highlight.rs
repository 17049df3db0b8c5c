//! Keyword highlighting as byte spans over the original sentence.
//!
//! The classifier reports lower-cased keywords; this module locates them in the
//! user's original (case-preserved) text. Rendering to markup happens only in
//! [`render_highlighted`], which escapes every text segment.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::classify::lexicon::word_bounded;
use crate::classify::ClassificationResult;
use crate::emotion::Emotion;

/// One highlighted range: `original[start..end]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSpan {
    pub start: usize,
    pub end: usize,
    /// The keyword this span was found for (as reported by the classifier).
    pub keyword: String,
}

/// Spans of `result.keywords` in `original`, the text that was classified.
///
/// Lexicon keywords are located whole-word, like the matcher found them.
/// Topic words were found by substring, so for a contextual result a span may
/// sit inside a longer word ("spider" in "Spiders").
pub fn result_spans(original: &str, result: &ClassificationResult) -> Vec<KeywordSpan> {
    keyword_spans(original, &result.keywords, !result.is_contextual)
}

/// Find every occurrence of `keywords` in `original`, case-insensitively.
/// With `whole_word`, word-character edges need a word boundary.
/// Spans are sorted and never overlap; on overlap the earlier (then longer)
/// span wins.
fn keyword_spans(original: &str, keywords: &[String], whole_word: bool) -> Vec<KeywordSpan> {
    let mut spans: Vec<KeywordSpan> = Vec::new();

    for kw in keywords {
        if kw.is_empty() {
            continue;
        }
        // straight and typographic apostrophes are interchangeable
        let body = regex::escape(kw).replace('\'', "['\u{2018}\u{2019}]");
        let pattern = if whole_word { word_bounded(kw, body) } else { body };
        let Ok(re) = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
        else {
            continue;
        };
        spans.extend(re.find_iter(original).map(|m| KeywordSpan {
            start: m.start(),
            end: m.end(),
            keyword: kw.clone(),
        }));
    }

    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut out: Vec<KeywordSpan> = Vec::with_capacity(spans.len());
    for s in spans {
        match out.last() {
            Some(prev) if s.start < prev.end => {}
            _ => out.push(s),
        }
    }
    out
}

/// Render `original` as escaped HTML with `<mark>` around each span.
/// Spans must come from [`result_spans`] on the same text.
pub fn render_highlighted(original: &str, spans: &[KeywordSpan], emotion: Emotion) -> String {
    let mut out = String::with_capacity(original.len() + spans.len() * 32);
    let mut cursor = 0;
    for s in spans {
        if s.start < cursor || s.end > original.len() {
            continue;
        }
        let (Some(before), Some(marked)) = (original.get(cursor..s.start), original.get(s.start..s.end))
        else {
            continue;
        };
        out.push_str(&html_escape::encode_text(before));
        out.push_str("<mark class=\"emotion-");
        out.push_str(emotion.as_str());
        out.push_str("\">");
        out.push_str(&html_escape::encode_text(marked));
        out.push_str("</mark>");
        cursor = s.end;
    }
    if let Some(rest) = original.get(cursor..) {
        out.push_str(&html_escape::encode_text(rest));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn spans_point_into_original_case() {
        let text = "I LOVE my Family, love!";
        let spans = keyword_spans(text, &kw(&["love"]), true);
        assert_eq!(spans.len(), 2);
        assert_eq!(&text[spans[0].start..spans[0].end], "LOVE");
        assert_eq!(&text[spans[1].start..spans[1].end], "love");
    }

    #[test]
    fn whole_word_and_no_overlap() {
        let text = "Madrid made me mad, I can't stand it";
        let spans = keyword_spans(text, &kw(&["mad", "can't stand", "stand"]), true);
        let found: Vec<&str> = spans.iter().map(|s| &text[s.start..s.end]).collect();
        assert_eq!(found, vec!["mad", "can't stand"]);
    }

    #[test]
    fn typographic_apostrophe_matches() {
        let text = "I can’t stand it";
        let spans = keyword_spans(text, &kw(&["can't stand"]), true);
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], "can’t stand");
    }

    #[test]
    fn punctuation_keywords() {
        let text = "What?! no way";
        let spans = keyword_spans(text, &kw(&["what?"]), true);
        assert_eq!(&text[spans[0].start..spans[0].end], "What?");
    }

    #[test]
    fn render_escapes_user_text() {
        let text = "<b>so happy</b> & fine";
        let spans = keyword_spans(text, &kw(&["happy"]), true);
        let html = render_highlighted(text, &spans, Emotion::Happy);
        assert_eq!(
            html,
            "&lt;b&gt;so <mark class=\"emotion-happy\">happy</mark>&lt;/b&gt; &amp; fine"
        );
    }

    #[test]
    fn topic_words_highlight_inside_longer_words() {
        let text = "The Spiders came out at night";
        let r = classify(text);
        assert!(r.is_contextual);
        let spans = result_spans(text, &r);
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].start..spans[0].end], "Spider");

        let text = "Exams start on Monday";
        let spans = result_spans(text, &classify(text));
        assert_eq!(&text[spans[0].start..spans[0].end], "Exam");
    }

    #[test]
    fn lexicon_keywords_stay_whole_word() {
        let text = "I admire how mad he got";
        let spans = result_spans(text, &classify(text));
        let found: Vec<&str> = spans.iter().map(|s| &text[s.start..s.end]).collect();
        assert_eq!(found, vec!["mad"]);
    }

    #[test]
    fn render_without_spans_is_plain_escape() {
        assert_eq!(render_highlighted("a<b", &[], Emotion::Neutral), "a&lt;b");
    }
}
