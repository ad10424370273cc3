// Rule-based sentence boundary detection over raw letter text
// Boundaries are byte offsets; callers convert to character spans.

use regex_automata::meta::Regex;
use tracing::debug;

use super::abbreviations::AbbreviationChecker;
use crate::error::{BiasError, Result};

/// Terminal punctuation, optional closing quotes/brackets, then whitespace
const TERMINAL_PATTERN: &str = r#"[.!?]+["'\x{201D}\x{2019})\]]*\s+"#;

/// A line break followed by at least one blank line
const PARAGRAPH_PATTERN: &str = r"\r?\n[ \t]*(?:\r?\n[ \t]*)+";

/// Detects sentence boundaries with two compiled patterns and an abbreviation check
pub struct SentenceSegmenter {
    terminal: Regex,
    paragraph: Regex,
    abbreviations: AbbreviationChecker,
}

impl SentenceSegmenter {
    pub fn new() -> Result<Self> {
        let terminal = Regex::new(TERMINAL_PATTERN).map_err(|e| BiasError::Pattern(e.to_string()))?;
        let paragraph =
            Regex::new(PARAGRAPH_PATTERN).map_err(|e| BiasError::Pattern(e.to_string()))?;
        Ok(Self {
            terminal,
            paragraph,
            abbreviations: AbbreviationChecker::new(),
        })
    }

    /// Byte ranges of every non-empty sentence, trimmed of surrounding whitespace
    pub fn sentence_byte_spans(&self, text: &str) -> Vec<(usize, usize)> {
        let mut boundaries: Vec<usize> = Vec::new();

        for m in self.paragraph.find_iter(text) {
            boundaries.push(m.start());
        }

        for m in self.terminal.find_iter(text) {
            let matched = &text[m.start()..m.end()];
            let end = m.start() + matched.trim_end().len();

            if !self.starts_new_sentence(&text[m.end()..]) {
                continue;
            }
            // WHY: "Dr." / "A." end in a period but belong to the following name
            if self.abbreviations.ends_with_abbreviation(&text[..end]) {
                continue;
            }
            boundaries.push(end);
        }

        boundaries.push(text.len());
        boundaries.sort_unstable();
        boundaries.dedup();

        let mut spans = Vec::with_capacity(boundaries.len());
        let mut start = 0;
        for boundary in boundaries {
            if let Some(span) = trimmed_span(text, start, boundary) {
                spans.push(span);
            }
            start = boundary;
        }

        debug!("Segmented {} sentences from {} bytes", spans.len(), text.len());
        spans
    }

    fn starts_new_sentence(&self, rest: &str) -> bool {
        match rest.chars().next() {
            Some(c) => {
                c.is_uppercase()
                    || c.is_ascii_digit()
                    || matches!(c, '"' | '\'' | '\u{201C}' | '\u{2018}' | '(' | '[')
            }
            None => false,
        }
    }
}

/// Shrink `start..end` to exclude surrounding whitespace; `None` if nothing is left
fn trimmed_span(text: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let slice = &text[start..end];
    let leading = slice.len() - slice.trim_start().len();
    let trimmed = slice.trim();
    if trimmed.is_empty() {
        return None;
    }
    let span_start = start + leading;
    Some((span_start, span_start + trimmed.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(text: &str) -> Vec<&str> {
        let segmenter = SentenceSegmenter::new().unwrap();
        segmenter
            .sentence_byte_spans(text)
            .into_iter()
            .map(|(s, e)| &text[s..e])
            .collect()
    }

    #[test]
    fn test_basic_sentences() {
        assert_eq!(
            sentences("Hello world. This is a test. How are you?"),
            vec!["Hello world.", "This is a test.", "How are you?"]
        );
    }

    #[test]
    fn test_lowercase_continuation_is_not_a_boundary() {
        assert_eq!(
            sentences("The result was 3.5 times better. and so on."),
            vec!["The result was 3.5 times better. and so on."]
        );
    }

    #[test]
    fn test_title_abbreviation_does_not_split() {
        assert_eq!(
            sentences("I recommend Dr. Smith highly. She is brilliant."),
            vec!["I recommend Dr. Smith highly.", "She is brilliant."]
        );
        assert_eq!(
            sentences("Jane A. Smith joined us. She excelled."),
            vec!["Jane A. Smith joined us.", "She excelled."]
        );
    }

    #[test]
    fn test_degree_abbreviation_can_end_a_sentence() {
        assert_eq!(
            sentences("She earned her Ph.D. She is brilliant."),
            vec!["She earned her Ph.D.", "She is brilliant."]
        );
        assert_eq!(
            sentences("She trained in the U.S. for two years."),
            vec!["She trained in the U.S. for two years."]
        );
    }

    #[test]
    fn test_paragraph_breaks_split_salutations() {
        let text = "Dear Committee,\n\nI write in support of Maria.\r\n\r\nSincerely,\nJohn";
        assert_eq!(
            sentences(text),
            vec!["Dear Committee,", "I write in support of Maria.", "Sincerely,\nJohn"]
        );
    }

    #[test]
    fn test_closing_quote_stays_with_sentence() {
        assert_eq!(
            sentences("She wrote \"Deep Nets.\" Then she left."),
            vec!["She wrote \"Deep Nets.\"", "Then she left."]
        );
    }

    #[test]
    fn test_empty_and_whitespace_text() {
        assert!(sentences("").is_empty());
        assert!(sentences("  \n\n \t ").is_empty());
    }

    #[test]
    fn test_no_trailing_terminator() {
        assert_eq!(sentences("One. Two"), vec!["One.", "Two"]);
    }
}
