//! Sentence and word segmentation with character offsets into the source text.
//!
//! Both the [`Document`](crate::Document) and the rule-based syntax parser
//! segment through the same [`Segmenter`], so sentence spans reported by the
//! parser line up with the document's own sentences.

use std::sync::OnceLock;

use serde::Serialize;

use crate::error::Result;

pub mod abbreviations;
pub mod normalization;
pub mod offsets;
pub mod sentences;
pub mod words;

pub use abbreviations::AbbreviationChecker;
pub use normalization::{normalize_sentence, normalize_sentence_into};
pub use offsets::{char_span_to_bytes, CharCounter};
pub use sentences::SentenceSegmenter;
pub use words::{RawToken, TokenKind, WordTokenizer};

/// Half-open character span `[start, stop)` into a text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TextSpan {
    pub start: usize,
    pub stop: usize,
}

impl TextSpan {
    pub fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }

    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    pub fn contains(&self, other: &TextSpan) -> bool {
        self.start <= other.start && other.stop <= self.stop
    }
}

/// A word and its character span in the original text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordSpan {
    pub word: String,
    pub start: usize,
    pub stop: usize,
}

/// A normalized sentence and its character span in the original text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    pub text: String,
    pub span: TextSpan,
}

/// Sentence splitter and word tokenizer bundled for one-shot segmentation
pub struct Segmenter {
    sentences: SentenceSegmenter,
    tokenizer: WordTokenizer,
}

impl Segmenter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            sentences: SentenceSegmenter::new()?,
            tokenizer: WordTokenizer::new()?,
        })
    }

    /// Process-wide segmenter, compiled on first use
    pub fn shared() -> Result<&'static Segmenter> {
        static SHARED: OnceLock<Segmenter> = OnceLock::new();
        if let Some(segmenter) = SHARED.get() {
            return Ok(segmenter);
        }
        let built = Segmenter::new()?;
        Ok(SHARED.get_or_init(|| built))
    }

    pub fn tokenizer(&self) -> &WordTokenizer {
        &self.tokenizer
    }

    /// Sentences with normalized text and character spans
    pub fn sentences(&self, text: &str) -> Vec<Sentence> {
        let mut counter = CharCounter::new(text);
        self.sentences
            .sentence_byte_spans(text)
            .into_iter()
            .map(|(start, end)| Sentence {
                text: normalize_sentence(&text[start..end]),
                span: TextSpan::new(counter.char_at(start), counter.char_at(end)),
            })
            .collect()
    }

    /// Sentence byte spans, for callers that slice the text themselves
    pub fn sentence_byte_spans(&self, text: &str) -> Vec<(usize, usize)> {
        self.sentences.sentence_byte_spans(text)
    }

    /// Words with character spans, in text order
    pub fn words(&self, text: &str) -> Vec<WordSpan> {
        let mut counter = CharCounter::new(text);
        self.tokenizer
            .words(text)
            .into_iter()
            .map(|token| WordSpan {
                word: text[token.start..token.end].to_string(),
                start: counter.char_at(token.start),
                stop: counter.char_at(token.end),
            })
            .collect()
    }
}
