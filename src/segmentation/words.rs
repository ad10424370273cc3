// Word and punctuation tokenization with byte spans

use regex_automata::meta::Regex;

use crate::error::{BiasError, Result};

/// A word (letters/digits with interior hyphens or apostrophes) or a single
/// punctuation character
const TOKEN_PATTERN: &str =
    r"[\p{L}\p{M}\p{N}]+(?:['\x{2019}\-][\p{L}\p{M}\p{N}]+)*|[^\s\p{L}\p{M}\p{N}]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Punctuation,
}

/// A token as a byte range into the tokenized text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

pub struct WordTokenizer {
    pattern: Regex,
}

impl WordTokenizer {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(TOKEN_PATTERN).map_err(|e| BiasError::Pattern(e.to_string()))?;
        Ok(Self { pattern })
    }

    /// All tokens in text order, punctuation included
    pub fn tokens(&self, text: &str) -> Vec<RawToken> {
        self.pattern
            .find_iter(text)
            .map(|m| {
                let is_word = text[m.start()..m.end()]
                    .chars()
                    .next()
                    .is_some_and(char::is_alphanumeric);
                RawToken {
                    kind: if is_word { TokenKind::Word } else { TokenKind::Punctuation },
                    start: m.start(),
                    end: m.end(),
                }
            })
            .collect()
    }

    /// Only the word tokens
    pub fn words(&self, text: &str) -> Vec<RawToken> {
        self.tokens(text)
            .into_iter()
            .filter(|t| t.kind == TokenKind::Word)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(text: &'a str, tokens: &[RawToken]) -> Vec<&'a str> {
        tokens.iter().map(|t| &text[t.start..t.end]).collect()
    }

    #[test]
    fn test_hyphenated_and_contracted_words_stay_whole() {
        let tokenizer = WordTokenizer::new().unwrap();
        let text = "She's hard-working, isn't she?";
        assert_eq!(
            texts(text, &tokenizer.words(text)),
            vec!["She's", "hard-working", "isn't", "she"]
        );
    }

    #[test]
    fn test_punctuation_tokens() {
        let tokenizer = WordTokenizer::new().unwrap();
        let text = "Great -- really \"great\".";
        let tokens = tokenizer.tokens(text);
        assert_eq!(
            texts(text, &tokens),
            vec!["Great", "-", "-", "really", "\"", "great", "\"", "."]
        );
        assert_eq!(tokens[1].kind, TokenKind::Punctuation);
        assert_eq!(tokens[3].kind, TokenKind::Word);
    }

    #[test]
    fn test_trailing_hyphen_is_not_part_of_word() {
        let tokenizer = WordTokenizer::new().unwrap();
        let text = "well- known";
        assert_eq!(texts(text, &tokenizer.words(text)), vec!["well", "known"]);
    }

    #[test]
    fn test_accented_words() {
        let tokenizer = WordTokenizer::new().unwrap();
        let text = "na\u{ef}ve r\u{e9}sum\u{e9} 2024";
        assert_eq!(
            texts(text, &tokenizer.words(text)),
            vec!["na\u{ef}ve", "r\u{e9}sum\u{e9}", "2024"]
        );
    }
}
