// Abbreviations that end in a period without ending the sentence

use std::collections::HashSet;

/// Titles that precede names in letters ("Dr. Smith", "Prof. Lee")
pub const TITLE_ABBREVIATIONS: &[&str] = &[
    "Dr.", "Mr.", "Mrs.", "Ms.", "Prof.", "Sr.", "Jr.", "St.",
];

/// Lookup for words whose trailing period is not a sentence terminator.
///
/// Degrees and other abbreviations ("Ph.D.", "U.S.") are not listed: they
/// often close a sentence, and a following lowercase word already keeps the
/// sentence together.
pub struct AbbreviationChecker {
    titles: HashSet<&'static str>,
}

impl AbbreviationChecker {
    pub fn new() -> Self {
        Self {
            titles: TITLE_ABBREVIATIONS.iter().copied().collect(),
        }
    }

    /// Title abbreviation, or a single-letter initial such as "A."
    pub fn is_abbreviation(&self, word: &str) -> bool {
        if self.titles.contains(word) {
            return true;
        }
        let mut chars = word.chars();
        matches!(
            (chars.next(), chars.next(), chars.next()),
            (Some(c), Some('.'), None) if c.is_uppercase()
        )
    }

    /// Whether the last whitespace-delimited word of `text` is an abbreviation
    pub fn ends_with_abbreviation(&self, text: &str) -> bool {
        match text.split_whitespace().last() {
            Some(last_word) => {
                let clean_word = last_word.trim_start_matches(|c: char| {
                    matches!(c, '"' | '\'' | '(' | '[' | '\u{201C}' | '\u{2018}')
                });
                self.is_abbreviation(clean_word)
            }
            None => false,
        }
    }
}

impl Default for AbbreviationChecker {
    fn default() -> Self {
        Self::new()
    }
}
