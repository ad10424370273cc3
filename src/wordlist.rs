//! Word lists: one entry per line, trimmed, blank lines ignored.
//!
//! Entries are single words. Documents never yield a word containing
//! whitespace, so multi-word lines are dropped with a warning.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use tracing::{debug, info, warn};

use crate::error::{BiasError, Result};

const EMBEDDED_EFFORT_WORDS: &str = include_str!("effort/effort_words.wordlist");
const EMBEDDED_ACCOMPLISHMENT_WORDS: &str = include_str!("effort/accomplishment_words.wordlist");

/// An immutable set of words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    entries: HashSet<String>,
}

impl WordList {
    /// Parse wordlist text; entries keep their case
    pub fn parse(contents: &str) -> Self {
        let entries = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| {
                let single = !line.contains(char::is_whitespace);
                if !single {
                    warn!("Skipping multi-word word list entry {:?}", line);
                }
                single
            })
            .map(str::to_string)
            .collect();
        Self { entries }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| BiasError::WordList {
            path: path.to_path_buf(),
            source: Box::new(BiasError::FileAccess {
                path: path.to_path_buf(),
                source,
            }),
        })?;
        let list = Self::parse(&contents);
        info!("Loaded {} entries from word list {}", list.len(), path.display());
        Ok(list)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for WordList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// The effort and accomplishment vocabularies used by the effort detector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    pub effort: WordList,
    pub accomplishment: WordList,
}

impl Lexicon {
    pub fn new(effort: WordList, accomplishment: WordList) -> Self {
        Self {
            effort,
            accomplishment,
        }
    }

    /// Lists compiled into the binary, parsed once per process
    pub fn embedded() -> Arc<Lexicon> {
        static EMBEDDED: OnceLock<Arc<Lexicon>> = OnceLock::new();
        EMBEDDED
            .get_or_init(|| {
                let lexicon = Lexicon::new(
                    WordList::parse(EMBEDDED_EFFORT_WORDS),
                    WordList::parse(EMBEDDED_ACCOMPLISHMENT_WORDS),
                );
                debug!(
                    "Parsed embedded word lists: {} effort, {} accomplishment",
                    lexicon.effort.len(),
                    lexicon.accomplishment.len()
                );
                Arc::new(lexicon)
            })
            .clone()
    }

    /// Embedded lists with optional on-disk replacements for either list
    pub fn with_overrides(
        effort_path: Option<&Path>,
        accomplishment_path: Option<&Path>,
    ) -> Result<Arc<Lexicon>> {
        if effort_path.is_none() && accomplishment_path.is_none() {
            return Ok(Self::embedded());
        }
        let embedded = Self::embedded();
        let effort = match effort_path {
            Some(path) => WordList::from_path(path)?,
            None => embedded.effort.clone(),
        };
        let accomplishment = match accomplishment_path {
            Some(path) => WordList::from_path(path)?,
            None => embedded.accomplishment.clone(),
        };
        Ok(Arc::new(Lexicon::new(effort, accomplishment)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_trims_and_skips_blank_lines() {
        let list = WordList::parse("diligent  \n\n  thorough\r\nhard-working\n");
        assert_eq!(list.len(), 3);
        assert!(list.contains("diligent"));
        assert!(list.contains("thorough"));
        assert!(list.contains("hard-working"));
        assert!(!list.contains(""));
    }

    #[test]
    fn test_multi_word_entries_are_skipped() {
        let list = WordList::parse("work ethic\nhard working\ttoo\ndiligent\n");
        assert_eq!(list.len(), 1);
        assert!(list.contains("diligent"));
        assert!(!list.contains("work ethic"));
    }

    #[test]
    fn test_embedded_lists_are_populated() {
        let lexicon = Lexicon::embedded();
        assert!(lexicon.effort.contains("hard-working"));
        assert!(lexicon.effort.contains("diligent"));
        assert!(lexicon.accomplishment.contains("groundbreaking"));
        assert!(!lexicon.effort.contains("groundbreaking"));
        assert_eq!(
            lexicon.effort.len(),
            EMBEDDED_EFFORT_WORDS.lines().filter(|l| !l.trim().is_empty()).count()
        );
        assert!(Arc::ptr_eq(&lexicon, &Lexicon::embedded()));
    }

    #[test]
    fn test_override_replaces_only_given_list() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "plucky").unwrap();

        let lexicon = Lexicon::with_overrides(Some(file.path()), None).unwrap();
        assert!(lexicon.effort.contains("plucky"));
        assert!(!lexicon.effort.contains("diligent"));
        assert!(lexicon.accomplishment.contains("groundbreaking"));
    }

    #[test]
    fn test_missing_override_is_word_list_error() {
        let err = Lexicon::with_overrides(None, Some(Path::new("/no/such/list.wordlist")))
            .unwrap_err();
        assert!(matches!(err, BiasError::WordList { .. }));
    }
}
