//! Immutable letter text with memoized sentence and word segmentation.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use tracing::debug;

use crate::error::{BiasError, Result};
use crate::segmentation::{char_span_to_bytes, Segmenter, Sentence, TextSpan, WordSpan};

const TEXT_ORIGIN: &str = "<text>";

/// A letter to analyze
///
/// Segmentation is computed on first access and cached. Offsets reported by
/// [`Document::words_with_indices`] and [`Document::sentence_spans`] are
/// character (not byte) offsets into [`Document::text`].
pub struct Document {
    text: String,
    path: Option<PathBuf>,
    sentences: OnceLock<Vec<Sentence>>,
    words: OnceLock<Vec<WordSpan>>,
    segmenter: &'static Segmenter,
}

impl Document {
    /// Build a document from in-memory text
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        check_is_text(&text, TEXT_ORIGIN)?;
        Self::build(text, None)
    }

    /// Read a whole file and build a document from its contents
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| BiasError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let text = decode_text(bytes, &path.display().to_string())?;
        Self::build(text, Some(path.to_path_buf()))
    }

    /// Build from raw bytes already read by the caller (async readers use this)
    pub fn from_bytes(bytes: Vec<u8>, path: Option<PathBuf>) -> Result<Self> {
        let origin = path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| TEXT_ORIGIN.to_string());
        let text = decode_text(bytes, &origin)?;
        Self::build(text, path)
    }

    fn build(text: String, path: Option<PathBuf>) -> Result<Self> {
        let segmenter = Segmenter::shared()?;
        debug!(
            "Created document from {} ({} bytes)",
            path.as_ref().map_or_else(|| TEXT_ORIGIN.to_string(), |p| p.display().to_string()),
            text.len()
        );
        Ok(Self {
            text,
            path,
            sentences: OnceLock::new(),
            words: OnceLock::new(),
            segmenter,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Source file, when the document was read from disk
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Normalized sentences; none of them contains a newline
    pub fn sentences(&self) -> Vec<&str> {
        self.sentence_entries().iter().map(|s| s.text.as_str()).collect()
    }

    /// Character spans of the sentences in the original text
    pub fn sentence_spans(&self) -> Vec<TextSpan> {
        self.sentence_entries().iter().map(|s| s.span).collect()
    }

    pub fn sentence_entries(&self) -> &[Sentence] {
        self.sentences.get_or_init(|| self.segmenter.sentences(&self.text))
    }

    pub fn words(&self) -> Vec<&str> {
        self.words_with_indices().iter().map(|w| w.word.as_str()).collect()
    }

    /// Words with `[start, stop)` character offsets, in text order
    pub fn words_with_indices(&self) -> &[WordSpan] {
        self.words.get_or_init(|| self.segmenter.words(&self.text))
    }

    /// Source substring for a character span, `None` if out of range
    pub fn slice(&self, start: usize, stop: usize) -> Option<&str> {
        let (byte_start, byte_stop) = char_span_to_bytes(&self.text, start, stop)?;
        Some(&self.text[byte_start..byte_stop])
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("path", &self.path)
            .field("len", &self.text.len())
            .finish_non_exhaustive()
    }
}

impl FromStr for Document {
    type Err = BiasError;

    fn from_str(text: &str) -> Result<Self> {
        Document::new(text)
    }
}

impl TryFrom<String> for Document {
    type Error = BiasError;

    fn try_from(text: String) -> Result<Self> {
        Document::new(text)
    }
}

fn decode_text(bytes: Vec<u8>, origin: &str) -> Result<String> {
    let text = String::from_utf8(bytes).map_err(|e| BiasError::Decode {
        origin: origin.to_string(),
        reason: format!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to()),
    })?;
    check_is_text(&text, origin)?;
    Ok(text)
}

/// Best-effort binary detection: valid UTF-8 can still carry NUL bytes
fn check_is_text(text: &str, origin: &str) -> Result<()> {
    if let Some(pos) = text.find('\0') {
        return Err(BiasError::Decode {
            origin: origin.to_string(),
            reason: format!("NUL byte at offset {pos}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LETTER: &str = "Dear Committee,\n\nI am pleased to recommend Dr. Jane Smith.\nShe is\nbrilliant and her research is groundbreaking.\n\nSincerely,\nProf. Lee";

    #[test]
    fn test_sentences_have_no_newlines() {
        let doc = Document::new(LETTER).unwrap();
        let sentences = doc.sentences();
        assert_eq!(sentences.len(), 4);
        assert_eq!(sentences[0], "Dear Committee,");
        assert_eq!(sentences[1], "I am pleased to recommend Dr. Jane Smith.");
        assert_eq!(sentences[2], "She is brilliant and her research is groundbreaking.");
        assert_eq!(sentences[3], "Sincerely, Prof. Lee");
        assert!(sentences.iter().all(|s| !s.contains('\n')));
    }

    #[test]
    fn test_words_and_indices_agree() {
        let doc = Document::new(LETTER).unwrap();
        let words = doc.words();
        let indexed = doc.words_with_indices();
        assert_eq!(words.len(), indexed.len());
        for (word, span) in words.iter().zip(indexed) {
            assert_eq!(*word, span.word);
            assert_eq!(doc.slice(span.start, span.stop), Some(*word));
        }
    }

    #[test]
    fn test_sentence_spans_map_back_to_source() {
        let doc = Document::new(LETTER).unwrap();
        let spans = doc.sentence_spans();
        assert_eq!(
            doc.slice(spans[2].start, spans[2].stop),
            Some("She is\nbrilliant and her research is groundbreaking.")
        );
    }

    #[test]
    fn test_from_path_matches_from_string() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(LETTER.as_bytes()).unwrap();

        let from_file = Document::from_path(file.path()).unwrap();
        let from_text: Document = LETTER.parse().unwrap();

        assert_eq!(from_file.sentences(), from_text.sentences());
        assert_eq!(from_file.words(), from_text.words());
        assert_eq!(from_file.words_with_indices(), from_text.words_with_indices());
        assert_eq!(from_file.path(), Some(file.path()));
        assert_eq!(from_text.path(), None);
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let err = Document::from_path("/definitely/not/here/letter.txt").unwrap_err();
        assert!(matches!(err, BiasError::FileAccess { .. }));
    }

    #[test]
    fn test_binary_content_is_decode_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE, 0x00, 0x41]).unwrap();
        let err = Document::from_path(file.path()).unwrap_err();
        assert!(matches!(err, BiasError::Decode { .. }));

        let err = Document::new("text\0with nul").unwrap_err();
        assert!(matches!(err, BiasError::Decode { ref origin, .. } if origin == "<text>"));
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new("").unwrap();
        assert!(doc.sentences().is_empty());
        assert!(doc.words().is_empty());
        assert_eq!(doc.slice(0, 0), Some(""));
    }
}
