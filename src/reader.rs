use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::document::Document;
use crate::error::{BiasError, Result};

/// Configuration for letter reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Reads in flight at once during a batch
    pub max_concurrent: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            max_concurrent: 8,
        }
    }
}

/// Statistics for one letter read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub bytes_read: u64,
    pub duration_ms: u64,
    pub read_error: Option<String>,
}

/// A letter read from disk; `document` is `None` when the read failed
#[derive(Debug)]
pub struct LetterRead {
    pub document: Option<Document>,
    pub stats: ReadStats,
}

/// Async letter reader producing [`Document`]s
pub struct LetterReader {
    config: ReaderConfig,
}

impl LetterReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read and decode one letter
    ///
    /// Without `fail_fast` an unreadable or undecodable file yields a
    /// `LetterRead` with `read_error` set instead of an error.
    pub async fn read_letter<P: AsRef<Path>>(&self, file_path: P) -> Result<LetterRead> {
        let path = file_path.as_ref();
        let start_time = Instant::now();
        debug!("Starting async read of letter: {}", path.display());

        let outcome = match tokio::fs::read(path).await {
            Ok(bytes) => {
                let bytes_read = bytes.len() as u64;
                Document::from_bytes(bytes, Some(path.to_path_buf())).map(|doc| (doc, bytes_read))
            }
            Err(source) => Err(BiasError::FileAccess {
                path: path.to_path_buf(),
                source,
            }),
        };
        let duration_ms = start_time.elapsed().as_millis() as u64;

        match outcome {
            Ok((document, bytes_read)) => {
                info!(
                    "Read {}: {} bytes in {}ms",
                    path.display(),
                    bytes_read,
                    duration_ms
                );
                Ok(LetterRead {
                    document: Some(document),
                    stats: ReadStats {
                        file_path: path.display().to_string(),
                        bytes_read,
                        duration_ms,
                        read_error: None,
                    },
                })
            }
            Err(e) => {
                warn!("Failed to read letter {}: {}", path.display(), e);
                if self.config.fail_fast {
                    return Err(e);
                }
                Ok(LetterRead {
                    document: None,
                    stats: ReadStats {
                        file_path: path.display().to_string(),
                        bytes_read: 0,
                        duration_ms,
                        read_error: Some(e.to_string()),
                    },
                })
            }
        }
    }

    /// Read many letters concurrently; results keep the input order
    pub async fn read_letters_batch<P: AsRef<Path>>(&self, file_paths: &[P]) -> Result<Vec<LetterRead>> {
        info!("Starting batch read of {} letters", file_paths.len());

        let results: Vec<LetterRead> = stream::iter(file_paths)
            .map(|path| self.read_letter(path))
            .buffered(self.config.max_concurrent.max(1))
            .try_collect()
            .await?;

        let failed = results.iter().filter(|r| r.stats.read_error.is_some()).count();
        info!(
            "Completed batch read: {} letters, {} failed",
            results.len(),
            failed
        );
        Ok(results)
    }
}

/// Read a single letter with default configuration, failing on any error
pub async fn read_letter_async<P: AsRef<Path>>(file_path: P) -> Result<Document> {
    let reader = LetterReader::new(ReaderConfig {
        fail_fast: true,
        ..Default::default()
    });
    let read = reader.read_letter(file_path.as_ref()).await?;
    read.document.ok_or_else(|| BiasError::Decode {
        origin: file_path.as_ref().display().to_string(),
        reason: read.stats.read_error.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::fs;

    async fn create_test_file(dir: &Path, name: &str, content: &[u8]) -> std::path::PathBuf {
        let file_path = dir.join(name);
        fs::write(&file_path, content).await.unwrap();
        file_path
    }

    #[tokio::test]
    async fn test_read_valid_letter() {
        let temp_dir = TempDir::new().unwrap();
        let reader = LetterReader::new(ReaderConfig::default());
        let path = create_test_file(
            temp_dir.path(),
            "letter.txt",
            "Dear Committee,\n\nShe is brilliant. Her work is excellent.".as_bytes(),
        )
        .await;

        let read = reader.read_letter(&path).await.unwrap();
        let document = read.document.unwrap();
        assert_eq!(document.path(), Some(path.as_path()));
        assert_eq!(document.sentences().len(), 3);
        assert!(read.stats.bytes_read > 0);
        assert!(read.stats.read_error.is_none());
    }

    #[tokio::test]
    async fn test_missing_letter() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");

        let lenient = LetterReader::new(ReaderConfig::default());
        let read = lenient.read_letter(&path).await.unwrap();
        assert!(read.document.is_none());
        assert!(read.stats.read_error.is_some());

        let strict = LetterReader::new(ReaderConfig {
            fail_fast: true,
            ..Default::default()
        });
        assert!(matches!(
            strict.read_letter(&path).await,
            Err(BiasError::FileAccess { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_file(temp_dir.path(), "latin1.txt", &[b'S', b'h', 0xE9, b'!']).await;

        let read = LetterReader::new(ReaderConfig::default())
            .read_letter(&path)
            .await
            .unwrap();
        assert!(read.document.is_none());
        assert!(read.stats.read_error.unwrap().contains("latin1.txt"));

        assert!(matches!(
            read_letter_async(&path).await,
            Err(BiasError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_batch_keeps_order_and_isolates_failures() {
        let temp_dir = TempDir::new().unwrap();
        let first = create_test_file(temp_dir.path(), "a.txt", b"She is kind.").await;
        let missing = temp_dir.path().join("b.txt");
        let third = create_test_file(temp_dir.path(), "c.txt", b"He is bright. He is fast.").await;

        let reader = LetterReader::new(ReaderConfig {
            fail_fast: false,
            max_concurrent: 2,
        });
        let results = reader
            .read_letters_batch(&[&first, &missing, &third])
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].document.as_ref().unwrap().sentences().len(), 1);
        assert!(results[1].document.is_none());
        assert_eq!(results[2].document.as_ref().unwrap().sentences().len(), 2);
    }

    #[tokio::test]
    async fn test_batch_fail_fast() {
        let temp_dir = TempDir::new().unwrap();
        let good = create_test_file(temp_dir.path(), "a.txt", b"She is kind.").await;
        let missing = temp_dir.path().join("missing.txt");

        let reader = LetterReader::new(ReaderConfig {
            fail_fast: true,
            ..Default::default()
        });
        assert!(reader.read_letters_batch(&[&good, &missing]).await.is_err());
    }
}
