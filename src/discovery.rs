use futures::stream::{self, Stream, StreamExt};
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{BiasError, Result};

/// Configuration for letter discovery behavior
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Extension of letter files inside directories
    pub extension: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            extension: "txt".to_string(),
        }
    }
}

/// A discovered letter path, or a path that could not be walked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLetter {
    pub path: PathBuf,
    pub error: Option<String>,
}

/// Streams letter files found under the given paths.
///
/// Files named directly are yielded as-is whatever their extension;
/// directories are walked recursively for files with `config.extension`, in
/// file-name order.
pub fn discover_letters(
    roots: Vec<PathBuf>,
    config: DiscoveryConfig,
) -> impl Stream<Item = Result<DiscoveredLetter>> {
    let (tx, rx) = mpsc::unbounded_channel();

    // WHY: walkdir is blocking; traversal runs off the async workers and streams results back
    tokio::task::spawn_blocking(move || {
        let mut found = 0usize;
        for root in &roots {
            match walk_root(root, &config, &tx) {
                Ok(count) => found += count,
                Err(()) => {
                    debug!("Discovery stopped early");
                    return;
                }
            }
        }
        info!("Discovery completed: {} letters under {} paths", found, roots.len());
    });

    stream::unfold(rx, |mut receiver| async move {
        receiver.recv().await.map(|result| (result, receiver))
    })
}

/// Walk one root; `Err(())` means discovery must stop
fn walk_root(
    root: &Path,
    config: &DiscoveryConfig,
    tx: &mpsc::UnboundedSender<Result<DiscoveredLetter>>,
) -> std::result::Result<usize, ()> {
    debug!("Walking {}", root.display());
    let mut count = 0;

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let item = match entry {
            Ok(entry) => {
                let wanted = entry.file_type().is_file()
                    && (entry.depth() == 0 || has_extension(entry.path(), &config.extension));
                if !wanted {
                    continue;
                }
                count += 1;
                debug!("Found letter: {}", entry.path().display());
                Ok(DiscoveredLetter {
                    path: entry.into_path(),
                    error: None,
                })
            }
            Err(e) => {
                let path = e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                let source: io::Error = e.into();
                let error = BiasError::FileAccess { path: path.clone(), source };
                warn!("Discovery error: {}", error);
                if config.fail_fast {
                    let _ = tx.send(Err(error));
                    return Err(());
                }
                Ok(DiscoveredLetter {
                    path,
                    error: Some(error.to_string()),
                })
            }
        };
        if tx.send(item).is_err() {
            debug!("Receiver dropped, stopping discovery");
            return Err(());
        }
    }
    Ok(count)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Collect every discovered letter, stopping at the first fail-fast error
pub async fn collect_discovered_letters(
    roots: Vec<PathBuf>,
    config: DiscoveryConfig,
) -> Result<Vec<DiscoveredLetter>> {
    let mut letters = Vec::new();
    let mut stream = Box::pin(discover_letters(roots, config));
    while let Some(result) = stream.next().await {
        letters.push(result?);
    }
    Ok(letters)
}
