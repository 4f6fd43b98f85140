//! Writes tool output to disk as Markdown.

use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::domain::errors::{DomainError, DomainResult};

/// Extension forced onto every saved file.
pub const OUTPUT_EXTENSION: &str = "md";

/// `name` with its extension replaced by `.md`.
///
/// A trailing dot is an empty extension, so `a.` becomes `a.md`.
pub fn normalize_path(name: &str) -> PathBuf {
    Path::new(name).with_extension(OUTPUT_EXTENSION)
}

/// Write `content` to `name` (extension forced to `.md`).
///
/// Empty names and empty content are rejected before the filesystem is
/// touched. Returns the path actually written.
pub async fn write_file(name: &str, content: &str) -> DomainResult<PathBuf> {
    if name.is_empty() {
        return Err(DomainError::InvalidArgument(
            "File name is required".to_string(),
        ));
    }
    if content.is_empty() {
        return Err(DomainError::InvalidArgument(
            "File content is required".to_string(),
        ));
    }

    let path = normalize_path(name);
    let mut file = tokio::fs::File::create(&path).await?;
    file.write_all(content.as_bytes()).await?;
    file.flush().await?;

    tracing::info!(path = %path.display(), bytes = content.len(), "Saved file");
    Ok(path)
}
