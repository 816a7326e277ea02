//! File intake: extension allow-list, stored names, streaming to disk.

use callassist_common::{CallAssistError, Result};
use chrono::{DateTime, TimeZone};
use futures_util::{Stream, StreamExt};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Accepted media extensions (lowercase, with dot)
pub const ALLOWED_EXTENSIONS: &[&str] = &[".mp4", ".mov", ".avi", ".webm", ".mkv"];

/// A file written to the upload directory
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRecord {
    /// Generated name on disk
    pub filename: String,

    /// Name sent by the client
    pub original_filename: String,

    /// Bytes on disk
    pub file_size: u64,

    /// Transient location, removed once transcription finishes
    pub file_path: PathBuf,
}

/// Lowercased suffix including the dot, or an empty string
pub fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// Reject names whose extension is not in [`ALLOWED_EXTENSIONS`]
pub fn validate_extension(filename: &str) -> Result<()> {
    let ext = file_extension(filename);
    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Ok(());
    }

    Err(CallAssistError::invalid_input(format!(
        "File type {} not allowed. Allowed types: {}",
        ext,
        ALLOWED_EXTENSIONS.join(", ")
    )))
}

/// Stored name: second-resolution timestamp prefix plus the client's base name
///
/// Two uploads of the same name within one second map to the same path.
pub fn stored_filename<Tz: TimeZone>(original: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    let base = original.rsplit(['/', '\\']).next().unwrap_or(original);
    format!("{}_{}", now.format("%Y%m%d_%H%M%S"), base)
}

/// Stream chunks into `path`, returning the size of the written file
///
/// A partially written file is removed on failure.
pub async fn save_stream<S, B, E>(stream: &mut S, path: &Path) -> Result<u64>
where
    S: Stream<Item = std::result::Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Display,
{
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| CallAssistError::file_system(format!("Error saving file: {}", e)))?;

    let written = async {
        while let Some(chunk) = stream.next().await {
            let chunk = chunk
                .map_err(|e| CallAssistError::invalid_input(format!("Invalid upload stream: {}", e)))?;
            file.write_all(chunk.as_ref())
                .await
                .map_err(|e| CallAssistError::file_system(format!("Error saving file: {}", e)))?;
        }
        file.flush()
            .await
            .map_err(|e| CallAssistError::file_system(format!("Error saving file: {}", e)))?;
        Ok::<(), CallAssistError>(())
    }
    .await;
    drop(file);

    if let Err(e) = written {
        remove_upload(path).await;
        return Err(e);
    }

    let size = tokio::fs::metadata(path)
        .await
        .map_err(|e| CallAssistError::file_system(format!("Error saving file: {}", e)))?
        .len();
    debug!("Saved upload {} ({} bytes)", path.display(), size);

    Ok(size)
}

/// Best-effort removal of a stored upload
pub async fn remove_upload(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("Removed upload {}", path.display()),
        Err(e) => warn!("Failed to remove upload {}: {}", path.display(), e),
    }
}
