use async_trait::async_trait;
use callassist_common::Result;
use std::path::Path;

use crate::types::Transcript;

/// Speech-to-text capability
///
/// Implementations block (asynchronously) until the service reports a
/// terminal status for the file.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the media file at `path`
    async fn transcribe(&self, path: &Path) -> Result<Transcript>;
}
