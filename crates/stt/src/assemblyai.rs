//! AssemblyAI hosted transcription client
//!
//! Uploads the local file, creates a transcript job and polls it until the
//! service reports `completed` or `error`.

use async_trait::async_trait;
use callassist_common::{AppConfig, CallAssistError, Result};
use reqwest::{Body, Client};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use crate::transcriber::Transcriber;
use crate::types::{Transcript, TranscriptionOptions};

/// Limit for the JSON create/poll calls; media uploads are unbounded
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Response of `POST /v2/upload`
#[derive(Debug, Deserialize)]
struct UploadResponse {
    upload_url: String,
}

/// Body of `POST /v2/transcript`
#[derive(Debug, Serialize)]
struct TranscriptRequest<'a> {
    audio_url: &'a str,
    speech_models: &'a [String],
    language_detection: bool,
}

/// Transcript job status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptStatus {
    Queued,
    Processing,
    Completed,
    Error,
}

/// Transcript job as returned by create and poll calls
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptResponse {
    pub id: String,
    pub status: TranscriptStatus,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio_duration: Option<f64>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TranscriptResponse {
    /// `Ok(None)` while the job is still running
    pub fn into_transcript(self) -> Result<Option<Transcript>> {
        match self.status {
            TranscriptStatus::Queued | TranscriptStatus::Processing => Ok(None),
            TranscriptStatus::Error => Err(CallAssistError::transcription(format!(
                "Transcription failed: {}",
                self.error.unwrap_or_else(|| "unknown error".to_string())
            ))),
            TranscriptStatus::Completed => {
                let transcript =
                    Transcript::new(self.text.unwrap_or_default(), self.audio_duration);
                Ok(Some(match self.language_code {
                    Some(code) => transcript.with_language(code),
                    None => transcript,
                }))
            }
        }
    }
}

/// AssemblyAI API client
#[derive(Debug, Clone)]
pub struct AssemblyAiClient {
    base_url: String,
    api_key: String,
    options: TranscriptionOptions,
    poll_interval: Duration,
    client: Client,
}

impl AssemblyAiClient {
    /// Create new AssemblyAI client
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        options: TranscriptionOptions,
        poll_interval: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!(
            "AssemblyAI client initialized: {} (models: {})",
            base_url,
            options.speech_models.join(", ")
        );
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            options,
            poll_interval,
            client,
        })
    }

    /// Create client from application configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let options = TranscriptionOptions::new()
            .with_speech_models(config.speech_models.clone())
            .language_detection(config.language_detection);

        Self::new(
            &config.assemblyai_base_url,
            &config.assemblyai_api_key,
            options,
            Duration::from_millis(config.transcript_poll_interval_ms),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Stream a local media file to the service, returning its upload URL
    async fn upload(&self, path: &Path) -> Result<String> {
        let file = tokio::fs::File::open(path).await.map_err(|e| {
            CallAssistError::file_system(format!("Failed to read {}: {}", path.display(), e))
        })?;
        if let Ok(metadata) = file.metadata().await {
            debug!("Uploading {} bytes to AssemblyAI", metadata.len());
        }

        let response = self
            .client
            .post(self.url("/v2/upload"))
            .header("authorization", &self.api_key)
            .header("content-type", "application/octet-stream")
            .body(Body::wrap_stream(ReaderStream::new(file)))
            .send()
            .await
            .map_err(|e| CallAssistError::network(format!("Failed to upload file: {}", e)))?;

        let response = check_status(response).await?;
        let result: UploadResponse = response.json().await.map_err(|e| {
            CallAssistError::transcription(format!("Failed to parse upload response: {}", e))
        })?;

        Ok(result.upload_url)
    }

    /// Create a transcript job for an uploaded file
    async fn create_transcript(&self, audio_url: &str) -> Result<TranscriptResponse> {
        let request = TranscriptRequest {
            audio_url,
            speech_models: &self.options.speech_models,
            language_detection: self.options.language_detection,
        };

        let response = self
            .client
            .post(self.url("/v2/transcript"))
            .header("authorization", &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                CallAssistError::network(format!("Failed to create transcript: {}", e))
            })?;

        parse_transcript(check_status(response).await?).await
    }

    /// Fetch the current state of a transcript job
    async fn get_transcript(&self, id: &str) -> Result<TranscriptResponse> {
        let response = self
            .client
            .get(self.url(&format!("/v2/transcript/{}", id)))
            .header("authorization", &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| CallAssistError::network(format!("Failed to poll transcript: {}", e)))?;

        parse_transcript(check_status(response).await?).await
    }
}

#[async_trait]
impl Transcriber for AssemblyAiClient {
    async fn transcribe(&self, path: &Path) -> Result<Transcript> {
        let audio_url = self.upload(path).await?;
        let mut job = self.create_transcript(&audio_url).await?;
        info!("Transcript job created: {} ({:?})", job.id, job.status);

        loop {
            let id = job.id.clone();
            if let Some(transcript) = job.into_transcript()? {
                info!(
                    "Transcript {} completed - Words: {}, Duration: {:?}",
                    id, transcript.word_count, transcript.duration
                );
                return Ok(transcript);
            }

            tokio::time::sleep(self.poll_interval).await;
            job = self.get_transcript(&id).await?;
            debug!("Transcript {} status: {:?}", id, job.status);
        }
    }
}

/// Turn a non-2xx response into a network error carrying the body
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(CallAssistError::network(format!(
        "AssemblyAI API error {}: {}",
        status, body
    )))
}

async fn parse_transcript(response: reqwest::Response) -> Result<TranscriptResponse> {
    response.json().await.map_err(|e| {
        CallAssistError::transcription(format!("Failed to parse transcript response: {}", e))
    })
}
