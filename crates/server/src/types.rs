use callassist_llm::FollowUpEmail;
use callassist_stt::Transcript;
use serde::{Deserialize, Serialize};

use crate::workflow::PipelineReport;

/// Transcript fields echoed to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionSummary {
    pub text: String,
    pub duration: Option<f64>,
    pub word_count: usize,
}

impl From<&Transcript> for TranscriptionSummary {
    fn from(transcript: &Transcript) -> Self {
        Self {
            text: transcript.text.clone(),
            duration: transcript.duration,
            word_count: transcript.word_count,
        }
    }
}

/// Upload response
///
/// Pipeline failures are reported here through the `*_error` fields;
/// the HTTP status stays 200.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,

    /// Generated name the file was stored under
    pub filename: String,

    pub original_filename: String,

    pub file_size: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<TranscriptionSummary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription_error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<FollowUpEmail>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_error: Option<String>,
}

impl From<PipelineReport> for UploadResponse {
    fn from(report: PipelineReport) -> Self {
        let upload = report.upload;
        let mut response = Self {
            message: String::new(),
            filename: upload.filename,
            original_filename: upload.original_filename,
            file_size: upload.file_size,
            transcription: report.transcription.completed().map(TranscriptionSummary::from),
            transcription_error: report.transcription.failure().map(|f| f.message.clone()),
            email: None,
            email_error: None,
        };

        response.message = match report.email {
            None => "File uploaded but transcription failed".to_string(),
            Some(outcome) => {
                response.email_error = outcome.failure().map(|f| f.message.clone());
                match outcome.into_completed() {
                    Some(drafted) => {
                        response.email = Some(drafted.email);
                        "File uploaded, transcribed, and email generated successfully".to_string()
                    }
                    None => "File uploaded and transcribed, but email generation failed".to_string(),
                }
            }
        };

        response
    }
}

/// Static liveness payload for `/`
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// Static liveness payload for `/health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Error body for rejected requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
