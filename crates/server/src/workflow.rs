use callassist_common::StepOutcome;
use callassist_llm::{Addressees, DraftedEmail, EmailDrafter};
use callassist_stt::{Transcript, Transcriber};
use std::sync::Arc;
use tracing::{info, warn};

use crate::intake::{self, UploadRecord};

/// Workflow execution steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    Transcription,
    EmailGeneration,
}

/// Everything one upload produced
///
/// `email` is `None` exactly when transcription failed.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub upload: UploadRecord,
    pub transcription: StepOutcome<Transcript>,
    pub email: Option<StepOutcome<DraftedEmail>>,
}

impl PipelineReport {
    /// First step that failed, if any
    pub fn failed_step(&self) -> Option<WorkflowStep> {
        if !self.transcription.is_completed() {
            return Some(WorkflowStep::Transcription);
        }
        match &self.email {
            Some(outcome) if !outcome.is_completed() => Some(WorkflowStep::EmailGeneration),
            _ => None,
        }
    }
}

/// Workflow executor that runs transcription then email drafting
pub struct WorkflowExecutor {
    transcriber: Arc<dyn Transcriber>,
    drafter: Arc<EmailDrafter>,
}

impl WorkflowExecutor {
    /// Create new workflow executor
    pub fn new(transcriber: Arc<dyn Transcriber>, drafter: Arc<EmailDrafter>) -> Self {
        Self {
            transcriber,
            drafter,
        }
    }

    /// Execute the pipeline for a stored upload
    ///
    /// Step failures are captured in the report, never returned. The stored
    /// file is deleted once transcription reaches a terminal outcome.
    #[tracing::instrument(skip_all, fields(file = %upload.filename))]
    pub async fn execute(&self, upload: UploadRecord, names: &Addressees) -> PipelineReport {
        info!(
            "Starting transcription - Size: {} bytes",
            upload.file_size
        );
        let transcription: StepOutcome<Transcript> =
            self.transcriber.transcribe(&upload.file_path).await.into();

        intake::remove_upload(&upload.file_path).await;

        let email = match transcription.completed() {
            Some(transcript) => {
                info!(
                    "Transcription completed - Words: {}, Duration: {:?}",
                    transcript.word_count, transcript.duration
                );
                let outcome: StepOutcome<DraftedEmail> =
                    self.drafter.draft(&transcript.text, names).await.into();
                if let Some(failure) = outcome.failure() {
                    warn!("Email generation failed: {}", failure.message);
                }
                Some(outcome)
            }
            None => {
                if let Some(failure) = transcription.failure() {
                    warn!("Transcription failed ({:?}): {}", failure.kind, failure.message);
                }
                None
            }
        };

        let report = PipelineReport {
            upload,
            transcription,
            email,
        };
        info!("Pipeline finished - Failed step: {:?}", report.failed_step());

        report
    }
}
