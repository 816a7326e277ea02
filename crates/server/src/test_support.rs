//! Service doubles and request builders shared by the server tests.

use async_trait::async_trait;
use callassist_common::{AppConfig, CallAssistError, Result};
use callassist_llm::{EmailDrafter, GenerateRequest, LlmClient};
use callassist_stt::{Transcriber, Transcript};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::state::AppState;
use crate::workflow::WorkflowExecutor;

/// Transcriber returning a canned result and recording the paths it saw
pub struct FakeTranscriber {
    result: std::result::Result<Transcript, String>,
    pub paths: Arc<Mutex<Vec<PathBuf>>>,
}

impl FakeTranscriber {
    pub fn ok(text: &str, duration: Option<f64>) -> Self {
        Self {
            result: Ok(Transcript::new(text, duration)),
            paths: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            paths: Arc::default(),
        }
    }
}

#[async_trait]
impl Transcriber for FakeTranscriber {
    async fn transcribe(&self, path: &Path) -> Result<Transcript> {
        self.paths.lock().unwrap().push(path.to_path_buf());
        assert!(path.exists(), "upload must exist while transcribing");
        self.result.clone().map_err(CallAssistError::transcription)
    }
}

/// LLM returning a canned reply and recording prompts
pub struct FakeLlm {
    reply: std::result::Result<String, String>,
    pub calls: Arc<Mutex<usize>>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl FakeLlm {
    pub fn ok(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: Arc::default(),
            prompts: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: Arc::default(),
            prompts: Arc::default(),
        }
    }
}

#[async_trait]
impl LlmClient for FakeLlm {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        *self.calls.lock().unwrap() += 1;
        self.prompts.lock().unwrap().push(request.prompt);
        self.reply.clone().map_err(CallAssistError::generation)
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

/// App state over the given doubles, uploading into `upload_dir`
pub fn app_state(upload_dir: &Path, transcriber: FakeTranscriber, llm: FakeLlm) -> Arc<AppState> {
    let config = AppConfig {
        upload_dir: upload_dir.to_path_buf(),
        log_dir: upload_dir.join("logs"),
        ..AppConfig::default()
    };
    let workflow = WorkflowExecutor::new(
        Arc::new(transcriber),
        Arc::new(EmailDrafter::new(Arc::new(llm), config.llm_max_tokens)),
    );
    Arc::new(AppState::new(config, Arc::new(workflow)).unwrap())
}

pub const BOUNDARY: &str = "----callassist-test-boundary";

/// Build a `multipart/form-data` body; a part with a filename is a file part
pub fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
            }
        }
        body.extend_from_slice(content.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
