use serde::{Deserialize, Serialize};

/// Completed transcription of one uploaded file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Full transcribed text
    pub text: String,

    /// Audio duration in seconds, when the service reports it
    pub duration: Option<f64>,

    /// Whitespace-delimited word count of `text`
    pub word_count: usize,

    /// Detected language (ISO code)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Transcript {
    /// Create a new transcript, deriving the word count from the text
    pub fn new(text: impl Into<String>, duration: Option<f64>) -> Self {
        let text = text.into();
        let word_count = count_words(&text);
        Self {
            text,
            duration,
            word_count,
            language: None,
        }
    }

    /// Set detected language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Count words by splitting on whitespace
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Transcription options sent with every request
#[derive(Debug, Clone)]
pub struct TranscriptionOptions {
    /// Speech models in order of preference
    pub speech_models: Vec<String>,

    /// Detect the spoken language automatically
    pub language_detection: bool,
}

impl Default for TranscriptionOptions {
    fn default() -> Self {
        Self {
            speech_models: vec!["universal-3-pro".to_string(), "universal-2".to_string()],
            language_detection: true,
        }
    }
}

impl TranscriptionOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the speech model preference list
    pub fn with_speech_models(mut self, models: Vec<String>) -> Self {
        self.speech_models = models;
        self
    }

    /// Enable or disable language detection
    pub fn language_detection(mut self, enable: bool) -> Self {
        self.language_detection = enable;
        self
    }
}
