use serde::Serialize;

/// Call assistant error types
#[derive(Debug, thiserror::Error)]
pub enum CallAssistError {
    /// Transcription service error
    #[error("Transcription error: {0}")]
    Transcription(String),

    /// Language model / email generation error
    #[error("Generation error: {0}")]
    Generation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system error
    #[error("File system error: {0}")]
    FileSystem(String),

    /// Network/HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification of a failure, reported alongside step errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transcription,
    Generation,
    Config,
    FileSystem,
    Network,
    InvalidInput,
    Internal,
}

impl CallAssistError {
    /// Create transcription error
    pub fn transcription<S: Into<String>>(msg: S) -> Self {
        Self::Transcription(msg.into())
    }

    /// Create generation error
    pub fn generation<S: Into<String>>(msg: S) -> Self {
        Self::Generation(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create file system error
    pub fn file_system<S: Into<String>>(msg: S) -> Self {
        Self::FileSystem(msg.into())
    }

    /// Create network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transcription(_) => ErrorKind::Transcription,
            Self::Generation(_) => ErrorKind::Generation,
            Self::Config(_) => ErrorKind::Config,
            Self::FileSystem(_) | Self::Io(_) => ErrorKind::FileSystem,
            Self::Network(_) => ErrorKind::Network,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Other(_) => ErrorKind::Internal,
        }
    }

    /// Message without the variant prefix, as shown to API callers
    pub fn detail(&self) -> String {
        match self {
            Self::Transcription(msg)
            | Self::Generation(msg)
            | Self::Config(msg)
            | Self::FileSystem(msg)
            | Self::Network(msg)
            | Self::InvalidInput(msg) => msg.clone(),
            Self::Io(e) => e.to_string(),
            Self::Other(e) => e.to_string(),
        }
    }
}

// HTTP response conversion (used by the server's ResponseError impl)
impl CallAssistError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::Config(_) => 500,
            Self::Transcription(_) => 500,
            Self::Generation(_) => 500,
            Self::FileSystem(_) => 500,
            Self::Network(_) => 503,
            Self::Io(_) => 500,
            Self::Other(_) => 500,
        }
    }
}
