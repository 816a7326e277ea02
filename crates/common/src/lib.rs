pub mod config;
pub mod error;
pub mod logger;
pub mod outcome;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{CallAssistError, ErrorKind};
pub use outcome::{StepFailure, StepOutcome};
pub type Result<T> = std::result::Result<T, CallAssistError>;
