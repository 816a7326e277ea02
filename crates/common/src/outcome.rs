//! Terminal outcome of one pipeline step.
//!
//! A step either completes with its payload or fails with a classified
//! message; there is no state in between.

use crate::error::{CallAssistError, ErrorKind};

/// Failure side of a [`StepOutcome`]
#[derive(Debug, Clone, PartialEq)]
pub struct StepFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<CallAssistError> for StepFailure {
    fn from(err: CallAssistError) -> Self {
        Self {
            kind: err.kind(),
            message: err.detail(),
        }
    }
}

/// Result of a single step: `Completed(payload)` or `Failed(kind, message)`
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome<T> {
    Completed(T),
    Failed(StepFailure),
}

impl<T> StepOutcome<T> {
    /// Wire status tag: `"completed"` or `"error"`
    pub fn status(&self) -> &'static str {
        match self {
            Self::Completed(_) => "completed",
            Self::Failed(_) => "error",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn completed(&self) -> Option<&T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&StepFailure> {
        match self {
            Self::Completed(_) => None,
            Self::Failed(failure) => Some(failure),
        }
    }

    pub fn into_completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Failed(_) => None,
        }
    }
}

impl<T> From<Result<T, CallAssistError>> for StepOutcome<T> {
    fn from(result: Result<T, CallAssistError>) -> Self {
        match result {
            Ok(value) => Self::Completed(value),
            Err(err) => Self::Failed(err.into()),
        }
    }
}
