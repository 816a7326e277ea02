use callassist_common::{AppConfig, Result};
use std::sync::Arc;

use crate::workflow::WorkflowExecutor;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Upload → transcript → email pipeline
    pub workflow: Arc<WorkflowExecutor>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: AppConfig, workflow: Arc<WorkflowExecutor>) -> Result<Self> {
        config.ensure_directories()?;

        Ok(Self { config, workflow })
    }
}
