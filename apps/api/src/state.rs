use std::time::Duration;

use crate::config::Config;
use crate::generation::generator::ResumeGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pipeline with the model client and browser engine already wired in.
    pub generator: ResumeGenerator,
    pub config: Config,
}

impl AppState {
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.config.generation_timeout_secs)
    }
}
