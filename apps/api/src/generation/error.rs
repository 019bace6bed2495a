use thiserror::Error;

use crate::generation::template::PromptError;
use crate::llm_client::LlmError;
use crate::render::pdf::RenderError;

/// Every way one resume generation can fail. Nothing is retried or degraded:
/// the first failure ends the run and is returned to the caller.
#[derive(Debug, Error)]
pub enum ResumeError {
    /// Network, auth, quota or empty-completion failure from the model call.
    #[error("text generation failed: {0}")]
    GenerationBackend(#[from] LlmError),

    /// The completion is not JSON even after fence stripping.
    #[error("model output is not valid JSON: {source}")]
    MalformedResponse {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    /// The completion parsed but breaks the resume contract.
    #[error("model output violates the resume contract at `{field}`: {reason}")]
    ContractViolation { field: String, reason: String },

    #[error("PDF rendering failed: {0}")]
    Rendering(#[from] RenderError),

    #[error("prompt template error: {0}")]
    Prompt(#[from] PromptError),
}

impl ResumeError {
    pub fn contract(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ResumeError::ContractViolation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
