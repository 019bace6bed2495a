// Resume generation pipeline.
// Prompt assembly, the model call, response validation and orchestration.
// All model calls go through llm_client; all rendering goes through render.

pub mod content;
pub mod error;
pub mod generator;
pub mod handlers;
pub mod prompt_builder;
pub mod prompts;
pub mod response;
pub mod template;
pub mod validation;
