//! Resume Generation: orchestrates the full pipeline for one candidate.
//!
//! Flow: build prompts → model call → validate + fidelity check →
//!       render HTML → print PDF → return `{pdf, html}`.
//!
//! Strictly sequential, no shared mutable state. Concurrent calls are
//! independent; any bound on concurrency or latency belongs to the caller.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use crate::generation::content::generate_raw_content;
use crate::generation::error::ResumeError;
use crate::generation::prompt_builder::build_prompts;
use crate::generation::response::{parse_generated_content, verify_against_request};
use crate::llm_client::TextGenerationClient;
use crate::models::resume::{GeneratedResumeContent, ResumeArtifact, ResumeRequest};
use crate::render::{render_pdf, render_resume_html, BrowserEngine};

/// The generation pipeline with its two external capabilities injected.
#[derive(Clone)]
pub struct ResumeGenerator {
    llm: Arc<dyn TextGenerationClient>,
    browser: Arc<dyn BrowserEngine>,
}

impl ResumeGenerator {
    pub fn new(llm: Arc<dyn TextGenerationClient>, browser: Arc<dyn BrowserEngine>) -> Self {
        Self { llm, browser }
    }

    /// Runs the whole pipeline. Any failure aborts the run; no partial
    /// resume is ever returned.
    pub async fn generate(&self, request: &ResumeRequest) -> Result<ResumeArtifact, ResumeError> {
        let content = self.generate_content(request).await?;

        let html = render_resume_html(request, &content);
        info!("Rendered resume HTML ({} bytes)", html.len());

        let pdf = render_pdf(self.browser.as_ref(), &html).await?;
        info!("Captured resume PDF ({} bytes)", pdf.len());

        Ok(ResumeArtifact {
            pdf: Bytes::from(pdf),
            html,
        })
    }

    /// Prompt → model → validated content, without rendering.
    pub async fn generate_content(
        &self,
        request: &ResumeRequest,
    ) -> Result<GeneratedResumeContent, ResumeError> {
        let prompts = build_prompts(request)?;

        info!(
            "Requesting resume content for {} ({} work entries, {} education entries) targeting {} at {}",
            request.candidate.name,
            request.work_experience.len(),
            request.education.len(),
            request.target.job_title,
            request.target.company_name
        );
        let raw = generate_raw_content(self.llm.as_ref(), &prompts).await?;

        let content = parse_generated_content(&raw)?;
        verify_against_request(&content, request)?;

        info!(
            "Validated resume content: {} work entries, {} skills",
            content.work_experience.len(),
            content.skills.len()
        );
        Ok(content)
    }
}
