//! Prompt Builder: turns a `ResumeRequest` into the system and user prompts.
//!
//! Pure: no I/O, no state. Optional fields are substituted with a fixed
//! placeholder and empty histories with a fixed sentence, so the prompt keeps
//! the same shape for every request.

use crate::generation::prompts::{
    NOT_PROVIDED, NO_EDUCATION, NO_WORK_EXPERIENCE, RESUME_PROMPT_TEMPLATE, RESUME_SYSTEM,
};
use crate::generation::template::{render, PromptError, PromptSlot, SlotValues};
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_FABRICATION_INSTRUCTION};
use crate::models::resume::{EducationEntry, ResumeRequest, WorkEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

pub fn build_prompts(request: &ResumeRequest) -> Result<PromptPair, PromptError> {
    let work_history = format_work_history(&request.work_experience);
    let education = format_education(&request.education);
    let candidate = &request.candidate;

    let values = SlotValues::default()
        .with(PromptSlot::CompanyName, request.target.company_name.as_str())
        .with(PromptSlot::JobTitle, request.target.job_title.as_str())
        .with(PromptSlot::JobDescription, request.target.job_description.as_str())
        .with(PromptSlot::UserName, candidate.name.as_str())
        .with(PromptSlot::Email, candidate.email.as_str())
        .with(PromptSlot::PhoneNumber, candidate.phone.as_str())
        .with(
            PromptSlot::LinkedinUrl,
            candidate.linkedin().unwrap_or(NOT_PROVIDED),
        )
        .with(PromptSlot::WorkExperience, work_history)
        .with(PromptSlot::Education, education);

    let user = render(RESUME_PROMPT_TEMPLATE, &values)?;
    let system = [RESUME_SYSTEM, NO_FABRICATION_INSTRUCTION, JSON_ONLY_SYSTEM].join("\n\n");

    Ok(PromptPair { system, user })
}

/// One line per entry: `<role> at <company> (<start> - <end>)`.
pub fn format_work_history(entries: &[WorkEntry]) -> String {
    if entries.is_empty() {
        return NO_WORK_EXPERIENCE.to_string();
    }
    entries
        .iter()
        .map(|e| {
            format!(
                "{} at {} ({} - {})",
                e.role, e.company_name, e.start_date, e.end_date
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per entry: `<diploma> at <university> (<start> - <end>)`.
pub fn format_education(entries: &[EducationEntry]) -> String {
    if entries.is_empty() {
        return NO_EDUCATION.to_string();
    }
    entries
        .iter()
        .map(|e| {
            format!(
                "{} at {} ({} - {})",
                e.diploma, e.university, e.start_date, e.end_date
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
