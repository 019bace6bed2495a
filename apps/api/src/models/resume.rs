use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Sentinel end date for an ongoing work or education period.
pub const PRESENT: &str = "Present";

/// Candidate identity and contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(rename = "userName")]
    pub name: String,
    pub email: String,
    #[serde(rename = "phoneNumber")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
}

impl Candidate {
    /// The LinkedIn URL, treating a blank value the same as an absent one.
    pub fn linkedin(&self) -> Option<&str> {
        self.linkedin_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub company_name: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub university: String,
    pub diploma: String,
    pub start_date: String,
    pub end_date: String,
}

/// The position the resume is tailored for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRole {
    pub company_name: String,
    pub job_title: String,
    pub job_description: String,
}

/// Everything one generation needs. Built per call and discarded afterwards.
///
/// The wire shape is flat (candidate and target fields sit at the top level),
/// matching what the manager dashboard posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRequest {
    #[serde(flatten)]
    pub candidate: Candidate,
    #[serde(default)]
    pub work_experience: Vec<WorkEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(flatten)]
    pub target: TargetRole,
}

/// One work-experience entry as returned by the model.
///
/// `role`, `company_name` and both dates must echo the request entry at the
/// same index; only `description` and `achievements` are generated prose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedWorkEntry {
    pub role: String,
    pub company_name: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub achievements: Vec<String>,
}

/// Validated model output. Only ever constructed by the response validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResumeContent {
    pub professional_summary: String,
    pub work_experience: Vec<GeneratedWorkEntry>,
    pub skills: Vec<String>,
}

/// Lifecycle status the persistence layer tracks for a resume record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeStatus {
    #[default]
    Pending,
    Generating,
    Completed,
    Failed,
}

/// Final output of one pipeline run.
#[derive(Debug, Clone)]
pub struct ResumeArtifact {
    pub pdf: Bytes,
    pub html: String,
}
