use serde::Serialize;

use crate::models::resume::{ResumeRequest, PRESENT};

/// One rejected input field, addressed by its camelCase wire path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Checks a request before any model call is made.
///
/// Returns every problem found rather than stopping at the first one, so the
/// dashboard can highlight all bad fields in one round trip.
pub fn validate_request(request: &ResumeRequest) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    let candidate = &request.candidate;

    require(&mut issues, "userName", &candidate.name);
    require(&mut issues, "phoneNumber", &candidate.phone);
    if require(&mut issues, "email", &candidate.email) && !is_valid_email(&candidate.email) {
        issues.push(FieldIssue::new("email", "must look like name@domain.tld"));
    }
    if let Some(url) = candidate.linkedin() {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            issues.push(FieldIssue::new(
                "linkedinUrl",
                "must start with http:// or https://",
            ));
        }
    }

    for (i, entry) in request.work_experience.iter().enumerate() {
        let at = |field: &str| format!("workExperience[{i}].{field}");
        require(&mut issues, &at("companyName"), &entry.company_name);
        require(&mut issues, &at("role"), &entry.role);
        check_period(&mut issues, &at("startDate"), &entry.start_date);
        check_period(&mut issues, &at("endDate"), &entry.end_date);
    }

    for (i, entry) in request.education.iter().enumerate() {
        let at = |field: &str| format!("education[{i}].{field}");
        require(&mut issues, &at("university"), &entry.university);
        require(&mut issues, &at("diploma"), &entry.diploma);
        check_period(&mut issues, &at("startDate"), &entry.start_date);
        check_period(&mut issues, &at("endDate"), &entry.end_date);
    }

    let target = &request.target;
    require(&mut issues, "companyName", &target.company_name);
    require(&mut issues, "jobTitle", &target.job_title);
    require(&mut issues, "jobDescription", &target.job_description);

    issues
}

/// `MM/YYYY` with a real month, or the literal `Present`.
pub fn is_valid_period(value: &str) -> bool {
    if value == PRESENT {
        return true;
    }
    let Some((month, year)) = value.split_once('/') else {
        return false;
    };
    let month_ok = month.len() == 2
        && month.bytes().all(|b| b.is_ascii_digit())
        && matches!(month.parse::<u8>(), Ok(1..=12));
    let year_ok = year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit());
    month_ok && year_ok
}

/// Shape check only: one `@`, a non-empty local part, and a dotted domain.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || value.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !host.ends_with('.') && !tld.is_empty(),
        None => false,
    }
}

fn require(issues: &mut Vec<FieldIssue>, field: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        issues.push(FieldIssue::new(field, "is required"));
        false
    } else {
        true
    }
}

fn check_period(issues: &mut Vec<FieldIssue>, field: &str, value: &str) {
    if require(issues, field, value) && !is_valid_period(value) {
        issues.push(FieldIssue::new(field, "must be MM/YYYY or Present"));
    }
}
