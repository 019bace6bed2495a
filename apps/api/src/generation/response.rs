//! Response Validator: the only gate between raw model text and rendering.
//!
//! Order of operations:
//! 1. strip Markdown code fences
//! 2. parse JSON (failure → `MalformedResponse`, raw text kept)
//! 3. apply the unwrap rules in order
//! 4. enforce the contract on the JSON value, naming the offending field
//! 5. deserialize into `GeneratedResumeContent` without touching any value
//!
//! `verify_against_request` then checks that the work entries echo the
//! request exactly, so no fabricated entry can reach the renderer.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::error;

use crate::generation::error::ResumeError;
use crate::models::resume::{GeneratedResumeContent, ResumeRequest};

const REQUIRED_FIELDS: [&str; 3] = ["professionalSummary", "workExperience", "skills"];

/// A pure rewrite of the parsed document, used to peel legacy wrappers.
pub type UnwrapRule = fn(Value) -> Value;

/// Applied in sequence; each sees the previous rule's output.
pub const UNWRAP_RULES: &[UnwrapRule] = &[unwrap_final_resume, unwrap_phase8_final_resume];

fn unwrap_final_resume(value: Value) -> Value {
    unwrap_key(value, "final_resume")
}

fn unwrap_phase8_final_resume(value: Value) -> Value {
    unwrap_key(value, "phase8_final_resume")
}

/// Replaces `value` with `value[key]` when that member is an object.
fn unwrap_key(value: Value, key: &str) -> Value {
    match value {
        Value::Object(mut map) => match map.remove(key) {
            Some(inner @ Value::Object(_)) => inner,
            Some(other) => {
                map.insert(key.to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
/// A missing closing fence is tolerated; the opening one is still removed.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(body) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let body = body.trim_start();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parses and validates raw model output.
pub fn parse_generated_content(raw: &str) -> Result<GeneratedResumeContent, ResumeError> {
    let json = strip_json_fences(raw);

    let parsed: Value = serde_json::from_str(json).map_err(|source| {
        error!("Model output is not valid JSON ({source}). Raw output: {raw}");
        ResumeError::MalformedResponse {
            source,
            raw: raw.to_string(),
        }
    })?;

    let payload = UNWRAP_RULES.iter().fold(parsed, |value, rule| rule(value));

    if let Err(err) = check_contract(&payload) {
        error!("Model output rejected: {err}. Raw output: {raw}");
        return Err(err);
    }

    serde_json::from_value(payload).map_err(|e| ResumeError::contract("$", e.to_string()))
}

fn check_contract(payload: &Value) -> Result<(), ResumeError> {
    let root = payload
        .as_object()
        .ok_or_else(|| ResumeError::contract("$", "expected a JSON object"))?;

    for field in REQUIRED_FIELDS {
        if root.get(field).map_or(true, Value::is_null) {
            return Err(ResumeError::contract(field, "required field is missing"));
        }
    }

    require_text(root, "professionalSummary", "professionalSummary")?;

    let entries = root["workExperience"]
        .as_array()
        .ok_or_else(|| ResumeError::contract("workExperience", "must be an array"))?;
    for (index, entry) in entries.iter().enumerate() {
        check_work_entry(index, entry)?;
    }

    let skills = root["skills"]
        .as_array()
        .ok_or_else(|| ResumeError::contract("skills", "must be an array"))?;
    check_skills(skills)
}

fn check_work_entry(index: usize, entry: &Value) -> Result<(), ResumeError> {
    let path = format!("workExperience[{index}]");
    let entry = entry
        .as_object()
        .ok_or_else(|| ResumeError::contract(&path, "must be an object"))?;

    for field in ["role", "companyName", "description"] {
        require_text(entry, field, &format!("{path}.{field}"))?;
    }
    for field in ["startDate", "endDate"] {
        if !entry.get(field).is_some_and(Value::is_string) {
            return Err(ResumeError::contract(
                format!("{path}.{field}"),
                "must be a string",
            ));
        }
    }

    let achievements_path = format!("{path}.achievements");
    let achievements = entry
        .get("achievements")
        .and_then(Value::as_array)
        .ok_or_else(|| ResumeError::contract(&achievements_path, "must be an array"))?;
    if achievements.is_empty() {
        return Err(ResumeError::contract(
            &achievements_path,
            "must contain at least one achievement",
        ));
    }
    for (i, achievement) in achievements.iter().enumerate() {
        if !achievement.as_str().is_some_and(|s| !s.trim().is_empty()) {
            return Err(ResumeError::contract(
                format!("{achievements_path}[{i}]"),
                "must be a non-empty string",
            ));
        }
    }
    Ok(())
}

fn check_skills(skills: &[Value]) -> Result<(), ResumeError> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (i, skill) in skills.iter().enumerate() {
        let skill = skill
            .as_str()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ResumeError::contract(format!("skills[{i}]"), "must be a non-empty string"))?;
        if let Some(first) = seen.insert(skill, i) {
            return Err(ResumeError::contract(
                format!("skills[{i}]"),
                format!("duplicates skills[{first}]"),
            ));
        }
    }
    Ok(())
}

fn require_text(object: &Map<String, Value>, key: &str, path: &str) -> Result<(), ResumeError> {
    match object.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(()),
        Some(Value::String(_)) => Err(ResumeError::contract(path, "must not be empty")),
        Some(Value::Null) | None => Err(ResumeError::contract(path, "required field is missing")),
        Some(_) => Err(ResumeError::contract(path, "must be a string")),
    }
}

/// Checks the generated work entries against the request one-to-one.
///
/// Length must match and each entry's role, company and dates must equal the
/// request entry at the same index byte-for-byte.
pub fn verify_against_request(
    content: &GeneratedResumeContent,
    request: &ResumeRequest,
) -> Result<(), ResumeError> {
    let expected = &request.work_experience;
    let actual = &content.work_experience;

    if expected.len() != actual.len() {
        let err = ResumeError::contract(
            "workExperience",
            format!(
                "expected {} entries matching the request, got {}",
                expected.len(),
                actual.len()
            ),
        );
        error!("Model output rejected: {err}");
        return Err(err);
    }

    for (index, (want, got)) in expected.iter().zip(actual).enumerate() {
        let pairs = [
            ("role", &want.role, &got.role),
            ("companyName", &want.company_name, &got.company_name),
            ("startDate", &want.start_date, &got.start_date),
            ("endDate", &want.end_date, &got.end_date),
        ];
        for (field, want, got) in pairs {
            if want != got {
                let err = ResumeError::contract(
                    format!("workExperience[{index}].{field}"),
                    format!("expected {want:?} from the request, got {got:?}"),
                );
                error!("Model output rejected: {err}");
                return Err(err);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Candidate, TargetRole, WorkEntry};
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "professionalSummary": "Backend engineer with 5 years of Rust.",
            "workExperience": [{
                "role": "Engineer",
                "companyName": "Acme",
                "startDate": "01/2020",
                "endDate": "Present",
                "description": "Owned the billing platform.",
                "achievements": ["Cut p99 latency by 40%", "Shipped usage-based billing"]
            }],
            "skills": ["Rust", "PostgreSQL", "Kubernetes"]
        })
    }

    fn request_with_work(entries: Vec<WorkEntry>) -> ResumeRequest {
        ResumeRequest {
            candidate: Candidate {
                name: "Jane".to_string(),
                email: "jane@example.com".to_string(),
                phone: "555".to_string(),
                linkedin_url: None,
            },
            work_experience: entries,
            education: vec![],
            target: TargetRole {
                company_name: "Globex".to_string(),
                job_title: "Engineer".to_string(),
                job_description: "Rust".to_string(),
            },
        }
    }

    fn acme() -> WorkEntry {
        WorkEntry {
            company_name: "Acme".to_string(),
            role: "Engineer".to_string(),
            start_date: "01/2020".to_string(),
            end_date: "Present".to_string(),
        }
    }

    fn contract_field(err: ResumeError) -> String {
        match err {
            ResumeError::ContractViolation { field, .. } => field,
            other => panic!("expected ContractViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_fence_variants_reduce_to_the_object() {
        let object = r#"{"skills": ["Rust"]}"#;
        for input in [
            format!("```json\n{object}\n```"),
            format!("```\n{object}\n```"),
            format!("\n\t  ```json {object} ```\n\n"),
            format!("```json\n{object}\n"),
            format!("```{object}"),
            object.to_string(),
        ] {
            assert_eq!(strip_json_fences(&input), object, "input: {input:?}");
        }
    }

    #[test]
    fn test_fence_stripping_is_idempotent_and_leaves_prose_alone() {
        let once = strip_json_fences("```json\n{\"a\": 1}\n```");
        assert_eq!(strip_json_fences(once), once);

        let prose = "Here is your resume: {\"a\": 1}";
        assert_eq!(strip_json_fences(prose), prose);
    }

    #[test]
    fn test_unterminated_fence_still_parses() {
        let bare = valid_payload().to_string();
        let content = parse_generated_content(&format!("```json\n{bare}")).unwrap();
        assert_eq!(content.skills, vec!["Rust", "PostgreSQL", "Kubernetes"]);
    }

    #[test]
    fn test_fenced_and_bare_payloads_parse_identically() {
        let bare = serde_json::to_string_pretty(&valid_payload()).unwrap();
        let expected = parse_generated_content(&bare).unwrap();

        for fenced in [
            format!("```json\n{bare}\n```"),
            format!("```\n{bare}\n```"),
            format!("  ```json{bare}```  "),
        ] {
            assert_eq!(parse_generated_content(&fenced).unwrap(), expected);
        }
    }

    #[test]
    fn test_valid_payload_is_returned_unchanged() {
        let mut payload = valid_payload();
        payload["professionalSummary"] = json!("  padded summary  ");
        let content = parse_generated_content(&payload.to_string()).unwrap();

        assert_eq!(content.professional_summary, "  padded summary  ");
        assert_eq!(content.work_experience[0].achievements.len(), 2);
        assert_eq!(content.skills, vec!["Rust", "PostgreSQL", "Kubernetes"]);
    }

    #[test]
    fn test_non_json_is_malformed_and_keeps_raw_text() {
        let raw = "Sure! Here is your resume: professionalSummary ...";
        match parse_generated_content(raw).unwrap_err() {
            ResumeError::MalformedResponse { raw: kept, .. } => assert_eq!(kept, raw),
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_skills_names_skills() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("skills");
        let err = parse_generated_content(&payload.to_string()).unwrap_err();
        assert_eq!(contract_field(err), "skills");
    }

    #[test]
    fn test_string_achievements_names_the_index() {
        let mut payload = valid_payload();
        let second = json!({
            "role": "Intern",
            "companyName": "Initech",
            "startDate": "06/2018",
            "endDate": "12/2019",
            "description": "Maintained reports.",
            "achievements": "Automated TPS reports"
        });
        payload["workExperience"].as_array_mut().unwrap().push(second);

        let err = parse_generated_content(&payload.to_string()).unwrap_err();
        assert_eq!(contract_field(err), "workExperience[1].achievements");
    }

    #[test]
    fn test_work_experience_must_be_an_array() {
        let mut payload = valid_payload();
        payload["workExperience"] = json!({"role": "Engineer"});
        let err = parse_generated_content(&payload.to_string()).unwrap_err();
        assert_eq!(contract_field(err), "workExperience");
    }

    #[test]
    fn test_empty_role_is_rejected() {
        let mut payload = valid_payload();
        payload["workExperience"][0]["role"] = json!("");
        let err = parse_generated_content(&payload.to_string()).unwrap_err();
        assert_eq!(contract_field(err), "workExperience[0].role");
    }

    #[test]
    fn test_empty_summary_is_rejected() {
        let mut payload = valid_payload();
        payload["professionalSummary"] = json!("");
        let err = parse_generated_content(&payload.to_string()).unwrap_err();
        assert_eq!(contract_field(err), "professionalSummary");
    }

    #[test]
    fn test_empty_achievement_list_is_rejected() {
        let mut payload = valid_payload();
        payload["workExperience"][0]["achievements"] = json!([]);
        let err = parse_generated_content(&payload.to_string()).unwrap_err();
        assert_eq!(contract_field(err), "workExperience[0].achievements");
    }

    #[test]
    fn test_duplicate_skill_is_rejected() {
        let mut payload = valid_payload();
        payload["skills"] = json!(["Rust", "Go", "Rust"]);
        let err = parse_generated_content(&payload.to_string()).unwrap_err();
        assert_eq!(contract_field(err), "skills[2]");
    }

    #[test]
    fn test_final_resume_wrapper_is_unwrapped() {
        let wrapped = json!({ "analysis": "...", "final_resume": valid_payload() });
        let content = parse_generated_content(&wrapped.to_string()).unwrap();
        assert_eq!(content.work_experience[0].company_name, "Acme");
    }

    #[test]
    fn test_phase8_wrapper_is_unwrapped() {
        let wrapped = json!({ "phase8_final_resume": valid_payload() });
        let content = parse_generated_content(&wrapped.to_string()).unwrap();
        assert_eq!(content.skills.len(), 3);
    }

    #[test]
    fn test_unwrap_rules_leave_unwrapped_documents_alone() {
        let payload = valid_payload();
        let result = UNWRAP_RULES
            .iter()
            .fold(payload.clone(), |value, rule| rule(value));
        assert_eq!(result, payload);
    }

    #[test]
    fn test_non_object_wrapper_value_is_not_unwrapped() {
        let value = json!({"final_resume": "pending", "skills": []});
        assert_eq!(unwrap_final_resume(value.clone()), value);
    }

    #[test]
    fn test_verify_accepts_exact_echo() {
        let content = parse_generated_content(&valid_payload().to_string()).unwrap();
        assert!(verify_against_request(&content, &request_with_work(vec![acme()])).is_ok());
    }

    #[test]
    fn test_verify_rejects_fabricated_entry_for_empty_history() {
        let content = parse_generated_content(&valid_payload().to_string()).unwrap();
        let err = verify_against_request(&content, &request_with_work(vec![])).unwrap_err();
        assert_eq!(contract_field(err), "workExperience");
    }

    #[test]
    fn test_verify_rejects_altered_dates() {
        let mut payload = valid_payload();
        payload["workExperience"][0]["endDate"] = json!("12/2024");
        let content = parse_generated_content(&payload.to_string()).unwrap();
        let err = verify_against_request(&content, &request_with_work(vec![acme()])).unwrap_err();
        assert_eq!(contract_field(err), "workExperience[0].endDate");
    }
}
