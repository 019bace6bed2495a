// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Role and quality bar for the resume writer. JSON-only and no-fabrication
/// fragments are appended at build time.
pub const RESUME_SYSTEM: &str = "You are an expert resume writer and ATS optimization \
    specialist. You tailor a candidate's real history to one target position: you analyse \
    the job requirements, map the candidate's experience onto them, weave the posting's \
    keywords in naturally, and quantify every achievement. \
    You rewrite prose only. Facts of record (employers, titles, institutions, dates) are \
    never changed, added or removed.";

/// Per-request resume prompt. Placeholders are `{slotName}` tokens resolved by
/// `generation::template`; every token must name a known slot.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Write a resume tailored to the position below.

TARGET POSITION
Company: {companyName}
Role: {jobTitle}
Job Description:
{jobDescription}

CANDIDATE
Name: {userName}
Email: {email}
Phone: {phoneNumber}
LinkedIn: {linkedinUrl}

Work Experience:
{workExperience}

Education:
{education}

INSTRUCTIONS
1. Extract the technical requirements, experience level and soft skills the posting asks for.
2. Professional summary: 4 sentences covering experience level and core expertise, key skills
   with a quantified result, collaboration or leadership, and the value offered to this role.
3. For EACH work entry above, in the same order: a 2-3 sentence description of scope,
   team and technologies, and 4-5 achievements of the form
   action verb + specific action + quantified result + business impact.
4. Skills: the candidate's relevant skills, most job-relevant first, no duplicates.
5. Use consistent MM/YYYY dates exactly as given; keep "Present" as-is.

Return ONLY this JSON structure:
{
  "professionalSummary": "string",
  "workExperience": [
    {
      "role": "EXACT role from the work entry",
      "companyName": "EXACT company from the work entry",
      "startDate": "EXACT start date from the work entry",
      "endDate": "EXACT end date from the work entry",
      "description": "string",
      "achievements": ["string", "string", "string", "string"]
    }
  ],
  "skills": ["string"]
}"#;

/// Substituted for an absent optional field so the prompt layout never shifts.
pub const NOT_PROVIDED: &str = "Not provided";

/// Substituted for an empty work history.
pub const NO_WORK_EXPERIENCE: &str = "No work experience provided. Do not invent any; \
    return an empty workExperience array.";

/// Substituted for an empty education history.
pub const NO_EDUCATION: &str = "No education provided.";
