// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting instructions only.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include analysis, tables, explanations or apologies.";

/// Instruction that forbids inventing employment or education history.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    CRITICAL: Use ONLY the work experience and education supplied by the user. \
    Never invent roles, companies, institutions or dates. \
    Copy role, companyName, startDate and endDate for every work entry EXACTLY as given, \
    in the same order. If no work experience is supplied, return an empty workExperience array.";
