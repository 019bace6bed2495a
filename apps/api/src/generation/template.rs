//! Typed prompt templates.
//!
//! A template is plain text with `{slotName}` tokens. Every token must name a
//! [`PromptSlot`] and every referenced slot must be supplied, otherwise
//! rendering fails instead of silently leaving the token in place.
//!
//! Substitution is a single left-to-right pass: values are never re-scanned,
//! so a job description that happens to contain `{email}` stays literal.
//! Braces not followed by `identifier}` (e.g. JSON examples) pass through.

use std::borrow::Cow;
use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptSlot {
    CompanyName,
    JobTitle,
    JobDescription,
    UserName,
    Email,
    PhoneNumber,
    LinkedinUrl,
    WorkExperience,
    Education,
}

impl PromptSlot {
    pub const ALL: [PromptSlot; 9] = [
        PromptSlot::CompanyName,
        PromptSlot::JobTitle,
        PromptSlot::JobDescription,
        PromptSlot::UserName,
        PromptSlot::Email,
        PromptSlot::PhoneNumber,
        PromptSlot::LinkedinUrl,
        PromptSlot::WorkExperience,
        PromptSlot::Education,
    ];

    /// Token name as written inside the braces.
    pub fn name(self) -> &'static str {
        match self {
            PromptSlot::CompanyName => "companyName",
            PromptSlot::JobTitle => "jobTitle",
            PromptSlot::JobDescription => "jobDescription",
            PromptSlot::UserName => "userName",
            PromptSlot::Email => "email",
            PromptSlot::PhoneNumber => "phoneNumber",
            PromptSlot::LinkedinUrl => "linkedinUrl",
            PromptSlot::WorkExperience => "workExperience",
            PromptSlot::Education => "education",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("template references unknown slot {{{0}}}")]
    UnknownSlot(String),

    #[error("template slot {{{0}}} was not supplied")]
    MissingSlot(&'static str),
}

/// Values for the slots of one render.
#[derive(Debug, Default)]
pub struct SlotValues<'a> {
    values: HashMap<PromptSlot, Cow<'a, str>>,
}

impl<'a> SlotValues<'a> {
    pub fn with(mut self, slot: PromptSlot, value: impl Into<Cow<'a, str>>) -> Self {
        self.values.insert(slot, value.into());
        self
    }

    fn get(&self, slot: PromptSlot) -> Option<&str> {
        self.values.get(&slot).map(|v| v.as_ref())
    }
}

/// Slots referenced by `template`, in order of appearance (duplicates kept).
#[cfg(test)]
pub fn referenced_slots(template: &str) -> Result<Vec<PromptSlot>, PromptError> {
    let mut slots = Vec::new();
    for_each_token(template, |_, ident| {
        let slot = PromptSlot::from_name(ident)
            .ok_or_else(|| PromptError::UnknownSlot(ident.to_string()))?;
        slots.push(slot);
        Ok(())
    })?;
    Ok(slots)
}

/// Renders `template`, replacing every `{slotName}` token with its value.
pub fn render(template: &str, values: &SlotValues<'_>) -> Result<String, PromptError> {
    let mut out = String::with_capacity(template.len());
    let tail = for_each_token(template, |literal, ident| {
        out.push_str(literal);
        let slot = PromptSlot::from_name(ident)
            .ok_or_else(|| PromptError::UnknownSlot(ident.to_string()))?;
        let value = values.get(slot).ok_or(PromptError::MissingSlot(slot.name()))?;
        out.push_str(value);
        Ok(())
    })?;
    out.push_str(tail);
    Ok(out)
}

/// Walks `template`, calling `visit(literal_before, ident)` for every
/// `{ident}` token. Returns the literal text after the last token.
fn for_each_token<'t, F>(template: &'t str, mut visit: F) -> Result<&'t str, PromptError>
where
    F: FnMut(&'t str, &'t str) -> Result<(), PromptError>,
{
    let mut rest = template;
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(offset) = rest[cursor..].find('{') {
        let open = cursor + offset;
        let after = &rest[open + 1..];
        let ident_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());

        if ident_len > 0 && after[ident_len..].starts_with('}') {
            visit(&rest[literal_start..open], &after[..ident_len])?;
            rest = &after[ident_len + 1..];
            literal_start = 0;
            cursor = 0;
        } else {
            cursor = open + 1;
        }
    }

    Ok(&rest[literal_start..])
}
