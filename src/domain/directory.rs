// Portal accounts: profiles read from the directory and the drafts used to
// create or edit them.

use serde::{Deserialize, Serialize};

use crate::domain::application::validate_resume_link;
use crate::domain::{AdminId, CandidateId, CompanyId, DomainError, DomainResult};

const MAX_NAME_LEN: usize = 100;
const MAX_LOCATION_LEN: usize = 255;
const MAX_DESCRIPTION_LEN: usize = 1000;
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub id: CompanyId,
    pub name: String,
    pub email: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: CandidateId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub resume_link: Option<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: AdminId,
    pub email: String,
}

/// Company signup or profile edit. `password: None` keeps the current one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompanyDraft {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub location: String,
    pub description: Option<String>,
}

/// Candidate signup or profile edit. `password: None` keeps the current one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateDraft {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub resume_link: Option<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdminDraft {
    pub email: String,
    pub password: String,
}

/// Whether a draft creates an account (password required) or edits one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPurpose {
    Signup,
    Update,
}

pub fn validate_company_draft(draft: &CompanyDraft, purpose: DraftPurpose) -> DomainResult<()> {
    validate_field("company name", &draft.name, MAX_NAME_LEN)?;
    validate_field("email", &draft.email, MAX_LOCATION_LEN)?;
    validate_password(draft.password.as_deref(), purpose)?;
    validate_field("location", &draft.location, MAX_LOCATION_LEN)?;
    if let Some(description) = &draft.description {
        validate_max("description", description, MAX_DESCRIPTION_LEN)?;
    }
    Ok(())
}

pub fn validate_candidate_draft(
    draft: &CandidateDraft,
    purpose: DraftPurpose,
) -> DomainResult<()> {
    validate_field("name", &draft.name, MAX_NAME_LEN)?;
    validate_field("email", &draft.email, MAX_LOCATION_LEN)?;
    validate_password(draft.password.as_deref(), purpose)?;
    if let Some(link) = draft.resume_link.as_deref().filter(|l| !l.trim().is_empty()) {
        validate_resume_link(link)?;
    }
    if draft.skills.iter().any(|s| s.trim().is_empty()) {
        return Err(DomainError::InvariantViolation(
            "skills cannot contain blank entries".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_admin_draft(draft: &AdminDraft) -> DomainResult<()> {
    validate_field("email", &draft.email, MAX_LOCATION_LEN)?;
    validate_password(Some(&draft.password), DraftPurpose::Signup)
}

fn validate_field(field: &str, value: &str, max: usize) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "{} is required",
            field
        )));
    }
    validate_max(field, value, max)
}

fn validate_max(field: &str, value: &str, max: usize) -> DomainResult<()> {
    if value.chars().count() > max {
        return Err(DomainError::InvariantViolation(format!(
            "{} must be less than {} characters",
            field, max
        )));
    }
    Ok(())
}

fn validate_password(password: Option<&str>, purpose: DraftPurpose) -> DomainResult<()> {
    match (password, purpose) {
        (None, DraftPurpose::Update) => Ok(()),
        (None, DraftPurpose::Signup) => Err(DomainError::InvariantViolation(
            "password is required".to_string(),
        )),
        (Some(p), _) if p.chars().count() < MIN_PASSWORD_LEN => {
            Err(DomainError::InvariantViolation(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )))
        }
        (Some(_), _) => Ok(()),
    }
}
