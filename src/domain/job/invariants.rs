use super::entity::JobDraft;
use crate::domain::{DomainError, DomainResult};

/// Validates a company's job draft against the backend's limits
pub fn validate_job_draft(draft: &JobDraft) -> DomainResult<()> {
    validate_field("position", &draft.position, 100)?;
    validate_field("location", &draft.location, 255)?;
    validate_field("experience", &draft.experience, 50)?;
    validate_field("description", &draft.description, 2000)?;
    validate_skills(&draft.skills)?;
    Ok(())
}

fn validate_field(field: &str, value: &str, max: usize) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "{} is required",
            field
        )));
    }
    if value.chars().count() > max {
        return Err(DomainError::InvariantViolation(format!(
            "{} must be less than {} characters",
            field, max
        )));
    }
    Ok(())
}

fn validate_skills(skills: &[String]) -> DomainResult<()> {
    if skills.is_empty() {
        return Err(DomainError::InvariantViolation(
            "skills cannot be empty".to_string(),
        ));
    }
    if skills.iter().any(|s| s.trim().is_empty()) {
        return Err(DomainError::InvariantViolation(
            "skills cannot contain blank entries".to_string(),
        ));
    }
    Ok(())
}

/// Job Invariants:
///
/// 1. Job ID is backend-assigned and immutable
/// 2. A job belongs to exactly one company
/// 3. Skills are non-empty and keep insertion order
/// 4. Job type is one of Full-time, Part-time, Contract, Internship
