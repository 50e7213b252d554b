use super::entity::{ApplicationStatus, NewApplication};
use reqwest::Url;

use crate::domain::{DomainError, DomainResult};

/// Backend column limit for qualification and resume link
pub const MAX_FIELD_LEN: usize = 255;

/// Validates a submission before it is sent to the backend
pub fn validate_new_application(new: &NewApplication) -> DomainResult<()> {
    validate_required("candidate id", new.candidate_id.as_str())?;
    validate_required("job id", new.job_id.as_str())?;
    validate_text("qualification", &new.qualification)?;
    validate_resume_link(&new.resume_link)?;
    Ok(())
}

fn validate_required(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "{} is required",
            field
        )));
    }
    Ok(())
}

fn validate_text(field: &str, value: &str) -> DomainResult<()> {
    validate_required(field, value)?;
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(DomainError::InvariantViolation(format!(
            "{} must be less than {} characters",
            field, MAX_FIELD_LEN
        )));
    }
    Ok(())
}

/// Resume link must be an absolute http(s) URL with a host
pub fn validate_resume_link(link: &str) -> DomainResult<()> {
    validate_text("resume link", link)?;

    let invalid = |why: &str| {
        DomainError::InvariantViolation(format!("resume link '{}' {}", link, why))
    };

    if link.contains(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }
    let url = Url::parse(link).map_err(|e| invalid(&format!("is not a valid URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("is not an http(s) URL"));
    }
    if url.host().is_none() {
        return Err(invalid("has no host"));
    }
    Ok(())
}

/// When a candidate may apply again to a job they already applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReapplyPolicy {
    /// Any prior application blocks a new one, whatever its status
    Never,
    /// Prior applications that were withdrawn or rejected do not block
    #[default]
    AfterClosed,
}

impl ReapplyPolicy {
    /// Does an existing application in `status` block a new submission?
    pub fn blocks(self, status: ApplicationStatus) -> bool {
        match self {
            ReapplyPolicy::Never => true,
            ReapplyPolicy::AfterClosed => !matches!(
                status,
                ApplicationStatus::Withdrawn | ApplicationStatus::Rejected
            ),
        }
    }
}

impl std::str::FromStr for ReapplyPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "never" => Ok(ReapplyPolicy::Never),
            "after-closed" => Ok(ReapplyPolicy::AfterClosed),
            _ => Err(DomainError::UnknownValue {
                kind: "reapply policy",
                value: s.to_string(),
            }),
        }
    }
}

/// Critical JobApplication Invariants:
///
/// 1. Application ID is assigned by the backend and immutable
/// 2. candidate_id and job_id never change after submission
/// 3. Every application starts in Applied
/// 4. Status only changes along TRANSITIONS, by the listed role
/// 5. Terminal statuses (Rejected, Accepted, Withdrawn) never change
/// 6. At most one blocking application per (candidate, job) pair
