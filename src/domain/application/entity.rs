use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::transitions::validate_transition;
use crate::domain::{ApplicationId, CandidateId, DomainError, DomainResult, JobId, Role};

/// A candidate's request to be considered for a job
///
/// Client-side status changes go through `transition_to`; records read from
/// the backend carry whatever status the backend stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    /// Backend-assigned, immutable identifier
    pub id: ApplicationId,

    /// Owning candidate
    pub candidate_id: CandidateId,

    /// Referenced job (not owned)
    pub job_id: JobId,

    pub qualification: String,

    pub resume_link: String,

    pub status: ApplicationStatus,

    /// Creation timestamp, when the backend reports one
    pub created_at: Option<DateTime<Utc>>,

    pub updated_at: Option<DateTime<Utc>>,
}

/// Data a candidate submits when applying. Has no id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    pub candidate_id: CandidateId,
    pub job_id: JobId,
    pub qualification: String,
    pub resume_link: String,
}

/// Application lifecycle state
///
/// Serialized with the exact spelling the portal backend stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Interviewing,
    Offered,
    Rejected,
    Accepted,
    Withdrawn,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 6] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Interviewing,
        ApplicationStatus::Offered,
        ApplicationStatus::Rejected,
        ApplicationStatus::Accepted,
        ApplicationStatus::Withdrawn,
    ];

    /// Terminal states admit no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Rejected | ApplicationStatus::Accepted | ApplicationStatus::Withdrawn
        )
    }

    /// Still under consideration (neither closed nor decided)
    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Interviewing => "Interviewing",
            ApplicationStatus::Offered => "Offered",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Withdrawn => "Withdrawn",
        }
    }
}

impl JobApplication {
    /// Build the in-memory record for a freshly accepted submission
    pub fn submitted(id: ApplicationId, new: NewApplication) -> Self {
        let now = Utc::now();
        Self {
            id,
            candidate_id: new.candidate_id,
            job_id: new.job_id,
            qualification: new.qualification,
            resume_link: new.resume_link,
            status: ApplicationStatus::Applied,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Move to `target` on behalf of `role`
    /// Ownership is checked by the caller; this only enforces the table
    pub fn transition_to(&mut self, target: ApplicationStatus, role: Role) -> DomainResult<()> {
        validate_transition(self.status, target, role)?;
        self.status = target;
        self.updated_at = Some(Utc::now());
        Ok(())
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownValue {
                kind: "application status",
                value: s.to_string(),
            })
    }
}
