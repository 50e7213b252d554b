// src/application/dto.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are view-friendly representations
// - Statuses and job types travel as their display names
// - Timestamps travel as RFC 3339 strings

use serde::{Deserialize, Serialize};

use crate::domain::{
    AdminDraft, ApplicationStatus, CandidateDraft, CandidateId, CompanyDraft, CompanyId, Job,
    JobApplication, JobDraft, JobId, JobSummary, JobType, Role,
};
use crate::error::{AppError, AppResult};
use crate::session::Session;

// ============================================================================
// APPLICATION DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDto {
    pub id: String,
    pub candidate_id: String,
    pub job_id: String,
    pub qualification: String,
    pub resume_link: String,
    pub status: String,
    pub created_at: Option<String>,
    pub position: String,
    pub location: String,
    pub job_type: String,
    /// Best-effort display name of the applicant (company views)
    pub candidate_name: Option<String>,
    /// Statuses the viewer may move this application to
    pub actions: Vec<String>,
}

impl ApplicationDto {
    pub fn new(application: JobApplication, job: JobSummary, viewer: Role) -> Self {
        let actions = crate::domain::available_targets(application.status, viewer)
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        Self {
            id: application.id.into_inner(),
            candidate_id: application.candidate_id.into_inner(),
            job_id: application.job_id.into_inner(),
            qualification: application.qualification,
            resume_link: application.resume_link,
            status: application.status.to_string(),
            created_at: application.created_at.map(|t| t.to_rfc3339()),
            position: job.position,
            location: job.location,
            job_type: job.job_type,
            candidate_name: None,
            actions,
        }
    }

    pub fn with_candidate_name(mut self, name: String) -> Self {
        self.candidate_name = Some(name);
        self
    }
}

/// Apply form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyDto {
    pub job_id: String,
    pub qualification: String,
    pub resume_link: String,
}

// ============================================================================
// JOB DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDto {
    pub id: String,
    pub company_id: String,
    pub position: String,
    pub location: String,
    pub experience: String,
    pub description: String,
    pub skills: Vec<String>,
    pub job_type: String,
    pub posted_at: Option<String>,
}

impl From<Job> for JobDto {
    fn from(job: Job) -> Self {
        Self {
            id: job.id.into_inner(),
            company_id: job.company_id.into_inner(),
            position: job.position,
            location: job.location,
            experience: job.experience,
            description: job.description,
            skills: job.skills,
            job_type: job.job_type.to_string(),
            posted_at: job.posted_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Job form; skills typed as one comma separated field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFormDto {
    pub position: String,
    pub location: String,
    pub experience: String,
    pub description: String,
    pub skills: String,
    pub job_type: String,
}

impl JobFormDto {
    pub fn into_draft(self) -> AppResult<JobDraft> {
        let job_type = self.job_type.parse::<JobType>()?;
        Ok(JobDraft {
            position: self.position.trim().to_string(),
            location: self.location.trim().to_string(),
            experience: self.experience.trim().to_string(),
            description: self.description.trim().to_string(),
            skills: JobDraft::parse_skills(&self.skills),
            job_type,
        })
    }
}

/// A job as a candidate sees it: with their application, if any
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDetailDto {
    pub job: JobDto,
    pub application: Option<ApplicationDto>,
    pub can_apply: bool,
}

// ============================================================================
// SESSION DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDto {
    pub role: String,
    pub account_id: String,
    pub display_name: Option<String>,
    pub started_at: String,
}

impl From<Session> for SessionDto {
    fn from(session: Session) -> Self {
        Self {
            role: session.role.to_string(),
            account_id: session.account_id,
            display_name: session.display_name,
            started_at: session.started_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// ACCOUNT DTOs
// ============================================================================

/// Company signup or profile form. A blank password keeps the current one
/// on edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyFormDto {
    pub name: String,
    pub email: String,
    pub password: String,
    pub location: String,
    pub description: String,
}

impl CompanyFormDto {
    pub fn into_draft(self) -> CompanyDraft {
        CompanyDraft {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: optional_password(&self.password),
            location: self.location.trim().to_string(),
            description: optional(&self.description),
        }
    }
}

/// Candidate signup or profile form; skills typed as one comma separated field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateFormDto {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub resume_link: String,
    pub skills: String,
}

impl CandidateFormDto {
    pub fn into_draft(self) -> CandidateDraft {
        CandidateDraft {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: optional_password(&self.password),
            phone: optional(&self.phone),
            resume_link: optional(&self.resume_link),
            skills: JobDraft::parse_skills(&self.skills),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminFormDto {
    pub email: String,
    pub password: String,
}

impl From<AdminFormDto> for AdminDraft {
    fn from(form: AdminFormDto) -> Self {
        Self {
            email: form.email.trim().to_string(),
            password: form.password,
        }
    }
}

/// Trimmed value, `None` when blank
fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Passwords keep their spaces; only an all-blank one counts as absent
fn optional_password(raw: &str) -> Option<String> {
    (!raw.trim().is_empty()).then(|| raw.to_string())
}

// ============================================================================
// PARSING HELPERS
// ============================================================================

pub fn parse_status(raw: &str) -> AppResult<ApplicationStatus> {
    Ok(raw.parse::<ApplicationStatus>()?)
}

pub fn parse_job_id(raw: &str) -> AppResult<JobId> {
    non_empty("job id", raw).map(JobId::new)
}

pub fn parse_candidate_id(raw: &str) -> AppResult<CandidateId> {
    non_empty("candidate id", raw).map(CandidateId::new)
}

pub fn parse_company_id(raw: &str) -> AppResult<CompanyId> {
    non_empty("company id", raw).map(CompanyId::new)
}

pub fn non_empty(field: &str, raw: &str) -> AppResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}
