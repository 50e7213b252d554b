use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{CompanyId, DomainError, JobId};

/// A job posted by a company
/// Companies own their jobs; candidates and admins only read them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub company_id: CompanyId,
    pub position: String,
    pub location: String,
    pub experience: String,
    pub description: String,
    /// Display order is insertion order
    pub skills: Vec<String>,
    pub job_type: JobType,
    pub posted_at: Option<DateTime<Utc>>,
}

/// Company input for creating or updating a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    pub position: String,
    pub location: String,
    pub experience: String,
    pub description: String,
    pub skills: Vec<String>,
    pub job_type: JobType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Internship,
}

/// What a listing needs to show about the job behind an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    pub position: String,
    pub location: String,
    pub job_type: String,
}

pub const UNKNOWN: &str = "Unknown";

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Internship,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Internship => "Internship",
        }
    }
}

impl JobDraft {
    /// Skills from a comma separated form field, blanks dropped, order kept
    pub fn parse_skills(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl JobSummary {
    /// Placeholder shown when the job could not be loaded
    pub fn unknown() -> Self {
        Self {
            position: UNKNOWN.to_string(),
            location: UNKNOWN.to_string(),
            job_type: UNKNOWN.to_string(),
        }
    }
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        Self {
            position: job.position.clone(),
            location: job.location.clone(),
            job_type: job.job_type.to_string(),
        }
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        JobType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::UnknownValue {
                kind: "job type",
                value: s.to_string(),
            })
    }
}
