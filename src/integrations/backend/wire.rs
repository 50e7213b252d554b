// src/integrations/backend/wire.rs
//
// JSON shapes exchanged with the portal backend.
//
// RULES:
// - Field names are camelCase on the wire
// - Timestamps arrive without a timezone and are read as UTC
// - Conversion into domain types happens here and nowhere else

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{
    AdminAccount, AdminDraft, AdminId, ApplicationId, ApplicationStatus, CandidateDraft,
    CandidateId, CandidateProfile, CompanyDraft, CompanyId, CompanyProfile, Job, JobApplication,
    JobDraft, JobId, JobType, NewApplication,
};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub candidate_id: String,
    pub job_id: String,
    pub qualification: String,
    pub resume_link: String,
    pub status: String,
    #[serde(default, skip_serializing)]
    pub application_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub position: String,
    pub company_id: String,
    pub location: String,
    pub experience: String,
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub job_type: String,
    #[serde(default, skip_serializing)]
    pub posted_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub resume_link: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Body for POST and PUT /companies. A missing password keeps the stored one.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPayload<'a> {
    pub name: &'a str,
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
    pub location: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

/// Body for POST and PUT /candidates. A missing password keeps the stored one.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePayload<'a> {
    pub name: &'a str,
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_link: Option<&'a str>,
    pub skills: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct AdminPayload<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub role: &'a str,
}

/// Login reply; either token/user/role or errorMessage is set
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Whatever error fields the backend put in a failure body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// First non-blank message, preferring the most specific field
    pub fn into_message(self) -> Option<String> {
        [self.message, self.error_message, self.error]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
    }
}

fn unexpected(what: &str, detail: impl std::fmt::Display) -> AppError {
    AppError::Network(format!("unexpected {} from backend: {}", what, detail))
}

impl ApplicationRecord {
    /// Body for POST /job-applications; a new application is always Applied
    pub fn for_submission(new: &NewApplication) -> Self {
        Self {
            id: None,
            candidate_id: new.candidate_id.to_string(),
            job_id: new.job_id.to_string(),
            qualification: new.qualification.clone(),
            resume_link: new.resume_link.clone(),
            status: ApplicationStatus::Applied.to_string(),
            application_date: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn into_domain(self) -> AppResult<JobApplication> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| unexpected("application", "record has no id"))?;
        let status = self
            .status
            .parse::<ApplicationStatus>()
            .map_err(|e| unexpected("application", e))?;

        Ok(JobApplication {
            id: ApplicationId::new(id),
            candidate_id: CandidateId::new(self.candidate_id),
            job_id: JobId::new(self.job_id),
            qualification: self.qualification,
            resume_link: self.resume_link,
            status,
            created_at: self
                .created_at
                .or(self.application_date)
                .map(|t| t.and_utc()),
            updated_at: self.updated_at.map(|t| t.and_utc()),
        })
    }
}

impl JobRecord {
    pub fn from_draft(company_id: &CompanyId, draft: &JobDraft) -> Self {
        Self {
            id: None,
            position: draft.position.clone(),
            company_id: company_id.to_string(),
            location: draft.location.clone(),
            experience: draft.experience.clone(),
            description: draft.description.clone(),
            skills: draft.skills.clone(),
            job_type: draft.job_type.to_string(),
            posted_date: None,
            created_at: None,
        }
    }

    pub fn into_domain(self) -> AppResult<Job> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| unexpected("job", "record has no id"))?;
        let job_type = self
            .job_type
            .parse::<JobType>()
            .map_err(|e| unexpected("job", e))?;

        Ok(Job {
            id: JobId::new(id),
            company_id: CompanyId::new(self.company_id),
            position: self.position,
            location: self.location,
            experience: self.experience,
            description: self.description,
            skills: self.skills,
            job_type,
            posted_at: self.posted_date.or(self.created_at).map(|t| t.and_utc()),
        })
    }
}

impl From<CompanyRecord> for CompanyProfile {
    fn from(record: CompanyRecord) -> Self {
        Self {
            id: CompanyId::new(record.id),
            name: record.name,
            email: record.email,
            location: record.location,
            description: record.description,
        }
    }
}

impl From<CandidateRecord> for CandidateProfile {
    fn from(record: CandidateRecord) -> Self {
        Self {
            id: CandidateId::new(record.id),
            name: record.name,
            email: record.email,
            phone: record.phone,
            resume_link: record.resume_link,
            skills: record.skills,
        }
    }
}

impl<'a> From<&'a CompanyDraft> for CompanyPayload<'a> {
    fn from(draft: &'a CompanyDraft) -> Self {
        Self {
            name: &draft.name,
            email: &draft.email,
            password: draft.password.as_deref(),
            location: &draft.location,
            description: draft.description.as_deref(),
        }
    }
}

impl<'a> From<&'a CandidateDraft> for CandidatePayload<'a> {
    fn from(draft: &'a CandidateDraft) -> Self {
        Self {
            name: &draft.name,
            email: &draft.email,
            password: draft.password.as_deref(),
            phone: draft.phone.as_deref(),
            resume_link: draft.resume_link.as_deref(),
            skills: &draft.skills,
        }
    }
}

impl<'a> From<&'a AdminDraft> for AdminPayload<'a> {
    fn from(draft: &'a AdminDraft) -> Self {
        Self {
            email: &draft.email,
            password: &draft.password,
        }
    }
}

impl AdminRecord {
    pub fn into_domain(self) -> AppResult<AdminAccount> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| unexpected("admin", "record has no id"))?;
        Ok(AdminAccount {
            id: AdminId::new(id),
            email: self.email,
        })
    }
}

/// Convert a list, failing on the first bad record
pub fn convert_all<R, T>(records: Vec<R>, convert: impl Fn(R) -> AppResult<T>) -> AppResult<Vec<T>> {
    records.into_iter().map(convert).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_record_reads_backend_json() {
        let json = r#"{
            "id": "665f",
            "candidateId": "c1",
            "jobId": "j1",
            "qualification": "BSc",
            "resumeLink": "https://cv.example.com/me",
            "status": "Interviewing",
            "applicationDate": "2024-06-01T10:15:30"
        }"#;
        let record: ApplicationRecord = serde_json::from_str(json).unwrap();
        let app = record.into_domain().unwrap();

        assert_eq!(app.id, ApplicationId::new("665f"));
        assert_eq!(app.status, ApplicationStatus::Interviewing);
        assert_eq!(
            app.created_at.unwrap().to_rfc3339(),
            "2024-06-01T10:15:30+00:00"
        );
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let record = ApplicationRecord {
            id: Some("a1".into()),
            candidate_id: "c1".into(),
            job_id: "j1".into(),
            qualification: "BSc".into(),
            resume_link: "https://x.io".into(),
            status: "Pending".into(),
            application_date: None,
            created_at: None,
            updated_at: None,
        };
        assert!(matches!(record.into_domain(), Err(AppError::Network(_))));
    }

    #[test]
    fn test_submission_body_is_camel_case_and_applied() {
        let new = NewApplication {
            candidate_id: CandidateId::new("c1"),
            job_id: JobId::new("j1"),
            qualification: "BSc".into(),
            resume_link: "https://x.io/cv".into(),
        };
        let body = serde_json::to_value(ApplicationRecord::for_submission(&new)).unwrap();
        assert_eq!(body["candidateId"], "c1");
        assert_eq!(body["resumeLink"], "https://x.io/cv");
        assert_eq!(body["status"], "Applied");
        assert!(body.get("id").is_none());
        assert!(body.get("createdAt").is_none());
    }

    #[test]
    fn test_job_record_conversion() {
        let json = r#"{
            "id": "j9",
            "position": "Backend Engineer",
            "companyId": "co1",
            "location": "Lisbon",
            "experience": "3+ years",
            "description": "Build APIs",
            "skills": ["Rust", "SQL"],
            "jobType": "Full-time"
        }"#;
        let job = serde_json::from_str::<JobRecord>(json)
            .unwrap()
            .into_domain()
            .unwrap();
        assert_eq!(job.job_type, JobType::FullTime);
        assert_eq!(job.skills, vec!["Rust", "SQL"]);
        assert_eq!(job.company_id, CompanyId::new("co1"));
    }

    #[test]
    fn test_profile_update_without_password_omits_it() {
        let draft = CandidateDraft {
            name: "Dana".into(),
            email: "dana@mail.io".into(),
            resume_link: Some("https://cv.io/dana".into()),
            skills: vec!["Rust".into()],
            ..CandidateDraft::default()
        };
        let body = serde_json::to_value(CandidatePayload::from(&draft)).unwrap();
        assert_eq!(body["resumeLink"], "https://cv.io/dana");
        assert_eq!(body["skills"][0], "Rust");
        assert!(body.get("password").is_none());
        assert!(body.get("phone").is_none());
    }

    #[test]
    fn test_admin_record_without_id_is_rejected() {
        let record: AdminRecord = serde_json::from_str(r#"{"email":"ops@portal.io"}"#).unwrap();
        assert!(matches!(record.into_domain(), Err(AppError::Network(_))));
    }

    #[test]
    fn test_error_body_message_preference() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"Bad Request","message":"status is invalid"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("status is invalid"));

        let body: ErrorBody = serde_json::from_str(r#"{"errorMessage":"Invalid credentials"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Invalid credentials"));

        assert_eq!(ErrorBody::default().into_message(), None);
    }
}
