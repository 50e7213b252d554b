// src/integrations/backend/client.rs
//
// Portal REST backend client
//
// ARCHITECTURE:
// - One typed client for every endpoint the views need
// - Bearer token taken from the shared SessionHandle on every request
// - All failures funnel through `send`, which maps HTTP status to AppError
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never decides whether a transition is legal; the lifecycle manager does
// - A 401 on any authenticated call ends the session exactly here

use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::wire::{
    convert_all, AdminPayload, AdminRecord, ApplicationRecord, CandidatePayload, CandidateRecord,
    CompanyPayload, CompanyRecord, ErrorBody, JobRecord, LoginRequest, LoginResponse,
};
use crate::config::ClientConfig;
use crate::domain::{
    AdminAccount, AdminDraft, ApplicationId, ApplicationStatus, CandidateDraft, CandidateId,
    CandidateProfile, CompanyDraft, CompanyId, CompanyProfile, Job, JobApplication, JobDraft,
    JobId, NewApplication, Role,
};
use crate::error::{AppError, AppResult};
use crate::events::SessionEndReason;
use crate::session::SessionHandle;

/// What a request was for. Decides how a failure status is reported.
#[derive(Debug, Clone)]
enum Call {
    Read,
    Write,
    Submit {
        candidate_id: CandidateId,
        job_id: JobId,
    },
    StatusChange {
        target: ApplicationStatus,
    },
    Login,
    /// Unauthenticated account creation
    Signup,
}

/// Identity returned by a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub token: String,
    pub role: Role,
    pub account_id: String,
    pub display_name: Option<String>,
}

#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: Url,
    session: SessionHandle,
}

impl BackendClient {
    pub fn new(config: &ClientConfig, session: SessionHandle) -> AppResult<Self> {
        let base_url = Url::parse(&config.api_base_url).map_err(|e| {
            AppError::Config(format!("invalid API URL '{}': {}", config.api_base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "API URL '{}' cannot take a path",
                config.api_base_url
            )));
        }

        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("jobportal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    // ========================================================================
    // AUTH
    // ========================================================================

    /// POST /login. Does not touch the session; SessionService installs it.
    pub async fn login(&self, email: &str, password: &str, role: Role) -> AppResult<LoginOutcome> {
        let url = self.endpoint(&["login"])?;
        let role_name = role.to_string();
        let body = LoginRequest {
            email,
            password,
            role: &role_name,
        };

        let response = self
            .send(self.http.post(url).json(&body), Call::Login)
            .await?;
        let reply: LoginResponse = decode(response).await?;
        login_outcome(reply, role)
    }

    // ========================================================================
    // JOB APPLICATIONS
    // ========================================================================

    pub async fn submit_application(&self, new: &NewApplication) -> AppResult<JobApplication> {
        let url = self.endpoint(&["job-applications"])?;
        let call = Call::Submit {
            candidate_id: new.candidate_id.clone(),
            job_id: new.job_id.clone(),
        };
        let request = self
            .request(Method::POST, url)
            .json(&ApplicationRecord::for_submission(new));

        let response = self.send(request, call).await?;
        decode::<ApplicationRecord>(response).await?.into_domain()
    }

    /// PUT /job-applications/{id}?status={status}
    pub async fn update_application_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> AppResult<JobApplication> {
        let mut url = self.endpoint(&["job-applications", id.as_str()])?;
        url.query_pairs_mut().append_pair("status", status.as_str());

        let response = self
            .send(
                self.request(Method::PUT, url),
                Call::StatusChange { target: status },
            )
            .await?;
        decode::<ApplicationRecord>(response).await?.into_domain()
    }

    pub async fn application(&self, id: &ApplicationId) -> AppResult<JobApplication> {
        let url = self.endpoint(&["job-applications", id.as_str()])?;
        self.fetch::<ApplicationRecord>(url).await?.into_domain()
    }

    pub async fn delete_application(&self, id: &ApplicationId) -> AppResult<()> {
        let url = self.endpoint(&["job-applications", id.as_str()])?;
        self.send(self.request(Method::DELETE, url), Call::Write)
            .await?;
        Ok(())
    }

    pub async fn applications_for_candidate(
        &self,
        candidate_id: &CandidateId,
    ) -> AppResult<Vec<JobApplication>> {
        let url = self.endpoint(&["job-applications", "candidate", candidate_id.as_str()])?;
        self.fetch_applications(url).await
    }

    pub async fn applications_for_job(
        &self,
        job_id: &JobId,
        status: Option<ApplicationStatus>,
    ) -> AppResult<Vec<JobApplication>> {
        let mut url = self.endpoint(&["job-applications", "job", job_id.as_str()])?;
        if let Some(status) = status {
            url.query_pairs_mut().append_pair("status", status.as_str());
        }
        self.fetch_applications(url).await
    }

    pub async fn applications_with_status(
        &self,
        status: ApplicationStatus,
    ) -> AppResult<Vec<JobApplication>> {
        let url = self.endpoint(&["job-applications", "status", status.as_str()])?;
        self.fetch_applications(url).await
    }

    pub async fn all_applications(&self) -> AppResult<Vec<JobApplication>> {
        let url = self.endpoint(&["job-applications"])?;
        self.fetch_applications(url).await
    }

    // ========================================================================
    // JOBS
    // ========================================================================

    pub async fn all_jobs(&self) -> AppResult<Vec<Job>> {
        let url = self.endpoint(&["jobs"])?;
        self.fetch_jobs(url).await
    }

    pub async fn job(&self, id: &JobId) -> AppResult<Job> {
        let url = self.endpoint(&["jobs", id.as_str()])?;
        self.fetch::<JobRecord>(url).await?.into_domain()
    }

    pub async fn jobs_for_company(&self, company_id: &CompanyId) -> AppResult<Vec<Job>> {
        let url = self.endpoint(&["jobs", "company", company_id.as_str()])?;
        self.fetch_jobs(url).await
    }

    pub async fn search_jobs_by_position(&self, term: &str) -> AppResult<Vec<Job>> {
        let url = self.endpoint(&["jobs", "search", "position", term])?;
        self.fetch_jobs(url).await
    }

    pub async fn search_jobs_by_skill(&self, term: &str) -> AppResult<Vec<Job>> {
        let url = self.endpoint(&["jobs", "search", "skill", term])?;
        self.fetch_jobs(url).await
    }

    pub async fn create_job(&self, company_id: &CompanyId, draft: &JobDraft) -> AppResult<Job> {
        let url = self.endpoint(&["jobs"])?;
        let request = self
            .request(Method::POST, url)
            .json(&JobRecord::from_draft(company_id, draft));
        let response = self.send(request, Call::Write).await?;
        decode::<JobRecord>(response).await?.into_domain()
    }

    pub async fn update_job(
        &self,
        id: &JobId,
        company_id: &CompanyId,
        draft: &JobDraft,
    ) -> AppResult<Job> {
        let url = self.endpoint(&["jobs", id.as_str()])?;
        let request = self
            .request(Method::PUT, url)
            .json(&JobRecord::from_draft(company_id, draft));
        let response = self.send(request, Call::Write).await?;
        decode::<JobRecord>(response).await?.into_domain()
    }

    pub async fn delete_job(&self, id: &JobId) -> AppResult<()> {
        let url = self.endpoint(&["jobs", id.as_str()])?;
        self.send(self.request(Method::DELETE, url), Call::Write)
            .await?;
        Ok(())
    }

    // ========================================================================
    // DIRECTORY
    // ========================================================================

    pub async fn companies(&self) -> AppResult<Vec<CompanyProfile>> {
        let url = self.endpoint(&["companies"])?;
        let records: Vec<CompanyRecord> = self.fetch(url).await?;
        Ok(records.into_iter().map(CompanyProfile::from).collect())
    }

    pub async fn company(&self, id: &CompanyId) -> AppResult<CompanyProfile> {
        let url = self.endpoint(&["companies", id.as_str()])?;
        Ok(self.fetch::<CompanyRecord>(url).await?.into())
    }

    pub async fn candidates(&self) -> AppResult<Vec<CandidateProfile>> {
        let url = self.endpoint(&["candidates"])?;
        let records: Vec<CandidateRecord> = self.fetch(url).await?;
        Ok(records.into_iter().map(CandidateProfile::from).collect())
    }

    pub async fn candidate(&self, id: &CandidateId) -> AppResult<CandidateProfile> {
        let url = self.endpoint(&["candidates", id.as_str()])?;
        Ok(self.fetch::<CandidateRecord>(url).await?.into())
    }

    /// POST /companies without a token
    pub async fn register_company(&self, draft: &CompanyDraft) -> AppResult<CompanyProfile> {
        let url = self.endpoint(&["companies"])?;
        let request = self.http.post(url).json(&CompanyPayload::from(draft));
        let response = self.send(request, Call::Signup).await?;
        Ok(decode::<CompanyRecord>(response).await?.into())
    }

    /// POST /candidates without a token
    pub async fn register_candidate(&self, draft: &CandidateDraft) -> AppResult<CandidateProfile> {
        let url = self.endpoint(&["candidates"])?;
        let request = self.http.post(url).json(&CandidatePayload::from(draft));
        let response = self.send(request, Call::Signup).await?;
        Ok(decode::<CandidateRecord>(response).await?.into())
    }

    pub async fn update_company(
        &self,
        id: &CompanyId,
        draft: &CompanyDraft,
    ) -> AppResult<CompanyProfile> {
        let url = self.endpoint(&["companies", id.as_str()])?;
        let request = self
            .request(Method::PUT, url)
            .json(&CompanyPayload::from(draft));
        let response = self.send(request, Call::Write).await?;
        Ok(decode::<CompanyRecord>(response).await?.into())
    }

    pub async fn update_candidate(
        &self,
        id: &CandidateId,
        draft: &CandidateDraft,
    ) -> AppResult<CandidateProfile> {
        let url = self.endpoint(&["candidates", id.as_str()])?;
        let request = self
            .request(Method::PUT, url)
            .json(&CandidatePayload::from(draft));
        let response = self.send(request, Call::Write).await?;
        Ok(decode::<CandidateRecord>(response).await?.into())
    }

    pub async fn delete_company(&self, id: &CompanyId) -> AppResult<()> {
        let url = self.endpoint(&["companies", id.as_str()])?;
        self.send(self.request(Method::DELETE, url), Call::Write)
            .await?;
        Ok(())
    }

    pub async fn delete_candidate(&self, id: &CandidateId) -> AppResult<()> {
        let url = self.endpoint(&["candidates", id.as_str()])?;
        self.send(self.request(Method::DELETE, url), Call::Write)
            .await?;
        Ok(())
    }

    /// POST /admins; needs an admin token
    pub async fn create_admin(&self, draft: &AdminDraft) -> AppResult<AdminAccount> {
        let url = self.endpoint(&["admins"])?;
        let request = self
            .request(Method::POST, url)
            .json(&AdminPayload::from(draft));
        let response = self.send(request, Call::Write).await?;
        decode::<AdminRecord>(response).await?.into_domain()
    }

    // ========================================================================
    // PLUMBING
    // ========================================================================

    /// Base URL plus percent-encoded path segments
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                AppError::Config(format!("API URL '{}' cannot take a path", self.base_url))
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(header::ACCEPT, "application/json");

        match self.session.token() {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send(&self, request: RequestBuilder, call: Call) -> AppResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        log::debug!("backend answered {} ({:?}): {}", status, call, body);

        if status == StatusCode::UNAUTHORIZED && !matches!(call, Call::Login | Call::Signup) {
            log::warn!("backend rejected the session token, ending session");
            self.session.end(SessionEndReason::Unauthorized)?;
            return Err(AppError::Unauthorized);
        }

        Err(map_failure(status, &body, &call))
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> AppResult<T> {
        let response = self.send(self.request(Method::GET, url), Call::Read).await?;
        decode(response).await
    }

    async fn fetch_applications(&self, url: Url) -> AppResult<Vec<JobApplication>> {
        let records: Vec<ApplicationRecord> = self.fetch(url).await?;
        convert_all(records, ApplicationRecord::into_domain)
    }

    async fn fetch_jobs(&self, url: Url) -> AppResult<Vec<Job>> {
        let records: Vec<JobRecord> = self.fetch(url).await?;
        convert_all(records, JobRecord::into_domain)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// Message shown to the user for a failed call
fn failure_message(status: StatusCode, body: &str) -> String {
    if let Some(message) = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
    {
        return message;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && !trimmed.starts_with(['{', '<']) && trimmed.len() <= 200 {
        return trimmed.to_string();
    }
    format!("HTTP {}", status)
}

/// Map a non-2xx status to the error taxonomy. 401 on authenticated calls
/// never reaches here.
fn map_failure(status: StatusCode, body: &str, call: &Call) -> AppError {
    let message = failure_message(status, body);

    match (status, call) {
        (StatusCode::NOT_FOUND, _) => AppError::NotFound(message),
        (StatusCode::CONFLICT, Call::Submit { candidate_id, job_id }) => {
            AppError::DuplicateApplication {
                candidate_id: candidate_id.clone(),
                job_id: job_id.clone(),
            }
        }
        (
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY,
            Call::StatusChange { target },
        ) => AppError::invalid_transition("current", target, message),
        (
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY,
            Call::Submit { .. } | Call::Write,
        ) => AppError::Validation(message),
        (StatusCode::UNAUTHORIZED | StatusCode::BAD_REQUEST, Call::Login) => {
            AppError::Validation(message)
        }
        (
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY,
            Call::Signup,
        ) => AppError::Validation(message),
        _ => AppError::Network(message),
    }
}

fn login_outcome(reply: LoginResponse, requested: Role) -> AppResult<LoginOutcome> {
    let token = match reply.token.filter(|t| !t.is_empty()) {
        Some(token) => token,
        None => {
            return Err(AppError::Validation(
                reply
                    .error_message
                    .unwrap_or_else(|| "Invalid credentials".to_string()),
            ))
        }
    };

    let role = match reply.role {
        Some(raw) => raw.parse::<Role>()?,
        None => requested,
    };

    let user = reply.user.unwrap_or_default();
    let account_id = user
        .get("id")
        .and_then(|v| v.as_str())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Network("login response has no user id".to_string()))?
        .to_string();
    let display_name = ["name", "email"]
        .into_iter()
        .find_map(|key| user.get(key).and_then(|v| v.as_str()))
        .map(str::to_string);

    Ok(LoginOutcome {
        token,
        role,
        account_id,
        display_name,
    })
}
