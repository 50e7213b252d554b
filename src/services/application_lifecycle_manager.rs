// src/services/application_lifecycle_manager.rs
//
// Application Lifecycle Manager
//
// CRITICAL RULES:
// - The ONLY code path that creates applications or changes their status
// - Every status change is checked against the transition table, the
//   actor's role and ownership before anything is sent to the backend
// - Queries never mutate; pure helpers delegate to the domain

use std::sync::Arc;

use crate::domain::{
    available_targets, filter_by_location_substring, filter_by_status, find_blocking_application,
    recent_applications, resolve_application_for_job, sort_by_recency, validate_new_application,
    Actor, ApplicationId, ApplicationStatus, CandidateId, Job,
    JobApplication, JobId, NewApplication, ReapplyPolicy, Role,
};
use crate::error::{AppError, AppResult};
use crate::events::{ApplicationDeleted, ApplicationStatusChanged, ApplicationSubmitted, EventBus};
use crate::repositories::{ApplicationRepository, JobRepository};

/// Request to apply for a job
#[derive(Debug, Clone)]
pub struct CreateApplicationRequest {
    pub candidate_id: CandidateId,
    pub job_id: JobId,
    pub qualification: String,
    pub resume_link: String,
}

pub struct ApplicationLifecycleManager {
    application_repo: Arc<dyn ApplicationRepository>,
    job_repo: Arc<dyn JobRepository>,
    event_bus: Arc<EventBus>,
    reapply_policy: ReapplyPolicy,
}

impl ApplicationLifecycleManager {
    pub fn new(
        application_repo: Arc<dyn ApplicationRepository>,
        job_repo: Arc<dyn JobRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            application_repo,
            job_repo,
            event_bus,
            reapply_policy: ReapplyPolicy::default(),
        }
    }

    pub fn with_reapply_policy(mut self, policy: ReapplyPolicy) -> Self {
        self.reapply_policy = policy;
        self
    }

    pub fn reapply_policy(&self) -> ReapplyPolicy {
        self.reapply_policy
    }

    // ========================================================================
    // COMMANDS
    // ========================================================================

    /// Apply for a job on behalf of `actor`
    ///
    /// CRITICAL: fails with DuplicateApplication while a blocking application
    /// exists for the (candidate, job) pair
    pub async fn create_application(
        &self,
        actor: &Actor,
        request: CreateApplicationRequest,
    ) -> AppResult<JobApplication> {
        // 1. Only the candidate applies for themselves
        if !actor.is_candidate(&request.candidate_id) {
            return Err(AppError::invalid_transition(
                "none",
                ApplicationStatus::Applied,
                format!("only candidate {} may apply for themselves", request.candidate_id),
            ));
        }

        let new = NewApplication {
            candidate_id: request.candidate_id,
            job_id: request.job_id,
            qualification: request.qualification.trim().to_string(),
            resume_link: request.resume_link.trim().to_string(),
        };

        // 2. Validate required fields
        validate_new_application(&new)?;

        // 3. Validate job exists
        if self.job_repo.get_by_id(&new.job_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Job {}", new.job_id)));
        }

        // 4. Uniqueness of the (candidate, job) pair
        let existing = self
            .application_repo
            .list_by_candidate(&new.candidate_id)
            .await?;
        if let Some(blocking) =
            find_blocking_application(&existing, &new.candidate_id, &new.job_id, self.reapply_policy)
        {
            log::info!(
                "candidate {} already has application {} ({}) for job {}",
                new.candidate_id,
                blocking.id,
                blocking.status,
                new.job_id
            );
            return Err(AppError::DuplicateApplication {
                candidate_id: new.candidate_id,
                job_id: new.job_id,
            });
        }

        // 5. Persist
        let application = self.application_repo.create(&new).await?;

        // 6. Emit event
        self.event_bus.emit(ApplicationSubmitted::new(
            application.id.clone(),
            application.candidate_id.clone(),
            application.job_id.clone(),
        ));

        Ok(application)
    }

    /// Move an application to `target` on behalf of `actor`
    pub async fn request_transition(
        &self,
        application_id: &ApplicationId,
        actor: &Actor,
        target: ApplicationStatus,
    ) -> AppResult<JobApplication> {
        // 1. Load current record
        let application = self.application(application_id).await?;
        let from = application.status;

        // 2. Transition table and role, applied to a local copy
        let mut next = application.clone();
        next.transition_to(target, actor.role)?;

        // 3. Ownership
        self.ensure_owner(&application, actor, target).await?;

        // 4. Persist
        let updated = self
            .application_repo
            .update_status(application_id, next.status)
            .await
            .map_err(|e| with_source_status(e, from))?;

        // 5. Emit event
        log::info!(
            "application {} moved {} -> {} by {} {}",
            application_id,
            from,
            updated.status,
            actor.role,
            actor.id
        );
        self.event_bus.emit(ApplicationStatusChanged::new(
            application_id.clone(),
            from,
            updated.status,
            actor.role,
        ));

        Ok(updated)
    }

    /// Remove an application. Admins only.
    pub async fn delete_application(
        &self,
        application_id: &ApplicationId,
        actor: &Actor,
    ) -> AppResult<()> {
        if actor.role != Role::Admin {
            return Err(AppError::invalid_transition(
                "existing",
                "deleted",
                "only an admin may delete applications",
            ));
        }

        self.application_repo.delete(application_id).await?;
        self.event_bus
            .emit(ApplicationDeleted::new(application_id.clone()));
        Ok(())
    }

    async fn ensure_owner(
        &self,
        application: &JobApplication,
        actor: &Actor,
        target: ApplicationStatus,
    ) -> AppResult<()> {
        let owns = match actor.role {
            Role::Candidate => actor.is_candidate(&application.candidate_id),
            Role::Company => match self.job_repo.get_by_id(&application.job_id).await? {
                Some(job) => actor.is_company(&job.company_id),
                None => false,
            },
            Role::Admin => false,
        };

        if owns {
            return Ok(());
        }
        Err(AppError::invalid_transition(
            application.status,
            target,
            format!(
                "{} {} does not own application {}",
                actor.role, actor.id, application.id
            ),
        ))
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub async fn application(&self, application_id: &ApplicationId) -> AppResult<JobApplication> {
        self.application_repo
            .get_by_id(application_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {}", application_id)))
    }

    pub async fn applications_for_candidate(
        &self,
        candidate_id: &CandidateId,
    ) -> AppResult<Vec<JobApplication>> {
        self.application_repo.list_by_candidate(candidate_id).await
    }

    pub async fn applications_for_job(
        &self,
        job_id: &JobId,
        status: Option<ApplicationStatus>,
    ) -> AppResult<Vec<JobApplication>> {
        self.application_repo.list_by_job(job_id, status).await
    }

    pub async fn applications_with_status(
        &self,
        status: ApplicationStatus,
    ) -> AppResult<Vec<JobApplication>> {
        self.application_repo.list_by_status(status).await
    }

    pub async fn all_applications(&self) -> AppResult<Vec<JobApplication>> {
        self.application_repo.list_all().await
    }

    /// The candidate's current application for a job, if any
    pub async fn application_for_job(
        &self,
        candidate_id: &CandidateId,
        job_id: &JobId,
    ) -> AppResult<Option<JobApplication>> {
        let applications = self.application_repo.list_by_candidate(candidate_id).await?;
        Ok(resolve_application_for_job(&applications, job_id, candidate_id).cloned())
    }

    /// Whether a new application for the pair would be accepted
    pub async fn can_apply(&self, candidate_id: &CandidateId, job_id: &JobId) -> AppResult<bool> {
        let applications = self.application_repo.list_by_candidate(candidate_id).await?;
        Ok(find_blocking_application(&applications, candidate_id, job_id, self.reapply_policy).is_none())
    }

    /// Statuses `role` may request next; drives which actions a view offers
    pub fn available_actions(application: &JobApplication, role: Role) -> Vec<ApplicationStatus> {
        available_targets(application.status, role)
    }

    // ========================================================================
    // PURE VIEW HELPERS
    // ========================================================================

    pub fn filter_by_status(
        applications: &[JobApplication],
        status: Option<ApplicationStatus>,
    ) -> Vec<JobApplication> {
        filter_by_status(applications, status)
    }

    pub fn filter_by_location_substring(jobs: &[Job], substring: &str) -> Vec<Job> {
        filter_by_location_substring(jobs, substring)
    }

    pub fn resolve_application_for_job<'a>(
        applications: &'a [JobApplication],
        job_id: &JobId,
        candidate_id: &CandidateId,
    ) -> Option<&'a JobApplication> {
        resolve_application_for_job(applications, job_id, candidate_id)
    }

    pub fn sort_by_recency(applications: &mut [JobApplication]) {
        sort_by_recency(applications)
    }

    pub fn recent_applications(applications: &[JobApplication], limit: usize) -> Vec<JobApplication> {
        recent_applications(applications, limit)
    }
}

// The backend does not know what status we saw before the PUT
fn with_source_status(err: AppError, from: ApplicationStatus) -> AppError {
    match err {
        AppError::InvalidTransition { to, reason, .. } => AppError::InvalidTransition {
            from: from.to_string(),
            to,
            reason,
        },
        other => other,
    }
}
