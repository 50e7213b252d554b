// src/application/commands/candidate_commands.rs
//
// Candidate views: job search, job detail, apply, own applications

use crate::application::dto::{
    parse_job_id, ApplicationDto, ApplyDto, CandidateFormDto, JobDetailDto, JobDto,
};
use crate::application::error_handling::{ErrorResponse, TransitionFailure};
use crate::application::state::AppState;
use crate::domain::{
    filter_by_status, parse_status_filter, sort_by_recency, ApplicationStatus, CandidateProfile,
    Role,
};
use crate::error::AppError;
use crate::services::{ApplicationLifecycleManager, CandidateOverview, CreateApplicationRequest, JobService};

use super::{application_row, application_rows, change_status};

pub async fn update_candidate_profile(
    state: &AppState,
    form: CandidateFormDto,
) -> Result<CandidateProfile, ErrorResponse> {
    let session = state.session.require_role(Role::Candidate)?;
    Ok(state
        .account_service
        .update_candidate(&session.actor(), form.into_draft())
        .await?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSearch {
    Position,
    Skill,
}

/// Search jobs, then narrow by location.
/// `Ok(None)` means a newer search superseded this one.
pub async fn search_jobs(
    state: &AppState,
    by: JobSearch,
    term: &str,
    location: &str,
) -> Result<Option<Vec<JobDto>>, ErrorResponse> {
    state.session.require()?;
    let ticket = state.jobs_view.begin();

    let jobs = match by {
        JobSearch::Position => state.job_service.search_by_position(term).await?,
        JobSearch::Skill => state.job_service.search_by_skill(term).await?,
    };
    let jobs = JobService::filter_by_location(&jobs, location.trim());

    Ok(state
        .jobs_view
        .accept(ticket, jobs.into_iter().map(JobDto::from).collect()))
}

/// Every open job, narrowed by location. `Ok(None)` when superseded.
pub async fn browse_jobs(
    state: &AppState,
    location: &str,
) -> Result<Option<Vec<JobDto>>, ErrorResponse> {
    state.session.require()?;
    let ticket = state.jobs_view.begin();

    let jobs = state.job_service.all_jobs().await?;
    let jobs = JobService::filter_by_location(&jobs, location.trim());

    Ok(state
        .jobs_view
        .accept(ticket, jobs.into_iter().map(JobDto::from).collect()))
}

/// A job with the candidate's application for it, deciding between the
/// Apply button and the status/actions of an existing application
pub async fn job_detail(state: &AppState, job_id: &str) -> Result<JobDetailDto, ErrorResponse> {
    let session = state.session.require_role(Role::Candidate)?;
    let candidate_id = session.candidate_id().ok_or(AppError::Unauthorized)?;
    let job_id = parse_job_id(job_id)?;

    let job = state.job_service.job(&job_id).await?;
    let application = state
        .lifecycle
        .application_for_job(&candidate_id, &job_id)
        .await?;
    let can_apply = state.lifecycle.can_apply(&candidate_id, &job_id).await?;

    let application = match application {
        Some(app) => Some(application_row(state, app, Role::Candidate).await),
        None => None,
    };

    Ok(JobDetailDto {
        job: job.into(),
        application,
        can_apply,
    })
}

pub async fn apply(state: &AppState, form: ApplyDto) -> Result<ApplicationDto, ErrorResponse> {
    let session = state.session.require_role(Role::Candidate)?;
    let candidate_id = session.candidate_id().ok_or(AppError::Unauthorized)?;
    let job_id = parse_job_id(&form.job_id)?;
    let _submitting = state.apply_form.try_begin()?;

    let application = state
        .lifecycle
        .create_application(
            &session.actor(),
            CreateApplicationRequest {
                candidate_id,
                job_id,
                qualification: form.qualification,
                resume_link: form.resume_link,
            },
        )
        .await?;

    Ok(application_row(state, application, Role::Candidate).await)
}

/// The candidate's applications, newest first, optionally one status only.
/// `Ok(None)` when superseded.
pub async fn my_applications(
    state: &AppState,
    status_filter: &str,
) -> Result<Option<Vec<ApplicationDto>>, ErrorResponse> {
    let session = state.session.require_role(Role::Candidate)?;
    let candidate_id = session.candidate_id().ok_or(AppError::Unauthorized)?;
    let status = parse_status_filter(status_filter).map_err(AppError::from)?;
    let ticket = state.applications_view.begin();

    let applications = state
        .lifecycle
        .applications_for_candidate(&candidate_id)
        .await?;
    let mut applications = filter_by_status(&applications, status);
    sort_by_recency(&mut applications);

    let rows = application_rows(state, applications, Role::Candidate).await;
    Ok(state.applications_view.accept(ticket, rows))
}

pub async fn withdraw(state: &AppState, application_id: &str) -> Result<ApplicationDto, TransitionFailure> {
    let session = state.session.require_role(Role::Candidate)?;
    change_status(state, &session, application_id, ApplicationStatus::Withdrawn.as_str()).await
}

pub async fn accept_offer(
    state: &AppState,
    application_id: &str,
) -> Result<ApplicationDto, TransitionFailure> {
    let session = state.session.require_role(Role::Candidate)?;
    change_status(state, &session, application_id, ApplicationStatus::Accepted.as_str()).await
}

pub async fn candidate_home(state: &AppState) -> Result<CandidateOverview, ErrorResponse> {
    let session = state.session.require_role(Role::Candidate)?;
    let candidate_id = session.candidate_id().ok_or(AppError::Unauthorized)?;
    Ok(state
        .statistics_service
        .candidate_overview(&candidate_id)
        .await?)
}

/// Offers awaiting an answer, for the home view's shortcut list
pub async fn pending_offers(state: &AppState) -> Result<Vec<ApplicationDto>, ErrorResponse> {
    let session = state.session.require_role(Role::Candidate)?;
    let candidate_id = session.candidate_id().ok_or(AppError::Unauthorized)?;

    let applications = state
        .lifecycle
        .applications_for_candidate(&candidate_id)
        .await?;
    let offers = ApplicationLifecycleManager::filter_by_status(
        &applications,
        Some(ApplicationStatus::Offered),
    );
    Ok(application_rows(state, offers, Role::Candidate).await)
}
