// src/application/commands/company_commands.rs
//
// Company views: own jobs, applications to them, status changes

use std::collections::HashMap;

use crate::application::dto::{parse_job_id, ApplicationDto, CompanyFormDto, JobDto, JobFormDto};
use crate::application::error_handling::{ErrorResponse, TransitionFailure};
use crate::application::state::AppState;
use crate::domain::{
    parse_status_filter, sort_by_recency, CandidateId, CompanyDashboardSummary, CompanyProfile,
    Role, UNKNOWN,
};
use crate::error::AppError;

use super::{application_rows, candidate_name_or_unknown, change_status};

pub async fn company_jobs(state: &AppState) -> Result<Vec<JobDto>, ErrorResponse> {
    let session = state.session.require_role(Role::Company)?;
    let company_id = session.company_id().ok_or(AppError::Unauthorized)?;

    let jobs = state.job_service.jobs_for_company(&company_id).await?;
    Ok(jobs.into_iter().map(JobDto::from).collect())
}

pub async fn update_company_profile(
    state: &AppState,
    form: CompanyFormDto,
) -> Result<CompanyProfile, ErrorResponse> {
    let session = state.session.require_role(Role::Company)?;
    Ok(state
        .account_service
        .update_company(&session.actor(), form.into_draft())
        .await?)
}

pub async fn post_job(state: &AppState, form: JobFormDto) -> Result<JobDto, ErrorResponse> {
    let session = state.session.require_role(Role::Company)?;
    let draft = form.into_draft()?;
    let _submitting = state.job_form.try_begin()?;

    let job = state.job_service.post_job(&session.actor(), draft).await?;
    Ok(job.into())
}

pub async fn update_job(
    state: &AppState,
    job_id: &str,
    form: JobFormDto,
) -> Result<JobDto, ErrorResponse> {
    let session = state.session.require_role(Role::Company)?;
    let job_id = parse_job_id(job_id)?;
    let draft = form.into_draft()?;
    let _submitting = state.job_form.try_begin()?;

    let job = state
        .job_service
        .update_job(&session.actor(), &job_id, draft)
        .await?;
    Ok(job.into())
}

pub async fn delete_job(state: &AppState, job_id: &str) -> Result<(), ErrorResponse> {
    let session = state.session.require_role(Role::Company)?;
    let job_id = parse_job_id(job_id)?;
    state
        .job_service
        .delete_job(&session.actor(), &job_id)
        .await?;
    Ok(())
}

/// Applications to one of the company's jobs, newest first, with applicant
/// names. `Ok(None)` when superseded.
pub async fn job_applications(
    state: &AppState,
    job_id: &str,
    status_filter: &str,
) -> Result<Option<Vec<ApplicationDto>>, ErrorResponse> {
    let session = state.session.require_role(Role::Company)?;
    let job_id = parse_job_id(job_id)?;
    let status = parse_status_filter(status_filter).map_err(AppError::from)?;
    let ticket = state.applications_view.begin();

    let job = state.job_service.job(&job_id).await?;
    if !session.actor().is_company(&job.company_id) {
        return Err(ErrorResponse::validation(format!(
            "job {} belongs to another company",
            job_id
        )));
    }

    let mut applications = state
        .lifecycle
        .applications_for_job(&job_id, status)
        .await?;
    sort_by_recency(&mut applications);

    let mut names: HashMap<CandidateId, String> = HashMap::new();
    for application in &applications {
        if !names.contains_key(&application.candidate_id) {
            let name = candidate_name_or_unknown(state, &application.candidate_id).await;
            names.insert(application.candidate_id.clone(), name);
        }
    }

    let rows = application_rows(state, applications, Role::Company)
        .await
        .into_iter()
        .map(|row| {
            let name = names
                .get(&CandidateId::new(row.candidate_id.clone()))
                .cloned()
                .unwrap_or_else(|| UNKNOWN.to_string());
            row.with_candidate_name(name)
        })
        .collect();

    Ok(state.applications_view.accept(ticket, rows))
}

/// Move an application to Interviewing, Offered or Rejected
pub async fn set_application_status(
    state: &AppState,
    application_id: &str,
    status: &str,
) -> Result<ApplicationDto, TransitionFailure> {
    let session = state.session.require_role(Role::Company)?;
    change_status(state, &session, application_id, status).await
}

pub async fn company_home(state: &AppState) -> Result<CompanyDashboardSummary, ErrorResponse> {
    let session = state.session.require_role(Role::Company)?;
    let company_id = session.company_id().ok_or(AppError::Unauthorized)?;
    Ok(state
        .statistics_service
        .company_dashboard(&company_id)
        .await?)
}
