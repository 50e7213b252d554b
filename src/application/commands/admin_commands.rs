// src/application/commands/admin_commands.rs
//
// Admin views: platform-wide listings, removals, analytics

use crate::application::dto::{
    non_empty, parse_candidate_id, parse_company_id, parse_job_id, AdminFormDto, ApplicationDto,
};
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::{
    parse_status_filter, sort_by_recency, AdminAccount, ApplicationId, CandidateProfile,
    CompanyProfile, Role,
};
use crate::error::AppError;
use crate::services::AdminReport;

use super::application_rows;

/// Every application, or those with one status. `Ok(None)` when superseded.
pub async fn all_applications(
    state: &AppState,
    status_filter: &str,
) -> Result<Option<Vec<ApplicationDto>>, ErrorResponse> {
    state.session.require_role(Role::Admin)?;
    let status = parse_status_filter(status_filter).map_err(AppError::from)?;
    let ticket = state.applications_view.begin();

    let mut applications = match status {
        Some(status) => state.lifecycle.applications_with_status(status).await?,
        None => state.lifecycle.all_applications().await?,
    };
    sort_by_recency(&mut applications);

    let rows = application_rows(state, applications, Role::Admin).await;
    Ok(state.applications_view.accept(ticket, rows))
}

pub async fn remove_application(state: &AppState, application_id: &str) -> Result<(), ErrorResponse> {
    let session = state.session.require_role(Role::Admin)?;
    let id = ApplicationId::new(non_empty("application id", application_id)?);
    state
        .lifecycle
        .delete_application(&id, &session.actor())
        .await?;
    Ok(())
}

pub async fn remove_job(state: &AppState, job_id: &str) -> Result<(), ErrorResponse> {
    let session = state.session.require_role(Role::Admin)?;
    let job_id = parse_job_id(job_id)?;
    state
        .job_service
        .delete_job(&session.actor(), &job_id)
        .await?;
    Ok(())
}

pub async fn analytics(state: &AppState) -> Result<AdminReport, ErrorResponse> {
    state.session.require_role(Role::Admin)?;
    Ok(state.statistics_service.admin_report().await?)
}

pub async fn list_companies(state: &AppState) -> Result<Vec<CompanyProfile>, ErrorResponse> {
    state.session.require_role(Role::Admin)?;
    Ok(state.directory.list_companies().await?)
}

pub async fn list_candidates(state: &AppState) -> Result<Vec<CandidateProfile>, ErrorResponse> {
    state.session.require_role(Role::Admin)?;
    Ok(state.directory.list_candidates().await?)
}

pub async fn delete_candidate(state: &AppState, candidate_id: &str) -> Result<(), ErrorResponse> {
    let session = state.session.require_role(Role::Admin)?;
    let id = parse_candidate_id(candidate_id)?;
    state
        .account_service
        .delete_candidate(&session.actor(), &id)
        .await?;
    Ok(())
}

pub async fn delete_company(state: &AppState, company_id: &str) -> Result<(), ErrorResponse> {
    let session = state.session.require_role(Role::Admin)?;
    let id = parse_company_id(company_id)?;
    state
        .account_service
        .delete_company(&session.actor(), &id)
        .await?;
    Ok(())
}

pub async fn create_admin(
    state: &AppState,
    form: AdminFormDto,
) -> Result<AdminAccount, ErrorResponse> {
    let session = state.session.require_role(Role::Admin)?;
    Ok(state
        .account_service
        .create_admin(&session.actor(), form.into())
        .await?)
}
