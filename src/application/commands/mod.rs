// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between views and services
// - Commands accept form values, return DTOs or a dismissable ErrorResponse
// - Commands check the session role; services check everything else
// - Commands NEVER contain business logic

pub mod admin_commands;
pub mod candidate_commands;
pub mod company_commands;
pub mod session_commands;


pub use admin_commands::*;
pub use candidate_commands::*;
pub use company_commands::*;
pub use session_commands::*;

use std::collections::HashMap;

use crate::application::dto::{non_empty, parse_status, ApplicationDto};
use crate::application::error_handling::TransitionFailure;
use crate::application::state::AppState;
use crate::domain::{ApplicationId, CandidateId, JobApplication, JobId, JobSummary, Role, UNKNOWN};
use crate::session::Session;

/// Listing rows with their job summaries. Each job is looked up once;
/// lookups that fail show "Unknown".
pub(crate) async fn application_rows(
    state: &AppState,
    applications: Vec<JobApplication>,
    viewer: Role,
) -> Vec<ApplicationDto> {
    let mut summaries: HashMap<JobId, JobSummary> = HashMap::new();
    let mut rows = Vec::with_capacity(applications.len());

    for application in applications {
        let summary = match summaries.get(&application.job_id) {
            Some(summary) => summary.clone(),
            None => {
                let summary = state
                    .job_service
                    .job_summary_or_unknown(&application.job_id)
                    .await;
                summaries.insert(application.job_id.clone(), summary.clone());
                summary
            }
        };
        rows.push(ApplicationDto::new(application, summary, viewer));
    }
    rows
}

pub(crate) async fn application_row(
    state: &AppState,
    application: JobApplication,
    viewer: Role,
) -> ApplicationDto {
    let summary = state
        .job_service
        .job_summary_or_unknown(&application.job_id)
        .await;
    ApplicationDto::new(application, summary, viewer)
}

/// Display name for an applicant, "Unknown" when the lookup fails
pub(crate) async fn candidate_name_or_unknown(state: &AppState, id: &CandidateId) -> String {
    match state.directory.get_candidate(id).await {
        Ok(Some(profile)) => profile.name,
        Ok(None) => UNKNOWN.to_string(),
        Err(e) => {
            log::warn!("failed to load candidate {}: {}", id, e);
            UNKNOWN.to_string()
        }
    }
}

/// Shared by the candidate and company status actions.
///
/// When the change is refused (usually because someone else moved the
/// application first) the record is fetched again and returned with the
/// error.
pub(crate) async fn change_status(
    state: &AppState,
    session: &Session,
    application_id: &str,
    target: &str,
) -> Result<ApplicationDto, TransitionFailure> {
    let id = ApplicationId::new(non_empty("application id", application_id)?);
    let target = parse_status(target)?;
    let _submitting = state.status_form.try_begin()?;

    match state
        .lifecycle
        .request_transition(&id, &session.actor(), target)
        .await
    {
        Ok(updated) => Ok(application_row(state, updated, session.role).await),
        Err(e) if e.is_recoverable_conflict() => {
            let current = match state.lifecycle.application(&id).await {
                Ok(application) => Some(application_row(state, application, session.role).await),
                Err(refetch) => {
                    log::warn!("could not refresh application {}: {}", id, refetch);
                    None
                }
            };
            Err(TransitionFailure {
                error: e.into(),
                current,
            })
        }
        Err(e) => Err(e.into()),
    }
}
