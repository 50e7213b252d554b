// Pure read-side helpers shared by the candidate, company and admin views.
// None of these touch the backend.

use std::cmp::Reverse;

use super::entity::{ApplicationStatus, JobApplication};
use super::invariants::ReapplyPolicy;
use crate::domain::{CandidateId, DomainResult, JobId};

/// Parses a view's status filter; an empty selection means "no filter"
pub fn parse_status_filter(raw: &str) -> DomainResult<Option<ApplicationStatus>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some)
}

/// Applications with exactly `status`, in their original order.
/// `None` returns every application unchanged.
pub fn filter_by_status(
    applications: &[JobApplication],
    status: Option<ApplicationStatus>,
) -> Vec<JobApplication> {
    match status {
        None => applications.to_vec(),
        Some(status) => applications
            .iter()
            .filter(|app| app.status == status)
            .cloned()
            .collect(),
    }
}

/// The candidate's application for a job, if they applied.
///
/// When several records exist for the pair (re-application after a
/// withdrawal) the active one wins, then the most recent.
pub fn resolve_application_for_job<'a>(
    applications: &'a [JobApplication],
    job_id: &JobId,
    candidate_id: &CandidateId,
) -> Option<&'a JobApplication> {
    applications
        .iter()
        .enumerate()
        .filter(|(_, app)| &app.job_id == job_id && &app.candidate_id == candidate_id)
        .max_by_key(|(idx, app)| (app.status.is_active(), app.created_at, *idx))
        .map(|(_, app)| app)
}

/// An existing application that prevents `candidate_id` from applying to
/// `job_id` again under `policy`
pub fn find_blocking_application<'a>(
    applications: &'a [JobApplication],
    candidate_id: &CandidateId,
    job_id: &JobId,
    policy: ReapplyPolicy,
) -> Option<&'a JobApplication> {
    applications.iter().find(|app| {
        &app.candidate_id == candidate_id && &app.job_id == job_id && policy.blocks(app.status)
    })
}

/// Most recent first. Records without a creation time sort last and keep
/// their relative order.
pub fn sort_by_recency(applications: &mut [JobApplication]) {
    applications.sort_by_key(|app| Reverse(app.created_at));
}

/// The `limit` most recent applications
pub fn recent_applications(applications: &[JobApplication], limit: usize) -> Vec<JobApplication> {
    let mut sorted = applications.to_vec();
    sort_by_recency(&mut sorted);
    sorted.truncate(limit);
    sorted
}
