pub mod entity;
pub mod invariants;
pub mod queries;
pub mod transitions;

pub use entity::{ApplicationStatus, JobApplication, NewApplication};
pub use invariants::{validate_new_application, validate_resume_link, ReapplyPolicy};
pub use queries::{
    filter_by_status, find_blocking_application, parse_status_filter, recent_applications,
    resolve_application_for_job, sort_by_recency,
};
pub use transitions::{available_targets, permitted_actor, validate_transition, Transition, TRANSITIONS};
