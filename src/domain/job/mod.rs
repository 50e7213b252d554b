pub mod entity;
pub mod invariants;
pub mod queries;

pub use entity::{Job, JobDraft, JobSummary, JobType, UNKNOWN};
pub use invariants::validate_job_draft;
pub use queries::filter_by_location_substring;
