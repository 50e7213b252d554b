// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod actor;
pub mod application;
pub mod directory;
pub mod ids;
pub mod job;
pub mod statistics;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Identity
pub use ids::{AdminId, ApplicationId, CandidateId, CompanyId, JobId};

// Actors
pub use actor::{Actor, Role};

// Application Domain
pub use application::{
    available_targets, filter_by_status, find_blocking_application, parse_status_filter,
    recent_applications, resolve_application_for_job, sort_by_recency,
    validate_new_application, validate_transition, ApplicationStatus, JobApplication,
    NewApplication, ReapplyPolicy, TRANSITIONS,
};

// Directory listings
pub use directory::{
    validate_admin_draft, validate_candidate_draft, validate_company_draft, AdminAccount,
    AdminDraft, CandidateDraft, CandidateProfile, CompanyDraft, CompanyProfile, DraftPurpose,
};

// Job Domain
pub use job::{
    filter_by_location_substring, validate_job_draft, Job, JobDraft, JobSummary, JobType, UNKNOWN,
};

// Statistics Domain (Derived Data)
pub use statistics::{
    CompanyActivity, CompanyDashboardSummary, KeyMetrics, StatusCounts, StatusPercentages,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid state transition {from} -> {to}: {reason}")]
    InvalidStateTransition {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Unknown {kind}: '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
