// src/lib.rs
// JobPortal - role-based job portal client
//
// Architecture:
// - Domain-centric: lifecycle rules, filters and statistics live in domain/
// - Event-driven: services announce what changed on the EventBus
// - Backend-agnostic services: repositories hide the portal REST API
// - Application layer: commands a front end calls, returning DTOs

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod session;

// ============================================================================
// BACKEND ACCESS
// ============================================================================

pub mod integrations;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    // Identity
    Actor,
    AdminAccount,
    AdminDraft,
    ApplicationId,
    // Applications
    ApplicationStatus,
    CandidateDraft,
    CandidateId,
    CandidateProfile,
    CompanyDraft,
    CompanyId,
    CompanyProfile,
    DomainError,
    // Jobs
    Job,
    JobApplication,
    JobDraft,
    JobId,
    JobType,
    NewApplication,
    ReapplyPolicy,
    Role,
    // Statistics
    StatusCounts,
    StatusPercentages,
    TRANSITIONS,
};

// ============================================================================
// PUBLIC API - Errors, config, events
// ============================================================================

pub use config::ClientConfig;
pub use error::{AppError, AppResult};
pub use events::{DomainEvent, EventBus, EventLogEntry};

// ============================================================================
// PUBLIC API - Services and repositories
// ============================================================================

pub use repositories::{ApplicationRepository, DirectoryRepository, JobRepository};
pub use services::{
    AccountService, ApplicationLifecycleManager, CreateApplicationRequest, JobService,
    SessionService, StatisticsService,
};
pub use session::{Session, SessionHandle};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

pub use application::commands;
pub use application::dto;

pub use integrations::BackendClient;
