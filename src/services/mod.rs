// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod account_service;
pub mod application_lifecycle_manager;
pub mod job_service;
pub mod session_service;
pub mod statistics_service;

#[cfg(test)]
mod application_lifecycle_manager_tests;

pub use account_service::AccountService;

pub use application_lifecycle_manager::{ApplicationLifecycleManager, CreateApplicationRequest};

pub use job_service::JobService;

pub use session_service::{Authenticator, LoginRequest, SessionService};

pub use statistics_service::{AdminReport, CandidateOverview, StatisticsService};
