// src/events/types.rs
//
// Domain events emitted by the services.
// Each event is an immutable fact that has already happened.
//
// RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{ApplicationId, ApplicationStatus, CandidateId, JobId, Role};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($name:ident) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                stringify!($name)
            }
        }
    };
}

// ============================================================================
// APPLICATION EVENTS
// ============================================================================

/// A candidate's application was accepted by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSubmitted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub application_id: ApplicationId,
    pub candidate_id: CandidateId,
    pub job_id: JobId,
}

impl ApplicationSubmitted {
    pub fn new(application_id: ApplicationId, candidate_id: CandidateId, job_id: JobId) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            application_id,
            candidate_id,
            job_id,
        }
    }
}

impl_domain_event!(ApplicationSubmitted);

/// An application moved along the lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationStatusChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub application_id: ApplicationId,
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
    pub changed_by: Role,
}

impl ApplicationStatusChanged {
    pub fn new(
        application_id: ApplicationId,
        from: ApplicationStatus,
        to: ApplicationStatus,
        changed_by: Role,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            application_id,
            from,
            to,
            changed_by,
        }
    }
}

impl_domain_event!(ApplicationStatusChanged);

/// An admin removed an application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub application_id: ApplicationId,
}

impl ApplicationDeleted {
    pub fn new(application_id: ApplicationId) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            application_id,
        }
    }
}

impl_domain_event!(ApplicationDeleted);

// ============================================================================
// JOB EVENTS
// ============================================================================

/// What happened to a job posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobChange {
    Posted,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub job_id: JobId,
    pub change: JobChange,
}

impl JobChanged {
    pub fn new(job_id: JobId, change: JobChange) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            job_id,
            change,
        }
    }
}

impl_domain_event!(JobChanged);

// ============================================================================
// ACCOUNT EVENTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountChange {
    Registered,
    Updated,
    Deleted,
}

/// A company, candidate or admin account was created, edited or removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub role: Role,
    pub account_id: String,
    pub change: AccountChange,
}

impl AccountChanged {
    pub fn new(role: Role, account_id: impl Into<String>, change: AccountChange) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            role,
            account_id: account_id.into(),
            change,
        }
    }
}

impl_domain_event!(AccountChanged);

// ============================================================================
// SESSION EVENTS
// ============================================================================

/// A user logged in and a session context was created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStarted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub role: Role,
    pub account_id: String,
}

impl SessionStarted {
    pub fn new(role: Role, account_id: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            role,
            account_id,
        }
    }
}

impl_domain_event!(SessionStarted);

/// Why a session was torn down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEndReason {
    Logout,
    Unauthorized,
}

/// The session context was destroyed; views must return to login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEnded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub reason: SessionEndReason,
}

impl SessionEnded {
    pub fn new(reason: SessionEndReason) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            reason,
        }
    }
}

impl_domain_event!(SessionEnded);
