// src/events/mod.rs
//
// Internal Event System - Public API
//
// Services emit facts here; views and other services subscribe.
// EventHandler is internal to the bus and is not exported.

pub mod bus;
pub mod types;

pub use types::DomainEvent;

pub use types::{
    // Applications
    ApplicationDeleted,
    ApplicationStatusChanged,
    ApplicationSubmitted,
    // Jobs
    JobChange,
    JobChanged,
    // Accounts
    AccountChange,
    AccountChanged,
    // Session
    SessionEndReason,
    SessionEnded,
    SessionStarted,
};

pub use bus::{EventBus, EventLogEntry};
