// src/application/view_state.rs
//
// Per-view request bookkeeping
//
// - SubmitGuard: one in-flight submission per form
// - ViewGeneration: only the newest fetch of a view may render

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{AppError, AppResult};

/// Disables a form's submit while its request is in flight
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    busy: Arc<AtomicBool>,
}

/// Held for the duration of a submission; releases the guard on drop
#[derive(Debug)]
pub struct SubmitTicket {
    busy: Arc<AtomicBool>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self) -> AppResult<SubmitTicket> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                AppError::Validation("a request is already in progress".to_string())
            })?;
        Ok(SubmitTicket {
            busy: Arc::clone(&self.busy),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for SubmitTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Monotonic fetch counter for one view
#[derive(Debug, Clone, Default)]
pub struct ViewGeneration {
    latest: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl ViewGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch; supersedes every earlier ticket
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// The result if its fetch is still the newest, None if superseded
    pub fn accept<T>(&self, ticket: FetchTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            log::debug!("discarding stale result for fetch {}", ticket.0);
            None
        }
    }
}
