// src/session/mod.rs
//
// Session context
//
// LIFECYCLE:
// - Created at login (SessionHandle::begin)
// - Destroyed at logout or on the first Unauthorized response (SessionHandle::end)
// - Passed explicitly to everything that talks to the backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use crate::domain::{Actor, CandidateId, CompanyId, Role};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, SessionEndReason, SessionEnded, SessionStarted};
use crate::infrastructure::SessionStore;

/// Credentials and identity of the logged-in account
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token issued by the auth API
    pub token: String,
    pub role: Role,
    /// Candidate, company or admin id, depending on role
    pub account_id: String,
    pub display_name: Option<String>,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: String, role: Role, account_id: String) -> Self {
        Self {
            token,
            role,
            account_id,
            display_name: None,
            started_at: Utc::now(),
        }
    }

    pub fn actor(&self) -> Actor {
        Actor::new(self.role, self.account_id.clone())
    }

    /// The candidate id, if this is a candidate session
    pub fn candidate_id(&self) -> Option<CandidateId> {
        (self.role == Role::Candidate).then(|| CandidateId::new(self.account_id.clone()))
    }

    /// The company id, if this is a company session
    pub fn company_id(&self) -> Option<CompanyId> {
        (self.role == Role::Company).then(|| CompanyId::new(self.account_id.clone()))
    }
}

// Never print the token
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .field("account_id", &self.account_id)
            .field("display_name", &self.display_name)
            .field("started_at", &self.started_at)
            .finish()
    }
}

/// Shared owner of the current session
///
/// Clones share the same session. All teardown goes through `end`, so the
/// store, the in-memory context and the SessionEnded event never disagree.
#[derive(Clone)]
pub struct SessionHandle {
    current: Arc<RwLock<Option<Session>>>,
    store: Option<Arc<SessionStore>>,
    event_bus: Arc<EventBus>,
}

impl SessionHandle {
    /// A handle with no persistence
    pub fn in_memory(event_bus: Arc<EventBus>) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            store: None,
            event_bus,
        }
    }

    /// A handle backed by a session file; restores a previous session
    pub fn persistent(store: Arc<SessionStore>, event_bus: Arc<EventBus>) -> AppResult<Self> {
        let restored = store.load()?;
        if let Some(session) = &restored {
            log::info!("restored {} session for {}", session.role, session.account_id);
        }
        Ok(Self {
            current: Arc::new(RwLock::new(restored)),
            store: Some(store),
            event_bus,
        })
    }

    /// Install a freshly issued session
    pub fn begin(&self, session: Session) -> AppResult<()> {
        if let Some(store) = &self.store {
            store.save(&session)?;
        }
        let event = SessionStarted::new(session.role, session.account_id.clone());
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(session);
        self.event_bus.emit(event);
        Ok(())
    }

    /// Destroy the session. Idempotent: ending an absent session only
    /// clears the store.
    pub fn end(&self, reason: SessionEndReason) -> AppResult<()> {
        let previous = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(store) = &self.store {
            store.clear()?;
        }
        if previous.is_some() {
            log::info!("session ended ({:?})", reason);
            self.event_bus.emit(SessionEnded::new(reason));
        }
        Ok(())
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// The current session, or Unauthorized when nobody is logged in
    pub fn require(&self) -> AppResult<Session> {
        self.current().ok_or(AppError::Unauthorized)
    }

    /// The current session, which must belong to `role`
    pub fn require_role(&self, role: Role) -> AppResult<Session> {
        let session = self.require()?;
        if session.role != role {
            return Err(AppError::Validation(format!(
                "this action requires a {} account, logged in as {}",
                role, session.role
            )));
        }
        Ok(session)
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    pub fn is_active(&self) -> bool {
        self.current().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> (SessionHandle, Arc<EventBus>) {
        let bus = Arc::new(EventBus::new());
        (SessionHandle::in_memory(Arc::clone(&bus)), bus)
    }

    #[test]
    fn test_begin_and_end_emit_events() {
        let (handle, bus) = handle();
        handle
            .begin(Session::new("tok".into(), Role::Candidate, "c1".into()))
            .unwrap();
        assert!(handle.is_active());
        assert_eq!(handle.token().as_deref(), Some("tok"));

        handle.end(SessionEndReason::Logout).unwrap();
        assert!(!handle.is_active());
        assert_eq!(bus.emitted_count("SessionStarted"), 1);
        assert_eq!(bus.emitted_count("SessionEnded"), 1);
    }

    #[test]
    fn test_ending_twice_emits_once() {
        let (handle, bus) = handle();
        handle
            .begin(Session::new("tok".into(), Role::Admin, "a1".into()))
            .unwrap();
        handle.end(SessionEndReason::Unauthorized).unwrap();
        handle.end(SessionEndReason::Unauthorized).unwrap();
        assert_eq!(bus.emitted_count("SessionEnded"), 1);
    }

    #[test]
    fn test_require_without_session_is_unauthorized() {
        let (handle, _) = handle();
        assert!(matches!(handle.require(), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_require_role_rejects_other_roles() {
        let (handle, _) = handle();
        handle
            .begin(Session::new("tok".into(), Role::Company, "co1".into()))
            .unwrap();
        assert!(handle.require_role(Role::Company).is_ok());
        assert!(matches!(
            handle.require_role(Role::Candidate),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_role_scoped_ids() {
        let session = Session::new("tok".into(), Role::Company, "co1".into());
        assert_eq!(session.company_id(), Some(CompanyId::new("co1")));
        assert_eq!(session.candidate_id(), None);
        assert_eq!(session.actor(), Actor::new(Role::Company, "co1"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new("secret-token".into(), Role::Candidate, "c1".into());
        let printed = format!("{:?}", session);
        assert!(!printed.contains("secret-token"));
    }

    #[test]
    fn test_persistent_handle_restores_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(SessionStore::new(dir.path().join("session.json")));
        let bus = Arc::new(EventBus::new());

        let first = SessionHandle::persistent(Arc::clone(&store), Arc::clone(&bus)).unwrap();
        first
            .begin(Session::new("tok".into(), Role::Candidate, "c1".into()))
            .unwrap();

        let second = SessionHandle::persistent(Arc::clone(&store), Arc::clone(&bus)).unwrap();
        assert_eq!(second.current().unwrap().account_id, "c1");

        second.end(SessionEndReason::Unauthorized).unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
