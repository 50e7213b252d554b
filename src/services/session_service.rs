// src/services/session_service.rs
//
// Session Service - login, logout and forced teardown
//
// CRITICAL RULES:
// - A session exists only after the auth API issued a token
// - Logout and Unauthorized tear down the same way (SessionHandle::end)

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::Role;
use crate::error::{AppError, AppResult};
use crate::events::SessionEndReason;
use crate::integrations::{BackendClient, LoginOutcome};
use crate::session::{Session, SessionHandle};

/// Issues tokens for credentials
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str, role: Role) -> AppResult<LoginOutcome>;
}

#[async_trait]
impl Authenticator for BackendClient {
    async fn authenticate(&self, email: &str, password: &str, role: Role) -> AppResult<LoginOutcome> {
        self.login(email, password, role).await
    }
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

pub struct SessionService {
    authenticator: Arc<dyn Authenticator>,
    session: SessionHandle,
}

impl SessionService {
    pub fn new(authenticator: Arc<dyn Authenticator>, session: SessionHandle) -> Self {
        Self {
            authenticator,
            session,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<Session> {
        let email = request.email.trim();
        if email.is_empty() || request.password.is_empty() {
            return Err(AppError::Validation(
                "email and password are required".to_string(),
            ));
        }

        let outcome = self
            .authenticator
            .authenticate(email, &request.password, request.role)
            .await?;

        let mut session = Session::new(outcome.token, outcome.role, outcome.account_id);
        session.display_name = outcome.display_name;

        self.session.begin(session.clone())?;
        log::info!("logged in as {} {}", session.role, session.account_id);
        Ok(session)
    }

    pub fn logout(&self) -> AppResult<()> {
        self.session.end(SessionEndReason::Logout)
    }

    /// Same teardown as logout, for a token the backend no longer accepts
    pub fn handle_unauthorized(&self) -> AppResult<()> {
        self.session.end(SessionEndReason::Unauthorized)
    }

    pub fn current(&self) -> Option<Session> {
        self.session.current()
    }
}
