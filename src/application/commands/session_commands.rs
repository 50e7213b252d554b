// src/application/commands/session_commands.rs

use crate::application::dto::{CandidateFormDto, CompanyFormDto, SessionDto};
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::{CandidateProfile, CompanyProfile, Role};
use crate::error::AppError;
use crate::services::LoginRequest;

pub async fn login(
    state: &AppState,
    email: &str,
    password: &str,
    role: &str,
) -> Result<SessionDto, ErrorResponse> {
    let role = role.parse::<Role>().map_err(AppError::from)?;

    let session = state
        .session_service
        .login(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
            role,
        })
        .await?;
    Ok(session.into())
}

pub fn logout(state: &AppState) -> Result<(), ErrorResponse> {
    state.session_service.logout()?;
    Ok(())
}

pub fn current_session(state: &AppState) -> Option<SessionDto> {
    state.session_service.current().map(SessionDto::from)
}

/// Create a company account. Needs no session; log in afterwards.
pub async fn signup_company(
    state: &AppState,
    form: CompanyFormDto,
) -> Result<CompanyProfile, ErrorResponse> {
    Ok(state
        .account_service
        .register_company(form.into_draft())
        .await?)
}

/// Create a candidate account. Needs no session; log in afterwards.
pub async fn signup_candidate(
    state: &AppState,
    form: CandidateFormDto,
) -> Result<CandidateProfile, ErrorResponse> {
    Ok(state
        .account_service
        .register_candidate(form.into_draft())
        .await?)
}
