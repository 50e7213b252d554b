// src/application/state.rs
//
// Application state shared by every command.
// All fields are Arc-wrapped (or cheap clones of shared state).

use std::sync::Arc;

use crate::application::view_state::{SubmitGuard, ViewGeneration};
use crate::config::ClientConfig;
use crate::domain::ReapplyPolicy;
use crate::error::AppResult;
use crate::events::EventBus;
use crate::infrastructure::SessionStore;
use crate::integrations::BackendClient;
use crate::repositories::{
    ApplicationRepository, DirectoryRepository, JobRepository, RestApplicationRepository,
    RestDirectoryRepository, RestJobRepository,
};
use crate::services::{
    AccountService, ApplicationLifecycleManager, Authenticator, JobService, SessionService,
    StatisticsService,
};
use crate::session::SessionHandle;

pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub session: SessionHandle,
    pub session_service: Arc<SessionService>,
    pub lifecycle: Arc<ApplicationLifecycleManager>,
    pub job_service: Arc<JobService>,
    pub statistics_service: Arc<StatisticsService>,
    pub account_service: Arc<AccountService>,
    pub directory: Arc<dyn DirectoryRepository>,

    pub apply_form: SubmitGuard,
    pub status_form: SubmitGuard,
    pub job_form: SubmitGuard,
    pub applications_view: ViewGeneration,
    pub jobs_view: ViewGeneration,
}

/// Collaborators the state is assembled from
pub struct Backends {
    pub applications: Arc<dyn ApplicationRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub directory: Arc<dyn DirectoryRepository>,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    /// Wire everything against the portal REST backend
    pub fn connect(config: &ClientConfig) -> AppResult<Self> {
        let event_bus = Arc::new(EventBus::new());
        let store = Arc::new(SessionStore::new(config.session_path.clone()));
        let session = SessionHandle::persistent(store, Arc::clone(&event_bus))?;
        let client = Arc::new(BackendClient::new(config, session.clone())?);

        log::info!(
            "using portal API at {} (reapply policy {:?})",
            config.api_base_url,
            config.reapply_policy
        );

        let backends = Backends {
            applications: Arc::new(RestApplicationRepository::new(Arc::clone(&client))),
            jobs: Arc::new(RestJobRepository::new(Arc::clone(&client))),
            directory: Arc::new(RestDirectoryRepository::new(Arc::clone(&client))),
            authenticator: client,
        };
        Ok(Self::assemble(
            backends,
            config.reapply_policy,
            session,
            event_bus,
        ))
    }

    pub fn assemble(
        backends: Backends,
        reapply_policy: ReapplyPolicy,
        session: SessionHandle,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let lifecycle = ApplicationLifecycleManager::new(
            Arc::clone(&backends.applications),
            Arc::clone(&backends.jobs),
            Arc::clone(&event_bus),
        )
        .with_reapply_policy(reapply_policy);
        let job_service = JobService::new(Arc::clone(&backends.jobs), Arc::clone(&event_bus));
        let statistics_service = StatisticsService::new(
            Arc::clone(&backends.applications),
            Arc::clone(&backends.jobs),
            Arc::clone(&backends.directory),
        );
        let account_service =
            AccountService::new(Arc::clone(&backends.directory), Arc::clone(&event_bus));
        let session_service = SessionService::new(backends.authenticator, session.clone());

        Self {
            event_bus,
            session,
            session_service: Arc::new(session_service),
            lifecycle: Arc::new(lifecycle),
            job_service: Arc::new(job_service),
            statistics_service: Arc::new(statistics_service),
            account_service: Arc::new(account_service),
            directory: backends.directory,
            apply_form: SubmitGuard::new(),
            status_form: SubmitGuard::new(),
            job_form: SubmitGuard::new(),
            applications_view: ViewGeneration::new(),
            jobs_view: ViewGeneration::new(),
        }
    }
}
