use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use super::{read, write};
use crate::domain::{
    ApplicationId, ApplicationStatus, CandidateId, JobApplication, JobId, NewApplication,
};
use crate::error::{AppError, AppResult};
use crate::repositories::ApplicationRepository;

#[derive(Default)]
pub struct InMemoryApplicationRepository {
    applications: RwLock<Vec<JobApplication>>,
    next_id: AtomicU64,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store; records keep their ids
    pub fn with_applications(applications: Vec<JobApplication>) -> Self {
        Self {
            next_id: AtomicU64::new(applications.len() as u64),
            applications: RwLock::new(applications),
        }
    }

    /// Overwrite a record's status without any checks, as a concurrent
    /// writer would
    pub fn force_status(&self, id: &ApplicationId, status: ApplicationStatus) -> bool {
        match write(&self.applications).iter_mut().find(|app| &app.id == id) {
            Some(app) => {
                app.status = status;
                true
            }
            None => false,
        }
    }

    fn filtered(&self, keep: impl Fn(&JobApplication) -> bool) -> Vec<JobApplication> {
        read(&self.applications)
            .iter()
            .filter(|app| keep(app))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn create(&self, new: &NewApplication) -> AppResult<JobApplication> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let application = JobApplication::submitted(ApplicationId::new(format!("app-{}", n)), new.clone());
        write(&self.applications).push(application.clone());
        Ok(application)
    }

    async fn get_by_id(&self, id: &ApplicationId) -> AppResult<Option<JobApplication>> {
        Ok(read(&self.applications).iter().find(|app| &app.id == id).cloned())
    }

    async fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> AppResult<JobApplication> {
        let mut applications = write(&self.applications);
        let app = applications
            .iter_mut()
            .find(|app| &app.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Application {}", id)))?;
        app.status = status;
        app.updated_at = Some(Utc::now());
        Ok(app.clone())
    }

    async fn delete(&self, id: &ApplicationId) -> AppResult<()> {
        let mut applications = write(&self.applications);
        let before = applications.len();
        applications.retain(|app| &app.id != id);
        if applications.len() == before {
            return Err(AppError::NotFound(format!("Application {}", id)));
        }
        Ok(())
    }

    async fn list_by_candidate(&self, candidate_id: &CandidateId) -> AppResult<Vec<JobApplication>> {
        Ok(self.filtered(|app| &app.candidate_id == candidate_id))
    }

    async fn list_by_job(
        &self,
        job_id: &JobId,
        status: Option<ApplicationStatus>,
    ) -> AppResult<Vec<JobApplication>> {
        Ok(self.filtered(|app| {
            &app.job_id == job_id && status.map_or(true, |s| app.status == s)
        }))
    }

    async fn list_by_status(&self, status: ApplicationStatus) -> AppResult<Vec<JobApplication>> {
        Ok(self.filtered(|app| app.status == status))
    }

    async fn list_all(&self) -> AppResult<Vec<JobApplication>> {
        Ok(read(&self.applications).clone())
    }
}
