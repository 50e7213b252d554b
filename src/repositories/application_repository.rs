// src/repositories/application_repository.rs
//
// Job application persistence, backed by the portal REST API

use async_trait::async_trait;
use std::sync::Arc;

use super::found;
use crate::domain::{
    ApplicationId, ApplicationStatus, CandidateId, JobApplication, JobId, NewApplication,
};
use crate::error::AppResult;
use crate::integrations::BackendClient;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Persist a new submission; the store assigns the id
    async fn create(&self, new: &NewApplication) -> AppResult<JobApplication>;
    async fn get_by_id(&self, id: &ApplicationId) -> AppResult<Option<JobApplication>>;
    async fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> AppResult<JobApplication>;
    async fn delete(&self, id: &ApplicationId) -> AppResult<()>;
    async fn list_by_candidate(&self, candidate_id: &CandidateId) -> AppResult<Vec<JobApplication>>;
    /// `status` narrows the listing on the store side
    async fn list_by_job(
        &self,
        job_id: &JobId,
        status: Option<ApplicationStatus>,
    ) -> AppResult<Vec<JobApplication>>;
    async fn list_by_status(&self, status: ApplicationStatus) -> AppResult<Vec<JobApplication>>;
    async fn list_all(&self) -> AppResult<Vec<JobApplication>>;
}

pub struct RestApplicationRepository {
    client: Arc<BackendClient>,
}

impl RestApplicationRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ApplicationRepository for RestApplicationRepository {
    async fn create(&self, new: &NewApplication) -> AppResult<JobApplication> {
        self.client.submit_application(new).await
    }

    async fn get_by_id(&self, id: &ApplicationId) -> AppResult<Option<JobApplication>> {
        found(self.client.application(id).await)
    }

    async fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> AppResult<JobApplication> {
        self.client.update_application_status(id, status).await
    }

    async fn delete(&self, id: &ApplicationId) -> AppResult<()> {
        self.client.delete_application(id).await
    }

    async fn list_by_candidate(&self, candidate_id: &CandidateId) -> AppResult<Vec<JobApplication>> {
        self.client.applications_for_candidate(candidate_id).await
    }

    async fn list_by_job(
        &self,
        job_id: &JobId,
        status: Option<ApplicationStatus>,
    ) -> AppResult<Vec<JobApplication>> {
        self.client.applications_for_job(job_id, status).await
    }

    async fn list_by_status(&self, status: ApplicationStatus) -> AppResult<Vec<JobApplication>> {
        self.client.applications_with_status(status).await
    }

    async fn list_all(&self) -> AppResult<Vec<JobApplication>> {
        self.client.all_applications().await
    }
}
