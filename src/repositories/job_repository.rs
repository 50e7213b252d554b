// src/repositories/job_repository.rs
//
// Job postings, backed by the portal REST API

use async_trait::async_trait;
use std::sync::Arc;

use super::found;
use crate::domain::{CompanyId, Job, JobDraft, JobId};
use crate::error::AppResult;
use crate::integrations::BackendClient;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn get_by_id(&self, id: &JobId) -> AppResult<Option<Job>>;
    async fn list_all(&self) -> AppResult<Vec<Job>>;
    async fn list_by_company(&self, company_id: &CompanyId) -> AppResult<Vec<Job>>;
    async fn search_by_position(&self, term: &str) -> AppResult<Vec<Job>>;
    async fn search_by_skill(&self, term: &str) -> AppResult<Vec<Job>>;
    async fn create(&self, company_id: &CompanyId, draft: &JobDraft) -> AppResult<Job>;
    async fn update(&self, id: &JobId, company_id: &CompanyId, draft: &JobDraft) -> AppResult<Job>;
    async fn delete(&self, id: &JobId) -> AppResult<()>;
}

pub struct RestJobRepository {
    client: Arc<BackendClient>,
}

impl RestJobRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobRepository for RestJobRepository {
    async fn get_by_id(&self, id: &JobId) -> AppResult<Option<Job>> {
        found(self.client.job(id).await)
    }

    async fn list_all(&self) -> AppResult<Vec<Job>> {
        self.client.all_jobs().await
    }

    async fn list_by_company(&self, company_id: &CompanyId) -> AppResult<Vec<Job>> {
        self.client.jobs_for_company(company_id).await
    }

    async fn search_by_position(&self, term: &str) -> AppResult<Vec<Job>> {
        self.client.search_jobs_by_position(term).await
    }

    async fn search_by_skill(&self, term: &str) -> AppResult<Vec<Job>> {
        self.client.search_jobs_by_skill(term).await
    }

    async fn create(&self, company_id: &CompanyId, draft: &JobDraft) -> AppResult<Job> {
        self.client.create_job(company_id, draft).await
    }

    async fn update(&self, id: &JobId, company_id: &CompanyId, draft: &JobDraft) -> AppResult<Job> {
        self.client.update_job(id, company_id, draft).await
    }

    async fn delete(&self, id: &JobId) -> AppResult<()> {
        self.client.delete_job(id).await
    }
}
