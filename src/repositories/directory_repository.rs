// src/repositories/directory_repository.rs
//
// Account directory: company and candidate profiles, signups, profile edits,
// account removal and admin creation

use async_trait::async_trait;
use std::sync::Arc;

use super::found;
use crate::domain::{
    AdminAccount, AdminDraft, CandidateDraft, CandidateId, CandidateProfile, CompanyDraft,
    CompanyId, CompanyProfile,
};
use crate::error::AppResult;
use crate::integrations::BackendClient;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    async fn get_company(&self, id: &CompanyId) -> AppResult<Option<CompanyProfile>>;
    async fn list_companies(&self) -> AppResult<Vec<CompanyProfile>>;
    async fn get_candidate(&self, id: &CandidateId) -> AppResult<Option<CandidateProfile>>;
    async fn list_candidates(&self) -> AppResult<Vec<CandidateProfile>>;

    async fn register_company(&self, draft: &CompanyDraft) -> AppResult<CompanyProfile>;
    async fn register_candidate(&self, draft: &CandidateDraft) -> AppResult<CandidateProfile>;
    async fn update_company(&self, id: &CompanyId, draft: &CompanyDraft)
        -> AppResult<CompanyProfile>;
    async fn update_candidate(
        &self,
        id: &CandidateId,
        draft: &CandidateDraft,
    ) -> AppResult<CandidateProfile>;
    async fn delete_company(&self, id: &CompanyId) -> AppResult<()>;
    async fn delete_candidate(&self, id: &CandidateId) -> AppResult<()>;
    async fn create_admin(&self, draft: &AdminDraft) -> AppResult<AdminAccount>;
}

pub struct RestDirectoryRepository {
    client: Arc<BackendClient>,
}

impl RestDirectoryRepository {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DirectoryRepository for RestDirectoryRepository {
    async fn get_company(&self, id: &CompanyId) -> AppResult<Option<CompanyProfile>> {
        found(self.client.company(id).await)
    }

    async fn list_companies(&self) -> AppResult<Vec<CompanyProfile>> {
        self.client.companies().await
    }

    async fn get_candidate(&self, id: &CandidateId) -> AppResult<Option<CandidateProfile>> {
        found(self.client.candidate(id).await)
    }

    async fn list_candidates(&self) -> AppResult<Vec<CandidateProfile>> {
        self.client.candidates().await
    }

    async fn register_company(&self, draft: &CompanyDraft) -> AppResult<CompanyProfile> {
        self.client.register_company(draft).await
    }

    async fn register_candidate(&self, draft: &CandidateDraft) -> AppResult<CandidateProfile> {
        self.client.register_candidate(draft).await
    }

    async fn update_company(
        &self,
        id: &CompanyId,
        draft: &CompanyDraft,
    ) -> AppResult<CompanyProfile> {
        self.client.update_company(id, draft).await
    }

    async fn update_candidate(
        &self,
        id: &CandidateId,
        draft: &CandidateDraft,
    ) -> AppResult<CandidateProfile> {
        self.client.update_candidate(id, draft).await
    }

    async fn delete_company(&self, id: &CompanyId) -> AppResult<()> {
        self.client.delete_company(id).await
    }

    async fn delete_candidate(&self, id: &CandidateId) -> AppResult<()> {
        self.client.delete_candidate(id).await
    }

    async fn create_admin(&self, draft: &AdminDraft) -> AppResult<AdminAccount> {
        self.client.create_admin(draft).await
    }
}
