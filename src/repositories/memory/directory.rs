use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use super::{read, write};
use crate::domain::{
    AdminAccount, AdminDraft, AdminId, CandidateDraft, CandidateId, CandidateProfile,
    CompanyDraft, CompanyId, CompanyProfile,
};
use crate::error::{AppError, AppResult};
use crate::repositories::DirectoryRepository;

#[derive(Default)]
pub struct InMemoryDirectoryRepository {
    companies: RwLock<Vec<CompanyProfile>>,
    candidates: RwLock<Vec<CandidateProfile>>,
    admins: RwLock<Vec<AdminAccount>>,
    next_id: AtomicU64,
}

impl InMemoryDirectoryRepository {
    pub fn new(companies: Vec<CompanyProfile>, candidates: Vec<CandidateProfile>) -> Self {
        Self {
            next_id: AtomicU64::new((companies.len() + candidates.len()) as u64),
            companies: RwLock::new(companies),
            candidates: RwLock::new(candidates),
            admins: RwLock::new(Vec::new()),
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{}", prefix, n)
    }

    /// Emails are unique across one account kind, as the backend enforces
    fn ensure_email_free<'a>(
        mut taken: impl Iterator<Item = Option<&'a str>>,
        email: &str,
    ) -> AppResult<()> {
        if taken.any(|existing| existing.is_some_and(|e| e.eq_ignore_ascii_case(email))) {
            return Err(AppError::Validation("Email already exists".to_string()));
        }
        Ok(())
    }
}

fn company_from_draft(id: CompanyId, draft: &CompanyDraft) -> CompanyProfile {
    CompanyProfile {
        id,
        name: draft.name.clone(),
        email: Some(draft.email.clone()),
        location: Some(draft.location.clone()),
        description: draft.description.clone(),
    }
}

fn candidate_from_draft(id: CandidateId, draft: &CandidateDraft) -> CandidateProfile {
    CandidateProfile {
        id,
        name: draft.name.clone(),
        email: Some(draft.email.clone()),
        phone: draft.phone.clone(),
        resume_link: draft.resume_link.clone(),
        skills: draft.skills.clone(),
    }
}

#[async_trait]
impl DirectoryRepository for InMemoryDirectoryRepository {
    async fn get_company(&self, id: &CompanyId) -> AppResult<Option<CompanyProfile>> {
        Ok(read(&self.companies).iter().find(|c| &c.id == id).cloned())
    }

    async fn list_companies(&self) -> AppResult<Vec<CompanyProfile>> {
        Ok(read(&self.companies).clone())
    }

    async fn get_candidate(&self, id: &CandidateId) -> AppResult<Option<CandidateProfile>> {
        Ok(read(&self.candidates).iter().find(|c| &c.id == id).cloned())
    }

    async fn list_candidates(&self) -> AppResult<Vec<CandidateProfile>> {
        Ok(read(&self.candidates).clone())
    }

    async fn register_company(&self, draft: &CompanyDraft) -> AppResult<CompanyProfile> {
        let mut companies = write(&self.companies);
        Self::ensure_email_free(companies.iter().map(|c| c.email.as_deref()), &draft.email)?;
        let company = company_from_draft(CompanyId::new(self.next_id("company")), draft);
        companies.push(company.clone());
        Ok(company)
    }

    async fn register_candidate(&self, draft: &CandidateDraft) -> AppResult<CandidateProfile> {
        let mut candidates = write(&self.candidates);
        Self::ensure_email_free(candidates.iter().map(|c| c.email.as_deref()), &draft.email)?;
        let candidate = candidate_from_draft(CandidateId::new(self.next_id("candidate")), draft);
        candidates.push(candidate.clone());
        Ok(candidate)
    }

    async fn update_company(
        &self,
        id: &CompanyId,
        draft: &CompanyDraft,
    ) -> AppResult<CompanyProfile> {
        let mut companies = write(&self.companies);
        Self::ensure_email_free(
            companies
                .iter()
                .filter(|c| &c.id != id)
                .map(|c| c.email.as_deref()),
            &draft.email,
        )?;
        let slot = companies
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Company {}", id)))?;
        *slot = company_from_draft(id.clone(), draft);
        Ok(slot.clone())
    }

    async fn update_candidate(
        &self,
        id: &CandidateId,
        draft: &CandidateDraft,
    ) -> AppResult<CandidateProfile> {
        let mut candidates = write(&self.candidates);
        Self::ensure_email_free(
            candidates
                .iter()
                .filter(|c| &c.id != id)
                .map(|c| c.email.as_deref()),
            &draft.email,
        )?;
        let slot = candidates
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Candidate {}", id)))?;
        *slot = candidate_from_draft(id.clone(), draft);
        Ok(slot.clone())
    }

    async fn delete_company(&self, id: &CompanyId) -> AppResult<()> {
        let mut companies = write(&self.companies);
        let before = companies.len();
        companies.retain(|c| &c.id != id);
        if companies.len() == before {
            return Err(AppError::NotFound(format!("Company {}", id)));
        }
        Ok(())
    }

    async fn delete_candidate(&self, id: &CandidateId) -> AppResult<()> {
        let mut candidates = write(&self.candidates);
        let before = candidates.len();
        candidates.retain(|c| &c.id != id);
        if candidates.len() == before {
            return Err(AppError::NotFound(format!("Candidate {}", id)));
        }
        Ok(())
    }

    async fn create_admin(&self, draft: &AdminDraft) -> AppResult<AdminAccount> {
        let mut admins = write(&self.admins);
        Self::ensure_email_free(admins.iter().map(|a| Some(a.email.as_str())), &draft.email)?;
        let admin = AdminAccount {
            id: AdminId::new(self.next_id("admin")),
            email: draft.email.clone(),
        };
        admins.push(admin.clone());
        Ok(admin)
    }
}
