// src/services/account_service.rs
//
// Account Service - signup, profile edits and admin account management
//
// CRITICAL RULES:
// - Signup needs no session; everything else needs an actor
// - Companies and candidates edit only their own profile
// - Only admins remove accounts or create other admins

use std::sync::Arc;

use crate::domain::{
    validate_admin_draft, validate_candidate_draft, validate_company_draft, Actor, AdminAccount,
    AdminDraft, CandidateDraft, CandidateId, CandidateProfile, CompanyDraft, CompanyId,
    CompanyProfile, DraftPurpose, Role,
};
use crate::error::{AppError, AppResult};
use crate::events::{AccountChange, AccountChanged, EventBus};
use crate::repositories::DirectoryRepository;

pub struct AccountService {
    directory_repo: Arc<dyn DirectoryRepository>,
    event_bus: Arc<EventBus>,
}

fn require_admin(actor: &Actor, action: &str) -> AppResult<()> {
    if actor.role != Role::Admin {
        return Err(AppError::Validation(format!(
            "only admins can {}",
            action
        )));
    }
    Ok(())
}

impl AccountService {
    pub fn new(directory_repo: Arc<dyn DirectoryRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            directory_repo,
            event_bus,
        }
    }

    pub async fn register_company(&self, draft: CompanyDraft) -> AppResult<CompanyProfile> {
        validate_company_draft(&draft, DraftPurpose::Signup)?;
        let company = self.directory_repo.register_company(&draft).await?;

        log::info!("company {} registered", company.id);
        self.emit(Role::Company, company.id.as_str(), AccountChange::Registered);
        Ok(company)
    }

    pub async fn register_candidate(&self, draft: CandidateDraft) -> AppResult<CandidateProfile> {
        validate_candidate_draft(&draft, DraftPurpose::Signup)?;
        let candidate = self.directory_repo.register_candidate(&draft).await?;

        log::info!("candidate {} registered", candidate.id);
        self.emit(
            Role::Candidate,
            candidate.id.as_str(),
            AccountChange::Registered,
        );
        Ok(candidate)
    }

    /// The signed-in company edits its own profile
    pub async fn update_company(
        &self,
        actor: &Actor,
        draft: CompanyDraft,
    ) -> AppResult<CompanyProfile> {
        // 1. Only the company itself
        if actor.role != Role::Company {
            return Err(AppError::Validation(
                "only a company can edit its profile".to_string(),
            ));
        }
        let id = CompanyId::new(actor.id.clone());

        // 2. Validate
        validate_company_draft(&draft, DraftPurpose::Update)?;

        // 3. Persist
        let company = self.directory_repo.update_company(&id, &draft).await?;

        // 4. Emit event
        self.emit(Role::Company, id.as_str(), AccountChange::Updated);
        Ok(company)
    }

    /// The signed-in candidate edits their own profile
    pub async fn update_candidate(
        &self,
        actor: &Actor,
        draft: CandidateDraft,
    ) -> AppResult<CandidateProfile> {
        if actor.role != Role::Candidate {
            return Err(AppError::Validation(
                "only a candidate can edit their profile".to_string(),
            ));
        }
        let id = CandidateId::new(actor.id.clone());

        validate_candidate_draft(&draft, DraftPurpose::Update)?;
        let candidate = self.directory_repo.update_candidate(&id, &draft).await?;

        self.emit(Role::Candidate, id.as_str(), AccountChange::Updated);
        Ok(candidate)
    }

    pub async fn delete_company(&self, actor: &Actor, id: &CompanyId) -> AppResult<()> {
        require_admin(actor, "delete companies")?;
        self.directory_repo.delete_company(id).await?;

        log::info!("admin {} deleted company {}", actor.id, id);
        self.emit(Role::Company, id.as_str(), AccountChange::Deleted);
        Ok(())
    }

    pub async fn delete_candidate(&self, actor: &Actor, id: &CandidateId) -> AppResult<()> {
        require_admin(actor, "delete candidates")?;
        self.directory_repo.delete_candidate(id).await?;

        log::info!("admin {} deleted candidate {}", actor.id, id);
        self.emit(Role::Candidate, id.as_str(), AccountChange::Deleted);
        Ok(())
    }

    pub async fn create_admin(&self, actor: &Actor, draft: AdminDraft) -> AppResult<AdminAccount> {
        require_admin(actor, "create admin accounts")?;
        validate_admin_draft(&draft)?;
        let admin = self.directory_repo.create_admin(&draft).await?;

        log::info!("admin {} created admin {}", actor.id, admin.id);
        self.emit(Role::Admin, admin.id.as_str(), AccountChange::Registered);
        Ok(admin)
    }

    fn emit(&self, role: Role, account_id: &str, change: AccountChange) {
        self.event_bus
            .emit(AccountChanged::new(role, account_id, change));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{InMemoryDirectoryRepository, MockDirectoryRepository};

    fn service() -> (AccountService, Arc<EventBus>) {
        let bus = Arc::new(EventBus::new());
        let repo = InMemoryDirectoryRepository::default();
        (AccountService::new(Arc::new(repo), Arc::clone(&bus)), bus)
    }

    fn candidate_draft(password: Option<&str>) -> CandidateDraft {
        CandidateDraft {
            name: "Dana".to_string(),
            email: "dana@mail.io".to_string(),
            password: password.map(str::to_string),
            phone: Some("+351 900 000 000".to_string()),
            resume_link: Some("https://cv.example/dana".to_string()),
            skills: vec!["Rust".to_string()],
        }
    }

    fn admin_draft() -> AdminDraft {
        AdminDraft {
            email: "ops@portal.io".to_string(),
            password: "long-enough".to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_then_edit_own_profile() {
        let (service, bus) = service();
        let candidate = service
            .register_candidate(candidate_draft(Some("long-enough")))
            .await
            .unwrap();

        let mut edit = candidate_draft(None);
        edit.skills.push("Tokio".to_string());
        let updated = service
            .update_candidate(&Actor::candidate(&candidate.id), edit)
            .await
            .unwrap();

        assert_eq!(updated.skills, vec!["Rust", "Tokio"]);
        assert_eq!(bus.emitted_count("AccountChanged"), 2);
    }

    #[tokio::test]
    async fn test_signup_without_password_never_reaches_backend() {
        let mut repo = MockDirectoryRepository::new();
        repo.expect_register_candidate().never();
        let service = AccountService::new(Arc::new(repo), Arc::new(EventBus::new()));

        let err = service
            .register_candidate(candidate_draft(None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_profile_edit_targets_the_signed_in_company() {
        let mut repo = MockDirectoryRepository::new();
        repo.expect_update_company()
            .withf(|id, _| id.as_str() == "acme")
            .times(1)
            .returning(|id, draft| {
                Ok(CompanyProfile {
                    id: id.clone(),
                    name: draft.name.clone(),
                    email: Some(draft.email.clone()),
                    location: Some(draft.location.clone()),
                    description: draft.description.clone(),
                })
            });
        let service = AccountService::new(Arc::new(repo), Arc::new(EventBus::new()));
        let draft = CompanyDraft {
            name: "Acme Labs".to_string(),
            email: "hr@acme.io".to_string(),
            password: None,
            location: "Porto".to_string(),
            description: None,
        };

        let company = service
            .update_company(&Actor::company(&CompanyId::new("acme")), draft.clone())
            .await
            .unwrap();
        assert_eq!(company.name, "Acme Labs");

        let err = service
            .update_company(&Actor::admin("root"), draft)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_only_admins_delete_accounts() {
        let mut repo = MockDirectoryRepository::new();
        repo.expect_delete_candidate().never();
        repo.expect_delete_company().never();
        let service = AccountService::new(Arc::new(repo), Arc::new(EventBus::new()));

        let company = Actor::company(&CompanyId::new("acme"));
        let candidate = Actor::candidate(&CandidateId::new("c1"));

        assert!(matches!(
            service.delete_candidate(&company, &CandidateId::new("c1")).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.delete_company(&candidate, &CompanyId::new("acme")).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_admin_deletes_candidate() {
        let (service, bus) = service();
        let candidate = service
            .register_candidate(candidate_draft(Some("long-enough")))
            .await
            .unwrap();

        service
            .delete_candidate(&Actor::admin("root"), &candidate.id)
            .await
            .unwrap();
        let again = service
            .delete_candidate(&Actor::admin("root"), &candidate.id)
            .await;

        assert!(matches!(again, Err(AppError::NotFound(_))));
        assert_eq!(bus.emitted_count("AccountChanged"), 2);
    }

    #[tokio::test]
    async fn test_create_admin_requires_admin() {
        let (service, _) = service();
        let err = service
            .create_admin(&Actor::candidate(&CandidateId::new("c1")), admin_draft())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let admin = service
            .create_admin(&Actor::admin("root"), admin_draft())
            .await
            .unwrap();
        assert_eq!(admin.email, "ops@portal.io");
    }

    #[tokio::test]
    async fn test_expired_session_surfaces_unauthorized() {
        let mut repo = MockDirectoryRepository::new();
        repo.expect_delete_company()
            .returning(|_| Err(AppError::Unauthorized));
        let bus = Arc::new(EventBus::new());
        let service = AccountService::new(Arc::new(repo), Arc::clone(&bus));

        let err = service
            .delete_company(&Actor::admin("root"), &CompanyId::new("acme"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized));
        assert_eq!(bus.emitted_count("AccountChanged"), 0);
    }
}
