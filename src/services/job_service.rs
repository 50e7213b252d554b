// src/services/job_service.rs
//
// Job Service - search, listings and company job management
//
// CRITICAL RULES:
// - Only companies post jobs; they edit and remove only their own
// - Admins may remove any job
// - Empty search terms never reach the backend

use std::sync::Arc;

use crate::domain::{
    filter_by_location_substring, validate_job_draft, Actor, CompanyId, Job, JobDraft, JobId,
    JobSummary, Role,
};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, JobChange, JobChanged};
use crate::repositories::JobRepository;

pub struct JobService {
    job_repo: Arc<dyn JobRepository>,
    event_bus: Arc<EventBus>,
}

impl JobService {
    pub fn new(job_repo: Arc<dyn JobRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            job_repo,
            event_bus,
        }
    }

    pub async fn search_by_position(&self, term: &str) -> AppResult<Vec<Job>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        self.job_repo.search_by_position(term).await
    }

    pub async fn search_by_skill(&self, term: &str) -> AppResult<Vec<Job>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        self.job_repo.search_by_skill(term).await
    }

    pub fn filter_by_location(jobs: &[Job], substring: &str) -> Vec<Job> {
        filter_by_location_substring(jobs, substring)
    }

    pub async fn all_jobs(&self) -> AppResult<Vec<Job>> {
        self.job_repo.list_all().await
    }

    pub async fn jobs_for_company(&self, company_id: &CompanyId) -> AppResult<Vec<Job>> {
        self.job_repo.list_by_company(company_id).await
    }

    pub async fn job(&self, id: &JobId) -> AppResult<Job> {
        self.job_repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job {}", id)))
    }

    /// Position, location and type for a listing row. Never fails: a job that
    /// cannot be loaded shows as "Unknown".
    pub async fn job_summary_or_unknown(&self, id: &JobId) -> JobSummary {
        match self.job_repo.get_by_id(id).await {
            Ok(Some(job)) => JobSummary::from(&job),
            Ok(None) => {
                log::warn!("job {} not found, showing placeholder", id);
                JobSummary::unknown()
            }
            Err(e) => {
                log::warn!("failed to load job {}: {}", id, e);
                JobSummary::unknown()
            }
        }
    }

    pub async fn post_job(&self, actor: &Actor, draft: JobDraft) -> AppResult<Job> {
        // 1. Only companies post
        if actor.role != Role::Company {
            return Err(AppError::Validation(
                "only company accounts can post jobs".to_string(),
            ));
        }

        // 2. Validate
        validate_job_draft(&draft)?;

        // 3. Persist
        let job = self
            .job_repo
            .create(&CompanyId::new(actor.id.clone()), &draft)
            .await?;

        // 4. Emit event
        self.event_bus
            .emit(JobChanged::new(job.id.clone(), JobChange::Posted));
        Ok(job)
    }

    pub async fn update_job(&self, actor: &Actor, id: &JobId, draft: JobDraft) -> AppResult<Job> {
        // 1. Load and check ownership
        let existing = self.job(id).await?;
        if !actor.is_company(&existing.company_id) {
            return Err(AppError::Validation(format!(
                "job {} belongs to another company",
                id
            )));
        }

        // 2. Validate
        validate_job_draft(&draft)?;

        // 3. Persist
        let job = self
            .job_repo
            .update(id, &existing.company_id, &draft)
            .await?;

        // 4. Emit event
        self.event_bus
            .emit(JobChanged::new(id.clone(), JobChange::Updated));
        Ok(job)
    }

    pub async fn delete_job(&self, actor: &Actor, id: &JobId) -> AppResult<()> {
        let existing = self.job(id).await?;
        let allowed = actor.role == Role::Admin || actor.is_company(&existing.company_id);
        if !allowed {
            return Err(AppError::Validation(format!(
                "{} {} may not delete job {}",
                actor.role, actor.id, id
            )));
        }

        self.job_repo.delete(id).await?;
        self.event_bus
            .emit(JobChanged::new(id.clone(), JobChange::Deleted));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JobType;
    use crate::repositories::{InMemoryJobRepository, MockJobRepository};

    fn draft(position: &str, location: &str) -> JobDraft {
        JobDraft {
            position: position.to_string(),
            location: location.to_string(),
            experience: "1-3 years".to_string(),
            description: "Join the team".to_string(),
            skills: vec!["Rust".to_string(), "Postgres".to_string()],
            job_type: JobType::FullTime,
        }
    }

    fn service() -> (JobService, Arc<EventBus>) {
        let bus = Arc::new(EventBus::new());
        let service = JobService::new(Arc::new(InMemoryJobRepository::new()), Arc::clone(&bus));
        (service, bus)
    }

    fn acme() -> Actor {
        Actor::company(&CompanyId::new("acme"))
    }

    #[tokio::test]
    async fn test_empty_search_skips_backend() {
        let mut repo = MockJobRepository::new();
        repo.expect_search_by_position().never();
        repo.expect_search_by_skill().never();
        let service = JobService::new(Arc::new(repo), Arc::new(EventBus::new()));

        assert!(service.search_by_position("").await.unwrap().is_empty());
        assert!(service.search_by_skill("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_term_is_trimmed() {
        let mut repo = MockJobRepository::new();
        repo.expect_search_by_skill()
            .withf(|term| term.to_string() == "rust")
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let service = JobService::new(Arc::new(repo), Arc::new(EventBus::new()));

        service.search_by_skill("  rust ").await.unwrap();
    }

    #[tokio::test]
    async fn test_company_posts_and_updates_own_job() {
        let (service, bus) = service();
        let job = service.post_job(&acme(), draft("Engineer", "Porto")).await.unwrap();
        assert_eq!(job.company_id, CompanyId::new("acme"));

        let updated = service
            .update_job(&acme(), &job.id, draft("Lead Engineer", "Porto"))
            .await
            .unwrap();
        assert_eq!(updated.position, "Lead Engineer");
        assert_eq!(bus.emitted_count("JobChanged"), 2);
    }

    #[tokio::test]
    async fn test_candidates_cannot_post() {
        let (service, _) = service();
        let actor = Actor::candidate(&crate::domain::CandidateId::new("c1"));
        assert!(matches!(
            service.post_job(&actor, draft("Engineer", "Porto")).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_draft_is_rejected() {
        let (service, bus) = service();
        let mut bad = draft("Engineer", "Porto");
        bad.skills.clear();
        assert!(matches!(
            service.post_job(&acme(), bad).await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(bus.emitted_count("JobChanged"), 0);
    }

    #[tokio::test]
    async fn test_other_company_cannot_edit_or_delete() {
        let (service, _) = service();
        let job = service.post_job(&acme(), draft("Engineer", "Porto")).await.unwrap();
        let globex = Actor::company(&CompanyId::new("globex"));

        assert!(service
            .update_job(&globex, &job.id, draft("Hacked", "Porto"))
            .await
            .is_err());
        assert!(service.delete_job(&globex, &job.id).await.is_err());

        service.delete_job(&Actor::admin("root"), &job.id).await.unwrap();
        assert!(matches!(service.job(&job.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_summary_falls_back_to_unknown() {
        let mut repo = MockJobRepository::new();
        repo.expect_get_by_id()
            .returning(|_| Err(AppError::Network("timeout".to_string())));
        let service = JobService::new(Arc::new(repo), Arc::new(EventBus::new()));

        let summary = service.job_summary_or_unknown(&JobId::new("j1")).await;
        assert_eq!(summary, JobSummary::unknown());
    }

    #[tokio::test]
    async fn test_location_filter_after_search() {
        let (service, _) = service();
        service.post_job(&acme(), draft("Engineer", "Porto")).await.unwrap();
        service.post_job(&acme(), draft("Engineer", "Lisbon")).await.unwrap();

        let found = service.search_by_position("engineer").await.unwrap();
        assert_eq!(found.len(), 2);
        let in_lisbon = JobService::filter_by_location(&found, "LIS");
        assert_eq!(in_lisbon.len(), 1);
        assert_eq!(JobService::filter_by_location(&found, "").len(), 2);
    }
}
