use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use super::{contains_ignore_case, read, write};
use crate::domain::{CompanyId, Job, JobDraft, JobId};
use crate::error::{AppError, AppResult};
use crate::repositories::JobRepository;

#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: RwLock<Vec<Job>>,
    next_id: AtomicU64,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        Self {
            next_id: AtomicU64::new(jobs.len() as u64),
            jobs: RwLock::new(jobs),
        }
    }

    fn filtered(&self, keep: impl Fn(&Job) -> bool) -> Vec<Job> {
        read(&self.jobs).iter().filter(|job| keep(job)).cloned().collect()
    }
}

fn job_from_draft(id: JobId, company_id: &CompanyId, draft: &JobDraft) -> Job {
    Job {
        id,
        company_id: company_id.clone(),
        position: draft.position.clone(),
        location: draft.location.clone(),
        experience: draft.experience.clone(),
        description: draft.description.clone(),
        skills: draft.skills.clone(),
        job_type: draft.job_type,
        posted_at: Some(Utc::now()),
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn get_by_id(&self, id: &JobId) -> AppResult<Option<Job>> {
        Ok(read(&self.jobs).iter().find(|job| &job.id == id).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<Job>> {
        Ok(read(&self.jobs).clone())
    }

    async fn list_by_company(&self, company_id: &CompanyId) -> AppResult<Vec<Job>> {
        Ok(self.filtered(|job| &job.company_id == company_id))
    }

    async fn search_by_position(&self, term: &str) -> AppResult<Vec<Job>> {
        Ok(self.filtered(|job| contains_ignore_case(&job.position, term)))
    }

    async fn search_by_skill(&self, term: &str) -> AppResult<Vec<Job>> {
        Ok(self.filtered(|job| {
            job.skills
                .iter()
                .any(|skill| contains_ignore_case(skill, term))
        }))
    }

    async fn create(&self, company_id: &CompanyId, draft: &JobDraft) -> AppResult<Job> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let job = job_from_draft(JobId::new(format!("job-{}", n)), company_id, draft);
        write(&self.jobs).push(job.clone());
        Ok(job)
    }

    async fn update(&self, id: &JobId, company_id: &CompanyId, draft: &JobDraft) -> AppResult<Job> {
        let mut jobs = write(&self.jobs);
        let slot = jobs
            .iter_mut()
            .find(|job| &job.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Job {}", id)))?;
        let posted_at = slot.posted_at;
        *slot = Job {
            posted_at,
            ..job_from_draft(id.clone(), company_id, draft)
        };
        Ok(slot.clone())
    }

    async fn delete(&self, id: &JobId) -> AppResult<()> {
        let mut jobs = write(&self.jobs);
        let before = jobs.len();
        jobs.retain(|job| &job.id != id);
        if jobs.len() == before {
            return Err(AppError::NotFound(format!("Job {}", id)));
        }
        Ok(())
    }
}
