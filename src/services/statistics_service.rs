// src/services/statistics_service.rs
//
// Statistics Service - admin report, company home and candidate home numbers.
// Fetches the collections, then hands them to the pure aggregation functions.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::statistics::{
    company_activity, company_dashboard_summary, key_metrics, offers_received, status_counts,
    status_percentages,
};
use crate::domain::{
    CandidateId, CompanyActivity, CompanyDashboardSummary, CompanyId, JobApplication, KeyMetrics,
    StatusCounts, StatusPercentages,
};
use crate::error::AppResult;
use crate::repositories::{ApplicationRepository, DirectoryRepository, JobRepository};

/// Everything the admin analysis view shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminReport {
    pub total_candidates: u32,
    pub total_companies: u32,
    pub total_jobs: u32,
    pub counts: StatusCounts,
    pub percentages: StatusPercentages,
    pub metrics: KeyMetrics,
    pub company_activity: Vec<CompanyActivity>,
}

/// Numbers on a candidate's home view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CandidateOverview {
    pub total_applications: u32,
    pub offers_received: u32,
    pub counts: StatusCounts,
}

pub struct StatisticsService {
    application_repo: Arc<dyn ApplicationRepository>,
    job_repo: Arc<dyn JobRepository>,
    directory_repo: Arc<dyn DirectoryRepository>,
}

impl StatisticsService {
    pub fn new(
        application_repo: Arc<dyn ApplicationRepository>,
        job_repo: Arc<dyn JobRepository>,
        directory_repo: Arc<dyn DirectoryRepository>,
    ) -> Self {
        Self {
            application_repo,
            job_repo,
            directory_repo,
        }
    }

    pub async fn admin_report(&self) -> AppResult<AdminReport> {
        let applications = self.application_repo.list_all().await?;
        let jobs = self.job_repo.list_all().await?;
        let companies = self.directory_repo.list_companies().await?;
        let candidates = self.directory_repo.list_candidates().await?;

        let counts = status_counts(&applications);
        log::debug!(
            "admin report over {} applications, {} jobs",
            counts.total,
            jobs.len()
        );

        Ok(AdminReport {
            total_candidates: candidates.len() as u32,
            total_companies: companies.len() as u32,
            total_jobs: jobs.len() as u32,
            counts,
            percentages: status_percentages(&counts),
            metrics: key_metrics(&applications, &jobs),
            company_activity: company_activity(&companies, &jobs, &applications),
        })
    }

    /// Job count, application count and accepted-or-offered count over the
    /// company's own jobs
    pub async fn company_dashboard(&self, company_id: &CompanyId) -> AppResult<CompanyDashboardSummary> {
        let jobs = self.job_repo.list_by_company(company_id).await?;

        let mut applications: Vec<JobApplication> = Vec::new();
        for job in &jobs {
            applications.extend(self.application_repo.list_by_job(&job.id, None).await?);
        }

        Ok(company_dashboard_summary(&jobs, &applications))
    }

    pub async fn candidate_overview(&self, candidate_id: &CandidateId) -> AppResult<CandidateOverview> {
        let applications = self.application_repo.list_by_candidate(candidate_id).await?;
        let counts = status_counts(&applications);
        Ok(CandidateOverview {
            total_applications: counts.total,
            offers_received: offers_received(&applications),
            counts,
        })
    }
}
