use serde::{Deserialize, Serialize};

use crate::domain::CompanyId;

/// Applications per status bucket.
/// `pending` is everything still open (Applied, Interviewing).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub withdrawn: u32,
    pub rejected: u32,
    pub offered: u32,
    pub accepted: u32,
    pub pending: u32,
    pub total: u32,
}

/// Share of each bucket in percent, one decimal
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusPercentages {
    pub withdrawn: f64,
    pub rejected: f64,
    pub offered: f64,
    pub accepted: f64,
    pub pending: f64,
}

/// Headline platform ratios, in percent except the per-job average
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    /// accepted / total applications
    pub acceptance_ratio: f64,
    /// rejected / total applications
    pub rejection_ratio: f64,
    /// accepted / offered
    pub offer_success_rate: f64,
    /// applications / jobs
    pub avg_applications_per_job: f64,
    /// jobs with at least one accepted application / jobs
    pub job_fill_rate: f64,
}

/// Per-company activity for the admin report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyActivity {
    pub company_id: CompanyId,
    pub company_name: String,
    pub jobs_posted: u32,
    pub accepted_applications: u32,
}

/// Numbers on a company's home view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDashboardSummary {
    pub total_jobs: u32,
    pub total_applications: u32,
    pub accepted_or_offered: u32,
}
