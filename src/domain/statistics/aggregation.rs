// Pure aggregation over fetched collections. Rendering is someone else's job.

use std::collections::{HashMap, HashSet};

use super::entity::{
    CompanyActivity, CompanyDashboardSummary, KeyMetrics, StatusCounts, StatusPercentages,
};
use crate::domain::directory::CompanyProfile;
use crate::domain::{ApplicationStatus, CompanyId, Job, JobApplication, JobId};

pub fn status_counts(applications: &[JobApplication]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for app in applications {
        match app.status {
            ApplicationStatus::Withdrawn => counts.withdrawn += 1,
            ApplicationStatus::Rejected => counts.rejected += 1,
            ApplicationStatus::Offered => counts.offered += 1,
            ApplicationStatus::Accepted => counts.accepted += 1,
            ApplicationStatus::Applied | ApplicationStatus::Interviewing => counts.pending += 1,
        }
        counts.total += 1;
    }
    counts
}

pub fn status_percentages(counts: &StatusCounts) -> StatusPercentages {
    let share = |n: u32| percent(n, counts.total);
    StatusPercentages {
        withdrawn: share(counts.withdrawn),
        rejected: share(counts.rejected),
        offered: share(counts.offered),
        accepted: share(counts.accepted),
        pending: share(counts.pending),
    }
}

pub fn key_metrics(applications: &[JobApplication], jobs: &[Job]) -> KeyMetrics {
    let counts = status_counts(applications);
    let total_jobs = jobs.len() as u32;

    let filled: HashSet<&JobId> = applications
        .iter()
        .filter(|app| app.status == ApplicationStatus::Accepted)
        .map(|app| &app.job_id)
        .collect();

    KeyMetrics {
        acceptance_ratio: percent(counts.accepted, counts.total),
        rejection_ratio: percent(counts.rejected, counts.total),
        offer_success_rate: percent(counts.accepted, counts.offered),
        avg_applications_per_job: if total_jobs > 0 {
            round1(counts.total as f64 / total_jobs as f64)
        } else {
            0.0
        },
        job_fill_rate: percent(filled.len() as u32, total_jobs),
    }
}

/// Jobs posted and applications accepted per company, in company order
pub fn company_activity(
    companies: &[CompanyProfile],
    jobs: &[Job],
    applications: &[JobApplication],
) -> Vec<CompanyActivity> {
    let owner: HashMap<&JobId, &CompanyId> =
        jobs.iter().map(|job| (&job.id, &job.company_id)).collect();

    companies
        .iter()
        .map(|company| {
            let jobs_posted = jobs
                .iter()
                .filter(|job| job.company_id == company.id)
                .count() as u32;
            let accepted_applications = applications
                .iter()
                .filter(|app| app.status == ApplicationStatus::Accepted)
                .filter(|app| owner.get(&app.job_id) == Some(&&company.id))
                .count() as u32;
            CompanyActivity {
                company_id: company.id.clone(),
                company_name: company.name.clone(),
                jobs_posted,
                accepted_applications,
            }
        })
        .collect()
}

/// `applications` are the applications to the company's own jobs
pub fn company_dashboard_summary(
    jobs: &[Job],
    applications: &[JobApplication],
) -> CompanyDashboardSummary {
    CompanyDashboardSummary {
        total_jobs: jobs.len() as u32,
        total_applications: applications.len() as u32,
        accepted_or_offered: applications
            .iter()
            .filter(|app| {
                matches!(
                    app.status,
                    ApplicationStatus::Accepted | ApplicationStatus::Offered
                )
            })
            .count() as u32,
    }
}

/// Offers currently waiting on the candidate
pub fn offers_received(applications: &[JobApplication]) -> u32 {
    applications
        .iter()
        .filter(|app| app.status == ApplicationStatus::Offered)
        .count() as u32
}

fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round1(part as f64 / whole as f64 * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApplicationId, CandidateId, JobType};

    fn app(job: &str, status: ApplicationStatus) -> JobApplication {
        JobApplication {
            id: ApplicationId::new(format!("{}-{}", job, status)),
            candidate_id: CandidateId::new("c"),
            job_id: JobId::new(job),
            qualification: "q".to_string(),
            resume_link: "https://example.com".to_string(),
            status,
            created_at: None,
            updated_at: None,
        }
    }

    fn job(id: &str, company: &str) -> Job {
        Job {
            id: JobId::new(id),
            company_id: CompanyId::new(company),
            position: "Dev".to_string(),
            location: "Remote".to_string(),
            experience: "1 year".to_string(),
            description: "d".to_string(),
            skills: vec!["Rust".to_string()],
            job_type: JobType::FullTime,
            posted_at: None,
        }
    }

    fn company(id: &str, name: &str) -> CompanyProfile {
        CompanyProfile {
            id: CompanyId::new(id),
            name: name.to_string(),
            email: None,
            location: None,
            description: None,
        }
    }

    #[test]
    fn test_counts_bucket_open_statuses_as_pending() {
        use ApplicationStatus::*;
        let apps = vec![
            app("j1", Applied),
            app("j1", Interviewing),
            app("j1", Offered),
            app("j2", Accepted),
            app("j2", Rejected),
            app("j2", Withdrawn),
        ];
        let counts = status_counts(&apps);
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.offered, 1);
        assert_eq!(counts.accepted, 1);
        assert_eq!(counts.total, 6);
    }

    #[test]
    fn test_percentages_round_to_one_decimal() {
        use ApplicationStatus::*;
        let apps = vec![app("j1", Applied), app("j1", Applied), app("j1", Accepted)];
        let pct = status_percentages(&status_counts(&apps));
        assert_eq!(pct.pending, 66.7);
        assert_eq!(pct.accepted, 33.3);
        assert_eq!(pct.rejected, 0.0);
    }

    #[test]
    fn test_metrics_are_zero_safe() {
        let metrics = key_metrics(&[], &[]);
        assert_eq!(metrics, KeyMetrics::default());
    }

    #[test]
    fn test_key_metrics() {
        use ApplicationStatus::*;
        let jobs = vec![job("j1", "co1"), job("j2", "co1"), job("j3", "co2"), job("j4", "co2")];
        let apps = vec![
            app("j1", Accepted),
            app("j1", Rejected),
            app("j2", Offered),
            app("j3", Offered),
            app("j3", Applied),
        ];
        let metrics = key_metrics(&apps, &jobs);
        assert_eq!(metrics.acceptance_ratio, 20.0);
        assert_eq!(metrics.rejection_ratio, 20.0);
        assert_eq!(metrics.offer_success_rate, 50.0);
        assert_eq!(metrics.avg_applications_per_job, 1.3);
        assert_eq!(metrics.job_fill_rate, 25.0);
    }

    #[test]
    fn test_company_activity() {
        use ApplicationStatus::*;
        let companies = vec![company("co1", "Acme"), company("co2", "Globex")];
        let jobs = vec![job("j1", "co1"), job("j2", "co1"), job("j3", "co2")];
        let apps = vec![app("j1", Accepted), app("j2", Accepted), app("j3", Offered)];

        let activity = company_activity(&companies, &jobs, &apps);
        assert_eq!(activity.len(), 2);
        assert_eq!(activity[0].company_name, "Acme");
        assert_eq!(activity[0].jobs_posted, 2);
        assert_eq!(activity[0].accepted_applications, 2);
        assert_eq!(activity[1].jobs_posted, 1);
        assert_eq!(activity[1].accepted_applications, 0);
    }

    #[test]
    fn test_company_dashboard_summary() {
        use ApplicationStatus::*;
        let jobs = vec![job("j1", "co1")];
        let apps = vec![app("j1", Accepted), app("j1", Offered), app("j1", Withdrawn)];
        let summary = company_dashboard_summary(&jobs, &apps);
        assert_eq!(summary.total_jobs, 1);
        assert_eq!(summary.total_applications, 3);
        assert_eq!(summary.accepted_or_offered, 2);
        assert_eq!(offers_received(&apps), 1);
    }
}
