use super::entity::Job;

/// Jobs whose location contains `needle`, ignoring case.
/// An empty needle returns every job unchanged.
pub fn filter_by_location_substring(jobs: &[Job], needle: &str) -> Vec<Job> {
    if needle.is_empty() {
        return jobs.to_vec();
    }
    let needle = needle.to_lowercase();
    jobs.iter()
        .filter(|job| job.location.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
