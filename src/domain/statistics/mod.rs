//! Critical Statistics Invariants:
//!
//! 1. Statistics are ALWAYS derived from fetched collections, NEVER stored
//! 2. Statistics can be recalculated at any time
//! 3. Statistics NEVER alter application or job state
//! 4. Every ratio is zero when its denominator is zero

pub mod aggregation;
pub mod entity;

pub use aggregation::{
    company_activity, company_dashboard_summary, key_metrics, offers_received, status_counts,
    status_percentages,
};
pub use entity::{
    CompanyActivity, CompanyDashboardSummary, KeyMetrics, StatusCounts, StatusPercentages,
};
