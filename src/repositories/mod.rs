// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls
// - A missing record is Ok(None) from get_by_id, never an error

pub mod application_repository;
pub mod directory_repository;
pub mod job_repository;
pub mod memory;

pub use application_repository::{ApplicationRepository, RestApplicationRepository};
pub use directory_repository::{DirectoryRepository, RestDirectoryRepository};
pub use job_repository::{JobRepository, RestJobRepository};
pub use memory::{InMemoryApplicationRepository, InMemoryDirectoryRepository, InMemoryJobRepository};

#[cfg(test)]
pub use application_repository::MockApplicationRepository;
#[cfg(test)]
pub use directory_repository::MockDirectoryRepository;
#[cfg(test)]
pub use job_repository::MockJobRepository;

use crate::error::{AppError, AppResult};

/// Turn the backend's 404 into an absent record
fn found<T>(result: AppResult<T>) -> AppResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(AppError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
