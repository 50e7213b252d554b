// src/repositories/memory/mod.rs
//
// In-memory repositories for offline runs and tests.
// Same contracts as the REST ones; ids are assigned from a counter.

mod application;
mod directory;
mod job;

pub use application::InMemoryApplicationRepository;
pub use directory::InMemoryDirectoryRepository;
pub use job::InMemoryJobRepository;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
