// src/config/mod.rs
//
// Client configuration
//
// Read from the environment with defaults that match a local backend.
// Path structure for the session file: {CONFIG_DIR}/jobportal/session.json

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::ReapplyPolicy;
use crate::error::{AppError, AppResult};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_URL: &str = "JOBPORTAL_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "JOBPORTAL_TIMEOUT_SECS";
pub const ENV_SESSION_FILE: &str = "JOBPORTAL_SESSION_FILE";
pub const ENV_REAPPLY_POLICY: &str = "JOBPORTAL_REAPPLY_POLICY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the portal REST API, without trailing slash
    pub api_base_url: String,
    pub timeout_secs: u64,
    /// Where the session context is persisted between runs
    pub session_path: PathBuf,
    /// Whether a withdrawn or rejected application frees the job for a new one
    pub reapply_policy: ReapplyPolicy,
}

impl ClientConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup(ENV_API_URL)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = normalize_base_url(&api_base_url)?;

        let timeout_secs = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::Config(format!("{} must be a number of seconds: {}", ENV_TIMEOUT_SECS, e))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(AppError::Config(format!(
                "{} must be greater than zero",
                ENV_TIMEOUT_SECS
            )));
        }

        let session_path = match lookup(ENV_SESSION_FILE) {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_session_path()?,
        };

        let reapply_policy = match lookup(ENV_REAPPLY_POLICY) {
            Some(raw) if !raw.trim().is_empty() => raw.parse::<ReapplyPolicy>().map_err(|e| {
                AppError::Config(format!(
                    "{} must be 'never' or 'after-closed': {}",
                    ENV_REAPPLY_POLICY, e
                ))
            })?,
            _ => ReapplyPolicy::default(),
        };

        Ok(Self {
            api_base_url,
            timeout_secs,
            session_path,
            reapply_policy,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Default session file location
pub fn default_session_path() -> AppResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| AppError::Config("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("jobportal").join("session.json"))
}

fn normalize_base_url(raw: &str) -> AppResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(AppError::Config(format!(
            "{} must be an http(s) URL, got '{}'",
            ENV_API_URL, raw
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_SESSION_FILE, "/tmp/s.json")])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.session_path, PathBuf::from("/tmp/s.json"));
        assert_eq!(config.reapply_policy, ReapplyPolicy::AfterClosed);
    }

    #[test]
    fn test_reapply_policy_from_env() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_SESSION_FILE, "/tmp/s.json"),
            (ENV_REAPPLY_POLICY, "never"),
        ]))
        .unwrap();
        assert_eq!(config.reapply_policy, ReapplyPolicy::Never);

        let err = ClientConfig::from_lookup(lookup(&[
            (ENV_SESSION_FILE, "/tmp/s.json"),
            (ENV_REAPPLY_POLICY, "always"),
        ]))
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://portal.example.com/api/"),
            (ENV_SESSION_FILE, "/tmp/s.json"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://portal.example.com/api");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(ClientConfig::from_lookup(lookup(&[(ENV_API_URL, "portal.local")])).is_err());
        assert!(ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).is_err());
        assert!(ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "0")])).is_err());
    }
}
