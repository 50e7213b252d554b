// src/domain/actor.rs
//
// Who is asking. Every lifecycle operation is performed on behalf of an
// Actor; the role decides which transitions are reachable and the id
// decides ownership.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{CandidateId, CompanyId, DomainError};

/// Portal account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Candidate,
    Company,
    Admin,
}

/// The account performing an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub role: Role,
    /// Backend id of the account (candidate, company or admin id)
    pub id: String,
}

impl Actor {
    pub fn new(role: Role, id: impl Into<String>) -> Self {
        Self {
            role,
            id: id.into(),
        }
    }

    pub fn candidate(id: &CandidateId) -> Self {
        Self::new(Role::Candidate, id.as_str())
    }

    pub fn company(id: &CompanyId) -> Self {
        Self::new(Role::Company, id.as_str())
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self::new(Role::Admin, id)
    }

    /// True if this actor is the candidate with the given id
    pub fn is_candidate(&self, candidate_id: &CandidateId) -> bool {
        self.role == Role::Candidate && self.id == candidate_id.as_str()
    }

    /// True if this actor is the company with the given id
    pub fn is_company(&self, company_id: &CompanyId) -> bool {
        self.role == Role::Company && self.id == company_id.as_str()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Candidate => write!(f, "candidate"),
            Role::Company => write!(f, "company"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    /// Roles arrive in whatever case the login form or backend used
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "candidate" => Ok(Role::Candidate),
            "company" => Ok(Role::Company),
            "admin" => Ok(Role::Admin),
            _ => Err(DomainError::UnknownValue {
                kind: "role",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_is_case_insensitive() {
        assert_eq!("Company".parse::<Role>().unwrap(), Role::Company);
        assert_eq!(" ADMIN ".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("candidate".parse::<Role>().unwrap(), Role::Candidate);
        assert!("recruiter".parse::<Role>().is_err());
    }

    #[test]
    fn test_ownership_requires_matching_role() {
        let candidate_id = CandidateId::new("c-1");
        let actor = Actor::new(Role::Company, "c-1");
        assert!(!actor.is_candidate(&candidate_id));
        assert!(Actor::candidate(&candidate_id).is_candidate(&candidate_id));
    }
}
