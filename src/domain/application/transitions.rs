// Application status state machine.
//
// TRANSITIONS is the only description of legal status changes. Everything
// that moves an application (entity, lifecycle manager, views deciding
// which buttons to offer) goes through the functions below.

use super::entity::ApplicationStatus;
use crate::domain::{DomainError, DomainResult, Role};

use ApplicationStatus::*;

/// One legal edge of the lifecycle graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
    pub actor: Role,
}

const fn edge(from: ApplicationStatus, to: ApplicationStatus, actor: Role) -> Transition {
    Transition { from, to, actor }
}

/// Creation (none -> Applied) is not an edge; it is governed by the
/// duplicate check in `ReapplyPolicy`.
pub const TRANSITIONS: &[Transition] = &[
    edge(Applied, Interviewing, Role::Company),
    edge(Applied, Offered, Role::Company),
    edge(Applied, Rejected, Role::Company),
    edge(Interviewing, Offered, Role::Company),
    edge(Interviewing, Rejected, Role::Company),
    edge(Interviewing, Withdrawn, Role::Candidate),
    edge(Applied, Withdrawn, Role::Candidate),
    edge(Offered, Accepted, Role::Candidate),
    edge(Offered, Withdrawn, Role::Candidate),
];

/// The role allowed to move `from` -> `to`, if the edge exists
pub fn permitted_actor(from: ApplicationStatus, to: ApplicationStatus) -> Option<Role> {
    TRANSITIONS
        .iter()
        .find(|t| t.from == from && t.to == to)
        .map(|t| t.actor)
}

/// Validates a requested status change for a role
pub fn validate_transition(
    from: ApplicationStatus,
    to: ApplicationStatus,
    role: Role,
) -> DomainResult<()> {
    let reject = |reason: String| DomainError::InvalidStateTransition {
        from: from.to_string(),
        to: to.to_string(),
        reason,
    };

    if from.is_terminal() {
        return Err(reject(format!("{} is a terminal status", from)));
    }

    match permitted_actor(from, to) {
        None => Err(reject("not a permitted transition".to_string())),
        Some(allowed) if allowed != role => {
            Err(reject(format!("only a {} may make this change", allowed)))
        }
        Some(_) => Ok(()),
    }
}

/// Statuses `role` may move an application to from `from`, in table order
pub fn available_targets(from: ApplicationStatus, role: Role) -> Vec<ApplicationStatus> {
    TRANSITIONS
        .iter()
        .filter(|t| t.from == from && t.actor == role)
        .map(|t| t.to)
        .collect()
}
