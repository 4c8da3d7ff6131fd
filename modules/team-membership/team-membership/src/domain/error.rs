use team_membership_sdk::{JoinRequestStatus, MemberSide, TeamMembershipError};
use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Credential not found: {id}")]
    CredentialNotFound { id: i32 },

    #[error("No {side} profile for credential {credential_id}")]
    ProfileNotFound {
        side: MemberSide,
        credential_id: i32,
    },

    #[error("The {side} {id} does not exist")]
    MemberNotFound { side: MemberSide, id: i32 },

    #[error("Team not found: {id}")]
    TeamNotFound { id: i32 },

    #[error("Join request not found: {id}")]
    JoinRequestNotFound { id: i32 },

    #[error("The {side} team record {id} does not exist")]
    MembershipNotFound { side: MemberSide, id: i32 },

    #[error("Player {player_id} is already an active member of team {team_id}")]
    AlreadyMember { player_id: i32, team_id: i32 },

    #[error("Player {player_id} already has a pending request for team {team_id}")]
    DuplicatePendingRequest { player_id: i32, team_id: i32 },

    #[error("The {side} {member_id} already has an active assignment to team {team_id}")]
    DuplicateMembership {
        side: MemberSide,
        member_id: i32,
        team_id: i32,
    },

    #[error("Conflicting record: {message}")]
    UniqueViolation { message: String },

    #[error("Coach is not assigned to team {team_id}")]
    NotTeamCoach { team_id: i32 },

    #[error("Join request {id} belongs to another player")]
    NotRequestOwner { id: i32 },

    #[error("Join request {id} is not pending (current status: {status})")]
    NotPending { id: i32, status: JoinRequestStatus },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Onboarding status of credential {credential_id} could not be updated")]
    OnboardingWriteFailed { credential_id: i32 },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn credential_not_found(id: i32) -> Self {
        Self::CredentialNotFound { id }
    }

    pub fn profile_not_found(side: MemberSide, credential_id: i32) -> Self {
        Self::ProfileNotFound {
            side,
            credential_id,
        }
    }

    pub fn member_not_found(side: MemberSide, id: i32) -> Self {
        Self::MemberNotFound { side, id }
    }

    pub fn team_not_found(id: i32) -> Self {
        Self::TeamNotFound { id }
    }

    pub fn join_request_not_found(id: i32) -> Self {
        Self::JoinRequestNotFound { id }
    }

    pub fn membership_not_found(side: MemberSide, id: i32) -> Self {
        Self::MembershipNotFound { side, id }
    }

    pub fn already_member(player_id: i32, team_id: i32) -> Self {
        Self::AlreadyMember { player_id, team_id }
    }

    pub fn duplicate_pending_request(player_id: i32, team_id: i32) -> Self {
        Self::DuplicatePendingRequest { player_id, team_id }
    }

    pub fn duplicate_membership(side: MemberSide, member_id: i32, team_id: i32) -> Self {
        Self::DuplicateMembership {
            side,
            member_id,
            team_id,
        }
    }

    pub fn unique_violation(message: impl Into<String>) -> Self {
        Self::UniqueViolation {
            message: message.into(),
        }
    }

    pub fn not_team_coach(team_id: i32) -> Self {
        Self::NotTeamCoach { team_id }
    }

    pub fn not_request_owner(id: i32) -> Self {
        Self::NotRequestOwner { id }
    }

    pub fn not_pending(id: i32, status: JoinRequestStatus) -> Self {
        Self::NotPending { id, status }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn onboarding_write_failed(credential_id: i32) -> Self {
        Self::OnboardingWriteFailed { credential_id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for TeamMembershipError {
    fn from(e: DomainError) -> Self {
        let message = e.to_string();
        match e {
            DomainError::CredentialNotFound { .. }
            | DomainError::ProfileNotFound { .. }
            | DomainError::MemberNotFound { .. }
            | DomainError::TeamNotFound { .. }
            | DomainError::JoinRequestNotFound { .. }
            | DomainError::MembershipNotFound { .. } => Self::not_found(message),
            DomainError::AlreadyMember { .. }
            | DomainError::DuplicatePendingRequest { .. }
            | DomainError::DuplicateMembership { .. }
            | DomainError::UniqueViolation { .. } => Self::conflict(message),
            DomainError::NotTeamCoach { .. } | DomainError::NotRequestOwner { .. } => {
                Self::unauthorized(message)
            }
            DomainError::NotPending { .. } | DomainError::Validation { .. } => {
                Self::bad_request(message)
            }
            DomainError::OnboardingWriteFailed { .. } | DomainError::Database { .. } => {
                Self::internal()
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn not_pending_message_names_current_status() {
        let err = DomainError::not_pending(7, JoinRequestStatus::Approved);
        assert!(err.to_string().contains("APPROVED"));

        let sdk: TeamMembershipError = err.into();
        match sdk {
            TeamMembershipError::BadRequest { message } => assert!(message.contains("APPROVED")),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn storage_failures_hide_details() {
        let sdk: TeamMembershipError = DomainError::database("connection reset").into();
        assert_eq!(sdk, TeamMembershipError::Internal);

        let sdk: TeamMembershipError = DomainError::onboarding_write_failed(3).into();
        assert_eq!(sdk, TeamMembershipError::Internal);
    }

    #[test]
    fn ownership_failures_map_to_unauthorized() {
        let sdk: TeamMembershipError = DomainError::not_team_coach(1).into();
        assert!(matches!(sdk, TeamMembershipError::Unauthorized { .. }));
        let sdk: TeamMembershipError = DomainError::not_request_owner(1).into();
        assert!(matches!(sdk, TeamMembershipError::Unauthorized { .. }));
    }
}
