use axum::http::StatusCode;

use super::problem::Problem;
use crate::domain::error::DomainError;

pub type ApiResult<T> = Result<T, Problem>;

fn code_for(e: &DomainError) -> &'static str {
    match e {
        DomainError::CredentialNotFound { .. } => "CREDENTIAL_NOT_FOUND",
        DomainError::ProfileNotFound { .. } => "PROFILE_NOT_FOUND",
        DomainError::MemberNotFound { .. } => "MEMBER_NOT_FOUND",
        DomainError::TeamNotFound { .. } => "TEAM_NOT_FOUND",
        DomainError::JoinRequestNotFound { .. } => "JOIN_REQUEST_NOT_FOUND",
        DomainError::MembershipNotFound { .. } => "MEMBERSHIP_NOT_FOUND",
        DomainError::AlreadyMember { .. } => "ALREADY_MEMBER",
        DomainError::DuplicatePendingRequest { .. } => "DUPLICATE_PENDING_REQUEST",
        DomainError::DuplicateMembership { .. } => "DUPLICATE_MEMBERSHIP",
        DomainError::UniqueViolation { .. } => "CONFLICT",
        DomainError::NotTeamCoach { .. } => "NOT_TEAM_COACH",
        DomainError::NotRequestOwner { .. } => "NOT_REQUEST_OWNER",
        DomainError::NotPending { .. } => "JOIN_REQUEST_NOT_PENDING",
        DomainError::Validation { .. } => "VALIDATION",
        DomainError::OnboardingWriteFailed { .. } | DomainError::Database { .. } => "INTERNAL",
    }
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        let code = code_for(&e);
        let (status, title) = match &e {
            DomainError::CredentialNotFound { .. }
            | DomainError::ProfileNotFound { .. }
            | DomainError::MemberNotFound { .. }
            | DomainError::TeamNotFound { .. }
            | DomainError::JoinRequestNotFound { .. }
            | DomainError::MembershipNotFound { .. } => (StatusCode::NOT_FOUND, "Not Found"),
            DomainError::AlreadyMember { .. }
            | DomainError::DuplicatePendingRequest { .. }
            | DomainError::DuplicateMembership { .. }
            | DomainError::UniqueViolation { .. } => (StatusCode::CONFLICT, "Conflict"),
            DomainError::NotTeamCoach { .. } | DomainError::NotRequestOwner { .. } => {
                (StatusCode::UNAUTHORIZED, "Unauthorized")
            }
            DomainError::NotPending { .. } | DomainError::Validation { .. } => {
                (StatusCode::BAD_REQUEST, "Bad Request")
            }
            DomainError::OnboardingWriteFailed { .. } | DomainError::Database { .. } => {
                tracing::error!(error = ?e, "Internal error occurred");
                return Problem::from_code(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    code,
                    "Internal Server Error",
                    "An internal error occurred",
                );
            }
        };

        Problem::from_code(status, code, title, e.to_string())
    }
}
