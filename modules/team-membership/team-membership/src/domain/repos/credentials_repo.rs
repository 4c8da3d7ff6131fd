use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use team_membership_sdk::{OnboardingStatus, Role};

use crate::domain::error::DomainError;

/// Login identity owning the onboarding status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub id: i32,
    pub email: String,
    pub role: Role,
    pub onboarding_status: OnboardingStatus,
    pub status: bool,
}

/// Access to the credential store.
///
/// The membership module reads credentials and writes nothing but the
/// onboarding status.
#[async_trait]
pub trait CredentialsRepository: Send + Sync {
    async fn find<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Credential>, DomainError>;

    /// Persist a new onboarding status. Returns `false` when no row was
    /// affected.
    async fn update_onboarding_status<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
        status: OnboardingStatus,
    ) -> Result<bool, DomainError>;
}
