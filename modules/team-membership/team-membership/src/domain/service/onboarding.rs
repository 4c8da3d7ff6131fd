use sea_orm::ConnectionTrait;
use team_membership_sdk::{MemberSide, OnboardingStatus};
use tracing::instrument;

use super::{Service, commit};
use crate::domain::error::DomainError;
use crate::domain::onboarding::{OnboardingFacts, derive};
use crate::domain::repos::{
    CredentialsRepository, DirectoryRepository, JoinRequestsRepository, MembershipsRepository,
    Repositories,
};

impl<R: Repositories> Service<R> {
    /// Re-derive a member's onboarding status in its own transaction.
    #[instrument(skip(self))]
    pub async fn recompute_onboarding(
        &self,
        side: MemberSide,
        member_id: i32,
    ) -> Result<OnboardingStatus, DomainError> {
        let txn = self.begin().await?;
        let status = self.recompute(&txn, side, member_id).await?;
        commit(txn).await?;
        Ok(status)
    }

    /// Derive the onboarding status of a player or coach from the ledger and
    /// pending requests visible on `conn`, and write it back when it changed.
    pub(super) async fn recompute<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        member_id: i32,
    ) -> Result<OnboardingStatus, DomainError> {
        let member = self
            .repos
            .directory()
            .find_member(conn, side, member_id)
            .await?
            .ok_or_else(|| DomainError::member_not_found(side, member_id))?;

        let credential = self
            .repos
            .credentials()
            .find(conn, member.credential_id)
            .await?
            .ok_or_else(|| DomainError::credential_not_found(member.credential_id))?;

        let has_active_membership = self
            .repos
            .memberships()
            .has_active_for_member(conn, side, member_id)
            .await?;

        // Coaches never submit join requests.
        let has_pending_request = match side {
            MemberSide::Player => {
                self.repos
                    .join_requests()
                    .has_pending_for_player(conn, member_id)
                    .await?
            }
            MemberSide::Coach => false,
        };

        let status = derive(OnboardingFacts {
            has_active_membership,
            has_pending_request,
        });

        if credential.onboarding_status == status {
            tracing::debug!(credential_id = credential.id, %status, "Onboarding status unchanged");
            return Ok(status);
        }

        let updated = self
            .repos
            .credentials()
            .update_onboarding_status(conn, credential.id, status)
            .await?;
        if !updated {
            return Err(DomainError::onboarding_write_failed(credential.id));
        }

        tracing::info!(
            credential_id = credential.id,
            from = %credential.onboarding_status,
            to = %status,
            "Onboarding status updated"
        );
        Ok(status)
    }
}
