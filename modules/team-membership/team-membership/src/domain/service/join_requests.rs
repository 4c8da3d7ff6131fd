use sea_orm::ConnectionTrait;
use team_membership_sdk::{
    Caller, JoinRequest, JoinRequestStatus, MemberSide, NewJoinRequest,
};
use time::OffsetDateTime;
use tracing::instrument;

use super::{Service, ServiceConfig, commit};
use crate::domain::error::DomainError;
use crate::domain::repos::{
    CredentialsRepository, DirectoryRepository, JoinRequestsRepository, Member,
    MembershipRow, MembershipsRepository, NewJoinRequestRow, Repositories,
};

impl<R: Repositories> Service<R> {
    pub async fn list_join_requests(&self) -> Result<Vec<JoinRequest>, DomainError> {
        tracing::debug!("Listing join requests");
        self.repos.join_requests().list(&self.db).await
    }

    pub async fn get_join_request(&self, id: i32) -> Result<JoinRequest, DomainError> {
        self.repos
            .join_requests()
            .get(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::join_request_not_found(id))
    }

    /// Pending requests of the calling player.
    pub async fn list_my_join_requests(
        &self,
        caller: &Caller,
    ) -> Result<Vec<JoinRequest>, DomainError> {
        let player = self
            .member_for_credential(&self.db, MemberSide::Player, caller.credential_id)
            .await?;
        self.repos
            .join_requests()
            .list_pending_by_player(&self.db, player.id)
            .await
    }

    pub async fn list_pending_join_requests(
        &self,
        team_id: i32,
    ) -> Result<Vec<JoinRequest>, DomainError> {
        self.repos
            .join_requests()
            .list_pending_by_team(&self.db, team_id)
            .await
    }

    #[instrument(skip(self, caller), fields(credential_id = caller.credential_id))]
    pub async fn create_join_request(
        &self,
        caller: &Caller,
        new_request: NewJoinRequest,
    ) -> Result<JoinRequest, DomainError> {
        tracing::info!("Creating join request");

        let txn = self.begin().await?;

        let credential = self
            .repos
            .credentials()
            .find(&txn, caller.credential_id)
            .await?
            .ok_or_else(|| DomainError::credential_not_found(caller.credential_id))?;

        let player = self
            .member_for_credential(&txn, MemberSide::Player, credential.id)
            .await?;

        let team = self
            .repos
            .directory()
            .find_team(&txn, new_request.team_id)
            .await?
            .ok_or_else(|| DomainError::team_not_found(new_request.team_id))?;

        self.ensure_not_member(&txn, player.id, team.id).await?;

        let latest = self
            .repos
            .join_requests()
            .latest_for_pair(&txn, player.id, team.id)
            .await?;
        if latest.is_some_and(|r| r.status == JoinRequestStatus::Pending) {
            return Err(DomainError::duplicate_pending_request(player.id, team.id));
        }

        let request = self
            .repos
            .join_requests()
            .insert(
                &txn,
                NewJoinRequestRow {
                    player_id: player.id,
                    team_id: team.id,
                    created_at: OffsetDateTime::now_utc(),
                },
            )
            .await?;

        self.recompute(&txn, MemberSide::Player, player.id).await?;
        commit(txn).await?;

        tracing::info!(
            request_id = request.id,
            player_id = player.id,
            team_id = team.id,
            "Join request created"
        );
        Ok(request)
    }

    #[instrument(skip(self, caller), fields(credential_id = caller.credential_id))]
    pub async fn approve_join_request(
        &self,
        caller: &Caller,
        id: i32,
    ) -> Result<JoinRequest, DomainError> {
        let txn = self.begin().await?;

        let (mut request, coach) = self.load_for_review(&txn, caller, id).await?;
        self.ensure_not_member(&txn, request.player_id, request.team_id)
            .await?;

        let now = OffsetDateTime::now_utc();
        request.status = JoinRequestStatus::Approved;
        request.coach_id = Some(coach.id);
        request.reviewed_at = Some(now);
        request.updated_at = now;
        let request = self.write_review(&txn, &request).await?;

        let membership = self
            .repos
            .memberships()
            .insert(
                &txn,
                MemberSide::Player,
                MembershipRow {
                    member_id: request.player_id,
                    team_id: request.team_id,
                    started_at: now,
                    ended_at: None,
                    status: true,
                },
            )
            .await?;

        self.recompute(&txn, MemberSide::Player, request.player_id)
            .await?;
        commit(txn).await?;

        tracing::info!(
            request_id = request.id,
            membership_id = membership.id,
            coach_id = coach.id,
            "Join request approved"
        );
        Ok(request)
    }

    #[instrument(skip(self, caller, review_comment), fields(credential_id = caller.credential_id))]
    pub async fn reject_join_request(
        &self,
        caller: &Caller,
        id: i32,
        review_comment: Option<String>,
    ) -> Result<JoinRequest, DomainError> {
        let txn = self.begin().await?;

        let (mut request, coach) = self.load_for_review(&txn, caller, id).await?;
        let review_comment = normalize_review_comment(&self.config, review_comment)?;

        let now = OffsetDateTime::now_utc();
        request.status = JoinRequestStatus::Rejected;
        request.coach_id = Some(coach.id);
        request.review_comment = review_comment;
        request.reviewed_at = Some(now);
        request.updated_at = now;
        let request = self.write_review(&txn, &request).await?;

        self.recompute(&txn, MemberSide::Player, request.player_id)
            .await?;
        commit(txn).await?;

        tracing::info!(request_id = request.id, coach_id = coach.id, "Join request rejected");
        Ok(request)
    }

    #[instrument(skip(self, caller), fields(credential_id = caller.credential_id))]
    pub async fn cancel_join_request(
        &self,
        caller: &Caller,
        id: i32,
    ) -> Result<JoinRequest, DomainError> {
        let txn = self.begin().await?;

        let mut request = self
            .repos
            .join_requests()
            .get(&txn, id)
            .await?
            .ok_or_else(|| DomainError::join_request_not_found(id))?;

        let player = self
            .member_for_credential(&txn, MemberSide::Player, caller.credential_id)
            .await?;
        if request.player_id != player.id {
            return Err(DomainError::not_request_owner(id));
        }
        if request.status.is_terminal() {
            return Err(DomainError::not_pending(id, request.status));
        }

        let now = OffsetDateTime::now_utc();
        request.status = JoinRequestStatus::Cancelled;
        request.reviewed_at = Some(now);
        request.updated_at = now;
        let request = self.write_review(&txn, &request).await?;

        self.recompute(&txn, MemberSide::Player, player.id).await?;
        commit(txn).await?;

        tracing::info!(request_id = request.id, "Join request cancelled");
        Ok(request)
    }

    /// Administrative hard delete; no state checks.
    #[instrument(skip(self))]
    pub async fn delete_join_request(&self, id: i32) -> Result<(), DomainError> {
        let txn = self.begin().await?;

        let request = self
            .repos
            .join_requests()
            .get(&txn, id)
            .await?
            .ok_or_else(|| DomainError::join_request_not_found(id))?;

        if !self.repos.join_requests().delete(&txn, id).await? {
            return Err(DomainError::join_request_not_found(id));
        }

        self.recompute(&txn, MemberSide::Player, request.player_id)
            .await?;
        commit(txn).await?;

        tracing::info!(request_id = id, "Join request deleted");
        Ok(())
    }

    /// Shared approve/reject preconditions, checked in this order: request
    /// exists, caller has a coach profile, caller coaches the request's team,
    /// request is still pending.
    async fn load_for_review<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        caller: &Caller,
        id: i32,
    ) -> Result<(JoinRequest, Member), DomainError> {
        let request = self
            .repos
            .join_requests()
            .get(conn, id)
            .await?
            .ok_or_else(|| DomainError::join_request_not_found(id))?;

        let coach = self
            .member_for_credential(conn, MemberSide::Coach, caller.credential_id)
            .await?;

        let coaches_team = self
            .repos
            .memberships()
            .find_active_for_pair(conn, MemberSide::Coach, coach.id, request.team_id, None)
            .await?
            .is_some();
        if !coaches_team {
            return Err(DomainError::not_team_coach(request.team_id));
        }

        if request.status.is_terminal() {
            return Err(DomainError::not_pending(id, request.status));
        }

        Ok((request, coach))
    }

    /// Store a review outcome, failing with `NotPending` when a concurrent
    /// review already moved the request out of `PENDING`.
    async fn write_review<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        request: &JoinRequest,
    ) -> Result<JoinRequest, DomainError> {
        if let Some(updated) = self.repos.join_requests().update_review(conn, request).await? {
            return Ok(updated);
        }
        let current = self
            .repos
            .join_requests()
            .get(conn, request.id)
            .await?
            .ok_or_else(|| DomainError::join_request_not_found(request.id))?;
        tracing::warn!(
            request_id = request.id,
            status = %current.status,
            "Join request was reviewed concurrently"
        );
        Err(DomainError::not_pending(request.id, current.status))
    }

    async fn ensure_not_member<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i32,
        team_id: i32,
    ) -> Result<(), DomainError> {
        let existing = self
            .repos
            .memberships()
            .find_active_for_pair(conn, MemberSide::Player, player_id, team_id, None)
            .await?;
        if existing.is_some() {
            return Err(DomainError::already_member(player_id, team_id));
        }
        Ok(())
    }

    pub(super) async fn member_for_credential<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        credential_id: i32,
    ) -> Result<Member, DomainError> {
        self.repos
            .directory()
            .find_member_by_credential(conn, side, credential_id)
            .await?
            .ok_or_else(|| DomainError::profile_not_found(side, credential_id))
    }
}

/// Trim the comment and check its length. Blank comments are dropped.
fn normalize_review_comment(
    config: &ServiceConfig,
    comment: Option<String>,
) -> Result<Option<String>, DomainError> {
    let Some(comment) = comment else {
        return Ok(None);
    };
    let trimmed = comment.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let len = trimmed.chars().count();
    if len < config.min_review_comment_len {
        return Err(DomainError::validation(
            "reviewComment",
            format!("must be at least {} characters", config.min_review_comment_len),
        ));
    }
    if len > config.max_review_comment_len {
        return Err(DomainError::validation(
            "reviewComment",
            format!("must be at most {} characters", config.max_review_comment_len),
        ));
    }
    Ok(Some(trimmed.to_owned()))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn review_comment_is_trimmed() {
        let cfg = ServiceConfig::default();
        let out =
            normalize_review_comment(&cfg, Some("  not enough experience  ".to_owned())).unwrap();
        assert_eq!(out.as_deref(), Some("not enough experience"));
    }

    #[test]
    fn blank_review_comment_is_dropped() {
        let cfg = ServiceConfig::default();
        assert_eq!(normalize_review_comment(&cfg, None).unwrap(), None);
        assert_eq!(
            normalize_review_comment(&cfg, Some("   ".to_owned())).unwrap(),
            None
        );
    }

    #[test]
    fn review_comment_length_bounds() {
        let cfg = ServiceConfig::default();
        let too_short = normalize_review_comment(&cfg, Some(" abc ".to_owned()));
        assert!(matches!(too_short, Err(DomainError::Validation { .. })));

        let too_long = normalize_review_comment(&cfg, Some("x".repeat(501)));
        assert!(matches!(too_long, Err(DomainError::Validation { .. })));

        assert!(normalize_review_comment(&cfg, Some("x".repeat(500))).is_ok());
        assert!(normalize_review_comment(&cfg, Some("fine.".to_owned())).is_ok());
    }
}
