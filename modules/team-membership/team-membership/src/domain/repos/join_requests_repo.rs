use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use team_membership_sdk::JoinRequest;
use time::OffsetDateTime;

use crate::domain::error::DomainError;

/// Insert payload for a fresh pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewJoinRequestRow {
    pub player_id: i32,
    pub team_id: i32,
    pub created_at: OffsetDateTime,
}

/// Repository trait for join request persistence.
#[async_trait]
pub trait JoinRequestsRepository: Send + Sync {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<JoinRequest>, DomainError>;

    /// All requests, newest first.
    async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<JoinRequest>, DomainError>;

    async fn list_pending_by_player<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i32,
    ) -> Result<Vec<JoinRequest>, DomainError>;

    async fn list_pending_by_team<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        team_id: i32,
    ) -> Result<Vec<JoinRequest>, DomainError>;

    /// Most recent request (highest id) for a player/team pair.
    async fn latest_for_pair<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i32,
        team_id: i32,
    ) -> Result<Option<JoinRequest>, DomainError>;

    /// Whether the player has a pending request for any team.
    async fn has_pending_for_player<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i32,
    ) -> Result<bool, DomainError>;

    async fn insert<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        row: NewJoinRequestRow,
    ) -> Result<JoinRequest, DomainError>;

    /// Persist the review outcome: status, reviewer, comment and timestamps.
    ///
    /// The write only applies while the stored row is still `PENDING`;
    /// returns `None` when another review got there first.
    async fn update_review<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        request: &JoinRequest,
    ) -> Result<Option<JoinRequest>, DomainError>;

    async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<bool, DomainError>;
}
