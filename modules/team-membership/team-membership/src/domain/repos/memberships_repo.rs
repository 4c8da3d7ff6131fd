use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use team_membership_sdk::{MemberSide, Membership};
use time::OffsetDateTime;

use crate::domain::error::DomainError;

/// Column values of a membership row, without its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipRow {
    pub member_id: i32,
    pub team_id: i32,
    pub started_at: OffsetDateTime,
    pub ended_at: Option<OffsetDateTime>,
    pub status: bool,
}

/// Repository trait for the player-team and coach-team ledgers.
///
/// Every method takes the `MemberSide` selecting the ledger.
#[async_trait]
pub trait MembershipsRepository: Send + Sync {
    /// Find by id. Soft-deleted records are skipped unless
    /// `include_inactive` is set.
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        id: i32,
        include_inactive: bool,
    ) -> Result<Option<Membership>, DomainError>;

    async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        include_inactive: bool,
    ) -> Result<Vec<Membership>, DomainError>;

    async fn list_by_member<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        member_id: i32,
    ) -> Result<Vec<Membership>, DomainError>;

    /// Active record for a member/team pair, ignoring `exclude_id`.
    async fn find_active_for_pair<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        member_id: i32,
        team_id: i32,
        exclude_id: Option<i32>,
    ) -> Result<Option<Membership>, DomainError>;

    /// Whether the member is active on at least one team.
    async fn has_active_for_member<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        member_id: i32,
    ) -> Result<bool, DomainError>;

    async fn insert<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        row: MembershipRow,
    ) -> Result<Membership, DomainError>;

    async fn update<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        id: i32,
        row: MembershipRow,
    ) -> Result<Membership, DomainError>;

    async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        id: i32,
    ) -> Result<bool, DomainError>;
}
