use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use team_membership_sdk::MemberSide;

use crate::domain::error::DomainError;

/// Player or coach profile, reduced to what membership rules need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    pub side: MemberSide,
    pub id: i32,
    pub credential_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub status: bool,
}

/// Read-only lookups of players, coaches and teams.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    async fn find_member<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        id: i32,
    ) -> Result<Option<Member>, DomainError>;

    /// Resolve the profile attached to a credential (1:1).
    async fn find_member_by_credential<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        credential_id: i32,
    ) -> Result<Option<Member>, DomainError>;

    async fn find_team<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Team>, DomainError>;
}
