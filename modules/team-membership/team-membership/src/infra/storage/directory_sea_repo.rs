use async_trait::async_trait;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use team_membership_sdk::MemberSide;

use crate::domain::error::DomainError;
use crate::domain::repos::{DirectoryRepository, Member, Team};
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::{coach, player, team};

/// ORM-based lookups over the `players`, `coaches` and `teams` tables.
#[derive(Clone, Default)]
pub struct OrmDirectoryRepository;

#[async_trait]
impl DirectoryRepository for OrmDirectoryRepository {
    async fn find_member<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        id: i32,
    ) -> Result<Option<Member>, DomainError> {
        let found = match side {
            MemberSide::Player => player::Entity::find_by_id(id)
                .one(conn)
                .await
                .map_err(db_err)?
                .map(Member::from),
            MemberSide::Coach => coach::Entity::find_by_id(id)
                .one(conn)
                .await
                .map_err(db_err)?
                .map(Member::from),
        };
        Ok(found)
    }

    async fn find_member_by_credential<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        credential_id: i32,
    ) -> Result<Option<Member>, DomainError> {
        let found = match side {
            MemberSide::Player => player::Entity::find()
                .filter(player::Column::CredentialId.eq(credential_id))
                .one(conn)
                .await
                .map_err(db_err)?
                .map(Member::from),
            MemberSide::Coach => coach::Entity::find()
                .filter(coach::Column::CredentialId.eq(credential_id))
                .one(conn)
                .await
                .map_err(db_err)?
                .map(Member::from),
        };
        Ok(found)
    }

    async fn find_team<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Team>, DomainError> {
        let found = team::Entity::find_by_id(id)
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }
}
