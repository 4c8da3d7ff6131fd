use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use team_membership_sdk::OnboardingStatus;
use time::OffsetDateTime;

use crate::domain::error::DomainError;
use crate::domain::repos::{Credential, CredentialsRepository};
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::credential::{
    self, Column, Entity as CredentialEntity,
};

/// ORM-based implementation of the `CredentialsRepository` trait.
#[derive(Clone, Default)]
pub struct OrmCredentialsRepository;

#[async_trait]
impl CredentialsRepository for OrmCredentialsRepository {
    async fn find<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Credential>, DomainError> {
        let found = CredentialEntity::find_by_id(id)
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn update_onboarding_status<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
        status: OnboardingStatus,
    ) -> Result<bool, DomainError> {
        let stored: credential::OnboardingStatus = status.into();
        let result = CredentialEntity::update_many()
            .col_expr(Column::OnboardingStatus, Expr::value(stored))
            .col_expr(Column::UpdatedAt, Expr::value(OffsetDateTime::now_utc()))
            .filter(Column::Id.eq(id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
