use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use team_membership_sdk::JoinRequest;

use crate::domain::error::DomainError;
use crate::domain::repos::{JoinRequestsRepository, NewJoinRequestRow};
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::join_request::{
    ActiveModel as JoinRequestAM, Column, Entity as JoinRequestEntity, Status,
};

/// ORM-based implementation of the `JoinRequestsRepository` trait.
#[derive(Clone, Default)]
pub struct OrmJoinRequestsRepository;

impl OrmJoinRequestsRepository {
    async fn list_where<C: ConnectionTrait + Send + Sync>(
        conn: &C,
        cond: sea_orm::Condition,
    ) -> Result<Vec<JoinRequest>, DomainError> {
        let rows = JoinRequestEntity::find()
            .filter(cond)
            .order_by_desc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl JoinRequestsRepository for OrmJoinRequestsRepository {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<JoinRequest>, DomainError> {
        let found = JoinRequestEntity::find_by_id(id)
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<JoinRequest>, DomainError> {
        Self::list_where(conn, sea_orm::Condition::all()).await
    }

    async fn list_pending_by_player<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i32,
    ) -> Result<Vec<JoinRequest>, DomainError> {
        Self::list_where(
            conn,
            sea_orm::Condition::all()
                .add(Column::PlayerId.eq(player_id))
                .add(Column::Status.eq(Status::Pending)),
        )
        .await
    }

    async fn list_pending_by_team<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        team_id: i32,
    ) -> Result<Vec<JoinRequest>, DomainError> {
        Self::list_where(
            conn,
            sea_orm::Condition::all()
                .add(Column::TeamId.eq(team_id))
                .add(Column::Status.eq(Status::Pending)),
        )
        .await
    }

    async fn latest_for_pair<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i32,
        team_id: i32,
    ) -> Result<Option<JoinRequest>, DomainError> {
        let found = JoinRequestEntity::find()
            .filter(
                sea_orm::Condition::all()
                    .add(Column::PlayerId.eq(player_id))
                    .add(Column::TeamId.eq(team_id)),
            )
            .order_by_desc(Column::Id)
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn has_pending_for_player<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: i32,
    ) -> Result<bool, DomainError> {
        let count = JoinRequestEntity::find()
            .filter(
                sea_orm::Condition::all()
                    .add(Column::PlayerId.eq(player_id))
                    .add(Column::Status.eq(Status::Pending)),
            )
            .count(conn)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn insert<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        row: NewJoinRequestRow,
    ) -> Result<JoinRequest, DomainError> {
        let m = JoinRequestAM {
            player_id: Set(row.player_id),
            team_id: Set(row.team_id),
            coach_id: Set(None),
            status: Set(Status::Pending),
            review_comment: Set(None),
            created_at: Set(row.created_at),
            reviewed_at: Set(None),
            updated_at: Set(row.created_at),
            ..Default::default()
        };
        let model = m.insert(conn).await.map_err(db_err)?;
        Ok(model.into())
    }

    async fn update_review<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        request: &JoinRequest,
    ) -> Result<Option<JoinRequest>, DomainError> {
        let result = JoinRequestEntity::update_many()
            .col_expr(Column::CoachId, Expr::value(request.coach_id))
            .col_expr(Column::Status, Expr::value(Status::from(request.status)))
            .col_expr(
                Column::ReviewComment,
                Expr::value(request.review_comment.clone()),
            )
            .col_expr(Column::ReviewedAt, Expr::value(request.reviewed_at))
            .col_expr(Column::UpdatedAt, Expr::value(request.updated_at))
            .filter(Column::Id.eq(request.id))
            .filter(Column::Status.eq(Status::Pending))
            .exec(conn)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get(conn, request.id).await
    }

    async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<bool, DomainError> {
        let result = JoinRequestEntity::delete_many()
            .filter(Column::Id.eq(id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
