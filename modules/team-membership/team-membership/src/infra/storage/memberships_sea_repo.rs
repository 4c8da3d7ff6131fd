use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, Unchanged,
};
use team_membership_sdk::{MemberSide, Membership};

use crate::domain::error::DomainError;
use crate::domain::repos::{MembershipRow, MembershipsRepository};
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::{coach_team, player_team};

/// ORM-based implementation of the `MembershipsRepository` trait over the
/// `player_teams` and `coach_teams` tables.
#[derive(Clone, Default)]
pub struct OrmMembershipsRepository;

fn player_active() -> Condition {
    Condition::all()
        .add(player_team::Column::Status.eq(true))
        .add(player_team::Column::ExitDate.is_null())
}

fn coach_active() -> Condition {
    Condition::all()
        .add(coach_team::Column::Status.eq(true))
        .add(coach_team::Column::EndDate.is_null())
}

impl OrmMembershipsRepository {
    async fn find_players<C: ConnectionTrait + Send + Sync>(
        conn: &C,
        cond: Condition,
    ) -> Result<Vec<Membership>, DomainError> {
        let rows = player_team::Entity::find()
            .filter(cond)
            .order_by_asc(player_team::Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_coaches<C: ConnectionTrait + Send + Sync>(
        conn: &C,
        cond: Condition,
    ) -> Result<Vec<Membership>, DomainError> {
        let rows = coach_team::Entity::find()
            .filter(cond)
            .order_by_asc(coach_team::Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl MembershipsRepository for OrmMembershipsRepository {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        id: i32,
        include_inactive: bool,
    ) -> Result<Option<Membership>, DomainError> {
        let found = match side {
            MemberSide::Player => {
                let mut cond = Condition::all().add(player_team::Column::Id.eq(id));
                if !include_inactive {
                    cond = cond.add(player_team::Column::Status.eq(true));
                }
                Self::find_players(conn, cond).await?
            }
            MemberSide::Coach => {
                let mut cond = Condition::all().add(coach_team::Column::Id.eq(id));
                if !include_inactive {
                    cond = cond.add(coach_team::Column::Status.eq(true));
                }
                Self::find_coaches(conn, cond).await?
            }
        };
        Ok(found.into_iter().next())
    }

    async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        include_inactive: bool,
    ) -> Result<Vec<Membership>, DomainError> {
        match side {
            MemberSide::Player => {
                let mut cond = Condition::all();
                if !include_inactive {
                    cond = cond.add(player_team::Column::Status.eq(true));
                }
                Self::find_players(conn, cond).await
            }
            MemberSide::Coach => {
                let mut cond = Condition::all();
                if !include_inactive {
                    cond = cond.add(coach_team::Column::Status.eq(true));
                }
                Self::find_coaches(conn, cond).await
            }
        }
    }

    async fn list_by_member<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        member_id: i32,
    ) -> Result<Vec<Membership>, DomainError> {
        match side {
            MemberSide::Player => {
                let cond = Condition::all()
                    .add(player_team::Column::PlayerId.eq(member_id))
                    .add(player_team::Column::Status.eq(true));
                Self::find_players(conn, cond).await
            }
            MemberSide::Coach => {
                let cond = Condition::all()
                    .add(coach_team::Column::CoachId.eq(member_id))
                    .add(coach_team::Column::Status.eq(true));
                Self::find_coaches(conn, cond).await
            }
        }
    }

    async fn find_active_for_pair<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        member_id: i32,
        team_id: i32,
        exclude_id: Option<i32>,
    ) -> Result<Option<Membership>, DomainError> {
        let found = match side {
            MemberSide::Player => {
                let mut cond = player_active()
                    .add(player_team::Column::PlayerId.eq(member_id))
                    .add(player_team::Column::TeamId.eq(team_id));
                if let Some(id) = exclude_id {
                    cond = cond.add(player_team::Column::Id.ne(id));
                }
                Self::find_players(conn, cond).await?
            }
            MemberSide::Coach => {
                let mut cond = coach_active()
                    .add(coach_team::Column::CoachId.eq(member_id))
                    .add(coach_team::Column::TeamId.eq(team_id));
                if let Some(id) = exclude_id {
                    cond = cond.add(coach_team::Column::Id.ne(id));
                }
                Self::find_coaches(conn, cond).await?
            }
        };
        Ok(found.into_iter().next())
    }

    async fn has_active_for_member<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        member_id: i32,
    ) -> Result<bool, DomainError> {
        let count = match side {
            MemberSide::Player => player_team::Entity::find()
                .filter(player_active().add(player_team::Column::PlayerId.eq(member_id)))
                .count(conn)
                .await
                .map_err(db_err)?,
            MemberSide::Coach => coach_team::Entity::find()
                .filter(coach_active().add(coach_team::Column::CoachId.eq(member_id)))
                .count(conn)
                .await
                .map_err(db_err)?,
        };
        Ok(count > 0)
    }

    async fn insert<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        row: MembershipRow,
    ) -> Result<Membership, DomainError> {
        let membership: Membership = match side {
            MemberSide::Player => player_team::ActiveModel {
                player_id: Set(row.member_id),
                team_id: Set(row.team_id),
                entry_date: Set(row.started_at),
                exit_date: Set(row.ended_at),
                status: Set(row.status),
                ..Default::default()
            }
            .insert(conn)
            .await
            .map_err(db_err)?
            .into(),
            MemberSide::Coach => coach_team::ActiveModel {
                coach_id: Set(row.member_id),
                team_id: Set(row.team_id),
                assignment_date: Set(row.started_at),
                end_date: Set(row.ended_at),
                status: Set(row.status),
                ..Default::default()
            }
            .insert(conn)
            .await
            .map_err(db_err)?
            .into(),
        };
        Ok(membership)
    }

    async fn update<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        id: i32,
        row: MembershipRow,
    ) -> Result<Membership, DomainError> {
        let membership: Membership = match side {
            MemberSide::Player => player_team::ActiveModel {
                id: Unchanged(id),
                player_id: Set(row.member_id),
                team_id: Set(row.team_id),
                entry_date: Set(row.started_at),
                exit_date: Set(row.ended_at),
                status: Set(row.status),
            }
            .update(conn)
            .await
            .map_err(db_err)?
            .into(),
            MemberSide::Coach => coach_team::ActiveModel {
                id: Unchanged(id),
                coach_id: Set(row.member_id),
                team_id: Set(row.team_id),
                assignment_date: Set(row.started_at),
                end_date: Set(row.ended_at),
                status: Set(row.status),
            }
            .update(conn)
            .await
            .map_err(db_err)?
            .into(),
        };
        Ok(membership)
    }

    async fn delete<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        id: i32,
    ) -> Result<bool, DomainError> {
        let rows_affected = match side {
            MemberSide::Player => {
                player_team::Entity::delete_by_id(id)
                    .exec(conn)
                    .await
                    .map_err(db_err)?
                    .rows_affected
            }
            MemberSide::Coach => {
                coach_team::Entity::delete_by_id(id)
                    .exec(conn)
                    .await
                    .map_err(db_err)?
                    .rows_affected
            }
        };
        Ok(rows_affected > 0)
    }
}
