use sea_orm::ConnectionTrait;
use team_membership_sdk::{
    Caller, MemberSide, Membership, MembershipPatch, NewMembership, Role,
};
use time::OffsetDateTime;
use tracing::instrument;

use super::{Service, commit};
use crate::domain::error::DomainError;
use crate::domain::repos::{DirectoryRepository, MembershipRow, MembershipsRepository, Repositories};

/// Wire names of the member and date fields of each ledger.
struct FieldNames {
    member: &'static str,
    start: &'static str,
    end: &'static str,
}

fn field_names(side: MemberSide) -> FieldNames {
    match side {
        MemberSide::Player => FieldNames {
            member: "playerId",
            start: "entryDate",
            end: "exitDate",
        },
        MemberSide::Coach => FieldNames {
            member: "coachId",
            start: "assignmentDate",
            end: "endDate",
        },
    }
}

/// Start must not lie in the future; an end date must not lie in the future
/// and must be strictly after the start.
fn validate_dates(
    side: MemberSide,
    started_at: OffsetDateTime,
    ended_at: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    let names = field_names(side);
    if started_at > now {
        return Err(DomainError::validation(
            names.start,
            "must not be in the future",
        ));
    }
    if let Some(ended_at) = ended_at {
        if ended_at > now {
            return Err(DomainError::validation(names.end, "must not be in the future"));
        }
        if ended_at <= started_at {
            return Err(DomainError::validation(
                names.end,
                format!("must be after {}", names.start),
            ));
        }
    }
    Ok(())
}

fn is_active(row: &MembershipRow) -> bool {
    row.status && row.ended_at.is_none()
}

impl<R: Repositories> Service<R> {
    pub async fn list_memberships(
        &self,
        side: MemberSide,
        include_inactive: bool,
    ) -> Result<Vec<Membership>, DomainError> {
        tracing::debug!(%side, include_inactive, "Listing memberships");
        self.repos
            .memberships()
            .list(&self.db, side, include_inactive)
            .await
    }

    pub async fn get_membership(
        &self,
        side: MemberSide,
        id: i32,
        include_inactive: bool,
    ) -> Result<Membership, DomainError> {
        self.repos
            .memberships()
            .get(&self.db, side, id, include_inactive)
            .await?
            .ok_or_else(|| DomainError::membership_not_found(side, id))
    }

    pub async fn list_member_memberships(
        &self,
        side: MemberSide,
        member_id: i32,
    ) -> Result<Vec<Membership>, DomainError> {
        self.repos
            .memberships()
            .list_by_member(&self.db, side, member_id)
            .await
    }

    #[instrument(skip(self, caller, new_membership), fields(side = %new_membership.side))]
    pub async fn create_membership(
        &self,
        caller: &Caller,
        new_membership: NewMembership,
    ) -> Result<Membership, DomainError> {
        let NewMembership {
            side,
            member_id,
            team_id,
            started_at,
            ended_at,
        } = new_membership;

        validate_dates(side, started_at, ended_at, OffsetDateTime::now_utc())?;

        let txn = self.begin().await?;

        let member_id = match (member_id, side, caller.role) {
            (Some(id), _, _) => id,
            // A coach may assign themselves without naming their profile id.
            (None, MemberSide::Coach, Role::Coach) => {
                self.member_for_credential(&txn, MemberSide::Coach, caller.credential_id)
                    .await?
                    .id
            }
            (None, _, _) => {
                return Err(DomainError::validation(
                    field_names(side).member,
                    "is required",
                ));
            }
        };

        self.ensure_member_exists(&txn, side, member_id).await?;
        self.ensure_team_exists(&txn, team_id).await?;

        let row = MembershipRow {
            member_id,
            team_id,
            started_at,
            ended_at,
            status: true,
        };
        if is_active(&row) {
            self.ensure_no_active_duplicate(&txn, side, member_id, team_id, None)
                .await?;
        }

        let membership = self.repos.memberships().insert(&txn, side, row).await?;

        self.recompute(&txn, side, member_id).await?;
        commit(txn).await?;

        tracing::info!(
            membership_id = membership.id,
            member_id,
            team_id,
            "Membership created"
        );
        Ok(membership)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_membership(
        &self,
        side: MemberSide,
        id: i32,
        patch: MembershipPatch,
    ) -> Result<Membership, DomainError> {
        let txn = self.begin().await?;

        let existing = self
            .repos
            .memberships()
            .get(&txn, side, id, false)
            .await?
            .ok_or_else(|| DomainError::membership_not_found(side, id))?;
        if patch.is_empty() {
            return Ok(existing);
        }

        let row = MembershipRow {
            member_id: patch.member_id.unwrap_or(existing.member_id),
            team_id: patch.team_id.unwrap_or(existing.team_id),
            started_at: patch.started_at.unwrap_or(existing.started_at),
            ended_at: patch.ended_at.unwrap_or(existing.ended_at),
            status: existing.status,
        };

        validate_dates(side, row.started_at, row.ended_at, OffsetDateTime::now_utc())?;

        let member_changed = row.member_id != existing.member_id;
        if member_changed {
            self.ensure_member_exists(&txn, side, row.member_id).await?;
        }
        if row.team_id != existing.team_id {
            self.ensure_team_exists(&txn, row.team_id).await?;
        }
        if is_active(&row) {
            self.ensure_no_active_duplicate(&txn, side, row.member_id, row.team_id, Some(id))
                .await?;
        }

        let membership = self.repos.memberships().update(&txn, side, id, row).await?;

        self.recompute(&txn, side, row.member_id).await?;
        if member_changed {
            self.recompute(&txn, side, existing.member_id).await?;
        }
        commit(txn).await?;

        tracing::info!(membership_id = id, "Membership updated");
        Ok(membership)
    }

    #[instrument(skip(self))]
    pub async fn update_membership_status(
        &self,
        side: MemberSide,
        id: i32,
        status: bool,
    ) -> Result<Membership, DomainError> {
        let txn = self.begin().await?;

        let existing = self
            .repos
            .memberships()
            .get(&txn, side, id, true)
            .await?
            .ok_or_else(|| DomainError::membership_not_found(side, id))?;

        let row = MembershipRow {
            member_id: existing.member_id,
            team_id: existing.team_id,
            started_at: existing.started_at,
            ended_at: existing.ended_at,
            status,
        };
        if is_active(&row) && !existing.is_active() {
            self.ensure_no_active_duplicate(&txn, side, row.member_id, row.team_id, Some(id))
                .await?;
        }

        let membership = self.repos.memberships().update(&txn, side, id, row).await?;

        self.recompute(&txn, side, row.member_id).await?;
        commit(txn).await?;

        tracing::info!(membership_id = id, status, "Membership status changed");
        Ok(membership)
    }

    #[instrument(skip(self))]
    pub async fn delete_membership(&self, side: MemberSide, id: i32) -> Result<(), DomainError> {
        let txn = self.begin().await?;

        let existing = self
            .repos
            .memberships()
            .get(&txn, side, id, true)
            .await?
            .ok_or_else(|| DomainError::membership_not_found(side, id))?;

        if !self.repos.memberships().delete(&txn, side, id).await? {
            return Err(DomainError::membership_not_found(side, id));
        }

        self.recompute(&txn, side, existing.member_id).await?;
        commit(txn).await?;

        tracing::info!(membership_id = id, "Membership deleted");
        Ok(())
    }

    async fn ensure_member_exists<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        member_id: i32,
    ) -> Result<(), DomainError> {
        self.repos
            .directory()
            .find_member(conn, side, member_id)
            .await?
            .ok_or_else(|| DomainError::member_not_found(side, member_id))?;
        Ok(())
    }

    async fn ensure_team_exists<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        team_id: i32,
    ) -> Result<(), DomainError> {
        self.repos
            .directory()
            .find_team(conn, team_id)
            .await?
            .ok_or_else(|| DomainError::team_not_found(team_id))?;
        Ok(())
    }

    async fn ensure_no_active_duplicate<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        side: MemberSide,
        member_id: i32,
        team_id: i32,
        exclude_id: Option<i32>,
    ) -> Result<(), DomainError> {
        let existing = self
            .repos
            .memberships()
            .find_active_for_pair(conn, side, member_id, team_id, exclude_id)
            .await?;
        if existing.is_some() {
            return Err(DomainError::duplicate_membership(side, member_id, team_id));
        }
        Ok(())
    }
}
