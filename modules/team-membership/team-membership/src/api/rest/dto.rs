use serde::{Deserialize, Deserializer, Serialize};
use team_membership_sdk::{JoinRequest, MemberSide, Membership, MembershipPatch, NewMembership};
use time::OffsetDateTime;

use crate::domain::error::DomainError;

/// Reject non-positive identifiers before they reach the service.
pub fn positive_id(field: &str, id: i32) -> Result<i32, DomainError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(DomainError::validation(field, "must be a positive integer"))
    }
}

/// Distinguish an absent field from an explicit `null`.
#[allow(clippy::option_option)]
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// REST DTO for a join request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequestDto {
    pub id: i32,
    pub player_id: i32,
    pub team_id: i32,
    pub coach_id: Option<i32>,
    pub status: String,
    pub review_comment: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub reviewed_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<JoinRequest> for JoinRequestDto {
    fn from(r: JoinRequest) -> Self {
        Self {
            id: r.id,
            player_id: r.player_id,
            team_id: r.team_id,
            coach_id: r.coach_id,
            status: r.status.as_str().to_owned(),
            review_comment: r.review_comment,
            created_at: r.created_at,
            reviewed_at: r.reviewed_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJoinRequestReq {
    pub team_id: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectJoinRequestReq {
    #[serde(default)]
    pub review_comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusReq {
    pub status: bool,
}

/// REST DTO for a player-team record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTeamDto {
    pub id: i32,
    pub player_id: i32,
    pub team_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub entry_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub exit_date: Option<OffsetDateTime>,
    pub status: bool,
}

impl From<Membership> for PlayerTeamDto {
    fn from(m: Membership) -> Self {
        Self {
            id: m.id,
            player_id: m.member_id,
            team_id: m.team_id,
            entry_date: m.started_at,
            exit_date: m.ended_at,
            status: m.status,
        }
    }
}

/// REST DTO for a coach-team record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachTeamDto {
    pub id: i32,
    pub coach_id: i32,
    pub team_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub assignment_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
    pub status: bool,
}

impl From<Membership> for CoachTeamDto {
    fn from(m: Membership) -> Self {
        Self {
            id: m.id,
            coach_id: m.member_id,
            team_id: m.team_id,
            assignment_date: m.started_at,
            end_date: m.ended_at,
            status: m.status,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayerTeamReq {
    pub player_id: i32,
    pub team_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub entry_date: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub exit_date: Option<OffsetDateTime>,
}

impl TryFrom<CreatePlayerTeamReq> for NewMembership {
    type Error = DomainError;

    fn try_from(req: CreatePlayerTeamReq) -> Result<Self, Self::Error> {
        Ok(Self {
            side: MemberSide::Player,
            member_id: Some(positive_id("playerId", req.player_id)?),
            team_id: positive_id("teamId", req.team_id)?,
            started_at: req.entry_date,
            ended_at: req.exit_date,
        })
    }
}

/// `coachId` may be omitted by a coach assigning themselves.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCoachTeamReq {
    #[serde(default)]
    pub coach_id: Option<i32>,
    pub team_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub assignment_date: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
}

impl TryFrom<CreateCoachTeamReq> for NewMembership {
    type Error = DomainError;

    fn try_from(req: CreateCoachTeamReq) -> Result<Self, Self::Error> {
        Ok(Self {
            side: MemberSide::Coach,
            member_id: req
                .coach_id
                .map(|id| positive_id("coachId", id))
                .transpose()?,
            team_id: positive_id("teamId", req.team_id)?,
            started_at: req.assignment_date,
            ended_at: req.end_date,
        })
    }
}

/// Wrapper so that `Option<Option<OffsetDateTime>>` fields can use rfc3339.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(transparent)]
pub struct Rfc3339(#[serde(with = "time::serde::rfc3339")] pub OffsetDateTime);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::option_option)]
pub struct UpdatePlayerTeamReq {
    #[serde(default)]
    pub player_id: Option<i32>,
    #[serde(default)]
    pub team_id: Option<i32>,
    #[serde(default)]
    pub entry_date: Option<Rfc3339>,
    /// `null` clears the exit date.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub exit_date: Option<Option<Rfc3339>>,
}

impl TryFrom<UpdatePlayerTeamReq> for MembershipPatch {
    type Error = DomainError;

    fn try_from(req: UpdatePlayerTeamReq) -> Result<Self, Self::Error> {
        Ok(Self {
            member_id: req.player_id.map(|id| positive_id("playerId", id)).transpose()?,
            team_id: req.team_id.map(|id| positive_id("teamId", id)).transpose()?,
            started_at: req.entry_date.map(|d| d.0),
            ended_at: req.exit_date.map(|d| d.map(|d| d.0)),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::option_option)]
pub struct UpdateCoachTeamReq {
    #[serde(default)]
    pub coach_id: Option<i32>,
    #[serde(default)]
    pub team_id: Option<i32>,
    #[serde(default)]
    pub assignment_date: Option<Rfc3339>,
    /// `null` clears the end date.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub end_date: Option<Option<Rfc3339>>,
}

impl TryFrom<UpdateCoachTeamReq> for MembershipPatch {
    type Error = DomainError;

    fn try_from(req: UpdateCoachTeamReq) -> Result<Self, Self::Error> {
        Ok(Self {
            member_id: req.coach_id.map(|id| positive_id("coachId", id)).transpose()?,
            team_id: req.team_id.map(|id| positive_id("teamId", id)).transpose()?,
            started_at: req.assignment_date.map(|d| d.0),
            ended_at: req.end_date.map(|d| d.map(|d| d.0)),
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn exit_date_null_clears_but_absent_keeps() {
        let clear: UpdatePlayerTeamReq = serde_json::from_str(r#"{"exitDate":null}"#).unwrap();
        let patch = MembershipPatch::try_from(clear).unwrap();
        assert_eq!(patch.ended_at, Some(None));

        let keep: UpdatePlayerTeamReq = serde_json::from_str(r#"{"teamId":4}"#).unwrap();
        let patch = MembershipPatch::try_from(keep).unwrap();
        assert_eq!(patch.ended_at, None);
        assert_eq!(patch.team_id, Some(4));
    }

    #[test]
    fn coach_team_without_coach_id() {
        let req: CreateCoachTeamReq = serde_json::from_str(
            r#"{"teamId":2,"assignmentDate":"2025-02-01T10:00:00Z"}"#,
        )
        .unwrap();
        let new = NewMembership::try_from(req).unwrap();
        assert_eq!(new.side, MemberSide::Coach);
        assert_eq!(new.member_id, None);
        assert_eq!(new.ended_at, None);
    }

    #[test]
    fn non_positive_ids_are_rejected() {
        let req: CreatePlayerTeamReq = serde_json::from_str(
            r#"{"playerId":0,"teamId":2,"entryDate":"2025-02-01T10:00:00Z"}"#,
        )
        .unwrap();
        let err = NewMembership::try_from(req).unwrap_err();
        assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "playerId"));
    }
}
