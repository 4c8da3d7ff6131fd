//! Conversions between storage entities and SDK/domain models.

use team_membership_sdk::{
    JoinRequest, JoinRequestStatus, MemberSide, Membership, OnboardingStatus, Role,
};

use super::entity::{coach, coach_team, credential, join_request, player, player_team, team};
use crate::domain::repos::{Credential, Member, Team};

impl From<credential::Role> for Role {
    fn from(r: credential::Role) -> Self {
        match r {
            credential::Role::Player => Self::Player,
            credential::Role::Coach => Self::Coach,
            credential::Role::Admin => Self::Admin,
        }
    }
}

impl From<credential::OnboardingStatus> for OnboardingStatus {
    fn from(s: credential::OnboardingStatus) -> Self {
        match s {
            credential::OnboardingStatus::Registered => Self::Registered,
            credential::OnboardingStatus::ProfileCreated => Self::ProfileCreated,
            credential::OnboardingStatus::TeamPending => Self::TeamPending,
            credential::OnboardingStatus::Active => Self::Active,
        }
    }
}

impl From<OnboardingStatus> for credential::OnboardingStatus {
    fn from(s: OnboardingStatus) -> Self {
        match s {
            OnboardingStatus::Registered => Self::Registered,
            OnboardingStatus::ProfileCreated => Self::ProfileCreated,
            OnboardingStatus::TeamPending => Self::TeamPending,
            OnboardingStatus::Active => Self::Active,
        }
    }
}

impl From<join_request::Status> for JoinRequestStatus {
    fn from(s: join_request::Status) -> Self {
        match s {
            join_request::Status::Pending => Self::Pending,
            join_request::Status::Approved => Self::Approved,
            join_request::Status::Rejected => Self::Rejected,
            join_request::Status::Cancelled => Self::Cancelled,
        }
    }
}

impl From<JoinRequestStatus> for join_request::Status {
    fn from(s: JoinRequestStatus) -> Self {
        match s {
            JoinRequestStatus::Pending => Self::Pending,
            JoinRequestStatus::Approved => Self::Approved,
            JoinRequestStatus::Rejected => Self::Rejected,
            JoinRequestStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<credential::Model> for Credential {
    fn from(m: credential::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            role: m.role.into(),
            onboarding_status: m.onboarding_status.into(),
            status: m.status,
        }
    }
}

impl From<player::Model> for Member {
    fn from(m: player::Model) -> Self {
        Self {
            side: MemberSide::Player,
            id: m.id,
            credential_id: m.credential_id,
        }
    }
}

impl From<coach::Model> for Member {
    fn from(m: coach::Model) -> Self {
        Self {
            side: MemberSide::Coach,
            id: m.id,
            credential_id: m.credential_id,
        }
    }
}

impl From<team::Model> for Team {
    fn from(m: team::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            category: m.category,
            status: m.status,
        }
    }
}

impl From<join_request::Model> for JoinRequest {
    fn from(m: join_request::Model) -> Self {
        Self {
            id: m.id,
            player_id: m.player_id,
            team_id: m.team_id,
            coach_id: m.coach_id,
            status: m.status.into(),
            review_comment: m.review_comment,
            created_at: m.created_at,
            reviewed_at: m.reviewed_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<player_team::Model> for Membership {
    fn from(m: player_team::Model) -> Self {
        Self {
            id: m.id,
            side: MemberSide::Player,
            member_id: m.player_id,
            team_id: m.team_id,
            started_at: m.entry_date,
            ended_at: m.exit_date,
            status: m.status,
        }
    }
}

impl From<coach_team::Model> for Membership {
    fn from(m: coach_team::Model) -> Self {
        Self {
            id: m.id,
            side: MemberSide::Coach,
            member_id: m.coach_id,
            team_id: m.team_id,
            started_at: m.assignment_date,
            ended_at: m.end_date,
            status: m.status,
        }
    }
}
