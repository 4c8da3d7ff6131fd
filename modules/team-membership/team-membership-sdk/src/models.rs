//! Public models for the team membership module.
//!
//! These are transport-agnostic data structures shared by the module and its
//! consumers. Identifiers are positive database ids.

use std::fmt;

use time::OffsetDateTime;

/// Role carried by an authenticated credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Player,
    Coach,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Player => "PLAYER",
            Self::Coach => "COACH",
            Self::Admin => "ADMIN",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PLAYER" => Some(Self::Player),
            "COACH" => Some(Self::Coach),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Onboarding progress stored on a credential.
///
/// `Registered` is only ever written by account creation; the membership
/// module derives one of the three later stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnboardingStatus {
    Registered,
    ProfileCreated,
    TeamPending,
    Active,
}

impl OnboardingStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "REGISTERED",
            Self::ProfileCreated => "PROFILE_CREATED",
            Self::TeamPending => "TEAM_PENDING",
            Self::Active => "ACTIVE",
        }
    }
}

impl fmt::Display for OnboardingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinRequestStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl JoinRequestStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Approved, rejected and cancelled requests never change again.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for JoinRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated identity on whose behalf an operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub credential_id: i32,
    pub role: Role,
}

impl Caller {
    #[must_use]
    pub fn new(credential_id: i32, role: Role) -> Self {
        Self {
            credential_id,
            role,
        }
    }
}

/// A player's request to join a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    pub id: i32,
    pub player_id: i32,
    pub team_id: i32,
    /// Coach who reviewed the request, set on approval or rejection.
    pub coach_id: Option<i32>,
    pub status: JoinRequestStatus,
    pub review_comment: Option<String>,
    pub created_at: OffsetDateTime,
    pub reviewed_at: Option<OffsetDateTime>,
    pub updated_at: OffsetDateTime,
}

/// Data for submitting a join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewJoinRequest {
    pub team_id: i32,
}

/// Which ledger a membership belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberSide {
    Player,
    Coach,
}

impl MemberSide {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Coach => "coach",
        }
    }
}

impl fmt::Display for MemberSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time-bounded assignment of a player or coach to a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub id: i32,
    pub side: MemberSide,
    pub member_id: i32,
    pub team_id: i32,
    /// Entry date for players, assignment date for coaches.
    pub started_at: OffsetDateTime,
    /// Exit date for players, end date for coaches.
    pub ended_at: Option<OffsetDateTime>,
    /// Soft-delete flag.
    pub status: bool,
}

impl Membership {
    /// A membership counts as active while it is enabled and has no end date.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status && self.ended_at.is_none()
    }
}

/// Data for creating a membership.
///
/// `member_id` may be omitted by a coach assigning themselves to a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMembership {
    pub side: MemberSide,
    pub member_id: Option<i32>,
    pub team_id: i32,
    pub started_at: OffsetDateTime,
    pub ended_at: Option<OffsetDateTime>,
}

/// Partial update for a membership.
///
/// `ended_at: Some(None)` clears the end date.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[allow(clippy::option_option)]
pub struct MembershipPatch {
    pub member_id: Option<i32>,
    pub team_id: Option<i32>,
    pub started_at: Option<OffsetDateTime>,
    pub ended_at: Option<Option<OffsetDateTime>>,
}

impl MembershipPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.member_id.is_none()
            && self.team_id.is_none()
            && self.started_at.is_none()
            && self.ended_at.is_none()
    }
}
