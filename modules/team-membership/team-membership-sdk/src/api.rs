//! `TeamMembershipApi` trait definition.
//!
//! Role gating (which roles may call which operation) is the job of the
//! transport layer. Methods that act on behalf of a player or coach take the
//! authenticated `Caller` and re-check ownership themselves.

use async_trait::async_trait;

use crate::errors::TeamMembershipError;
use crate::models::{
    Caller, JoinRequest, MemberSide, Membership, MembershipPatch, NewJoinRequest, NewMembership,
    OnboardingStatus,
};

/// Public API trait for the team membership module.
#[async_trait]
pub trait TeamMembershipApi: Send + Sync {
    /// List every join request, newest first.
    async fn list_join_requests(&self) -> Result<Vec<JoinRequest>, TeamMembershipError>;

    async fn get_join_request(&self, id: i32) -> Result<JoinRequest, TeamMembershipError>;

    /// Pending requests submitted by the calling player.
    async fn list_my_join_requests(
        &self,
        caller: &Caller,
    ) -> Result<Vec<JoinRequest>, TeamMembershipError>;

    /// Pending requests addressed to a team.
    async fn list_pending_join_requests(
        &self,
        team_id: i32,
    ) -> Result<Vec<JoinRequest>, TeamMembershipError>;

    /// Submit a request for the calling player to join a team.
    async fn create_join_request(
        &self,
        caller: &Caller,
        new_request: NewJoinRequest,
    ) -> Result<JoinRequest, TeamMembershipError>;

    /// Approve a pending request. The caller must coach the target team.
    async fn approve_join_request(
        &self,
        caller: &Caller,
        id: i32,
    ) -> Result<JoinRequest, TeamMembershipError>;

    /// Reject a pending request with an optional comment.
    async fn reject_join_request(
        &self,
        caller: &Caller,
        id: i32,
        review_comment: Option<String>,
    ) -> Result<JoinRequest, TeamMembershipError>;

    /// Withdraw the caller's own pending request.
    async fn cancel_join_request(
        &self,
        caller: &Caller,
        id: i32,
    ) -> Result<JoinRequest, TeamMembershipError>;

    /// Administrative hard delete.
    async fn delete_join_request(&self, id: i32) -> Result<(), TeamMembershipError>;

    /// List memberships of one side. Soft-deleted records are returned only
    /// when `include_inactive` is set.
    async fn list_memberships(
        &self,
        side: MemberSide,
        include_inactive: bool,
    ) -> Result<Vec<Membership>, TeamMembershipError>;

    async fn get_membership(
        &self,
        side: MemberSide,
        id: i32,
        include_inactive: bool,
    ) -> Result<Membership, TeamMembershipError>;

    /// Enabled memberships of one player or coach.
    async fn list_member_memberships(
        &self,
        side: MemberSide,
        member_id: i32,
    ) -> Result<Vec<Membership>, TeamMembershipError>;

    async fn create_membership(
        &self,
        caller: &Caller,
        new_membership: NewMembership,
    ) -> Result<Membership, TeamMembershipError>;

    async fn update_membership(
        &self,
        side: MemberSide,
        id: i32,
        patch: MembershipPatch,
    ) -> Result<Membership, TeamMembershipError>;

    /// Toggle the soft-delete flag.
    async fn update_membership_status(
        &self,
        side: MemberSide,
        id: i32,
        status: bool,
    ) -> Result<Membership, TeamMembershipError>;

    async fn delete_membership(&self, side: MemberSide, id: i32)
    -> Result<(), TeamMembershipError>;

    /// Re-derive and persist the onboarding status of a player or coach.
    async fn recompute_onboarding(
        &self,
        side: MemberSide,
        member_id: i32,
    ) -> Result<OnboardingStatus, TeamMembershipError>;
}
