//! In-process adapter exposing the domain service through `TeamMembershipApi`.

use std::sync::Arc;

use async_trait::async_trait;
use team_membership_sdk::{
    Caller, JoinRequest, MemberSide, Membership, MembershipPatch, NewJoinRequest, NewMembership,
    OnboardingStatus, TeamMembershipApi, TeamMembershipError,
};

use crate::domain::service::Service;

pub struct LocalClient {
    service: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl TeamMembershipApi for LocalClient {
    async fn list_join_requests(&self) -> Result<Vec<JoinRequest>, TeamMembershipError> {
        self.service.list_join_requests().await.map_err(Into::into)
    }

    async fn get_join_request(&self, id: i32) -> Result<JoinRequest, TeamMembershipError> {
        self.service.get_join_request(id).await.map_err(Into::into)
    }

    async fn list_my_join_requests(
        &self,
        caller: &Caller,
    ) -> Result<Vec<JoinRequest>, TeamMembershipError> {
        self.service
            .list_my_join_requests(caller)
            .await
            .map_err(Into::into)
    }

    async fn list_pending_join_requests(
        &self,
        team_id: i32,
    ) -> Result<Vec<JoinRequest>, TeamMembershipError> {
        self.service
            .list_pending_join_requests(team_id)
            .await
            .map_err(Into::into)
    }

    async fn create_join_request(
        &self,
        caller: &Caller,
        new_request: NewJoinRequest,
    ) -> Result<JoinRequest, TeamMembershipError> {
        self.service
            .create_join_request(caller, new_request)
            .await
            .map_err(Into::into)
    }

    async fn approve_join_request(
        &self,
        caller: &Caller,
        id: i32,
    ) -> Result<JoinRequest, TeamMembershipError> {
        self.service
            .approve_join_request(caller, id)
            .await
            .map_err(Into::into)
    }

    async fn reject_join_request(
        &self,
        caller: &Caller,
        id: i32,
        review_comment: Option<String>,
    ) -> Result<JoinRequest, TeamMembershipError> {
        self.service
            .reject_join_request(caller, id, review_comment)
            .await
            .map_err(Into::into)
    }

    async fn cancel_join_request(
        &self,
        caller: &Caller,
        id: i32,
    ) -> Result<JoinRequest, TeamMembershipError> {
        self.service
            .cancel_join_request(caller, id)
            .await
            .map_err(Into::into)
    }

    async fn delete_join_request(&self, id: i32) -> Result<(), TeamMembershipError> {
        self.service.delete_join_request(id).await.map_err(Into::into)
    }

    async fn list_memberships(
        &self,
        side: MemberSide,
        include_inactive: bool,
    ) -> Result<Vec<Membership>, TeamMembershipError> {
        self.service
            .list_memberships(side, include_inactive)
            .await
            .map_err(Into::into)
    }

    async fn get_membership(
        &self,
        side: MemberSide,
        id: i32,
        include_inactive: bool,
    ) -> Result<Membership, TeamMembershipError> {
        self.service
            .get_membership(side, id, include_inactive)
            .await
            .map_err(Into::into)
    }

    async fn list_member_memberships(
        &self,
        side: MemberSide,
        member_id: i32,
    ) -> Result<Vec<Membership>, TeamMembershipError> {
        self.service
            .list_member_memberships(side, member_id)
            .await
            .map_err(Into::into)
    }

    async fn create_membership(
        &self,
        caller: &Caller,
        new_membership: NewMembership,
    ) -> Result<Membership, TeamMembershipError> {
        self.service
            .create_membership(caller, new_membership)
            .await
            .map_err(Into::into)
    }

    async fn update_membership(
        &self,
        side: MemberSide,
        id: i32,
        patch: MembershipPatch,
    ) -> Result<Membership, TeamMembershipError> {
        self.service
            .update_membership(side, id, patch)
            .await
            .map_err(Into::into)
    }

    async fn update_membership_status(
        &self,
        side: MemberSide,
        id: i32,
        status: bool,
    ) -> Result<Membership, TeamMembershipError> {
        self.service
            .update_membership_status(side, id, status)
            .await
            .map_err(Into::into)
    }

    async fn delete_membership(
        &self,
        side: MemberSide,
        id: i32,
    ) -> Result<(), TeamMembershipError> {
        self.service
            .delete_membership(side, id)
            .await
            .map_err(Into::into)
    }

    async fn recompute_onboarding(
        &self,
        side: MemberSide,
        member_id: i32,
    ) -> Result<OnboardingStatus, TeamMembershipError> {
        self.service
            .recompute_onboarding(side, member_id)
            .await
            .map_err(Into::into)
    }
}
