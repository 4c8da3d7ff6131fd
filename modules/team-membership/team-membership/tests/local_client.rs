#![allow(clippy::unwrap_used, clippy::expect_used)]

mod support;

use std::sync::Arc;

use support::club;
use team_membership::{
    JoinRequestStatus, LocalClient, MemberSide, NewJoinRequest, OnboardingStatus,
    TeamMembershipApi, TeamMembershipError,
};
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn client_maps_domain_errors_to_sdk_errors() {
    let c = club().await;
    let client: Arc<dyn TeamMembershipApi> = Arc::new(LocalClient::new(c.svc.clone()));

    let err = assert_err!(client.get_join_request(91).await);
    assert!(matches!(err, TeamMembershipError::NotFound { .. }));

    let request = assert_ok!(
        client
            .create_join_request(&c.player.caller(), NewJoinRequest { team_id: c.team_id })
            .await
    );
    let err = assert_err!(
        client
            .create_join_request(&c.player.caller(), NewJoinRequest { team_id: c.team_id })
            .await
    );
    assert!(matches!(err, TeamMembershipError::Conflict { .. }));

    // Players cannot review.
    let err = assert_err!(client.approve_join_request(&c.player.caller(), request.id).await);
    assert!(matches!(err, TeamMembershipError::NotFound { .. }));

    let approved = assert_ok!(client.approve_join_request(&c.coach.caller(), request.id).await);
    assert_eq!(approved.status, JoinRequestStatus::Approved);

    let err = assert_err!(client.cancel_join_request(&c.player.caller(), request.id).await);
    assert!(matches!(err, TeamMembershipError::BadRequest { .. }));

    let status = assert_ok!(
        client
            .recompute_onboarding(MemberSide::Player, c.player.profile_id)
            .await
    );
    assert_eq!(status, OnboardingStatus::Active);
}
