#![allow(clippy::unwrap_used, clippy::expect_used)]

mod support;

use support::{club, onboarding_of, set_onboarding};
use team_membership::domain::error::DomainError;
use team_membership::infra::storage::entity::credential;
use team_membership::{MemberSide, NewJoinRequest, OnboardingStatus};

#[tokio::test]
async fn recompute_repairs_drifted_status() {
    let c = club().await;
    set_onboarding(&c.db, c.player.credential_id, credential::OnboardingStatus::Active).await;

    let status = c
        .svc
        .recompute_onboarding(MemberSide::Player, c.player.profile_id)
        .await
        .unwrap();
    assert_eq!(status, OnboardingStatus::ProfileCreated);
    assert_eq!(onboarding_of(&c.db, c.player.credential_id).await, status);
}

#[tokio::test]
async fn recompute_is_idempotent() {
    let c = club().await;
    c.svc
        .create_join_request(&c.player.caller(), NewJoinRequest { team_id: c.team_id })
        .await
        .unwrap();

    for _ in 0..3 {
        let status = c
            .svc
            .recompute_onboarding(MemberSide::Player, c.player.profile_id)
            .await
            .unwrap();
        assert_eq!(status, OnboardingStatus::TeamPending);
    }
    assert_eq!(
        onboarding_of(&c.db, c.player.credential_id).await,
        OnboardingStatus::TeamPending
    );
}

#[tokio::test]
async fn registered_is_never_derived() {
    let c = club().await;
    set_onboarding(
        &c.db,
        c.coach.credential_id,
        credential::OnboardingStatus::Registered,
    )
    .await;

    // The seeded coach already holds an active assignment.
    let status = c
        .svc
        .recompute_onboarding(MemberSide::Coach, c.coach.profile_id)
        .await
        .unwrap();
    assert_eq!(status, OnboardingStatus::Active);
}

#[tokio::test]
async fn unknown_member_is_not_found() {
    let c = club().await;
    let err = c
        .svc
        .recompute_onboarding(MemberSide::Coach, 777)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::MemberNotFound {
            side: MemberSide::Coach,
            id: 777
        }
    ));
}
