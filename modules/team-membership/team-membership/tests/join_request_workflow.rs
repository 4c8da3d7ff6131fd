#![allow(clippy::unwrap_used, clippy::expect_used)]

mod support;

use support::{club, days_ago, onboarding_of, seed_player, seed_team};
use team_membership::domain::error::DomainError;
use team_membership::domain::repos::JoinRequestsRepository;
use team_membership::infra::storage::OrmJoinRequestsRepository;
use team_membership::{
    JoinRequestStatus, MemberSide, NewJoinRequest, NewMembership, OnboardingStatus,
};

#[tokio::test]
async fn create_then_approve_makes_player_active() {
    let c = club().await;
    let player = c.player.caller();

    let request = c
        .svc
        .create_join_request(&player, NewJoinRequest { team_id: c.team_id })
        .await
        .unwrap();
    assert_eq!(request.status, JoinRequestStatus::Pending);
    assert_eq!(request.player_id, c.player.profile_id);
    assert_eq!(request.coach_id, None);
    assert_eq!(
        onboarding_of(&c.db, c.player.credential_id).await,
        OnboardingStatus::TeamPending
    );

    let mine = c.svc.list_my_join_requests(&player).await.unwrap();
    assert_eq!(mine.len(), 1);
    let pending = c.svc.list_pending_join_requests(c.team_id).await.unwrap();
    assert_eq!(pending.len(), 1);

    let approved = c
        .svc
        .approve_join_request(&c.coach.caller(), request.id)
        .await
        .unwrap();
    assert_eq!(approved.status, JoinRequestStatus::Approved);
    assert_eq!(approved.coach_id, Some(c.coach.profile_id));
    assert!(approved.reviewed_at.is_some());

    let memberships = c
        .svc
        .list_member_memberships(MemberSide::Player, c.player.profile_id)
        .await
        .unwrap();
    assert_eq!(memberships.len(), 1);
    assert_eq!(memberships[0].team_id, c.team_id);
    assert!(memberships[0].is_active());

    assert_eq!(
        onboarding_of(&c.db, c.player.credential_id).await,
        OnboardingStatus::Active
    );
    assert!(c.svc.list_pending_join_requests(c.team_id).await.unwrap().is_empty());
    assert!(c.svc.list_my_join_requests(&player).await.unwrap().is_empty());
}

#[tokio::test]
async fn second_pending_request_for_same_team_is_a_conflict() {
    let c = club().await;
    let player = c.player.caller();
    let new = NewJoinRequest { team_id: c.team_id };

    c.svc.create_join_request(&player, new).await.unwrap();
    let err = c.svc.create_join_request(&player, new).await.unwrap_err();
    assert!(matches!(err, DomainError::DuplicatePendingRequest { .. }));
    assert_eq!(c.svc.list_join_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn member_cannot_request_the_same_team_again() {
    let c = club().await;
    let player = c.player.caller();
    let new = NewJoinRequest { team_id: c.team_id };

    let request = c.svc.create_join_request(&player, new).await.unwrap();
    c.svc
        .approve_join_request(&c.coach.caller(), request.id)
        .await
        .unwrap();

    let err = c.svc.create_join_request(&player, new).await.unwrap_err();
    assert!(matches!(err, DomainError::AlreadyMember { .. }));
}

#[tokio::test]
async fn unknown_team_and_missing_profile_are_not_found() {
    let c = club().await;

    let err = c
        .svc
        .create_join_request(&c.player.caller(), NewJoinRequest { team_id: 999 })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::TeamNotFound { id: 999 }));

    // A coach credential has no player profile.
    let err = c
        .svc
        .create_join_request(&c.coach.caller(), NewJoinRequest { team_id: c.team_id })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::ProfileNotFound {
            side: MemberSide::Player,
            ..
        }
    ));
}

#[tokio::test]
async fn coach_of_another_team_cannot_review() {
    let c = club().await;
    let other_team = seed_team(&c.db, "Águias").await;
    let outsider = support::seed_coach(&c.db, "outsider@club.test").await;
    support::assign_coach(&c.db, outsider.profile_id, other_team).await;

    let request = c
        .svc
        .create_join_request(&c.player.caller(), NewJoinRequest { team_id: c.team_id })
        .await
        .unwrap();

    let err = c
        .svc
        .approve_join_request(&outsider.caller(), request.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotTeamCoach { team_id } if team_id == c.team_id));

    let err = c
        .svc
        .reject_join_request(&outsider.caller(), request.id, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotTeamCoach { .. }));

    let unchanged = c.svc.get_join_request(request.id).await.unwrap();
    assert_eq!(unchanged.status, JoinRequestStatus::Pending);
}

#[tokio::test]
async fn reviewing_a_decided_request_reports_its_status() {
    let c = club().await;
    let request = c
        .svc
        .create_join_request(&c.player.caller(), NewJoinRequest { team_id: c.team_id })
        .await
        .unwrap();
    c.svc
        .approve_join_request(&c.coach.caller(), request.id)
        .await
        .unwrap();

    let err = c
        .svc
        .reject_join_request(&c.coach.caller(), request.id, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotPending {
            status: JoinRequestStatus::Approved,
            ..
        }
    ));
    assert!(err.to_string().contains("APPROVED"));

    let err = c
        .svc
        .cancel_join_request(&c.player.caller(), request.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotPending { .. }));
}

#[tokio::test]
async fn only_the_owner_can_cancel() {
    let c = club().await;
    let other = seed_player(&c.db, "other@club.test").await;
    let request = c
        .svc
        .create_join_request(&c.player.caller(), NewJoinRequest { team_id: c.team_id })
        .await
        .unwrap();

    let err = c
        .svc
        .cancel_join_request(&other.caller(), request.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotRequestOwner { .. }));

    let cancelled = c
        .svc
        .cancel_join_request(&c.player.caller(), request.id)
        .await
        .unwrap();
    assert_eq!(cancelled.status, JoinRequestStatus::Cancelled);
    assert!(cancelled.reviewed_at.is_some());
    assert_eq!(cancelled.coach_id, None);
    assert_eq!(
        onboarding_of(&c.db, c.player.credential_id).await,
        OnboardingStatus::ProfileCreated
    );
}

#[tokio::test]
async fn player_may_request_again_after_rejection() {
    let c = club().await;
    let player = c.player.caller();
    let new = NewJoinRequest { team_id: c.team_id };

    let first = c.svc.create_join_request(&player, new).await.unwrap();
    let rejected = c
        .svc
        .reject_join_request(
            &c.coach.caller(),
            first.id,
            Some("  Squad is full this season  ".to_owned()),
        )
        .await
        .unwrap();
    assert_eq!(rejected.status, JoinRequestStatus::Rejected);
    assert_eq!(
        rejected.review_comment.as_deref(),
        Some("Squad is full this season")
    );
    assert_eq!(
        onboarding_of(&c.db, c.player.credential_id).await,
        OnboardingStatus::ProfileCreated
    );

    let second = c.svc.create_join_request(&player, new).await.unwrap();
    assert_ne!(second.id, first.id);
    assert_eq!(second.status, JoinRequestStatus::Pending);

    // Newest first.
    let all = c.svc.list_join_requests().await.unwrap();
    assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![second.id, first.id]);
}

#[tokio::test]
async fn short_review_comment_is_rejected_before_any_write() {
    let c = club().await;
    let request = c
        .svc
        .create_join_request(&c.player.caller(), NewJoinRequest { team_id: c.team_id })
        .await
        .unwrap();

    let err = c
        .svc
        .reject_join_request(&c.coach.caller(), request.id, Some("no".to_owned()))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
    assert_eq!(
        c.svc.get_join_request(request.id).await.unwrap().status,
        JoinRequestStatus::Pending
    );

    let rejected = c
        .svc
        .reject_join_request(&c.coach.caller(), request.id, Some("   ".to_owned()))
        .await
        .unwrap();
    assert_eq!(rejected.review_comment, None);
}

#[tokio::test]
async fn deleting_a_pending_request_recomputes_onboarding() {
    let c = club().await;
    let request = c
        .svc
        .create_join_request(&c.player.caller(), NewJoinRequest { team_id: c.team_id })
        .await
        .unwrap();
    assert_eq!(
        onboarding_of(&c.db, c.player.credential_id).await,
        OnboardingStatus::TeamPending
    );

    c.svc.delete_join_request(request.id).await.unwrap();

    assert_eq!(
        onboarding_of(&c.db, c.player.credential_id).await,
        OnboardingStatus::ProfileCreated
    );
    let err = c.svc.get_join_request(request.id).await.unwrap_err();
    assert!(matches!(err, DomainError::JoinRequestNotFound { .. }));
    let err = c.svc.delete_join_request(request.id).await.unwrap_err();
    assert!(matches!(err, DomainError::JoinRequestNotFound { .. }));
}

#[tokio::test]
async fn pending_request_elsewhere_keeps_member_active() {
    let c = club().await;
    let second_team = seed_team(&c.db, "Falcões").await;
    let player = c.player.caller();

    let request = c
        .svc
        .create_join_request(&player, NewJoinRequest { team_id: c.team_id })
        .await
        .unwrap();
    c.svc
        .approve_join_request(&c.coach.caller(), request.id)
        .await
        .unwrap();

    c.svc
        .create_join_request(&player, NewJoinRequest { team_id: second_team })
        .await
        .unwrap();
    assert_eq!(
        onboarding_of(&c.db, c.player.credential_id).await,
        OnboardingStatus::Active
    );
}

#[tokio::test]
async fn approve_rechecks_membership_granted_meanwhile() {
    let c = club().await;
    let admin = support::seed_admin(&c.db, "admin@club.test").await;
    let request = c
        .svc
        .create_join_request(&c.player.caller(), NewJoinRequest { team_id: c.team_id })
        .await
        .unwrap();

    c.svc
        .create_membership(
            &admin,
            NewMembership {
                side: MemberSide::Player,
                member_id: Some(c.player.profile_id),
                team_id: c.team_id,
                started_at: days_ago(1),
                ended_at: None,
            },
        )
        .await
        .unwrap();

    let err = c
        .svc
        .approve_join_request(&c.coach.caller(), request.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::AlreadyMember { player_id, team_id }
            if player_id == c.player.profile_id && team_id == c.team_id
    ));

    let unchanged = c.svc.get_join_request(request.id).await.unwrap();
    assert_eq!(unchanged.status, JoinRequestStatus::Pending);
    assert_eq!(unchanged.coach_id, None);
    let memberships = c
        .svc
        .list_member_memberships(MemberSide::Player, c.player.profile_id)
        .await
        .unwrap();
    assert_eq!(memberships.len(), 1);
}

#[tokio::test]
async fn stale_review_write_leaves_decided_request_alone() {
    let c = club().await;
    let pending = c
        .svc
        .create_join_request(&c.player.caller(), NewJoinRequest { team_id: c.team_id })
        .await
        .unwrap();
    c.svc
        .approve_join_request(&c.coach.caller(), pending.id)
        .await
        .unwrap();

    // A reviewer that read the request while it was still pending.
    let mut stale = pending.clone();
    stale.status = JoinRequestStatus::Rejected;
    stale.coach_id = Some(c.coach.profile_id);
    stale.review_comment = Some("Squad is full".to_owned());

    let written = OrmJoinRequestsRepository
        .update_review(&c.db, &stale)
        .await
        .unwrap();
    assert!(written.is_none());

    let current = c.svc.get_join_request(pending.id).await.unwrap();
    assert_eq!(current.status, JoinRequestStatus::Approved);
    assert_eq!(current.review_comment, None);
}

#[tokio::test]
async fn comment_is_validated_after_authorization() {
    let c = club().await;
    let other_team = seed_team(&c.db, "Corujas").await;
    let outsider = support::seed_coach(&c.db, "outsider@club.test").await;
    support::assign_coach(&c.db, outsider.profile_id, other_team).await;

    let request = c
        .svc
        .create_join_request(&c.player.caller(), NewJoinRequest { team_id: c.team_id })
        .await
        .unwrap();

    let err = c
        .svc
        .reject_join_request(&outsider.caller(), request.id, Some("no".to_owned()))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotTeamCoach { .. }));

    let err = c
        .svc
        .reject_join_request(&c.coach.caller(), 999, Some("no".to_owned()))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::JoinRequestNotFound { id: 999 }));
}
