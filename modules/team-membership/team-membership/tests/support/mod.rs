#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Test support utilities for `team-membership` integration tests.
//!
//! Provides an in-memory database with migrations applied and helpers that
//! seed the directory tables owned by other services (credentials, players,
//! coaches, teams).

#![allow(dead_code)] // Support module provides utilities that may not all be used

use std::sync::Arc;

use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, EntityTrait, Set};
use sea_orm_migration::MigratorTrait;
use time::{Duration, OffsetDateTime};

use team_membership::domain::service::{Service, ServiceConfig};
use team_membership::infra::storage::OrmRepositories;
use team_membership::infra::storage::entity::{coach, coach_team, credential, player, team};
use team_membership::infra::storage::migrations::Migrator;
use team_membership::{Caller, OnboardingStatus, Role};

/// Create a fresh in-memory `SQLite` database with migrations applied.
///
/// # Panics
/// Panics if the database connection or migrations fail.
pub async fn inmem_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn service(db: &DatabaseConnection) -> Arc<Service> {
    Arc::new(Service::new(
        db.clone(),
        OrmRepositories::new(),
        ServiceConfig::default(),
    ))
}

/// A seeded player or coach: credential id plus profile id.
#[derive(Debug, Clone, Copy)]
pub struct Seeded {
    pub credential_id: i32,
    pub profile_id: i32,
    pub role: Role,
}

impl Seeded {
    pub fn caller(&self) -> Caller {
        Caller::new(self.credential_id, self.role)
    }
}

pub fn days_ago(days: i64) -> OffsetDateTime {
    OffsetDateTime::now_utc() - Duration::days(days)
}

pub async fn seed_credential(
    db: &DatabaseConnection,
    email: &str,
    role: credential::Role,
    onboarding_status: credential::OnboardingStatus,
) -> i32 {
    let now = OffsetDateTime::now_utc();
    let model = credential::ActiveModel {
        email: Set(email.to_owned()),
        role: Set(role),
        onboarding_status: Set(onboarding_status),
        status: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert credential");
    model.id
}

pub async fn seed_player(db: &DatabaseConnection, email: &str) -> Seeded {
    let credential_id = seed_credential(
        db,
        email,
        credential::Role::Player,
        credential::OnboardingStatus::ProfileCreated,
    )
    .await;
    let model = player::ActiveModel {
        credential_id: Set(credential_id),
        first_name: Set("Ana".to_owned()),
        last_name: Set("Silva".to_owned()),
        status: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert player");
    Seeded {
        credential_id,
        profile_id: model.id,
        role: Role::Player,
    }
}

pub async fn seed_coach(db: &DatabaseConnection, email: &str) -> Seeded {
    let credential_id = seed_credential(
        db,
        email,
        credential::Role::Coach,
        credential::OnboardingStatus::ProfileCreated,
    )
    .await;
    let model = coach::ActiveModel {
        credential_id: Set(credential_id),
        first_name: Set("Rui".to_owned()),
        last_name: Set("Costa".to_owned()),
        status: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert coach");
    Seeded {
        credential_id,
        profile_id: model.id,
        role: Role::Coach,
    }
}

/// Admins have a credential but no player or coach profile.
pub async fn seed_admin(db: &DatabaseConnection, email: &str) -> Caller {
    let credential_id = seed_credential(
        db,
        email,
        credential::Role::Admin,
        credential::OnboardingStatus::Active,
    )
    .await;
    Caller::new(credential_id, Role::Admin)
}

pub async fn seed_team(db: &DatabaseConnection, name: &str) -> i32 {
    let model = team::ActiveModel {
        name: Set(name.to_owned()),
        category: Set("U17".to_owned()),
        status: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert team");
    model.id
}

/// Insert an active coach assignment directly, bypassing the service.
pub async fn assign_coach(db: &DatabaseConnection, coach_id: i32, team_id: i32) -> i32 {
    let model = coach_team::ActiveModel {
        coach_id: Set(coach_id),
        team_id: Set(team_id),
        assignment_date: Set(days_ago(30)),
        end_date: Set(None),
        status: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert coach_team");
    model.id
}

pub async fn onboarding_of(db: &DatabaseConnection, credential_id: i32) -> OnboardingStatus {
    credential::Entity::find_by_id(credential_id)
        .one(db)
        .await
        .expect("query credential")
        .expect("credential exists")
        .onboarding_status
        .into()
}

/// Overwrite a stored onboarding status, e.g. to simulate drift.
pub async fn set_onboarding(
    db: &DatabaseConnection,
    credential_id: i32,
    status: credential::OnboardingStatus,
) {
    let mut model: credential::ActiveModel = credential::Entity::find_by_id(credential_id)
        .one(db)
        .await
        .expect("query credential")
        .expect("credential exists")
        .into();
    model.onboarding_status = Set(status);
    model.update(db).await.expect("update credential");
}

/// A club with one team, its coach and one player.
pub struct Club {
    pub db: DatabaseConnection,
    pub svc: Arc<Service>,
    pub team_id: i32,
    pub coach: Seeded,
    pub player: Seeded,
}

pub async fn club() -> Club {
    let db = inmem_db().await;
    let team_id = seed_team(&db, "Leões").await;
    let coach = seed_coach(&db, "coach@club.test").await;
    let player = seed_player(&db, "player@club.test").await;
    assign_coach(&db, coach.profile_id, team_id).await;
    let svc = service(&db);
    Club {
        db,
        svc,
        team_id,
        coach,
        player,
    }
}
