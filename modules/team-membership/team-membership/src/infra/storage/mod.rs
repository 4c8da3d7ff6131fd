//! Infrastructure storage layer - database persistence.
//!
//! This module contains ALL `SeaORM`-specific code:
//! - `entity/` - `SeaORM` entity definitions
//! - `mapper.rs` - conversions between `SeaORM` models and SDK/domain types
//! - `migrations/` - database schema migrations
//! - `*_sea_repo.rs` - repository trait implementations

pub mod db;
pub mod entity;
pub mod mapper;
pub mod migrations;

mod credentials_sea_repo;
mod directory_sea_repo;
mod join_requests_sea_repo;
mod memberships_sea_repo;

pub use credentials_sea_repo::OrmCredentialsRepository;
pub use directory_sea_repo::OrmDirectoryRepository;
pub use join_requests_sea_repo::OrmJoinRequestsRepository;
pub use memberships_sea_repo::OrmMembershipsRepository;

use crate::domain::repos::Repositories;

/// `SeaORM`-backed repository bundle.
#[derive(Clone, Default)]
pub struct OrmRepositories {
    credentials: OrmCredentialsRepository,
    directory: OrmDirectoryRepository,
    join_requests: OrmJoinRequestsRepository,
    memberships: OrmMembershipsRepository,
}

impl OrmRepositories {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repositories for OrmRepositories {
    type Credentials = OrmCredentialsRepository;
    type Directory = OrmDirectoryRepository;
    type JoinRequests = OrmJoinRequestsRepository;
    type Memberships = OrmMembershipsRepository;

    fn credentials(&self) -> &Self::Credentials {
        &self.credentials
    }

    fn directory(&self) -> &Self::Directory {
        &self.directory
    }

    fn join_requests(&self) -> &Self::JoinRequests {
        &self.join_requests
    }

    fn memberships(&self) -> &Self::Memberships {
        &self.memberships
    }
}
