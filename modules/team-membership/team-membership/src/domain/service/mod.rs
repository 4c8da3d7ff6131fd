//! Domain service layer - business logic and rules.
//!
//! Per-resource submodules:
//! - `join_requests` - join request workflow (create, approve, reject, cancel, delete)
//! - `memberships` - player-team and coach-team ledger
//! - `onboarding` - onboarding status recompute, called after every mutation
//!
//! Every mutating operation opens one transaction, performs its checks and
//! writes, recomputes onboarding status and commits. Any error drops the
//! transaction, which rolls back.

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::domain::error::DomainError;
use crate::domain::repos::Repositories;
use crate::infra::storage::db::db_err;
use crate::infra::storage::OrmRepositories;

mod join_requests;
mod memberships;
mod onboarding;

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub min_review_comment_len: usize,
    pub max_review_comment_len: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            min_review_comment_len: 5,
            max_review_comment_len: 500,
        }
    }
}

pub struct Service<R: Repositories = OrmRepositories> {
    db: DatabaseConnection,
    repos: R,
    config: ServiceConfig,
}

impl<R: Repositories> Service<R> {
    pub fn new(db: DatabaseConnection, repos: R, config: ServiceConfig) -> Self {
        Self { db, repos, config }
    }

    async fn begin(&self) -> Result<DatabaseTransaction, DomainError> {
        self.db.begin().await.map_err(db_err)
    }
}

async fn commit(txn: DatabaseTransaction) -> Result<(), DomainError> {
    txn.commit().await.map_err(db_err)
}
