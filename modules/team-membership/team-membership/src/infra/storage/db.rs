//! Database error conversion helpers.

use sea_orm::{DbErr, SqlErr};

use crate::domain::error::DomainError;

/// Convert a `SeaORM` error into a `DomainError`.
///
/// Unique-index violations map to `DomainError::UniqueViolation`.
#[allow(clippy::needless_pass_by_value)]
pub fn db_err(e: DbErr) -> DomainError {
    if let Some(SqlErr::UniqueConstraintViolation(message)) = e.sql_err() {
        return DomainError::unique_violation(message);
    }
    DomainError::database(e.to_string())
}
