//! Domain layer: business rules for join requests, memberships and
//! onboarding status.
//!
//! The domain layer depends on the SDK contract types and on the repository
//! traits in [`repos`]. It never imports `api::*`.

pub mod error;
pub mod onboarding;
pub mod repos;
pub mod service;
