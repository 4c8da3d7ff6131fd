//! Team membership SDK
//!
//! Public contract of the `team-membership` module: transport-agnostic models,
//! the error type and the `TeamMembershipApi` trait.

pub mod api;
pub mod errors;
pub mod models;

pub use api::TeamMembershipApi;
pub use errors::TeamMembershipError;
pub use models::{
    Caller, JoinRequest, JoinRequestStatus, MemberSide, Membership, MembershipPatch,
    NewJoinRequest, NewMembership, OnboardingStatus, Role,
};
