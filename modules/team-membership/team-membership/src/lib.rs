//! Team Membership Module Implementation
//!
//! Join request workflow, the player/coach membership ledger and the
//! onboarding status derived from both. The public API is defined in
//! `team-membership-sdk` and re-exported here.

pub use team_membership_sdk::{
    Caller, JoinRequest, JoinRequestStatus, MemberSide, Membership, MembershipPatch,
    NewJoinRequest, NewMembership, OnboardingStatus, Role, TeamMembershipApi,
    TeamMembershipError,
};

pub mod local_client;
pub use local_client::LocalClient;

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
