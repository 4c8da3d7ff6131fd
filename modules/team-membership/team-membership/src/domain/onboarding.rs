//! Onboarding status derivation.

use team_membership_sdk::OnboardingStatus;

/// Facts about a member that decide their onboarding status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OnboardingFacts {
    pub has_active_membership: bool,
    pub has_pending_request: bool,
}

/// Derive the onboarding status from membership facts.
///
/// An active membership wins over a pending request. `Registered` is never
/// produced here.
#[must_use]
pub fn derive(facts: OnboardingFacts) -> OnboardingStatus {
    if facts.has_active_membership {
        OnboardingStatus::Active
    } else if facts.has_pending_request {
        OnboardingStatus::TeamPending
    } else {
        OnboardingStatus::ProfileCreated
    }
}
