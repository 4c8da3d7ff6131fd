//! Persistence ports used by the domain service.
//!
//! All methods accept `conn: &C`, a generic connection (`DatabaseConnection`
//! or `DatabaseTransaction`), so one service operation can run every read and
//! write inside a single transaction.

mod credentials_repo;
mod directory_repo;
mod join_requests_repo;
mod memberships_repo;

pub use credentials_repo::{Credential, CredentialsRepository};
pub use directory_repo::{DirectoryRepository, Member, Team};
pub use join_requests_repo::{JoinRequestsRepository, NewJoinRequestRow};
pub use memberships_repo::{MembershipRow, MembershipsRepository};

/// Bundle of the repositories a `Service` works with.
pub trait Repositories: Send + Sync + 'static {
    type Credentials: CredentialsRepository;
    type Directory: DirectoryRepository;
    type JoinRequests: JoinRequestsRepository;
    type Memberships: MembershipsRepository;

    fn credentials(&self) -> &Self::Credentials;
    fn directory(&self) -> &Self::Directory;
    fn join_requests(&self) -> &Self::JoinRequests;
    fn memberships(&self) -> &Self::Memberships;
}
