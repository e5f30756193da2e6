//! Service implementations for the team administration endpoints.
//!
//! Each service module wraps one family of endpoints: request and response
//! payloads, a service trait, and the implementation over
//! [`crate::client::DropboxClient`].

pub mod groups;
pub mod members;
pub mod mutation;
pub mod roles;

pub use groups::{GroupMembersListing, GroupsApi, GroupsListing, GroupsService};
pub use members::{MembersApi, MembersListing, MembersService};
pub use mutation::{IdempotencyTags, MutationKind, MutationOutcome, MutationState};
pub use roles::{RolesApi, RolesService};
