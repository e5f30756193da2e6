//! Sync orchestration for the host framework.
//!
//! Turns the paginated listings and idempotent mutations of
//! [`crate::services`] into per-kind syncers: list resources, fixed
//! entitlements, grants, grant/revoke and account lifecycle. Upstream
//! "already in desired state" outcomes surface here as annotations.

pub mod actions;
pub mod dropbox_connector;
pub mod groups;
pub mod resource;
pub mod roles;
pub mod syncer;
pub mod users;

pub use actions::{ActionKind, ActionSchema};
pub use dropbox_connector::{ConnectorMetadata, DropboxConnector};
pub use groups::GroupSyncer;
pub use resource::{
    Annotation, Annotations, Entitlement, Grant, Profile, Resource, ResourceId, ResourceType,
    SyncPage, UserTrait,
};
pub use roles::RoleSyncer;
pub use syncer::{AccountManager, CreatedAccount, GrantProvisioner, ResourceSyncer};
pub use users::UserSyncer;
