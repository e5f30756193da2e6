//! Capability traits consumed by the host sync framework.

use super::resource::{Annotations, Entitlement, Grant, Profile, Resource, ResourceId, ResourceType, SyncPage};
use crate::errors::DropboxResult;
use crate::pagination::PageToken;
use async_trait::async_trait;

/// Read side of one resource kind
#[async_trait]
pub trait ResourceSyncer: Send + Sync {
    /// Resource kind this syncer handles
    fn resource_type(&self) -> ResourceType;

    /// One page of resources; an empty token starts a new pass
    async fn list(
        &self,
        parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> DropboxResult<SyncPage<Resource>>;

    /// The fixed entitlements of a resource
    async fn entitlements(&self, resource: &Resource) -> DropboxResult<Vec<Entitlement>>;

    /// One page of grants on a resource
    async fn grants(&self, resource: &Resource, token: &PageToken) -> DropboxResult<SyncPage<Grant>>;

    /// Write side, if this kind supports grant and revoke
    fn provisioner(&self) -> Option<&dyn GrantProvisioner> {
        None
    }

    /// Account lifecycle, if this kind supports it
    fn account_manager(&self) -> Option<&dyn AccountManager> {
        None
    }
}

/// Grant and revoke of entitlements
#[async_trait]
pub trait GrantProvisioner: Send + Sync {
    /// Give a principal an entitlement
    async fn grant(&self, principal: &Resource, entitlement: &Entitlement) -> DropboxResult<Annotations>;

    /// Take an entitlement away from its holder
    async fn revoke(&self, grant: &Grant) -> DropboxResult<Annotations>;
}

/// Created account and the annotations of the call
#[derive(Debug, Clone)]
pub struct CreatedAccount {
    /// New user resource
    pub resource: Resource,
    /// Annotations
    pub annotations: Annotations,
}

/// Account provisioning and deprovisioning
#[async_trait]
pub trait AccountManager: Send + Sync {
    /// Provision an account from a profile
    async fn create_account(&self, profile: &Profile) -> DropboxResult<CreatedAccount>;

    /// Deprovision an account
    async fn delete(&self, id: &ResourceId) -> DropboxResult<Annotations>;
}
