//! Connector assembly: credential mode, services and syncers.

use super::actions::{run_action, ActionKind, ActionSchema};
use super::groups::GroupSyncer;
use super::resource::Annotations;
use super::roles::RoleSyncer;
use super::syncer::ResourceSyncer;
use super::users::UserSyncer;
use crate::auth::{
    ExternalTokenProvider, RefreshGrant, RefreshTokenProvider, TokenProvider, TokenSource,
};
use crate::client::DropboxClient;
use crate::config::DropboxConfig;
use crate::endpoints::EndpointTable;
use crate::errors::{ConfigurationError, DropboxResult, InvalidArgumentError};
use crate::services::{
    GroupsApi, GroupsService, MembersApi, MembersService, RolesApi, RolesService,
};
use crate::transport::{HttpTransport, ReqwestTransport};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, instrument};

/// Connector display name
pub const CONNECTOR_DISPLAY_NAME: &str = "Dropbox Business Connector";

/// Connector description
pub const CONNECTOR_DESCRIPTION: &str = "The Dropbox Business connector syncs users, groups, and roles with account provisioning and deprovisioning support.";

/// One field of the account-creation form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountCreationField {
    /// Field name
    pub name: &'static str,
    /// Display name
    pub display_name: &'static str,
    /// Description
    pub description: &'static str,
    /// Example value
    pub placeholder: &'static str,
    /// Whether the field is required
    pub required: bool,
    /// Position in the form
    pub order: u32,
}

/// Connector descriptor advertised to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorMetadata {
    /// Display name
    pub display_name: &'static str,
    /// Description
    pub description: &'static str,
    /// Account-creation form
    pub account_creation_schema: Vec<AccountCreationField>,
}

/// Dropbox team connector
pub struct DropboxConnector {
    members: Arc<dyn MembersApi>,
    groups: Arc<dyn GroupsApi>,
    roles: Arc<dyn RolesApi>,
}

impl std::fmt::Debug for DropboxConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropboxConnector").finish_non_exhaustive()
    }
}

impl DropboxConnector {
    /// Build a connector over the default reqwest transport.
    ///
    /// With a refresh token configured the token exchange happens here and
    /// any failure is fatal; otherwise `token_source` must be supplied.
    pub async fn new(
        config: DropboxConfig,
        token_source: Option<Arc<dyn TokenSource>>,
    ) -> DropboxResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(config.timeout)?);
        Self::with_transport(config, transport, token_source).await
    }

    /// Build a connector over a caller-supplied transport
    #[instrument(skip_all, fields(base_url = %config.base_url))]
    pub async fn with_transport(
        config: DropboxConfig,
        transport: Arc<dyn HttpTransport>,
        token_source: Option<Arc<dyn TokenSource>>,
    ) -> DropboxResult<Self> {
        config.validate()?;
        let endpoints = Arc::new(EndpointTable::new(&config.base_url));

        let tokens: Arc<dyn TokenProvider> = match (config.refresh_token(), token_source) {
            (Some(refresh_token), _) if config.uses_refresh_token() => {
                let app_secret = config
                    .app_secret()
                    .ok_or(ConfigurationError::MissingAppSecret)?;
                let grant = RefreshGrant {
                    token_url: endpoints.token_url(),
                    app_key: config.app_key(),
                    app_secret,
                    refresh_token,
                };
                info!("Using refresh-token credentials");
                Arc::new(RefreshTokenProvider::exchange(transport.as_ref(), grant).await?)
            }
            (_, Some(source)) => {
                info!("Using external token source");
                Arc::new(ExternalTokenProvider::new(source))
            }
            _ => return Err(ConfigurationError::MissingCredential.into()),
        };

        let client = DropboxClient::new(transport, tokens, endpoints);
        Ok(Self::from_client(client, &config))
    }

    /// Assemble services over an existing client
    pub fn from_client(client: DropboxClient, config: &DropboxConfig) -> Self {
        let idempotency = Arc::new(config.idempotency.clone());
        Self {
            members: Arc::new(MembersService::new(
                client.clone(),
                idempotency.clone(),
                config.page_limit(),
            )),
            groups: Arc::new(GroupsService::new(
                client.clone(),
                idempotency.clone(),
                config.page_limit(),
            )),
            roles: Arc::new(RolesService::new(client, idempotency)),
        }
    }

    /// Syncers for every resource kind: users, roles, groups
    pub fn resource_syncers(&self) -> Vec<Arc<dyn ResourceSyncer>> {
        vec![
            Arc::new(self.users()),
            Arc::new(self.roles()),
            Arc::new(self.groups()),
        ]
    }

    /// User syncer
    pub fn users(&self) -> UserSyncer {
        UserSyncer::new(self.members.clone())
    }

    /// Group syncer
    pub fn groups(&self) -> GroupSyncer {
        GroupSyncer::new(self.groups.clone())
    }

    /// Role syncer
    pub fn roles(&self) -> RoleSyncer {
        RoleSyncer::new(self.members.clone(), self.roles.clone())
    }

    /// Connector descriptor
    pub fn metadata(&self) -> ConnectorMetadata {
        ConnectorMetadata {
            display_name: CONNECTOR_DISPLAY_NAME,
            description: CONNECTOR_DESCRIPTION,
            account_creation_schema: vec![AccountCreationField {
                name: "email",
                display_name: "Email",
                description: "Email address for the user account. Dropbox will send an invitation to this address.",
                placeholder: "john@doe.com",
                required: true,
                order: 0,
            }],
        }
    }

    /// Credentials were checked at construction; nothing more to do
    pub async fn validate(&self) -> DropboxResult<Annotations> {
        Ok(Annotations::new())
    }

    /// Schemas of the custom actions
    pub fn action_schemas(&self) -> Vec<ActionSchema> {
        ActionKind::ALL.iter().map(ActionKind::schema).collect()
    }

    /// Invoke a custom action by name
    pub async fn invoke_action(
        &self,
        name: &str,
        args: &Map<String, Value>,
    ) -> DropboxResult<(Value, Annotations)> {
        let action = ActionKind::from_name(name).ok_or_else(|| InvalidArgumentError::Invalid {
            message: format!("unknown action '{}'", name),
        })?;
        run_action(self.members.as_ref(), action, args).await
    }
}
