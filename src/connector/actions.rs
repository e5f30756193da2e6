//! Account enable/disable custom actions.

use super::resource::Annotations;
use crate::errors::{DropboxResult, InvalidArgumentError};
use crate::services::members::MembersApi;
use crate::types::TeamMemberId;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt;
use tracing::{info, instrument, warn};

/// Custom actions exposed by the connector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Suspend a member
    DisableUser,
    /// Reactivate a suspended member
    EnableUser,
}

impl ActionKind {
    /// All actions
    pub const ALL: [ActionKind; 2] = [ActionKind::DisableUser, ActionKind::EnableUser];

    /// Action name used by the host
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::DisableUser => "disable_user",
            ActionKind::EnableUser => "enable_user",
        }
    }

    /// Look up an action by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Schema advertised to the host
    pub fn schema(&self) -> ActionSchema {
        let (display_name, description, verb, action_type) = match self {
            ActionKind::DisableUser => (
                "Disable User",
                "Disables a user's access to Dropbox Team (suspends the account)",
                "disable",
                ActionType::AccountDisable,
            ),
            ActionKind::EnableUser => (
                "Enable User",
                "Enables a user's access to Dropbox Team (unsuspends the account)",
                "enable",
                ActionType::AccountEnable,
            ),
        };

        ActionSchema {
            name: self.name(),
            display_name,
            description,
            arguments: vec![ActionField {
                name: "user_id",
                display_name: "User Team Member ID",
                description: format!("The team member ID of the user to {verb}"),
                field_type: FieldType::String,
                required: true,
            }],
            return_types: vec![ActionField {
                name: "success",
                display_name: "Success",
                description: format!("Whether the user was {verb}d successfully"),
                field_type: FieldType::Bool,
                required: false,
            }],
            action_type,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Host action category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Disables an account
    AccountDisable,
    /// Enables an account
    AccountEnable,
}

/// Argument or return value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// String value
    String,
    /// Boolean value
    Bool,
}

/// One argument or return field of an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionField {
    /// Field name
    pub name: &'static str,
    /// Display name
    pub display_name: &'static str,
    /// Description
    pub description: String,
    /// Value type
    pub field_type: FieldType,
    /// Whether the field is required
    pub required: bool,
}

/// Action descriptor advertised to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSchema {
    /// Action name
    pub name: &'static str,
    /// Display name
    pub display_name: &'static str,
    /// Description
    pub description: &'static str,
    /// Arguments
    pub arguments: Vec<ActionField>,
    /// Return fields
    pub return_types: Vec<ActionField>,
    /// Host action category
    pub action_type: ActionType,
}

/// Extract the `user_id` argument
pub fn extract_user_id(args: &Map<String, Value>, action: ActionKind) -> DropboxResult<TeamMemberId> {
    let invalid = |message: &str| {
        warn!(%action, "{}", message);
        InvalidArgumentError::Invalid {
            message: message.to_string(),
        }
    };

    match args.get("user_id") {
        None | Some(Value::Null) => Err(invalid("missing user_id").into()),
        Some(Value::String(id)) if id.is_empty() => Err(invalid("user_id cannot be empty").into()),
        Some(Value::String(id)) => Ok(TeamMemberId::new(id.as_str())),
        Some(_) => Err(invalid("invalid user_id format").into()),
    }
}

fn success() -> Value {
    json!({ "success": true })
}

/// Run an action against the members service
#[instrument(skip(members, args), fields(action = %action))]
pub async fn run_action(
    members: &dyn MembersApi,
    action: ActionKind,
    args: &Map<String, Value>,
) -> DropboxResult<(Value, Annotations)> {
    let team_member_id = extract_user_id(args, action)?;

    let outcome = match action {
        ActionKind::DisableUser => members.suspend(&team_member_id).await,
        ActionKind::EnableUser => members.unsuspend(&team_member_id).await,
    }
    .inspect_err(|e| warn!(%team_member_id, error = %e, "Action failed"))?;

    if outcome.was_noop() {
        info!(%team_member_id, "User already in requested state");
    } else {
        info!(%team_member_id, "Action applied");
    }

    Ok((success(), Annotations::rate_limited(outcome.rate_limit)))
}
