use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::draft::{CallDirection, CustomFunction, ScheduleConfig};

/// Unique identifier for a persisted agent, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub Uuid);

impl AgentId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AgentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// An extraction field as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedExtractionField {
    /// Storage key: lowercase, `[a-z0-9_]` only.
    pub name: String,
    /// Trimmed original name, used for prompt display.
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

/// Nested configuration block of the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentConfiguration {
    pub extraction_fields: Vec<NormalizedExtractionField>,
    pub custom_functions: Vec<CustomFunction>,
}

/// Create/update body sent to the persistence API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPayload {
    pub name: String,
    pub voice_id: String,
    pub call_direction: CallDirection,
    /// Fully assembled prompt (full variant, compliance included).
    pub prompt: String,
    /// Section key -> body for every emitted section.
    pub sections: BTreeMap<String, String>,
    pub welcome_message: String,
    pub configuration: AgentConfiguration,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbound_phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbound_caller_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleConfig>,
}

/// A persisted agent as returned by the persistence API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: AgentId,
    #[serde(flatten)]
    pub payload: AgentPayload,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Who is driving the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerContext {
    /// `None` when no one is signed in.
    pub user_id: Option<String>,
    /// Privileged callers may assign the agent to a company.
    #[serde(default)]
    pub privileged: bool,
}

impl CallerContext {
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            privileged: false,
        }
    }

    pub fn admin(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            privileged: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.as_deref().is_some_and(|id| !id.trim().is_empty())
    }
}
