//! Field identifiers and violations used by the validation gate.

use serde::{Deserialize, Serialize};

use std::fmt;

/// A user-editable wizard field that takes part in validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    AgentName,
    CompanyName,
    Role,
    Industry,
    Voice,
    CallDirection,
    Language,
    Description,
    CompanyDescription,
    WelcomeMessage,
    ConversationFlow,
}

impl FieldId {
    /// Human-readable label used in messages.
    pub fn label(self) -> &'static str {
        match self {
            FieldId::AgentName => "Agent name",
            FieldId::CompanyName => "Company name",
            FieldId::Role => "Role",
            FieldId::Industry => "Industry",
            FieldId::Voice => "Voice",
            FieldId::CallDirection => "Call direction",
            FieldId::Language => "Language",
            FieldId::Description => "Description",
            FieldId::CompanyDescription => "Company description",
            FieldId::WelcomeMessage => "Welcome message",
            FieldId::ConversationFlow => "Conversation flow",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A failed requirement on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: FieldId,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: FieldId, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Standard "X is required" violation.
    pub fn required(field: FieldId) -> Self {
        Self::new(field, format!("{} is required", field.label()))
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_violation_message() {
        let v = FieldViolation::required(FieldId::CompanyDescription);
        assert_eq!(v.field, FieldId::CompanyDescription);
        assert_eq!(v.to_string(), "Company description is required");
    }

    #[test]
    fn test_field_id_serializes_snake_case() {
        let json = serde_json::to_string(&FieldId::CallDirection).unwrap();
        assert_eq!(json, "\"call_direction\"");
    }
}
