//! Validation gate: per-field validators, touched-field tracking and the
//! bulk required-field check that guards leaving the builder page.

use std::collections::{BTreeMap, BTreeSet};

use callscript_types::draft::AgentDraft;
use callscript_types::validation::{FieldId, FieldViolation};

/// Fields that must be filled before leaving the builder page, in the order
/// their violations are reported.
pub const REQUIRED_FIELDS: [FieldId; 6] = [
    FieldId::Voice,
    FieldId::CallDirection,
    FieldId::Role,
    FieldId::AgentName,
    FieldId::CompanyName,
    FieldId::CompanyDescription,
];

/// Validate a single field value.
///
/// Only the agent name and company name enforce anything (non-empty);
/// every other field is accepted as typed.
pub fn validate_field(field: FieldId, value: &str) -> Option<String> {
    match field {
        FieldId::AgentName | FieldId::CompanyName if value.trim().is_empty() => {
            Some(format!("{} is required", field.label()))
        }
        _ => None,
    }
}

/// Whether a required field currently holds a value in `draft`.
fn is_present(draft: &AgentDraft, field: FieldId) -> bool {
    match field {
        FieldId::Voice => draft
            .voice
            .as_ref()
            .is_some_and(|v| !v.voice_id.trim().is_empty()),
        FieldId::CallDirection => draft.call_direction.is_some(),
        FieldId::Role => !draft.role.trim().is_empty(),
        FieldId::AgentName => !draft.agent_name.trim().is_empty(),
        FieldId::CompanyName => !draft.company_name.trim().is_empty(),
        FieldId::CompanyDescription => !draft.company_description.trim().is_empty(),
        _ => true,
    }
}

/// Every unmet requirement for leaving the builder page.
///
/// Reports all violations at once, never just the first.
pub fn required_field_violations(draft: &AgentDraft) -> Vec<FieldViolation> {
    REQUIRED_FIELDS
        .into_iter()
        .filter(|field| !is_present(draft, *field))
        .map(FieldViolation::required)
        .collect()
}

/// Touched-field set plus current error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationState {
    touched: BTreeSet<FieldId>,
    errors: BTreeMap<FieldId, String>,
}

impl ValidationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edit: touches the field and recomputes its error.
    pub fn record_change(&mut self, field: FieldId, value: &str) {
        self.touched.insert(field);
        self.recompute(field, value);
    }

    /// Recompute a field's error without touching it.
    pub fn recompute(&mut self, field: FieldId, value: &str) {
        match validate_field(field, value) {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    /// Bulk required-field check run when the user tries to leave the
    /// builder page. Force-touches every required field, records an error
    /// for each one that is missing, clears errors on the ones that are
    /// present, and returns every violation.
    pub fn check_required(&mut self, draft: &AgentDraft) -> Vec<FieldViolation> {
        let violations = required_field_violations(draft);

        for field in REQUIRED_FIELDS {
            self.touched.insert(field);
            match violations.iter().find(|v| v.field == field) {
                Some(violation) => {
                    self.errors.insert(field, violation.message.clone());
                }
                None => {
                    self.errors.remove(&field);
                }
            }
        }

        violations
    }

    /// Flow-page check: force-touches the conversation flow and records
    /// its error when empty. Returns whether the flow is present.
    pub fn check_conversation_flow(&mut self, draft: &AgentDraft) -> bool {
        let field = FieldId::ConversationFlow;
        self.touched.insert(field);
        if draft.conversation_flow.trim().is_empty() {
            self.errors.insert(field, FieldViolation::required(field).message);
            false
        } else {
            self.errors.remove(&field);
            true
        }
    }

    pub fn is_touched(&self, field: FieldId) -> bool {
        self.touched.contains(&field)
    }

    pub fn error(&self, field: FieldId) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Positive affordance (e.g. a checkmark): touched and error-free.
    pub fn shows_success(&self, field: FieldId) -> bool {
        self.is_touched(field) && !self.errors.contains_key(&field)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn reset(&mut self) {
        self.touched.clear();
        self.errors.clear();
    }
}
