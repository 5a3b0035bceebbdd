//! Persistence payload construction.

use callscript_types::agent::{AgentConfiguration, AgentPayload, CallerContext};
use callscript_types::config::WizardConfig;
use callscript_types::draft::{AgentDraft, CallDirection};
use callscript_types::error::NavigationError;

use super::assembler::{PromptVariant, assemble_with_notes, notes_for};
use super::normalizer::normalize_extraction_fields;
use super::validation::required_field_violations;

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Build the create/update body from the draft.
///
/// Re-checks the required fields since the draft stays editable after the
/// builder page. The prompt is always the full variant.
///
/// Phone numbers depend on call direction: inbound sends the inbound
/// number, outbound sends the caller id (unless the region withholds it),
/// web sends neither. The company assignment is only forwarded for
/// privileged callers.
pub fn build_payload(
    draft: &AgentDraft,
    config: &WizardConfig,
    caller: &CallerContext,
) -> Result<AgentPayload, NavigationError> {
    let violations = required_field_violations(draft);
    let (Some(voice), Some(call_direction)) = (&draft.voice, draft.call_direction) else {
        return Err(NavigationError::RequiredFields(violations));
    };
    if !violations.is_empty() {
        return Err(NavigationError::RequiredFields(violations));
    }

    let assembled = assemble_with_notes(draft, PromptVariant::Full, notes_for(config));

    let region = draft
        .phone
        .region
        .as_deref()
        .and_then(non_empty)
        .unwrap_or_else(|| config.region.clone());

    let (inbound_phone_number, outbound_caller_id) = match call_direction {
        CallDirection::Inbound => (non_empty(&draft.phone.inbound_number), None),
        CallDirection::Outbound if config.omits_outbound_caller_id(&region) => (None, None),
        CallDirection::Outbound => (None, non_empty(&draft.phone.outbound_caller_id)),
        CallDirection::Web => (None, None),
    };

    let company_id = if caller.privileged {
        draft.company_id.as_deref().and_then(non_empty)
    } else {
        None
    };

    Ok(AgentPayload {
        name: draft.agent_name.trim().to_string(),
        voice_id: voice.voice_id.clone(),
        call_direction,
        prompt: assembled.text(),
        sections: assembled.section_map(),
        welcome_message: draft.welcome_message.trim().to_string(),
        configuration: AgentConfiguration {
            extraction_fields: normalize_extraction_fields(&draft.extraction_fields),
            custom_functions: draft.custom_functions.clone(),
        },
        region,
        inbound_phone_number,
        outbound_caller_id,
        company_id,
        schedule: (!draft.schedule.is_empty()).then(|| draft.schedule.clone()),
    })
}
