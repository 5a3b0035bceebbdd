//! Prompt decomposer -- the best-effort reverse transform from edited prompt
//! text back into `AgentDraft` fields.
//!
//! Two editable texts are supported:
//! - the combined Q&A-review + conversation-flow text, whose flow is
//!   everything after the conversation-flow marker
//! - the agent-prompt text (identity + company information), scanned line
//!   by line for known prefixes
//!
//! Parsing never fails. Lines that match nothing are ignored and fields that
//! are not found are left untouched.

use callscript_types::agent::AgentRecord;
use callscript_types::draft::{
    AgentDraft, DynamicVariable, ExtractionField, Faq, GeneratedSections, PhoneSettings, QaAnswer,
    VoiceSelection,
};
use callscript_types::prompt::SectionKind;

/// Marker line separating the Q&A review from the conversation flow.
pub const FLOW_MARKER: &str = "### CONVERSATION FLOW";

const AGENT_NAME_PREFIX: &str = "Agent Name:";
const COMPANY_PREFIX: &str = "Company:";
const ROLE_PREFIX: &str = "Role:";
const INDUSTRY_PREFIX: &str = "Industry:";
const LANGUAGE_PREFIX: &str = "Always respond in ";

// ---------------------------------------------------------------------------
// Q&A review + flow
// ---------------------------------------------------------------------------

/// Conversation flow carried by an edited Q&A-review text.
///
/// Everything after the first marker (trimmed) is the flow. Without a
/// marker the whole text is taken as the flow.
pub fn extract_conversation_flow(text: &str) -> String {
    match text.find(FLOW_MARKER) {
        Some(idx) => text[idx + FLOW_MARKER.len()..].trim().to_string(),
        None => text.trim().to_string(),
    }
}

/// Write the flow parsed from `text` back into the draft.
pub fn apply_flow_edit(draft: &mut AgentDraft, text: &str) {
    draft.conversation_flow = extract_conversation_flow(text);
}

// ---------------------------------------------------------------------------
// Agent prompt (identity + company information)
// ---------------------------------------------------------------------------

/// Values recognized in an agent-prompt text. `None` means "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentPromptFields {
    pub agent_name: Option<String>,
    pub company_name: Option<String>,
    pub role: Option<String>,
    pub industry: Option<String>,
    pub language: Option<String>,
    pub company_description: Option<String>,
}

/// Scan an agent-prompt text for identity lines and the company
/// information region.
///
/// The company region runs from its header to the next `###` header or the
/// end of the text. Identity prefixes are only recognized outside it.
pub fn parse_agent_prompt(text: &str) -> AgentPromptFields {
    let company_header = SectionKind::CompanyInformation.header();

    let mut fields = AgentPromptFields::default();
    let mut company_lines: Option<Vec<&str>> = None;
    let mut in_company = false;

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("###") {
            in_company = trimmed == company_header;
            if in_company && company_lines.is_none() {
                company_lines = Some(Vec::new());
            }
            continue;
        }

        if in_company {
            if let Some(lines) = company_lines.as_mut() {
                lines.push(line);
            }
            continue;
        }

        if let Some(value) = trimmed.strip_prefix(AGENT_NAME_PREFIX) {
            fields.agent_name = Some(value.trim().to_string());
        } else if let Some(value) = trimmed.strip_prefix(COMPANY_PREFIX) {
            fields.company_name = Some(value.trim().to_string());
        } else if let Some(value) = trimmed.strip_prefix(ROLE_PREFIX) {
            fields.role = Some(value.trim().to_string());
        } else if let Some(value) = trimmed.strip_prefix(INDUSTRY_PREFIX) {
            fields.industry = Some(value.trim().to_string());
        } else if let Some(value) = trimmed.strip_prefix(LANGUAGE_PREFIX) {
            let language = value.trim().trim_end_matches('.').trim();
            if !language.is_empty() {
                fields.language = Some(language.to_string());
            }
        }
    }

    fields.company_description = company_lines.map(|lines| lines.join("\n").trim().to_string());
    fields
}

/// Write recognized agent-prompt values back into the draft.
///
/// Only identity and company description are written; the language line is
/// derived from the voice and is not editable here.
pub fn apply_agent_prompt_edit(draft: &mut AgentDraft, text: &str) {
    let fields = parse_agent_prompt(text);

    if let Some(name) = fields.agent_name {
        draft.agent_name = name;
    }
    if let Some(company) = fields.company_name {
        draft.company_name = company;
    }
    if let Some(role) = fields.role {
        draft.role = role;
    }
    if let Some(industry) = fields.industry {
        draft.industry = industry;
    }
    if let Some(description) = fields.company_description {
        draft.company_description = description;
    }
}

// ---------------------------------------------------------------------------
// Section bodies
// ---------------------------------------------------------------------------

/// Parse a dynamic-variables body (`{name}: description` per line).
pub fn parse_variables(body: &str) -> Vec<DynamicVariable> {
    body.lines()
        .filter_map(|line| {
            let line = line.trim();
            let (name, description) = match line.split_once(':') {
                Some((name, description)) => (name, description.trim()),
                None => (line, ""),
            };
            let name = name.trim().trim_start_matches('{').trim_end_matches('}').trim();
            (!name.is_empty()).then(|| DynamicVariable::new(name, description))
        })
        .collect()
}

/// Parse a FAQ body (`N. Q: question` / `   A: answer`).
pub fn parse_faqs(body: &str) -> Vec<Faq> {
    parse_numbered_pairs(body)
        .into_iter()
        .map(|(question, answer)| {
            let question = question.strip_prefix("Q:").unwrap_or(&question).trim();
            let answer = answer.strip_prefix("A:").unwrap_or(&answer).trim();
            Faq::new(question, answer)
        })
        .collect()
}

/// Parse an additional-information body (`N. **question**` / `   answer`).
pub fn parse_qa_answers(body: &str) -> Vec<QaAnswer> {
    parse_numbered_pairs(body)
        .into_iter()
        .map(|(question, answer)| {
            let question = question
                .strip_prefix("**")
                .and_then(|q| q.strip_suffix("**"))
                .unwrap_or(&question)
                .trim();
            QaAnswer::new(question, answer)
        })
        .collect()
}

/// Split a numbered list into `(first line, following lines)` pairs.
fn parse_numbered_pairs(body: &str) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();

    for line in body.lines() {
        if let Some(head) = strip_ordinal(line) {
            pairs.push((head.trim().to_string(), String::new()));
            continue;
        }

        let content = line.trim();
        if content.is_empty() {
            continue;
        }
        if let Some((_, answer)) = pairs.last_mut() {
            if !answer.is_empty() {
                answer.push('\n');
            }
            answer.push_str(content);
        }
    }

    pairs
}

/// `"12. rest"` -> `Some("rest")`.
fn strip_ordinal(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(". ")
}

// ---------------------------------------------------------------------------
// Edit-mode seeding
// ---------------------------------------------------------------------------

/// Seed a draft from a persisted agent for edit mode.
///
/// Structured payload fields are copied directly; prompt-only content is
/// recovered from the parsed-section map.
pub fn draft_from_record(record: &AgentRecord) -> AgentDraft {
    let payload = &record.payload;
    let section = |kind: SectionKind| {
        payload
            .sections
            .get(kind.key())
            .map(|body| body.trim().to_string())
            .unwrap_or_default()
    };

    let identity = parse_agent_prompt(&format!(
        "{}\n{}",
        SectionKind::Identity.header(),
        section(SectionKind::Identity)
    ));

    AgentDraft {
        agent_name: identity.agent_name.unwrap_or_else(|| payload.name.clone()),
        company_name: identity.company_name.unwrap_or_default(),
        role: identity.role.unwrap_or_default(),
        industry: identity.industry.unwrap_or_default(),
        language: identity.language,
        voice: (!payload.voice_id.trim().is_empty()).then(|| VoiceSelection {
            voice_id: payload.voice_id.clone(),
            name: String::new(),
            language: None,
        }),
        call_direction: Some(payload.call_direction),
        welcome_message: payload.welcome_message.clone(),
        company_description: section(SectionKind::CompanyInformation),
        conversation_flow: section(SectionKind::ConversationFlow),
        qa_answers: parse_qa_answers(&section(SectionKind::AdditionalQa)),
        faqs: parse_faqs(&section(SectionKind::Faq)),
        generated_prompt: payload.prompt.clone(),
        generated: GeneratedSections {
            response_rules: section(SectionKind::ResponseRules),
            edge_cases: section(SectionKind::EdgeCases),
            operating_rules: section(SectionKind::OperatingRules),
            compliance: section(SectionKind::Compliance),
        },
        variables: parse_variables(&section(SectionKind::DynamicVariables)),
        extraction_fields: payload
            .configuration
            .extraction_fields
            .iter()
            .map(|field| ExtractionField::new(&field.display_name, &field.description))
            .collect(),
        schedule: payload.schedule.clone().unwrap_or_default(),
        custom_functions: payload.configuration.custom_functions.clone(),
        phone: PhoneSettings {
            region: Some(payload.region.clone()),
            inbound_number: payload.inbound_phone_number.clone().unwrap_or_default(),
            outbound_caller_id: payload.outbound_caller_id.clone().unwrap_or_default(),
        },
        company_id: payload.company_id.clone(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::assembler::{
        PromptVariant, agent_prompt_text, assemble, assemble_prompt, qa_review_text,
    };
    use crate::wizard::normalizer::normalize_extraction_fields;
    use callscript_types::agent::{AgentConfiguration, AgentId, AgentPayload};
    use callscript_types::draft::{CallDirection, ScheduleConfig};

    fn populated_draft() -> AgentDraft {
        AgentDraft {
            agent_name: "Sarah".to_string(),
            company_name: "Acme".to_string(),
            role: "Receptionist".to_string(),
            industry: "Manufacturing".to_string(),
            voice: Some(VoiceSelection {
                voice_id: "v-1".to_string(),
                name: "Aria".to_string(),
                language: Some("English".to_string()),
            }),
            call_direction: Some(CallDirection::Inbound),
            company_description: "We sell widgets.\nFounded in 1999.".to_string(),
            variables: vec![
                DynamicVariable::new("customer_name", "Caller's first name"),
                DynamicVariable::new("order_id", ""),
            ],
            qa_answers: vec![
                QaAnswer::new("What are your hours?", "\"9am to 5pm\""),
                QaAnswer::new("Do you deliver?", "Yes"),
            ],
            conversation_flow: "1. Greet\n2. Qualify".to_string(),
            generated: GeneratedSections {
                response_rules: "Keep answers short.".to_string(),
                edge_cases: "Stay calm.".to_string(),
                operating_rules: "No transfers after 5pm.".to_string(),
                compliance: "State that the call is recorded.".to_string(),
            },
            faqs: vec![
                Faq::new("Do you ship?", "Yes, worldwide."),
                Faq::new("Returns?", "Within 30 days."),
            ],
            extraction_fields: vec![ExtractionField::new("Email Address", "Work email")],
            ..Default::default()
        }
    }

    fn record_for(draft: &AgentDraft) -> AgentRecord {
        let assembled = assemble(draft, PromptVariant::Full);
        let now = chrono::Utc::now();
        AgentRecord {
            id: AgentId::new(),
            payload: AgentPayload {
                name: draft.agent_name.clone(),
                voice_id: "v-1".to_string(),
                call_direction: CallDirection::Inbound,
                prompt: assembled.text(),
                sections: assembled.section_map(),
                welcome_message: "Hi there!".to_string(),
                configuration: AgentConfiguration {
                    extraction_fields: normalize_extraction_fields(&draft.extraction_fields),
                    custom_functions: Vec::new(),
                },
                region: "us".to_string(),
                inbound_phone_number: Some("+15550100".to_string()),
                outbound_caller_id: None,
                company_id: None,
                schedule: Some(ScheduleConfig {
                    enabled: true,
                    timezone: "America/New_York".to_string(),
                    ..Default::default()
                }),
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_unedited_flow_survives_round_trip() {
        let draft = populated_draft();
        let text = qa_review_text(&draft);
        assert_eq!(extract_conversation_flow(&text), draft.conversation_flow);
    }

    #[test]
    fn test_flow_edit_wins() {
        let mut draft = populated_draft();
        let edited = qa_review_text(&draft).replace("2. Qualify", "2. Book a demo");
        apply_flow_edit(&mut draft, &edited);
        assert_eq!(draft.conversation_flow, "1. Greet\n2. Book a demo");
    }

    #[test]
    fn test_missing_marker_takes_whole_text() {
        assert_eq!(extract_conversation_flow("  just a flow \n"), "just a flow");
    }

    #[test]
    fn test_empty_flow_after_marker() {
        assert_eq!(extract_conversation_flow("1. Q\n   A\n\n### CONVERSATION FLOW\n"), "");
    }

    #[test]
    fn test_agent_prompt_round_trip() {
        let draft = populated_draft();
        let fields = parse_agent_prompt(&agent_prompt_text(&draft));
        assert_eq!(fields.agent_name.as_deref(), Some("Sarah"));
        assert_eq!(fields.company_name.as_deref(), Some("Acme"));
        assert_eq!(fields.role.as_deref(), Some("Receptionist"));
        assert_eq!(fields.industry.as_deref(), Some("Manufacturing"));
        assert_eq!(fields.language.as_deref(), Some("English"));
        assert_eq!(
            fields.company_description.as_deref(),
            Some("We sell widgets.\nFounded in 1999.")
        );
    }

    #[test]
    fn test_agent_prompt_edit_applies_recognized_values_only() {
        let mut draft = populated_draft();
        let text = "### AGENT IDENTITY\n\
                    Agent Name: Maya\n\
                    Favourite colour: blue\n\
                    Role:   Support  \n";
        apply_agent_prompt_edit(&mut draft, text);

        assert_eq!(draft.agent_name, "Maya");
        assert_eq!(draft.role, "Support");
        assert_eq!(draft.company_name, "Acme");
        assert_eq!(draft.company_description, "We sell widgets.\nFounded in 1999.");
    }

    #[test]
    fn test_company_region_stops_at_next_header() {
        let text = "### COMPANY INFORMATION\nWidgets.\nCompany: not an identity line\n### NOTES\nignored";
        let fields = parse_agent_prompt(text);
        assert_eq!(
            fields.company_description.as_deref(),
            Some("Widgets.\nCompany: not an identity line")
        );
        assert_eq!(fields.company_name, None);
    }

    #[test]
    fn test_parse_variables() {
        let vars = parse_variables("{customer_name}: First name\n{order_id}\n\n: orphan");
        assert_eq!(
            vars,
            vec![
                DynamicVariable::new("customer_name", "First name"),
                DynamicVariable::new("order_id", ""),
            ]
        );
    }

    #[test]
    fn test_parse_faqs_and_qa() {
        let faqs = parse_faqs("1. Q: Ship?\n   A: Yes\n2. Q: Returns?\n   A: 30 days");
        assert_eq!(faqs, vec![Faq::new("Ship?", "Yes"), Faq::new("Returns?", "30 days")]);

        let qa = parse_qa_answers("1. **Hours?**\n   9 to 5\n   weekdays only");
        assert_eq!(qa, vec![QaAnswer::new("Hours?", "9 to 5\nweekdays only")]);
    }

    #[test]
    fn test_strip_ordinal() {
        assert_eq!(strip_ordinal("12. rest"), Some("rest"));
        assert_eq!(strip_ordinal("   A: answer"), None);
        assert_eq!(strip_ordinal("1.no space"), None);
    }

    #[test]
    fn test_draft_from_record_reassembles_same_prompt() {
        let original = populated_draft();
        let record = record_for(&original);
        let restored = draft_from_record(&record);

        assert_eq!(restored.agent_name, "Sarah");
        assert_eq!(restored.call_direction, Some(CallDirection::Inbound));
        assert_eq!(restored.welcome_message, "Hi there!");
        assert_eq!(restored.phone.inbound_number, "+15550100");
        assert!(restored.schedule.enabled);
        assert_eq!(restored.generated_prompt, record.payload.prompt);

        assert_eq!(
            assemble_prompt(&restored, PromptVariant::Full),
            assemble_prompt(&original, PromptVariant::Full)
        );
    }

    #[test]
    fn test_draft_from_record_without_sections_falls_back_to_name() {
        let mut record = record_for(&AgentDraft::default());
        record.payload.name = "Legacy Agent".to_string();
        record.payload.sections.clear();

        let restored = draft_from_record(&record);
        assert_eq!(restored.agent_name, "Legacy Agent");
        assert!(restored.company_description.is_empty());
        assert!(restored.faqs.is_empty());
    }
}
