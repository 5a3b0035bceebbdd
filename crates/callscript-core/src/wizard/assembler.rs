//! Prompt assembler -- the forward transform from `AgentDraft` to prompt text.
//!
//! Builds an ordered list of sections from the draft, then joins them with
//! exactly one blank line between blocks. The section set and order are
//! fixed (`SectionKind::CANONICAL`); a section whose source is empty is
//! skipped entirely, header included.
//!
//! The saved prompt and the live preview come out of the same code path;
//! they differ only in whether compliance-only sections are included.

use std::collections::BTreeMap;

use callscript_types::config::WizardConfig;
use callscript_types::draft::AgentDraft;
use callscript_types::prompt::{Section, SectionKind};

use super::normalizer::normalize_field_key;

/// Default notes block, emitted only when company information is present.
pub const NOTES_BOILERPLATE: &str = "\
- Only share company details that appear in the company information above.
- If you do not know an answer, say so and offer to have someone follow up.
- Never invent prices, policies, or availability.";

/// Closing line of the extraction-fields section.
pub const EXTRACTION_INSTRUCTION: &str = "Collect each item above naturally during the conversation. Do not ask again for information the caller has already given.";

// ---------------------------------------------------------------------------
// Variant
// ---------------------------------------------------------------------------

/// Which flavour of the prompt to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptVariant {
    /// Saved with the agent; includes compliance-only sections.
    Full,
    /// Shown in the live preview; compliance-only sections redacted.
    Display,
}

impl PromptVariant {
    pub fn include_compliance(self) -> bool {
        matches!(self, PromptVariant::Full)
    }
}

// ---------------------------------------------------------------------------
// AssembledPrompt
// ---------------------------------------------------------------------------

/// The ordered sections of an assembled prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPrompt {
    sections: Vec<Section>,
}

impl AssembledPrompt {
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn contains(&self, kind: SectionKind) -> bool {
        self.sections.iter().any(|s| s.kind == kind)
    }

    pub fn body(&self, kind: SectionKind) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.body.as_str())
    }

    /// Joined prompt text: rendered sections separated by one blank line.
    pub fn text(&self) -> String {
        self.sections
            .iter()
            .map(Section::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Section key -> body, for the payload's parsed-section map.
    pub fn section_map(&self) -> BTreeMap<String, String> {
        self.sections
            .iter()
            .map(|s| (s.kind.key().to_string(), s.body.clone()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Language directive derived from the selected voice (or the draft's own
/// language choice when the voice carries none).
pub fn language_directive(draft: &AgentDraft) -> Option<String> {
    draft
        .effective_language()
        .map(|language| format!("Always respond in {language}."))
}

/// Notes block in effect under `config`: the override if set, otherwise
/// the built-in boilerplate. Preview and save both resolve it here.
pub fn notes_for(config: &WizardConfig) -> &str {
    config
        .notes_override
        .as_deref()
        .unwrap_or(NOTES_BOILERPLATE)
}

/// Assemble the prompt sections with the built-in notes block.
pub fn assemble(draft: &AgentDraft, variant: PromptVariant) -> AssembledPrompt {
    assemble_with_notes(draft, variant, NOTES_BOILERPLATE)
}

/// Assemble the prompt sections with a caller-supplied notes block.
pub fn assemble_with_notes(
    draft: &AgentDraft,
    variant: PromptVariant,
    notes: &str,
) -> AssembledPrompt {
    let has_company_info = !draft.company_description.trim().is_empty();

    let sections = SectionKind::CANONICAL
        .into_iter()
        .filter(|kind| variant.include_compliance() || !kind.is_compliance_only())
        .filter_map(|kind| {
            let body = match kind {
                SectionKind::Identity => identity_body(draft),
                SectionKind::DynamicVariables => variables_body(draft),
                SectionKind::CompanyInformation => draft.company_description.trim().to_string(),
                SectionKind::AdditionalQa => additional_qa_body(draft),
                SectionKind::ConversationFlow => draft.conversation_flow.trim().to_string(),
                SectionKind::ResponseRules => draft.generated.response_rules.trim().to_string(),
                SectionKind::EdgeCases => draft.generated.edge_cases.trim().to_string(),
                SectionKind::OperatingRules => draft.generated.operating_rules.trim().to_string(),
                SectionKind::Compliance => draft.generated.compliance.trim().to_string(),
                SectionKind::Notes if has_company_info => notes.trim().to_string(),
                SectionKind::Notes => String::new(),
                SectionKind::Faq => faq_body(draft),
                SectionKind::ExtractionFields => extraction_body(draft),
            };
            (!body.is_empty()).then(|| Section::new(kind, body))
        })
        .collect();

    AssembledPrompt { sections }
}

/// Assembled prompt text.
pub fn assemble_prompt(draft: &AgentDraft, variant: PromptVariant) -> String {
    assemble(draft, variant).text()
}

/// Editable "agent prompt" text: the identity block followed by the company
/// information block. This is the text the decomposer parses back.
pub fn agent_prompt_text(draft: &AgentDraft) -> String {
    let mut blocks = Vec::with_capacity(2);

    let identity = identity_body(draft);
    if !identity.is_empty() {
        blocks.push(Section::new(SectionKind::Identity, identity).render());
    }

    let company = draft.company_description.trim();
    if !company.is_empty() {
        blocks.push(Section::new(SectionKind::CompanyInformation, company).render());
    }

    blocks.join("\n\n")
}

/// Combined Q&A review + conversation flow text.
///
/// The answered review questions come first, then the conversation-flow
/// marker line and the flow itself. The marker is always present so the
/// decomposer can find where the flow starts.
pub fn qa_review_text(draft: &AgentDraft) -> String {
    let qa_lines: Vec<String> = answered_qa(draft)
        .enumerate()
        .map(|(i, (question, answer))| format!("{}. {question}\n   {answer}", i + 1))
        .collect();

    let flow = format!(
        "{}\n{}",
        SectionKind::ConversationFlow.header(),
        draft.conversation_flow.trim()
    );

    if qa_lines.is_empty() {
        flow
    } else {
        format!("{}\n\n{flow}", qa_lines.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// Section bodies
// ---------------------------------------------------------------------------

fn identity_body(draft: &AgentDraft) -> String {
    let mut lines = Vec::with_capacity(5);

    for (label, value) in [
        ("Agent Name", &draft.agent_name),
        ("Company", &draft.company_name),
        ("Role", &draft.role),
        ("Industry", &draft.industry),
    ] {
        let value = value.trim();
        if !value.is_empty() {
            lines.push(format!("{label}: {value}"));
        }
    }

    if let Some(directive) = language_directive(draft) {
        lines.push(directive);
    }

    lines.join("\n")
}

fn variables_body(draft: &AgentDraft) -> String {
    draft
        .variables
        .iter()
        .filter_map(|var| {
            let name = var.name.trim().trim_matches(|c| c == '{' || c == '}').trim();
            if name.is_empty() {
                return None;
            }
            let description = var.description.trim();
            Some(if description.is_empty() {
                format!("{{{name}}}")
            } else {
                format!("{{{name}}}: {description}")
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn answered_qa(draft: &AgentDraft) -> impl Iterator<Item = (&str, &str)> {
    draft.qa_answers.iter().filter_map(|qa| {
        let question = qa.question.trim();
        let answer = strip_wrapping_quotes(qa.answer.trim());
        (!question.is_empty() && !answer.is_empty()).then_some((question, answer))
    })
}

fn additional_qa_body(draft: &AgentDraft) -> String {
    answered_qa(draft)
        .enumerate()
        .map(|(i, (question, answer))| format!("{}. **{question}**\n   {answer}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn faq_body(draft: &AgentDraft) -> String {
    draft
        .faqs
        .iter()
        .filter_map(|faq| {
            let question = faq.question.trim();
            let answer = faq.answer.trim();
            (!question.is_empty() && !answer.is_empty()).then_some((question, answer))
        })
        .enumerate()
        .map(|(i, (question, answer))| format!("{}. Q: {question}\n   A: {answer}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn extraction_body(draft: &AgentDraft) -> String {
    let lines: Vec<String> = draft
        .extraction_fields
        .iter()
        .filter_map(|field| {
            let name = field.name.trim();
            if name.is_empty() {
                return None;
            }
            let mut line = format!("- {name} (stored as: {})", normalize_field_key(name));
            let description = field.description.trim();
            if !description.is_empty() {
                line.push_str("\n  ");
                line.push_str(description);
            }
            Some(line)
        })
        .collect();

    if lines.is_empty() {
        return String::new();
    }

    format!("{}\n{EXTRACTION_INSTRUCTION}", lines.join("\n"))
}

/// Remove one pair of matching quotes wrapping the whole value.
fn strip_wrapping_quotes(value: &str) -> &str {
    const PAIRS: [(char, char); 4] = [('"', '"'), ('\'', '\''), ('\u{201C}', '\u{201D}'), ('\u{2018}', '\u{2019}')];

    for (open, close) in PAIRS {
        if let Some(inner) = value
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            return inner.trim();
        }
    }
    value
}
