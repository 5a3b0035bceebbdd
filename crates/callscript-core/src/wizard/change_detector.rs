//! Unsaved-changes heuristic and exit guard.
//!
//! Not a diff. Each predicate asks "does this group of fields hold anything
//! other than its default?" and any hit means closing would lose work.

use callscript_types::draft::AgentDraft;
use callscript_types::website::WebsiteDraft;
use callscript_types::wizard::ExitDecision;

/// Which group of tracked state is non-default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChangeReason {
    Identity,
    DescriptionText,
    Variables,
    ExtractionFields,
    GeneratedText,
    Configuration,
    Voice,
    WebsiteData,
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Every predicate that currently fires, in declaration order.
pub fn change_reasons(draft: &AgentDraft, website: &WebsiteDraft) -> Vec<ChangeReason> {
    let checks = [
        (
            ChangeReason::Identity,
            [&draft.agent_name, &draft.company_name, &draft.role, &draft.industry]
                .into_iter()
                .any(|s| filled(s)),
        ),
        (
            ChangeReason::DescriptionText,
            filled(&draft.description) || filled(&draft.company_description),
        ),
        (ChangeReason::Variables, !draft.variables.is_empty()),
        (
            ChangeReason::ExtractionFields,
            draft
                .extraction_fields
                .iter()
                .any(|f| filled(&f.name) || filled(&f.description)),
        ),
        (
            ChangeReason::GeneratedText,
            filled(&draft.generated_prompt)
                || !draft.generated.is_empty()
                || filled(&draft.conversation_flow)
                || filled(&draft.tasks)
                || !draft.faqs.is_empty()
                || draft.qa_answers.iter().any(|qa| filled(&qa.answer)),
        ),
        (
            ChangeReason::Configuration,
            !draft.schedule.is_empty()
                || !draft.custom_functions.is_empty()
                || filled(&draft.welcome_message)
                || draft.language.as_deref().is_some_and(filled)
                || draft.call_direction.is_some()
                || !draft.phone.is_empty(),
        ),
        (ChangeReason::Voice, draft.voice.is_some()),
        (
            ChangeReason::WebsiteData,
            website.has_data() || filled(&website.url),
        ),
    ];

    checks
        .into_iter()
        .filter_map(|(reason, fired)| fired.then_some(reason))
        .collect()
}

pub fn has_unsaved_changes(draft: &AgentDraft, website: &WebsiteDraft) -> bool {
    !change_reasons(draft, website).is_empty()
}

/// Authoritative close decision, evaluated at the moment of close.
pub fn exit_decision(draft: &AgentDraft, website: &WebsiteDraft) -> ExitDecision {
    if has_unsaved_changes(draft, website) {
        ExitDecision::ConfirmDiscard
    } else {
        ExitDecision::CloseImmediately
    }
}
