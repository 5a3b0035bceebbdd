//! Navigation state machine.
//!
//! Pure transition functions over `NavigationPosition`. The builder page
//! walks internal sub-steps 1 -> 3 -> 5; sub-steps 2 and 4 are never
//! produced. Leaving the builder is gated on the required-field check and
//! leaving the conversation-flow page branches on call direction.

use callscript_types::draft::{AgentDraft, CallDirection};
use callscript_types::error::NavigationError;
use callscript_types::navigation::{NavigationPosition, SubStep, WizardPage};

use super::validation::required_field_violations;

/// Result of a successful advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Move to a new position.
    Moved(NavigationPosition),
    /// Submit the agent from the current position.
    Submit,
}

/// Where the conversation-flow page leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowExit {
    /// Submit directly; the phone setup page is skipped.
    Submit,
    /// Continue to phone setup.
    PhoneSetup,
}

/// Next stop after the conversation-flow page for a call direction.
///
/// Outbound and web agents need no inbound number, so they submit straight
/// from page 2. An unset direction is treated as inbound.
pub fn next_after_flow(direction: Option<CallDirection>) -> FlowExit {
    match direction {
        Some(CallDirection::Outbound | CallDirection::Web) => FlowExit::Submit,
        Some(CallDirection::Inbound) | None => FlowExit::PhoneSetup,
    }
}

/// Compute the transition for "Next" from `pos`.
pub fn advance(pos: NavigationPosition, draft: &AgentDraft) -> Result<Advance, NavigationError> {
    match pos.page {
        WizardPage::Builder => match pos.sub_step {
            SubStep::Profile | SubStep::RetiredTwo => Ok(Advance::Moved(NavigationPosition::new(
                WizardPage::Builder,
                SubStep::Knowledge,
            ))),
            SubStep::Knowledge | SubStep::RetiredFour => Ok(Advance::Moved(
                NavigationPosition::new(WizardPage::Builder, SubStep::Capture),
            )),
            SubStep::Capture => {
                let violations = required_field_violations(draft);
                if !violations.is_empty() {
                    return Err(NavigationError::RequiredFields(violations));
                }
                Ok(Advance::Moved(NavigationPosition::new(
                    WizardPage::ConversationFlow,
                    pos.sub_step,
                )))
            }
        },
        WizardPage::ConversationFlow => {
            if draft.conversation_flow.trim().is_empty() {
                return Err(NavigationError::EmptyConversationFlow);
            }
            match next_after_flow(draft.call_direction) {
                FlowExit::Submit => Ok(Advance::Submit),
                FlowExit::PhoneSetup => Ok(Advance::Moved(NavigationPosition::new(
                    WizardPage::PhoneSetup,
                    pos.sub_step,
                ))),
            }
        }
        WizardPage::PhoneSetup => Ok(Advance::Submit),
    }
}

/// Compute the transition for "Back" from `pos`.
pub fn retreat(pos: NavigationPosition) -> Result<NavigationPosition, NavigationError> {
    let target = match (pos.page, pos.sub_step) {
        (WizardPage::Builder, SubStep::Profile) => return Err(NavigationError::AtStart),
        (WizardPage::Builder, SubStep::RetiredTwo | SubStep::Knowledge) => {
            NavigationPosition::new(WizardPage::Builder, SubStep::Profile)
        }
        (WizardPage::Builder, SubStep::RetiredFour | SubStep::Capture) => {
            NavigationPosition::new(WizardPage::Builder, SubStep::Knowledge)
        }
        (WizardPage::ConversationFlow, _) => {
            NavigationPosition::new(WizardPage::Builder, SubStep::Capture)
        }
        (WizardPage::PhoneSetup, sub_step) => {
            NavigationPosition::new(WizardPage::ConversationFlow, sub_step)
        }
    };
    Ok(target)
}

/// Whether "Back" is enabled at `pos`.
pub fn can_retreat(pos: NavigationPosition) -> bool {
    !pos.is_start()
}
