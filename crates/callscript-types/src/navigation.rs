//! Wizard position types.
//!
//! A position is a `(page, sub_step)` pair. The sub-step only carries meaning
//! on the builder page; on later pages it keeps whatever value the builder
//! left behind.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Top-level wizard pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardPage {
    /// Page 1: the multi-step builder (identity, knowledge, capture).
    Builder,
    /// Page 2: conversation flow review.
    ConversationFlow,
    /// Page 3: phone number setup (inbound agents only).
    PhoneSetup,
}

impl WizardPage {
    /// 1-based page number.
    pub fn number(self) -> u8 {
        match self {
            WizardPage::Builder => 1,
            WizardPage::ConversationFlow => 2,
            WizardPage::PhoneSetup => 3,
        }
    }
}

impl fmt::Display for WizardPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardPage::Builder => write!(f, "builder"),
            WizardPage::ConversationFlow => write!(f, "conversation_flow"),
            WizardPage::PhoneSetup => write!(f, "phone_setup"),
        }
    }
}

/// Internal builder sub-steps.
///
/// The builder shows three steps to the user, mapped onto internal positions
/// 1, 3 and 5. Positions 2 and 4 belonged to a retired five-step layout and
/// are never entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubStep {
    /// 1: name, company, role, voice, call direction.
    Profile,
    /// 2: unreachable.
    RetiredTwo,
    /// 3: company description, website, transcripts.
    Knowledge,
    /// 4: unreachable.
    RetiredFour,
    /// 5: variables and extraction fields.
    Capture,
}

impl SubStep {
    /// Internal 1-based index (1..=5).
    pub fn number(self) -> u8 {
        match self {
            SubStep::Profile => 1,
            SubStep::RetiredTwo => 2,
            SubStep::Knowledge => 3,
            SubStep::RetiredFour => 4,
            SubStep::Capture => 5,
        }
    }

    /// Step number as shown to the user (1..=3).
    pub fn visible_number(self) -> u8 {
        match self {
            SubStep::Profile | SubStep::RetiredTwo => 1,
            SubStep::Knowledge | SubStep::RetiredFour => 2,
            SubStep::Capture => 3,
        }
    }
}

/// Current wizard position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NavigationPosition {
    pub page: WizardPage,
    pub sub_step: SubStep,
}

impl NavigationPosition {
    /// `(page 1, sub-step 1)`: where every wizard starts.
    pub const START: NavigationPosition = NavigationPosition {
        page: WizardPage::Builder,
        sub_step: SubStep::Profile,
    };

    pub fn new(page: WizardPage, sub_step: SubStep) -> Self {
        Self { page, sub_step }
    }

    pub fn is_start(&self) -> bool {
        *self == Self::START
    }
}

impl Default for NavigationPosition {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for NavigationPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page {
            WizardPage::Builder => write!(f, "page 1, step {}", self.sub_step.number()),
            page => write!(f, "page {}", page.number()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_position_is_start() {
        let pos = NavigationPosition::default();
        assert!(pos.is_start());
        assert_eq!(pos.page.number(), 1);
        assert_eq!(pos.sub_step.number(), 1);
    }

    #[test]
    fn test_visible_numbers_collapse_internal_steps() {
        assert_eq!(SubStep::Profile.visible_number(), 1);
        assert_eq!(SubStep::Knowledge.visible_number(), 2);
        assert_eq!(SubStep::Capture.visible_number(), 3);
    }

    #[test]
    fn test_position_display() {
        let pos = NavigationPosition::new(WizardPage::Builder, SubStep::Knowledge);
        assert_eq!(pos.to_string(), "page 1, step 3");

        let pos = NavigationPosition::new(WizardPage::PhoneSetup, SubStep::Capture);
        assert_eq!(pos.to_string(), "page 3");
    }
}
