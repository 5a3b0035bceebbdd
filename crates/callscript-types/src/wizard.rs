//! Wizard-session types surfaced to the presentation layer.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::agent::{AgentId, AgentRecord};
use crate::navigation::NavigationPosition;

/// Whether the wizard creates a new agent or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum WizardMode {
    Create,
    Edit { agent_id: AgentId },
}

/// An asynchronous collaborator operation the wizard can start.
///
/// At most one instance of each operation may be pending at a time;
/// different operations may overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    GeneratePrompt,
    ScrapeWebsite,
    GenerateFaqs,
    Transcribe,
    GenerateTasks,
    GenerateConversationFlow,
    Submit,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::GeneratePrompt => "prompt generation",
            Operation::ScrapeWebsite => "website import",
            Operation::GenerateFaqs => "FAQ generation",
            Operation::Transcribe => "transcription",
            Operation::GenerateTasks => "task generation",
            Operation::GenerateConversationFlow => "conversation flow generation",
            Operation::Submit => "save",
        };
        f.write_str(label)
    }
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A transient user-facing message (rendered as a toast by the UI).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Result of pressing "Next".
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Moved to a new position.
    Moved(NavigationPosition),
    /// The agent was saved and the wizard closed.
    Submitted(Box<AgentRecord>),
}

/// What a close attempt requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitDecision {
    CloseImmediately,
    ConfirmDiscard,
}
