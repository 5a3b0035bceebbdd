//! The `AgentDraft` aggregate and its parts.
//!
//! One `AgentDraft` holds everything the wizard collects for a single voice
//! agent. It is created empty when the wizard opens (or seeded from an
//! existing agent in edit mode), mutated field by field, and converted into
//! an `AgentPayload` on submit.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Which way calls flow for the agent.
///
/// - Inbound: callers dial the agent's number (phone setup page is shown)
/// - Outbound: the agent places calls (phone setup page is skipped)
/// - Web: embedded in a web page, no telephony (phone setup page is skipped)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallDirection {
    Inbound,
    Outbound,
    Web,
}

impl fmt::Display for CallDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallDirection::Inbound => write!(f, "inbound"),
            CallDirection::Outbound => write!(f, "outbound"),
            CallDirection::Web => write!(f, "web"),
        }
    }
}

impl FromStr for CallDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inbound" => Ok(CallDirection::Inbound),
            "outbound" => Ok(CallDirection::Outbound),
            "web" => Ok(CallDirection::Web),
            other => Err(format!("invalid call direction: '{other}'")),
        }
    }
}

/// A voice picked from the voice catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSelection {
    pub voice_id: String,
    /// Display name shown in the picker.
    #[serde(default)]
    pub name: String,
    /// Spoken language of the voice (e.g. "English", "Spanish").
    #[serde(default)]
    pub language: Option<String>,
}

/// A `{name}` placeholder the agent can reference at call time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicVariable {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl DynamicVariable {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A piece of information the agent is instructed to capture.
///
/// `name` is the human-readable label as typed by the user; the persisted
/// key is derived from it at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionField {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl ExtractionField {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// An answer to one of the review questions asked during prompt generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaAnswer {
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

impl QaAnswer {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A frequently asked question, usually derived from the company website.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

impl Faq {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Rule sections produced by the prompt generation service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedSections {
    #[serde(default)]
    pub response_rules: String,
    #[serde(default)]
    pub edge_cases: String,
    #[serde(default)]
    pub operating_rules: String,
    #[serde(default)]
    pub compliance: String,
}

impl GeneratedSections {
    pub fn is_empty(&self) -> bool {
        [
            &self.response_rules,
            &self.edge_cases,
            &self.operating_rules,
            &self.compliance,
        ]
        .iter()
        .all(|s| s.trim().is_empty())
    }
}

/// Calling hours for the agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub enabled: bool,
    /// IANA timezone name, e.g. "America/New_York".
    #[serde(default)]
    pub timezone: String,
    /// Lowercase weekday names ("monday", "tuesday", ...).
    #[serde(default)]
    pub days: Vec<String>,
    /// "HH:MM", 24-hour clock.
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

impl ScheduleConfig {
    /// True when nothing has been configured.
    pub fn is_empty(&self) -> bool {
        !self.enabled
            && self.timezone.trim().is_empty()
            && self.days.is_empty()
            && self.start_time.trim().is_empty()
            && self.end_time.trim().is_empty()
    }
}

/// An HTTP function the agent may call mid-conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFunction {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    /// JSON Schema describing the call parameters.
    #[serde(default)]
    pub parameters: serde_json::Value,
}

fn default_method() -> String {
    "POST".to_string()
}

/// Telephony settings collected on the phone setup page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneSettings {
    /// Overrides the configured default region when set.
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub inbound_number: String,
    #[serde(default)]
    pub outbound_caller_id: String,
}

impl PhoneSettings {
    pub fn is_empty(&self) -> bool {
        self.region.as_deref().is_none_or(|r| r.trim().is_empty())
            && self.inbound_number.trim().is_empty()
            && self.outbound_caller_id.trim().is_empty()
    }
}

/// The in-progress structured configuration for one agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentDraft {
    // Identity
    pub agent_name: String,
    pub company_name: String,
    pub role: String,
    pub industry: String,

    pub language: Option<String>,
    pub voice: Option<VoiceSelection>,
    pub call_direction: Option<CallDirection>,
    pub welcome_message: String,

    /// Free-text brief fed to prompt generation. Call transcripts are
    /// appended here.
    pub description: String,
    pub company_description: String,
    pub conversation_flow: String,

    /// Review answers rendered in the additional Q&A section.
    pub qa_answers: Vec<QaAnswer>,
    pub faqs: Vec<Faq>,

    // AI-generated text
    pub generated_prompt: String,
    pub generated: GeneratedSections,
    pub tasks: String,

    pub variables: Vec<DynamicVariable>,
    pub extraction_fields: Vec<ExtractionField>,

    // Configuration
    pub schedule: ScheduleConfig,
    pub custom_functions: Vec<CustomFunction>,
    pub phone: PhoneSettings,
    /// Company assignment; only forwarded for privileged callers.
    pub company_id: Option<String>,
}

impl AgentDraft {
    /// Language used for the prompt's language directive: the selected
    /// voice's language wins over the draft's own language choice.
    pub fn effective_language(&self) -> Option<&str> {
        self.voice
            .as_ref()
            .and_then(|v| v.language.as_deref())
            .or(self.language.as_deref())
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }
}
