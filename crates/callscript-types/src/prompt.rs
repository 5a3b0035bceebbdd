//! Prompt section kinds and their canonical order.

use serde::{Deserialize, Serialize};

use std::fmt;

/// A named block of the assembled prompt.
///
/// Variants are declared in canonical emission order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Identity,
    DynamicVariables,
    CompanyInformation,
    AdditionalQa,
    ConversationFlow,
    ResponseRules,
    EdgeCases,
    OperatingRules,
    Compliance,
    Notes,
    Faq,
    ExtractionFields,
}

impl SectionKind {
    /// Every section in the order it is emitted.
    pub const CANONICAL: [SectionKind; 12] = [
        SectionKind::Identity,
        SectionKind::DynamicVariables,
        SectionKind::CompanyInformation,
        SectionKind::AdditionalQa,
        SectionKind::ConversationFlow,
        SectionKind::ResponseRules,
        SectionKind::EdgeCases,
        SectionKind::OperatingRules,
        SectionKind::Compliance,
        SectionKind::Notes,
        SectionKind::Faq,
        SectionKind::ExtractionFields,
    ];

    /// Header line written above the section body.
    pub fn header(self) -> &'static str {
        match self {
            SectionKind::Identity => "### AGENT IDENTITY",
            SectionKind::DynamicVariables => "### DYNAMIC VARIABLES",
            SectionKind::CompanyInformation => "### COMPANY INFORMATION",
            SectionKind::AdditionalQa => "### ADDITIONAL INFORMATION",
            SectionKind::ConversationFlow => "### CONVERSATION FLOW",
            SectionKind::ResponseRules => "### RESPONSE RULES",
            SectionKind::EdgeCases => "### EDGE CASES",
            SectionKind::OperatingRules => "### OPERATING RULES",
            SectionKind::Compliance => "### COMPLIANCE",
            SectionKind::Notes => "### NOTES",
            SectionKind::Faq => "### FREQUENTLY ASKED QUESTIONS",
            SectionKind::ExtractionFields => "### INFORMATION TO COLLECT",
        }
    }

    /// Key used in the parsed-section map.
    pub fn key(self) -> &'static str {
        match self {
            SectionKind::Identity => "identity",
            SectionKind::DynamicVariables => "dynamic_variables",
            SectionKind::CompanyInformation => "company_information",
            SectionKind::AdditionalQa => "additional_qa",
            SectionKind::ConversationFlow => "conversation_flow",
            SectionKind::ResponseRules => "response_rules",
            SectionKind::EdgeCases => "edge_cases",
            SectionKind::OperatingRules => "operating_rules",
            SectionKind::Compliance => "compliance",
            SectionKind::Notes => "notes",
            SectionKind::Faq => "faq",
            SectionKind::ExtractionFields => "extraction_fields",
        }
    }

    /// Inverse of [`SectionKind::key`].
    pub fn from_key(key: &str) -> Option<SectionKind> {
        Self::CANONICAL
            .into_iter()
            .find(|kind| kind.key() == key.trim())
    }

    /// Sections that only appear in the full (saved) prompt, never in the
    /// redacted display variant.
    pub fn is_compliance_only(self) -> bool {
        matches!(self, SectionKind::Compliance)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One emitted section: a kind plus its non-empty body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub body: String,
}

impl Section {
    pub fn new(kind: SectionKind, body: impl Into<String>) -> Self {
        Self {
            kind,
            body: body.into(),
        }
    }

    /// Header line followed by the body.
    pub fn render(&self) -> String {
        format!("{}\n{}", self.kind.header(), self.body)
    }
}
