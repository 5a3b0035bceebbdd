//! Session-scoped website draft kept in scratch storage.
//!
//! Stored as a single JSON blob under a fixed key while a new agent is being
//! built. Single writer, last write wins, cleared on successful submit and on
//! close.

use serde::{Deserialize, Serialize};

use crate::draft::Faq;

/// Website-derived material for the agent currently being created.
///
/// The serialized field names match the scratch layout
/// `{url, content, faqs, business_context, tasks, isLoaded}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebsiteDraft {
    pub url: String,
    pub content: String,
    pub faqs: Vec<Faq>,
    pub business_context: String,
    pub tasks: String,
    #[serde(rename = "isLoaded")]
    pub is_loaded: bool,
}

impl WebsiteDraft {
    /// True when any website data has been fetched or generated.
    pub fn has_data(&self) -> bool {
        self.is_loaded
            || !self.content.trim().is_empty()
            || !self.faqs.is_empty()
            || !self.business_context.trim().is_empty()
            || !self.tasks.trim().is_empty()
    }
}
