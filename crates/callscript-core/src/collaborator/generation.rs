//! Content generation collaborator: prompt, website, tasks and flow.

use std::future::Future;

use callscript_types::collaborator::{
    FaqGeneration, FlowGenerationRequest, GeneratedPrompt, PromptGenerationRequest,
    ScrapedWebsite, TaskGenerationRequest,
};
use callscript_types::error::CollaboratorError;

/// AI-backed content generation and website extraction.
///
/// Uses RPITIT (return position `impl Trait` in traits) consistent with
/// all async traits in this project -- no `async_trait` macro.
pub trait GenerationService: Send + Sync {
    /// Generate a full prompt plus its parsed section map from the agent
    /// description and identity fields.
    fn generate_prompt(
        &self,
        request: &PromptGenerationRequest,
    ) -> impl Future<Output = Result<GeneratedPrompt, CollaboratorError>> + Send;

    /// Fetch the raw text content of a website.
    fn scrape_website(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<ScrapedWebsite, CollaboratorError>> + Send;

    /// Derive a business summary and FAQ list from scraped content.
    fn generate_faqs(
        &self,
        content: &str,
    ) -> impl Future<Output = Result<FaqGeneration, CollaboratorError>> + Send;

    /// Produce the task list the agent should accomplish on a call.
    fn generate_tasks(
        &self,
        request: &TaskGenerationRequest,
    ) -> impl Future<Output = Result<String, CollaboratorError>> + Send;

    /// Produce conversation-flow text from a task list.
    fn generate_conversation_flow(
        &self,
        request: &FlowGenerationRequest,
    ) -> impl Future<Output = Result<String, CollaboratorError>> + Send;
}
