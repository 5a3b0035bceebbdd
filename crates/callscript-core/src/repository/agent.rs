//! Agent persistence trait definition.

use std::future::Future;

use callscript_types::agent::{AgentId, AgentPayload, AgentRecord};
use callscript_types::error::CollaboratorError;

/// Persistence API for agents.
///
/// Implementations talk to the remote agent store; failures are reported
/// as `CollaboratorError` like every other external call.
pub trait AgentRepository: Send + Sync {
    /// Create a new agent. Returns the persisted record.
    fn create_agent(
        &self,
        payload: &AgentPayload,
    ) -> impl Future<Output = Result<AgentRecord, CollaboratorError>> + Send;

    /// Replace an existing agent's configuration. Returns the updated record.
    fn update_agent(
        &self,
        id: &AgentId,
        payload: &AgentPayload,
    ) -> impl Future<Output = Result<AgentRecord, CollaboratorError>> + Send;
}
