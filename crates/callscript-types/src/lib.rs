//! Shared domain types for Callscript.
//!
//! This crate contains the data shapes used across the agent wizard:
//! the `AgentDraft` aggregate, prompt sections, navigation positions,
//! validation field ids, collaborator request/response shapes, the
//! persistence payload, and the error enums.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod agent;
pub mod collaborator;
pub mod config;
pub mod draft;
pub mod error;
pub mod navigation;
pub mod prompt;
pub mod validation;
pub mod website;
pub mod wizard;
