//! Infrastructure implementations for Callscript.
//!
//! Implements the storage traits from `callscript-core` and loads
//! `wizard.toml`. Remote collaborators (generation, transcription, agent
//! persistence) are provided by the embedding application.

pub mod config;
pub mod scratch;
