//! Collaborator trait definitions.
//!
//! External services the wizard talks to. Transport, retries and timeouts
//! live in the implementations; the wizard only sees one-shot async calls
//! that either succeed or return a `CollaboratorError`.

pub mod generation;
pub mod transcription;
