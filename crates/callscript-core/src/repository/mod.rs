//! Repository trait definitions.

pub mod agent;
pub mod scratch;
