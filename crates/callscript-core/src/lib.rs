//! Business logic and collaborator trait definitions for Callscript.
//!
//! This crate defines the "ports" (collaborator and repository traits) that
//! the infrastructure layer implements, plus the wizard itself: validation,
//! prompt assembly and decomposition, navigation, the exit guard and the
//! controller that threads them together. It depends only on
//! `callscript-types` -- never on `callscript-infra` or any IO crate.

pub mod collaborator;
pub mod repository;
pub mod wizard;
