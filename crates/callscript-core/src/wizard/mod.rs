//! The agent wizard.
//!
//! Pure pieces first -- validation gate, extraction-key normalizer, prompt
//! assembler and decomposer, navigation rules, change detector, payload
//! builder -- then `WizardSession` (the single state aggregate) and
//! `WizardController`, which threads the session through collaborator calls.

pub mod assembler;
pub mod change_detector;
pub mod controller;
pub mod decomposer;
pub mod navigation;
pub mod normalizer;
pub mod payload;
pub mod session;
pub mod validation;
