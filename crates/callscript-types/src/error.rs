use thiserror::Error;

use crate::validation::FieldViolation;
use crate::wizard::Operation;

/// Errors returned by external collaborators (generation, website
/// extraction, transcription, persistence API).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("request timed out")]
    Timeout,
}

/// Errors from local storage (scratch store).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid key: '{0}'")]
    InvalidKey(String),
}

/// Rejected navigation transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("already at the first step")]
    AtStart,

    #[error("missing required fields: {}", join_violations(.0))]
    RequiredFields(Vec<FieldViolation>),

    #[error("conversation flow is required")]
    EmptyConversationFlow,
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors surfaced by the wizard controller.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("you must be signed in to do that")]
    NotAuthenticated,

    #[error("{0} is already in progress")]
    OperationInFlight(Operation),

    #[error("a save is already in progress")]
    SubmissionInFlight,

    #[error("the wizard was closed")]
    Dismissed,

    #[error("a website URL is required")]
    EmptyUrl,

    #[error("no audio files to transcribe")]
    NothingToTranscribe,

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldId;

    #[test]
    fn test_collaborator_error_display() {
        let err = CollaboratorError::Unavailable("503".to_string());
        assert_eq!(err.to_string(), "service unavailable: 503");
    }

    #[test]
    fn test_required_fields_lists_every_field() {
        let err = NavigationError::RequiredFields(vec![
            FieldViolation::required(FieldId::Voice),
            FieldViolation::required(FieldId::Role),
        ]);
        assert_eq!(err.to_string(), "missing required fields: Voice, Role");
    }

    #[test]
    fn test_wizard_error_wraps_transparently() {
        let err: WizardError = CollaboratorError::Timeout.into();
        assert_eq!(err.to_string(), "request timed out");

        let err = WizardError::OperationInFlight(Operation::Transcribe);
        assert_eq!(err.to_string(), "transcription is already in progress");
    }
}
