//! `WizardSession`: the single state aggregate threaded through the
//! controller.
//!
//! Holds the draft, the navigation position, validation state, the website
//! draft, the set of pending operations, the liveness flag and the notice
//! queue. Everything here is synchronous; the controller owns the locking
//! and the awaits.

use std::collections::BTreeSet;

use callscript_types::draft::AgentDraft;
use callscript_types::error::WizardError;
use callscript_types::navigation::NavigationPosition;
use callscript_types::website::WebsiteDraft;
use callscript_types::wizard::{Notice, Operation, WizardMode};

use super::change_detector::{self, ChangeReason};
use super::validation::ValidationState;

#[derive(Debug, Clone)]
pub struct WizardSession {
    pub mode: WizardMode,
    pub draft: AgentDraft,
    pub position: NavigationPosition,
    pub validation: ValidationState,
    pub website: WebsiteDraft,
    pending: BTreeSet<Operation>,
    alive: bool,
    notices: Vec<Notice>,
}

impl WizardSession {
    /// A live session at the start position.
    pub fn new(mode: WizardMode, draft: AgentDraft) -> Self {
        Self {
            mode,
            draft,
            position: NavigationPosition::START,
            validation: ValidationState::new(),
            website: WebsiteDraft::default(),
            pending: BTreeSet::new(),
            alive: true,
            notices: Vec::new(),
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self.mode, WizardMode::Create)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_pending(&self, op: Operation) -> bool {
        self.pending.contains(&op)
    }

    /// Fails with `Dismissed` once the wizard has been closed.
    pub fn ensure_alive(&self) -> Result<(), WizardError> {
        if self.alive {
            Ok(())
        } else {
            Err(WizardError::Dismissed)
        }
    }

    /// Mark `op` as pending.
    ///
    /// Rejects a second concurrent start of the same operation. Different
    /// operations may overlap.
    pub fn begin(&mut self, op: Operation) -> Result<(), WizardError> {
        self.ensure_alive()?;
        if !self.pending.insert(op) {
            return Err(match op {
                Operation::Submit => WizardError::SubmissionInFlight,
                other => WizardError::OperationInFlight(other),
            });
        }
        Ok(())
    }

    /// Clear `op` after its collaborator call returned.
    ///
    /// Returns `Dismissed` if the wizard was closed in the meantime; the
    /// caller must then discard the result without touching the session.
    pub fn finish(&mut self, op: Operation) -> Result<(), WizardError> {
        self.pending.remove(&op);
        self.ensure_alive()
    }

    /// Close the wizard. Pending results arriving later are discarded.
    pub fn close(&mut self) {
        self.alive = false;
        self.pending.clear();
    }

    /// Clear every piece of collected state and return to the start.
    pub fn reset(&mut self) {
        self.draft = AgentDraft::default();
        self.position = NavigationPosition::START;
        self.validation.reset();
        self.website = WebsiteDraft::default();
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn change_reasons(&self) -> Vec<ChangeReason> {
        change_detector::change_reasons(&self.draft, &self.website)
    }
}
