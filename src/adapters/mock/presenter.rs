//! Recording presentation adapter for testing.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::traits::{PresentationAdapter, PresentationCommand};

/// Presenter that records every command it receives.
///
/// Clones share the same log, so a test can keep one handle and give the
/// other to the controller.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    commands: Arc<Mutex<Vec<PresentationCommand>>>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PresentationCommand>> {
        self.commands
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// All commands received so far.
    pub fn commands(&self) -> Vec<PresentationCommand> {
        self.lock().clone()
    }

    /// The most recent command.
    pub fn last(&self) -> Option<PresentationCommand> {
        self.lock().last().cloned()
    }

    /// Remove and return all recorded commands.
    pub fn take(&self) -> Vec<PresentationCommand> {
        std::mem::take(&mut *self.lock())
    }
}

impl PresentationAdapter for RecordingPresenter {
    fn present(&mut self, command: PresentationCommand) {
        self.lock().push(command);
    }
}
