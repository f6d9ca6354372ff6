//! Editor surfaces for a terminal session.

use std::cell::RefCell;

use log::debug;

use chartroom::{
    history::History,
    ui::{Dialog, DialogPresenter, HistoryStack, LoadingIndicator},
};

/// Terminal stand-in for the editor window.
///
/// Dialogs are collected and reported once the session settles; the loader
/// and history only log.
#[derive(Debug, Default)]
pub struct TerminalUi {
    dialogs: RefCell<Vec<Dialog>>,
    history: History<String>,
}

impl TerminalUi {
    /// The dialog most recently requested, if any.
    pub fn last_dialog(&self) -> Option<Dialog> {
        self.dialogs.borrow().last().copied()
    }
}

impl DialogPresenter for TerminalUi {
    fn open(&self, dialog: Dialog) {
        debug!(dialog:?; "Dialog requested");
        self.dialogs.borrow_mut().push(dialog);
    }
}

impl LoadingIndicator for TerminalUi {
    fn show(&self) {
        debug!("Loading");
    }

    fn hide(&self) {
        debug!("Loading finished");
    }
}

impl HistoryStack for TerminalUi {
    fn reset_redo(&self) {
        self.history.reset_redo();
    }

    fn reset_undo(&self) {
        self.history.reset_undo();
    }
}
