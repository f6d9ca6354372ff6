//! Undo/redo history.

use std::cell::RefCell;

use crate::ui::HistoryStack;

/// Undo and redo stacks of editor actions.
///
/// Recording a new action discards everything that could be redone. Undoing
/// moves the latest action onto the redo stack and hands it back so the
/// caller can revert it.
#[derive(Debug)]
pub struct History<A> {
    undo: RefCell<Vec<A>>,
    redo: RefCell<Vec<A>>,
}

impl<A> Default for History<A> {
    fn default() -> Self {
        Self {
            undo: RefCell::new(Vec::new()),
            redo: RefCell::new(Vec::new()),
        }
    }
}

impl<A: Clone> History<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, action: A) {
        self.undo.borrow_mut().push(action);
        self.redo.borrow_mut().clear();
    }

    /// Pop the latest action for reverting.
    pub fn undo(&self) -> Option<A> {
        let action = self.undo.borrow_mut().pop()?;
        self.redo.borrow_mut().push(action.clone());
        Some(action)
    }

    /// Pop the latest undone action for re-applying.
    pub fn redo(&self) -> Option<A> {
        let action = self.redo.borrow_mut().pop()?;
        self.undo.borrow_mut().push(action.clone());
        Some(action)
    }

    pub fn undo_len(&self) -> usize {
        self.undo.borrow().len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.borrow().len()
    }
}

impl<A> HistoryStack for History<A> {
    fn reset_redo(&self) {
        self.redo.borrow_mut().clear();
    }

    fn reset_undo(&self) {
        self.undo.borrow_mut().clear();
    }
}
