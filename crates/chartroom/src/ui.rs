//! Editor surfaces the resolver drives.
//!
//! These are requests to the hosting user interface. They are all
//! non-blocking: presenting a dialog or changing route happens after the
//! call returns.

use chartroom_core::route::DiagramRoute;

/// Dialogs the resolver can ask the editor to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialog {
    /// Pick one of the stored diagrams.
    ///
    /// With `can_close` unset the user must choose before continuing.
    OpenDiagram { can_close: bool },
    /// Start a new, empty diagram.
    CreateDiagram,
}

pub trait DialogPresenter {
    fn open(&self, dialog: Dialog);
}

pub trait Navigator {
    fn navigate(&self, route: &DiagramRoute);
}

/// Full-screen loading indicator.
pub trait LoadingIndicator {
    fn show(&self);
    fn hide(&self);
}

/// Undo/redo history of the diagram being edited.
pub trait HistoryStack {
    fn reset_redo(&self);
    fn reset_undo(&self);
}
