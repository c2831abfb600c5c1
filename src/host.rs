//! Host toolkit services the dispatcher consults during interception.

use crate::popup::WindowHandle;

/// Seam to the host application's input machinery.
///
/// The dispatcher does not implement modal-input management itself; it tells
/// the host's manager when it needs to be the active arbiter and asks the host
/// the two questions the mouse cascade cannot answer alone. Query methods
/// default to the conservative answer so a minimal host only has to wire the
/// two registration calls.
pub trait PopupHost {
    /// The popup stack just went from empty to non-empty: route modal input
    /// through the dispatcher from now on.
    fn push_dispatcher(&self);

    /// The popup stack just emptied: stop routing modal input through the
    /// dispatcher.
    fn remove_dispatcher(&self);

    /// Whether a context-menu selection is currently underway in the host.
    /// Clicking to choose a menu item must not cancel the owning popup.
    fn menu_selection_active(&self) -> bool {
        false
    }

    /// Whether `child` is nested underneath `ancestor` in the host's window
    /// tree. Used to let a press from a popup's child dialog pass through
    /// instead of cancelling the popup.
    fn is_descendant_window(&self, child: WindowHandle, ancestor: WindowHandle) -> bool {
        let _ = (child, ancestor);
        false
    }
}

/// Host stub for callers that have no modal-input manager to notify.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl PopupHost for NullHost {
    fn push_dispatcher(&self) {}

    fn remove_dispatcher(&self) {}
}
