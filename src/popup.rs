//! The capability contract every popup object must implement.
//!
//! A popup is owned by whoever showed it; the dispatcher only keeps weak
//! references. All methods take `&self` because popups are shared as
//! `Rc<dyn Popup>` and may re-enter the dispatcher from inside a callback
//! (cancel triggers the hide path synchronously), so implementations keep
//! their mutable state behind `Cell`/`RefCell`.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::Rect;

/// Opaque identifier for a host window, minted by the host application.
///
/// The dispatcher never interprets the value; it only hands pairs of handles
/// to [`PopupHost::is_descendant_window`](crate::host::PopupHost) when a mouse
/// press arrives tagged with its originating window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowHandle(pub u64);

pub trait Popup {
    /// True once the popup object has been torn down. Disposed popups left in
    /// the stack are tombstones and are pruned lazily on the next read.
    fn is_disposed(&self) -> bool;

    fn is_visible(&self) -> bool;

    /// Persistent popups shown outside the stack are toggled rather than
    /// dismissed when the host window activation changes.
    fn is_persistent(&self) -> bool;

    /// Whether the popup is backed by its own host surface. Only natively
    /// backed persistent popups are toggled by
    /// [`hide_persistent_popups`](crate::dispatcher::PopupDispatcher::hide_persistent_popups);
    /// the rest inherit visibility from their owning window.
    fn is_native_popup(&self) -> bool;

    fn set_ui_visible(&self, visible: bool);

    /// Screen-cell bounds of the popup content, or `None` while the content
    /// is detached from the screen.
    fn content_bounds(&self) -> Option<Rect>;

    /// Handle of the popup's own overlay window, when the host backs the
    /// popup with one. A press originating in a window nested beneath this
    /// one (a child dialog) counts as a press inside the popup.
    fn window(&self) -> Option<WindowHandle>;

    fn is_cancel_on_click_outside(&self) -> bool;

    fn is_cancel_on_window_deactivation(&self) -> bool;

    /// Consulted before every dismissal; `cancel` is never called when this
    /// returns false.
    fn can_close(&self) -> bool;

    /// Dismiss the popup. Must route back into
    /// [`on_popup_hidden`](crate::dispatcher::PopupDispatcher::on_popup_hidden)
    /// exactly once per show, synchronously or not, no matter who initiated
    /// the dismissal. `event` carries the mouse press that triggered an
    /// outside-click cancellation, when there was one.
    fn cancel(&self, event: Option<&MouseEvent>);

    fn is_focused(&self) -> bool;

    fn request_focus(&self) -> bool;

    /// Handle a key event routed to this popup. Returns whether the event was
    /// consumed; the dispatcher performs no key semantics of its own.
    fn dispatch_key(&self, event: &KeyEvent) -> bool;

    /// Cooperative hint: the popup's eventual dismissal should not try to
    /// steal focus back. Consumed by the popup's own disposal logic.
    fn set_restore_focus_silently(&self);
}

/// Half-open containment test in screen cells; zero-sized rects contain nothing.
pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let max_x = rect.x.saturating_add(rect.width);
    let max_y = rect.y.saturating_add(rect.height);
    column >= rect.x && column < max_x && row >= rect.y && row < max_y
}
