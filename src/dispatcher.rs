//! The popup dispatcher: lifecycle facade and global input interception.
//!
//! One dispatcher instance is constructed by the application's composition
//! root and shared as `Rc<PopupDispatcher>`. Every method takes `&self`: a
//! popup's `cancel` synchronously re-enters the hide path while an
//! interception loop is still walking the stack, so state lives behind
//! `RefCell`s and no borrow is ever held across a call into popup or host
//! code. Loops re-read the stack top after every mutating call instead of
//! caching a position.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crossterm::event::{Event, KeyEvent, MouseEvent, MouseEventKind};

use crate::host::PopupHost;
use crate::keybindings::{KeyCombo, default_close_request};
use crate::popup::{Popup, WindowHandle, rect_contains};
use crate::registry::LiveRegistry;
use crate::stack::PopupStack;

pub struct PopupDispatcher {
    stack: RefCell<PopupStack>,
    registry: RefCell<LiveRegistry>,
    host: Rc<dyn PopupHost>,
    close_request: Cell<KeyCombo>,
}

impl PopupDispatcher {
    pub fn new(host: Rc<dyn PopupHost>) -> Self {
        Self {
            stack: RefCell::new(PopupStack::default()),
            registry: RefCell::new(LiveRegistry::default()),
            host,
            close_request: Cell::new(default_close_request()),
        }
    }

    /// Override the gesture classified as a close request (default: plain `Esc`).
    pub fn set_close_request(&self, combo: KeyCombo) {
        self.close_request.set(combo);
    }

    /// Must be called exactly once when `popup` becomes visible. In-stack
    /// popups join the nesting order; persistent out-of-stack popups join the
    /// activation-toggle set; everything joins the focus-scan set.
    pub fn on_popup_shown(&self, popup: &Rc<dyn Popup>, in_stack: bool) {
        let mut engaged = false;
        if in_stack {
            let mut stack = self.stack.borrow_mut();
            engaged = stack.is_empty();
            stack.push(popup);
        } else if popup.is_persistent() {
            self.registry.borrow_mut().add_persistent(popup);
        }
        self.registry.borrow_mut().add_all(popup);
        tracing::debug!(
            in_stack,
            depth = self.stack.borrow().len(),
            "popup shown"
        );
        if engaged {
            self.host.push_dispatcher();
        }
    }

    /// Must be called exactly once when `popup` stops being visible, no matter
    /// who dismissed it. Hiding a popup that was never shown is a no-op. The
    /// stack entry is excised before any external callback fires, so observers
    /// never see a hidden popup still on top.
    pub fn on_popup_hidden(&self, popup: &Rc<dyn Popup>) {
        let (was_in_stack, now_empty) = {
            let mut stack = self.stack.borrow_mut();
            let was_in_stack = stack.remove(popup);
            (was_in_stack, stack.is_empty())
        };
        self.registry.borrow_mut().remove(popup);
        tracing::debug!(
            was_in_stack,
            depth = self.stack.borrow().len(),
            "popup hidden"
        );
        if was_in_stack && now_empty {
            self.host.remove_dispatcher();
        }
    }

    /// Hide every natively backed persistent popup; called when the owning
    /// window deactivates. Non-native persistent popups inherit visibility
    /// from their window and are left alone.
    pub fn hide_persistent_popups(&self) {
        self.set_persistent_ui_visible(false);
    }

    /// Counterpart of [`hide_persistent_popups`](Self::hide_persistent_popups)
    /// for window re-activation.
    pub fn restore_persistent_popups(&self) {
        self.set_persistent_ui_visible(true);
    }

    fn set_persistent_ui_visible(&self, visible: bool) {
        let persistent = self.registry.borrow().persistent_live();
        for popup in persistent {
            if popup.is_native_popup() {
                popup.set_ui_visible(visible);
            }
        }
    }

    /// Cancel the topmost popup if it is visible, allows cancellation on
    /// window deactivation, and permits closing. Inspects only the top entry:
    /// no cascade, no geometry. Returns whether a popup was closed.
    pub fn close_active_popup(&self) -> bool {
        let Some(popup) = self.stack.borrow().top() else {
            return false;
        };
        if popup.is_visible() && popup.is_cancel_on_window_deactivation() && popup.can_close() {
            popup.cancel(None);
            return true;
        }
        false
    }

    /// Close stacked popups top-down until one refuses. True iff at least one
    /// closed. Only the deactivation policy applies here, never the
    /// click-outside policy or geometry.
    pub fn close(&self) -> bool {
        if !self.close_active_popup() {
            return false;
        }
        while self.close_active_popup() {}
        true
    }

    /// Delegate a focus request to the topmost stack entry.
    pub fn request_focus(&self) -> bool {
        let Some(popup) = self.stack.borrow().top() else {
            return false;
        };
        popup.request_focus()
    }

    /// Mark every live shown popup so its eventual dismissal does not try to
    /// steal focus back. No-op while the stack is empty.
    pub fn set_restore_focus_silently(&self) {
        if self.stack.borrow().is_empty() {
            return;
        }
        let live = self.registry.borrow().all_live();
        for popup in live {
            popup.set_restore_focus_silently();
        }
    }

    pub fn is_popup_focused(&self) -> bool {
        self.focused_popup().is_some()
    }

    fn focused_popup(&self) -> Option<Rc<dyn Popup>> {
        let live = self.registry.borrow().all_live();
        live.into_iter().find(|popup| popup.is_focused())
    }

    /// Topmost stack entry, if any. Raw read; tombstones are pruned on the
    /// interception path, not here.
    pub fn active_popup(&self) -> Option<Rc<dyn Popup>> {
        self.stack.borrow().top()
    }

    /// Still-allocated stack contents, topmost first.
    pub fn popups(&self) -> Vec<Rc<dyn Popup>> {
        self.stack.borrow().snapshot_top_down()
    }

    pub fn has_stacked_popups(&self) -> bool {
        !self.stack.borrow().is_empty()
    }

    /// Single interception entry point for a host event pipeline. Returns
    /// whether the event was fully handled and must not be routed further.
    /// `source` is the host window the event originated in, when the host
    /// tracks that; terminal drivers pass `None`.
    pub fn on_event(&self, event: &Event, source: Option<WindowHandle>) -> bool {
        match event {
            Event::Mouse(mouse) => self.dispatch_mouse(mouse, source),
            Event::Key(key) => self.dispatch_key(key),
            _ => false,
        }
    }

    /// Mouse-press cancellation cascade. Only press events participate; the
    /// press location is already in screen cells. Walks the stack from the
    /// top, cancelling popups the press falls outside of, until a popup claims
    /// the press, refuses dismissal, or the stack empties. Returns whether the
    /// press dismissed anything (a dismissing press is consumed; a press that
    /// stops the walk without cancelling routes normally).
    pub fn dispatch_mouse(&self, event: &MouseEvent, source: Option<WindowHandle>) -> bool {
        if !matches!(event.kind, MouseEventKind::Down(_)) {
            return false;
        }
        self.registry.borrow_mut().sweep_dead();
        if self.stack.borrow().is_empty() {
            return false;
        }
        let (column, row) = (event.column, event.row);
        let mut cancelled_any = false;
        loop {
            // re-read the top every pass: cancel() below re-enters the hide
            // path and shrinks the stack mid-walk
            let Some(popup) = self.stack.borrow_mut().peek_valid() else {
                return cancelled_any;
            };
            if let (Some(source), Some(own)) = (source, popup.window())
                && source != own
                && self.host.is_descendant_window(source, own)
            {
                // press came from a window nested under the popup (e.g. a
                // child dialog): the popup legitimately contains it
                return cancelled_any;
            }
            let Some(bounds) = popup.content_bounds() else {
                // content detached from the screen: cancel unconditionally and
                // stop, leaving the popups beneath untouched
                tracing::debug!(column, row, "cancelling detached popup");
                popup.cancel(Some(event));
                return true;
            };
            if rect_contains(bounds, column, row) || !popup.is_cancel_on_click_outside() {
                return cancelled_any;
            }
            if !popup.can_close() {
                return cancelled_any;
            }
            if self.host.menu_selection_active() {
                // click is choosing a context-menu item
                return cancelled_any;
            }
            tracing::debug!(column, row, "cancelling popup on outside press");
            popup.cancel(Some(event));
            cancelled_any = true;
        }
    }

    /// Key routing: a close-request goes to the topmost valid stacked popup,
    /// anything else to whichever shown popup reports itself focused. Returns
    /// whether the popup consumed the event; no key semantics live here.
    pub fn dispatch_key(&self, event: &KeyEvent) -> bool {
        self.registry.borrow_mut().sweep_dead();
        let target = if self.close_request.get().matches_press(event) {
            self.stack.borrow_mut().peek_valid()
        } else {
            self.focused_popup()
        };
        match target {
            Some(popup) => popup.dispatch_key(event),
            None => false,
        }
    }
}
