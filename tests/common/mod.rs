//! Shared fixtures for the integration suite: a scriptable popup, a recording
//! host, and a scripted input driver.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use term_popups::{InputDriver, Popup, PopupDispatcher, PopupHost, WindowHandle};

/// Surface tracing output in failing test runs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub struct TestPopup {
    this: Weak<TestPopup>,
    pub dispatcher: RefCell<Option<Weak<PopupDispatcher>>>,
    pub disposed: Cell<bool>,
    pub visible: Cell<bool>,
    pub persistent: Cell<bool>,
    pub native: Cell<bool>,
    pub bounds: Cell<Option<Rect>>,
    pub window: Cell<Option<WindowHandle>>,
    pub cancel_on_click_outside: Cell<bool>,
    pub cancel_on_deactivation: Cell<bool>,
    pub can_close: Cell<bool>,
    pub focused: Cell<bool>,
    pub cancelled: Cell<u32>,
    pub last_cancel_had_event: Cell<bool>,
    pub ui_visible: Cell<bool>,
    pub keys_seen: Cell<u32>,
    pub consume_keys: Cell<bool>,
    pub restore_silently: Cell<bool>,
}

impl TestPopup {
    pub fn new() -> Rc<TestPopup> {
        Rc::new_cyclic(|this| TestPopup {
            this: this.clone(),
            dispatcher: RefCell::new(None),
            disposed: Cell::new(false),
            visible: Cell::new(true),
            persistent: Cell::new(false),
            native: Cell::new(false),
            bounds: Cell::new(None),
            window: Cell::new(None),
            cancel_on_click_outside: Cell::new(true),
            cancel_on_deactivation: Cell::new(true),
            can_close: Cell::new(true),
            focused: Cell::new(false),
            cancelled: Cell::new(0),
            last_cancel_had_event: Cell::new(false),
            ui_visible: Cell::new(true),
            keys_seen: Cell::new(0),
            consume_keys: Cell::new(true),
            restore_silently: Cell::new(false),
        })
    }

    pub fn with_bounds(bounds: Rect) -> Rc<TestPopup> {
        let popup = Self::new();
        popup.bounds.set(Some(bounds));
        popup
    }

    /// Register with the dispatcher and fire the show notification.
    pub fn show(
        self: &Rc<Self>,
        dispatcher: &Rc<PopupDispatcher>,
        in_stack: bool,
    ) -> Rc<dyn Popup> {
        *self.dispatcher.borrow_mut() = Some(Rc::downgrade(dispatcher));
        let shared: Rc<dyn Popup> = self.clone();
        dispatcher.on_popup_shown(&shared, in_stack);
        shared
    }

    pub fn as_popup(self: &Rc<Self>) -> Rc<dyn Popup> {
        self.clone()
    }
}

impl Popup for TestPopup {
    fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    fn is_visible(&self) -> bool {
        self.visible.get()
    }

    fn is_persistent(&self) -> bool {
        self.persistent.get()
    }

    fn is_native_popup(&self) -> bool {
        self.native.get()
    }

    fn set_ui_visible(&self, visible: bool) {
        self.ui_visible.set(visible);
    }

    fn content_bounds(&self) -> Option<Rect> {
        self.bounds.get()
    }

    fn window(&self) -> Option<WindowHandle> {
        self.window.get()
    }

    fn is_cancel_on_click_outside(&self) -> bool {
        self.cancel_on_click_outside.get()
    }

    fn is_cancel_on_window_deactivation(&self) -> bool {
        self.cancel_on_deactivation.get()
    }

    fn can_close(&self) -> bool {
        self.can_close.get()
    }

    fn cancel(&self, event: Option<&MouseEvent>) {
        self.cancelled.set(self.cancelled.get() + 1);
        self.last_cancel_had_event.set(event.is_some());
        self.visible.set(false);
        self.disposed.set(true);
        // a real popup's cancel tears down its UI and fires the hide
        // notification; re-enter the dispatcher the same way
        let dispatcher = self.dispatcher.borrow().clone();
        if let Some(dispatcher) = dispatcher.and_then(|weak| weak.upgrade())
            && let Some(this) = self.this.upgrade()
        {
            let shared: Rc<dyn Popup> = this;
            dispatcher.on_popup_hidden(&shared);
        }
    }

    fn is_focused(&self) -> bool {
        self.focused.get()
    }

    fn request_focus(&self) -> bool {
        self.focused.set(true);
        true
    }

    fn dispatch_key(&self, _event: &KeyEvent) -> bool {
        self.keys_seen.set(self.keys_seen.get() + 1);
        self.consume_keys.get()
    }

    fn set_restore_focus_silently(&self) {
        self.restore_silently.set(true);
    }
}

#[derive(Default)]
pub struct RecordingHost {
    pub pushes: Cell<u32>,
    pub removes: Cell<u32>,
    pub menu_active: Cell<bool>,
    pub descendant_pairs: RefCell<Vec<(WindowHandle, WindowHandle)>>,
}

impl PopupHost for RecordingHost {
    fn push_dispatcher(&self) {
        self.pushes.set(self.pushes.get() + 1);
    }

    fn remove_dispatcher(&self) {
        self.removes.set(self.removes.get() + 1);
    }

    fn menu_selection_active(&self) -> bool {
        self.menu_active.get()
    }

    fn is_descendant_window(&self, child: WindowHandle, ancestor: WindowHandle) -> bool {
        self.descendant_pairs.borrow().contains(&(child, ancestor))
    }
}

pub fn dispatcher_with_host() -> (Rc<PopupDispatcher>, Rc<RecordingHost>) {
    let host = Rc::new(RecordingHost::default());
    let dispatcher = Rc::new(PopupDispatcher::new(host.clone()));
    (dispatcher, host)
}

/// Input driver replaying a fixed event script.
pub struct ScriptedDriver {
    pub events: VecDeque<Event>,
    pub mouse_capture: bool,
}

impl ScriptedDriver {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into(),
            mouse_capture: false,
        }
    }
}

impl InputDriver for ScriptedDriver {
    fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> io::Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::other("event script exhausted"))
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        self.mouse_capture = enabled;
        Ok(())
    }
}

pub fn press(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

pub fn press_event(column: u16, row: u16) -> Event {
    Event::Mouse(press(column, row))
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn rect(x: u16, y: u16, width: u16, height: u16) -> Rect {
    Rect {
        x,
        y,
        width,
        height,
    }
}
