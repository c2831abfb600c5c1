//! Stacked transient popup dispatch and input arbitration for terminal shells.
//!
//! Tracks the nesting order of modal-style popups (menus, completion lists,
//! hints) shown above an application's windows, intercepts mouse presses and
//! keys ahead of normal routing, and decides which popup receives input and
//! when one should be dismissed. That includes the outside-click cascade that
//! can walk a single press through several stacked popups.
//!
//! The application's composition root constructs one [`PopupDispatcher`]
//! (shared as `Rc`), wires it to the host through [`PopupHost`], and feeds it
//! every input event, either by wrapping its driver in [`PopupEventLoop`] or
//! by calling [`PopupDispatcher::on_event`] from its own loop. Popups
//! implement the [`Popup`] capability contract and report their show/hide
//! lifecycle via [`PopupDispatcher::on_popup_shown`] /
//! [`PopupDispatcher::on_popup_hidden`]. All of it is single-threaded and
//! re-entrancy-safe: cancelling a popup mid-cascade may synchronously hide it
//! and shrink the stack being walked.

pub mod constants;
pub mod dispatcher;
pub mod host;
pub mod keybindings;
pub mod pipeline;
pub mod popup;

mod registry;
mod stack;

pub use dispatcher::PopupDispatcher;
pub use host::{NullHost, PopupHost};
pub use keybindings::{KeyCombo, default_close_request};
pub use pipeline::{ControlFlow, InputDriver, PopupEventLoop};
pub use popup::{Popup, WindowHandle, rect_contains};
