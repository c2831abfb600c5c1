//! Input pipeline: the driver contract and the popup-aware event pump.
//!
//! The dispatcher has to see every mouse and key event before normal routing.
//! Hosts that own their event loop call
//! [`PopupDispatcher::on_event`](crate::dispatcher::PopupDispatcher::on_event)
//! themselves; everyone else wraps their driver in [`PopupEventLoop`], which
//! pumps the driver, gives the dispatcher first look, and forwards only the
//! events the dispatcher passed through.

use std::io;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::Event;

use crate::constants::DEFAULT_POLL_INTERVAL;
use crate::dispatcher::PopupDispatcher;

pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }
}

pub enum ControlFlow {
    Continue,
    Quit,
}

/// Event pump that interposes the popup dispatcher between a driver and the
/// application's own event handling.
pub struct PopupEventLoop<D> {
    driver: D,
    dispatcher: Rc<PopupDispatcher>,
    poll_interval: Duration,
}

impl<D: InputDriver> PopupEventLoop<D> {
    pub fn new(driver: D, dispatcher: Rc<PopupDispatcher>) -> Self {
        Self {
            driver,
            dispatcher,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn set_poll_interval(&mut self, interval: Duration) {
        self.poll_interval = interval;
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn dispatcher(&self) -> &Rc<PopupDispatcher> {
        &self.dispatcher
    }

    /// Begin interception: the driver starts delivering global mouse events.
    pub fn start(&mut self) -> io::Result<()> {
        tracing::debug!("popup event loop started");
        self.driver.set_mouse_capture(true)
    }

    /// End interception and release mouse capture back to the terminal.
    pub fn stop(&mut self) -> io::Result<()> {
        tracing::debug!("popup event loop stopped");
        self.driver.set_mouse_capture(false)
    }

    /// Run the pump on the current thread. The handler receives `Some(event)`
    /// for every event the dispatcher did not intercept and `None` when the
    /// poll interval elapses idle (redraw tick), and steers the loop via
    /// [`ControlFlow`]. Queued events are drained per poll so dismissal
    /// cascades stay ahead of input bursts.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, None)? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                loop {
                    let event = self.driver.read()?;
                    // no window attribution at the terminal driver level
                    if self.dispatcher.on_event(&event, None) {
                        tracing::trace!("event consumed by popup dispatcher");
                    } else if let ControlFlow::Quit = handler(&mut self.driver, Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
