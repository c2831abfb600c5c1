//! Ordered nesting stack of in-stack popups.
//!
//! Insertion order is nesting order: the last popup pushed is the topmost and
//! gets first claim on input. Entries are weak; a disposed or dropped popup
//! left behind by a missed hide call is a tombstone, removed lazily the next
//! time the stack is read from the top.

use std::rc::{Rc, Weak};

use crate::popup::Popup;

#[derive(Default)]
pub(crate) struct PopupStack {
    entries: Vec<Weak<dyn Popup>>,
}

impl PopupStack {
    pub fn push(&mut self, popup: &Rc<dyn Popup>) {
        self.entries.push(Rc::downgrade(popup));
    }

    /// Topmost live, non-disposed popup. Dead and disposed entries above it
    /// are popped as they are encountered; this is the only tombstone removal
    /// outside explicit hide notifications.
    pub fn peek_valid(&mut self) -> Option<Rc<dyn Popup>> {
        while let Some(entry) = self.entries.last() {
            match entry.upgrade() {
                Some(popup) if !popup.is_disposed() => return Some(popup),
                _ => {
                    self.entries.pop();
                }
            }
        }
        None
    }

    /// Raw top entry, upgraded. No pruning; facade operations that inspect
    /// only the topmost entry go through here.
    pub fn top(&self) -> Option<Rc<dyn Popup>> {
        self.entries.last().and_then(Weak::upgrade)
    }

    /// Excise the first entry matching `popup`, wherever it sits. A popup may
    /// be closed out of nesting order (e.g. programmatically) and must still
    /// leave the stack. Returns whether a matching entry was found.
    pub fn remove(&mut self, popup: &Rc<dyn Popup>) -> bool {
        let found = self
            .entries
            .iter()
            .position(|entry| entry.upgrade().is_some_and(|live| Rc::ptr_eq(&live, popup)));
        match found {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Still-allocated entries, topmost first. A snapshot rather than a
    /// borrowing iterator: callers routinely mutate the stack while walking it.
    pub fn snapshot_top_down(&self) -> Vec<Rc<dyn Popup>> {
        self.entries.iter().rev().filter_map(Weak::upgrade).collect()
    }
}
