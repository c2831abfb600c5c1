//! Weak bookkeeping for every currently shown popup.
//!
//! Two collections ride alongside the nesting stack: the persistent set
//! (popups shown outside the stack that get toggled on window activation
//! changes) and the all-popups set (everything currently shown, scanned for
//! focus queries). Both hold weak references (the caller keeps the strong
//! handle) and are pruned deterministically by `sweep_dead` at interception
//! entry rather than waiting on hide notifications that may never come.

use std::rc::{Rc, Weak};

use crate::popup::Popup;

/// Identity-keyed weak collection; membership is by allocation, not value.
#[derive(Default)]
struct WeakSet {
    entries: Vec<Weak<dyn Popup>>,
}

impl WeakSet {
    fn add(&mut self, popup: &Rc<dyn Popup>) {
        self.entries.push(Rc::downgrade(popup));
    }

    fn remove(&mut self, popup: &Rc<dyn Popup>) {
        self.entries
            .retain(|entry| !entry.upgrade().is_some_and(|live| Rc::ptr_eq(&live, popup)));
    }

    fn sweep_dead(&mut self) {
        self.entries.retain(|entry| entry.strong_count() > 0);
    }

    fn live(&self) -> Vec<Rc<dyn Popup>> {
        self.entries.iter().filter_map(Weak::upgrade).collect()
    }
}

#[derive(Default)]
pub(crate) struct LiveRegistry {
    persistent: WeakSet,
    all: WeakSet,
}

impl LiveRegistry {
    /// Every popup passed to a show notification lands here, stack or not.
    pub fn add_all(&mut self, popup: &Rc<dyn Popup>) {
        self.all.add(popup);
    }

    pub fn add_persistent(&mut self, popup: &Rc<dyn Popup>) {
        self.persistent.add(popup);
    }

    /// Hide notification: drop the popup from both sets. Unknown popups are a
    /// silent no-op.
    pub fn remove(&mut self, popup: &Rc<dyn Popup>) {
        self.persistent.remove(popup);
        self.all.remove(popup);
    }

    /// Deterministic prune of entries whose strong handle has been dropped.
    pub fn sweep_dead(&mut self) {
        self.persistent.sweep_dead();
        self.all.sweep_dead();
    }

    /// Live persistent popups, in registration order. A snapshot: callers act
    /// on each popup after releasing their borrow of the registry.
    pub fn persistent_live(&self) -> Vec<Rc<dyn Popup>> {
        self.persistent.live()
    }

    /// Every live shown popup, in registration order. Snapshot, as above.
    pub fn all_live(&self) -> Vec<Rc<dyn Popup>> {
        self.all.live()
    }

    #[cfg(test)]
    fn all_len(&self) -> usize {
        self.all.entries.len()
    }
}
