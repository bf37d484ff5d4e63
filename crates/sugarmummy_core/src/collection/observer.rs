//! Change notification contract for observable entity lists.
//!
//! # Responsibility
//! - Register and drop subscriber callbacks for one list.
//! - Deliver change notifications synchronously, in mutation order.
//!
//! # Invariants
//! - A notification is only emitted after the mutation is fully applied, so
//!   callbacks always observe complete state.
//! - Failed mutations never emit a notification.

use std::fmt::{Debug, Formatter};

/// One committed change to an observable list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    /// An element was appended at `index`.
    Added { index: usize },
    /// The element at `index` was replaced in place.
    Replaced { index: usize },
    /// The element previously at `index` was removed.
    Removed { index: usize },
    /// Contents were replaced or reordered as a whole.
    Reset { len: usize },
    /// The filter of a filtered list was replaced; backing contents unchanged.
    PredicateChanged,
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn FnMut(&ListChange, &[T])>;

/// Subscriber registry owned by one list.
pub struct ChangeObservers<T> {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback<T>)>,
}

impl<T> Default for ChangeObservers<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
        }
    }
}

impl<T> ChangeObservers<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback receiving each change and the updated contents.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ListChange, &[T]) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Removes one subscriber. Returns `false` when the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Delivers one change to every subscriber in registration order.
    pub fn notify(&mut self, change: &ListChange, contents: &[T]) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(change, contents);
        }
    }
}

impl<T> Debug for ChangeObservers<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeObservers")
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}
