// SPDX-License-Identifier: MPL-2.0
//! Single-threaded observable values.
//!
//! An [`Observable`] is a shared cell: clones point at the same value, any
//! holder may read it, and writers notify every registered callback after the
//! value changes. It stands in for the reactive refs a UI framework would
//! provide, so the state layer does not depend on a specific runtime.
//!
//! # Example
//!
//! ```
//! use haskellito::observable::Observable;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let value = Observable::new(1);
//! let seen = Rc::new(Cell::new(0));
//! let sink = Rc::clone(&seen);
//! value.subscribe(move |v| sink.set(*v));
//!
//! value.set(7);
//! assert_eq!(seen.get(), 7);
//! assert_eq!(value.get(), 7);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

/// Handle returned by [`Observable::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

struct Inner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<(Subscription, Callback<T>)>>,
    next_id: Cell<u64>,
}

/// Shared, observable value cell.
pub struct Observable<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.inner.value.borrow())
            .field("subscribers", &self.inner.subscribers.borrow().len())
            .finish()
    }
}

impl<T: Default + Clone + PartialEq> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + PartialEq> Observable<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Returns a copy of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Runs `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Replaces the value and notifies subscribers.
    ///
    /// Writing a value equal to the current one is not a change: nothing is
    /// notified and `false` is returned.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value;
        }
        self.notify();
        true
    }

    /// Registers `callback` to run after every change.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let subscription = Subscription(id);
        self.inner
            .subscribers
            .borrow_mut()
            .push((subscription, Rc::new(callback)));
        subscription
    }

    /// Removes a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut subscribers = self.inner.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(id, _)| *id != subscription);
        subscribers.len() != before
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    fn notify(&self) {
        // Callbacks may read this cell or (un)subscribe, so no borrow is held
        // while they run.
        let value = self.get();
        let callbacks: Vec<Callback<T>> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(&value);
        }
    }
}
