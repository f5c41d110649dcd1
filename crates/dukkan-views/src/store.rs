//! # Observable State Container
//!
//! A small get-state/subscribe store. Every view-model in this crate keeps
//! its screen state in a [`Store`]; a rendering shell reads snapshots with
//! [`Store::get_state`] and registers listeners with [`Store::subscribe`]
//! to be told after each committed transition.
//!
//! ## Rules
//! - Reducers are pure mutations: they receive `&mut S` and must not block
//!   or perform I/O
//! - Listeners run after the lock is released, against a snapshot; they may
//!   freely call back into the store
//! - A failed [`Store::try_update`] must leave the state untouched and does
//!   not notify
//!
//! ## Usage
//! ```rust
//! use dukkan_views::store::Store;
//!
//! let store = Store::new(0u32);
//! let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
//!
//! let sink = seen.clone();
//! let _sub = store.subscribe(move |n| sink.lock().unwrap().push(*n));
//!
//! store.update(|n| *n += 1);
//! store.update(|n| *n += 1);
//! assert_eq!(store.get_state(), 2);
//! assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
//! ```

use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Listener invoked with a state snapshot after each committed transition.
type Listener<S> = Arc<dyn Fn(&S) + Send + Sync + 'static>;

struct Inner<S> {
    state: S,
    listeners: Vec<(u64, Listener<S>)>,
    next_id: u64,
}

/// Shared observable state container.
///
/// Cloning the store clones the handle; all clones share the same state
/// and listener registry.
pub struct Store<S> {
    inner: Arc<Mutex<Inner<S>>>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Store {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Clone> Store<S> {
    /// Creates a store holding `initial`.
    pub fn new(initial: S) -> Self {
        Store {
            inner: Arc::new(Mutex::new(Inner {
                state: initial,
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Returns a snapshot of the current state.
    pub fn get_state(&self) -> S {
        self.lock().state.clone()
    }

    /// Registers a listener and returns its subscription handle.
    ///
    /// The listener stays registered until the handle is dropped (or
    /// [`Subscription::unsubscribe`] is called explicitly).
    pub fn subscribe(&self, listener: impl Fn(&S) + Send + Sync + 'static) -> Subscription<S> {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Applies a reducer and notifies listeners with the new state.
    pub fn update(&self, reducer: impl FnOnce(&mut S)) {
        let (snapshot, listeners) = {
            let mut inner = self.lock();
            reducer(&mut inner.state);
            (
                inner.state.clone(),
                inner
                    .listeners
                    .iter()
                    .map(|(_, l)| Arc::clone(l))
                    .collect::<Vec<_>>(),
            )
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// Applies a fallible reducer; listeners are notified only on `Ok`.
    ///
    /// The reducer must leave the state unchanged when it returns `Err`
    /// (the draft/transition types in this workspace all guarantee that).
    pub fn try_update<R, E>(&self, reducer: impl FnOnce(&mut S) -> Result<R, E>) -> Result<R, E> {
        let (result, notification) = {
            let mut inner = self.lock();
            let result = reducer(&mut inner.state);
            match result {
                Ok(value) => {
                    let snapshot = inner.state.clone();
                    let listeners = inner
                        .listeners
                        .iter()
                        .map(|(_, l)| Arc::clone(l))
                        .collect::<Vec<_>>();
                    (Ok(value), Some((snapshot, listeners)))
                }
                Err(e) => (Err(e), None),
            }
        };
        if let Some((snapshot, listeners)) = notification {
            for listener in listeners {
                listener(&snapshot);
            }
        }
        result
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<S>> {
        // A poisoned lock still holds coherent state; recover it.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle for a registered listener; dropping it unsubscribes.
pub struct Subscription<S> {
    id: u64,
    inner: Weak<Mutex<Inner<S>>>,
}

impl<S> Subscription<S> {
    /// Removes the listener now instead of waiting for drop.
    pub fn unsubscribe(self) {}
}

impl<S> Drop for Subscription<S> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
