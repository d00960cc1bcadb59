// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event stream: a single-threaded broadcast observer list with completion.
//!
//! ## Semantics
//!
//! - Observers receive values in subscription order.
//! - There is no buffering: an observer only sees values emitted after it subscribed.
//! - [`EventStream::close`] is terminal. Live observers are told via
//!   [`Observer::complete`], later [`EventStream::emit`] calls return
//!   [`StreamClosed`], and late subscribers are completed immediately.
//!
//! Observers may subscribe, unsubscribe, emit, or close the stream from inside
//! a callback:
//!
//! - an observer added during a delivery does not receive that value;
//! - an observer removed during a delivery does not receive it if it was not reached yet;
//! - closing during a delivery stops the remaining deliveries of that value;
//! - an observer never receives a value emitted from inside its own callback.
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_menu_item::stream::{EventStream, StreamClosed};
//!
//! let stream = EventStream::<u32>::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let sink = Rc::clone(&seen);
//! stream.subscribe(move |v: &u32| sink.borrow_mut().push(*v));
//!
//! assert_eq!(stream.emit(&7), Ok(1));
//! stream.close();
//! assert_eq!(stream.emit(&8), Err(StreamClosed));
//! assert_eq!(*seen.borrow(), [7]);
//! ```

use alloc::boxed::Box;
use core::cell::{Cell, RefCell};
use core::fmt;

use smallvec::SmallVec;

/// Receives values from an [`EventStream`].
///
/// Any `FnMut(&T)` closure is an observer that ignores completion.
pub trait Observer<T: ?Sized> {
    /// Called once per emitted value.
    fn next(&mut self, value: &T);

    /// Called once when the stream closes.
    fn complete(&mut self) {}
}

impl<T: ?Sized, F: FnMut(&T)> Observer<T> for F {
    fn next(&mut self, value: &T) {
        self(value);
    }
}

/// Handle returned by [`EventStream::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Error returned when emitting on a closed stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StreamClosed;

impl fmt::Display for StreamClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("event stream is closed")
    }
}

impl core::error::Error for StreamClosed {}

type BoxedObserver<T> = Box<dyn Observer<T>>;

struct Entry<T: ?Sized> {
    id: SubscriptionId,
    /// `None` while the observer is running or after it was dropped.
    observer: Option<BoxedObserver<T>>,
    live: bool,
}

/// Broadcast stream of `&T` values.
///
/// Most streams have one or two observers; those are stored inline.
pub struct EventStream<T: ?Sized> {
    entries: RefCell<SmallVec<[Entry<T>; 2]>>,
    next_id: Cell<u64>,
    /// Nesting depth of `emit` calls; dead entries are only compacted at zero.
    depth: Cell<u32>,
    closed: Cell<bool>,
}

impl<T: ?Sized> EventStream<T> {
    /// Creates an open stream with no observers.
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(SmallVec::new()),
            next_id: Cell::new(0),
            depth: Cell::new(0),
            closed: Cell::new(false),
        }
    }

    /// Returns `true` once [`EventStream::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    /// Returns the number of live observers.
    pub fn len(&self) -> usize {
        self.entries.borrow().iter().filter(|e| e.live).count()
    }

    /// Returns `true` if no observer is attached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attaches an observer.
    ///
    /// On a closed stream the observer is completed immediately and never
    /// receives a value.
    pub fn subscribe(&self, observer: impl Observer<T> + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        if self.closed.get() {
            let mut observer = observer;
            observer.complete();
            return id;
        }
        self.entries.borrow_mut().push(Entry {
            id,
            observer: Some(Box::new(observer)),
            live: true,
        });
        id
    }

    /// Detaches an observer, returning `true` if it was attached.
    ///
    /// A detached observer is dropped without being completed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let dropped = {
            let mut entries = self.entries.borrow_mut();
            let Some(entry) = entries.iter_mut().find(|e| e.id == id && e.live) else {
                return false;
            };
            entry.live = false;
            let dropped = entry.observer.take();
            if self.depth.get() == 0 {
                entries.retain(|e| e.live);
            }
            dropped
        };
        // Dropped outside the borrow: observer destructors may touch the stream.
        drop(dropped);
        true
    }

    /// Delivers `value` to every live observer, in subscription order.
    ///
    /// Returns the number of observers reached.
    pub fn emit(&self, value: &T) -> Result<usize, StreamClosed> {
        if self.closed.get() {
            return Err(StreamClosed);
        }
        self.depth.set(self.depth.get() + 1);
        let end = self.entries.borrow().len();
        let mut delivered = 0;
        for index in 0..end {
            if self.closed.get() {
                break;
            }
            let taken = {
                let mut entries = self.entries.borrow_mut();
                entries
                    .get_mut(index)
                    .filter(|e| e.live)
                    .and_then(|e| e.observer.take().map(|o| (e.id, o)))
            };
            let Some((id, mut observer)) = taken else {
                continue;
            };
            observer.next(value);
            delivered += 1;
            self.restore(index, id, observer);
        }
        let depth = self.depth.get() - 1;
        self.depth.set(depth);
        if depth == 0 {
            self.entries.borrow_mut().retain(|e| e.live);
        }
        Ok(delivered)
    }

    /// Puts a running observer back into its slot.
    fn restore(&self, index: usize, id: SubscriptionId, mut observer: BoxedObserver<T>) {
        let closed_meanwhile = {
            let mut entries = self.entries.borrow_mut();
            match entries.get_mut(index) {
                Some(e) if e.id == id && e.live => {
                    if self.closed.get() {
                        e.live = false;
                        true
                    } else {
                        e.observer = Some(observer);
                        return;
                    }
                }
                // Unsubscribed from inside its own callback.
                _ => false,
            }
        };
        if closed_meanwhile {
            observer.complete();
        }
    }

    /// Closes the stream and completes every live observer.
    ///
    /// Returns `false` if the stream was already closed.
    pub fn close(&self) -> bool {
        if self.closed.replace(true) {
            return false;
        }
        let mut completing: SmallVec<[BoxedObserver<T>; 2]> = SmallVec::new();
        {
            let mut entries = self.entries.borrow_mut();
            for entry in entries.iter_mut().filter(|e| e.live) {
                // Running observers are completed when they return.
                if let Some(observer) = entry.observer.take() {
                    entry.live = false;
                    completing.push(observer);
                }
            }
            if self.depth.get() == 0 {
                entries.clear();
            }
        }
        tracing::trace!(observers = completing.len(), "event stream closed");
        for mut observer in completing {
            observer.complete();
        }
        true
    }
}

impl<T: ?Sized> Default for EventStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for EventStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("observers", &self.len())
            .field("closed", &self.closed.get())
            .finish_non_exhaustive()
    }
}
