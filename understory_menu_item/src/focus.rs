// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus origin tracking: the service a menu item delegates focus to.
//!
//! ## Contract
//!
//! A [`FocusTracker`] is a shared, single-threaded service. Elements are
//! registered with [`FocusTracker::monitor`], focused with an explicit
//! [`FocusOrigin`] through [`FocusTracker::focus_via`], and released with
//! [`FocusTracker::stop_monitoring`]. Methods take `&self`; implementations
//! keep their registration table behind interior mutability.
//!
//! ## Reference tracker
//!
//! [`FocusMonitor`] keeps a registration table keyed by element identity and
//! remembers the origin of the last focus transition of each monitored
//! element. Rendering layers read [`FocusMonitor::origin_of`] to pick focus
//! styling (for example a visible ring for keyboard focus only).
//!
//! ```
//! # #[cfg(feature = "headless")]
//! # fn example() {
//! use understory_menu_item::focus::{FocusMonitor, FocusOrigin, FocusTracker};
//! use understory_menu_item::headless::HeadlessElement;
//! use understory_menu_item::MenuElement;
//!
//! let monitor = FocusMonitor::<HeadlessElement>::new();
//! let el = HeadlessElement::new();
//!
//! monitor.monitor(&el, false);
//! monitor.focus_via(&el, FocusOrigin::Keyboard);
//! assert_eq!(monitor.origin_of(el.id()), Some(FocusOrigin::Keyboard));
//! assert_eq!(el.focus_count(), 1);
//!
//! monitor.stop_monitoring(&el);
//! assert!(!monitor.is_monitored(el.id()));
//! # }
//! # #[cfg(feature = "headless")]
//! # example();
//! ```

use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;

use crate::element::MenuElement;

/// How an element received focus.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FocusOrigin {
    /// Keyboard navigation (tab, arrow keys).
    Keyboard,
    /// A mouse or other precise pointer.
    Mouse,
    /// A touch screen.
    Touch,
    /// Application code, with no user gesture involved.
    #[default]
    Program,
}

impl FocusOrigin {
    /// Returns the lowercase name of the origin, as used in style class names.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyboard => "keyboard",
            Self::Mouse => "mouse",
            Self::Touch => "touch",
            Self::Program => "program",
        }
    }
}

impl fmt::Display for FocusOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A service that classifies and applies focus for registered elements.
pub trait FocusTracker<E: MenuElement> {
    /// Starts tracking focus transitions on `element`.
    ///
    /// When `force_visible` is set, the tracker also applies visible-focus
    /// styling for origins that would normally not show it.
    fn monitor(&self, element: &E, force_visible: bool);

    /// Focuses `element`, recording `origin` as the cause.
    fn focus_via(&self, element: &E, origin: FocusOrigin);

    /// Stops tracking `element`.
    fn stop_monitoring(&self, element: &E);
}

#[derive(Copy, Clone, Debug)]
struct Registration {
    /// Outstanding `monitor` calls not yet balanced by `stop_monitoring`.
    count: u32,
    force_visible: bool,
    origin: Option<FocusOrigin>,
}

/// Reference [`FocusTracker`] keyed by [`MenuElement::Id`].
///
/// Registrations are reference counted: an element monitored twice stays
/// monitored until it has been released twice.
pub struct FocusMonitor<E: MenuElement> {
    table: RefCell<HashMap<E::Id, Registration>>,
}

impl<E: MenuElement> FocusMonitor<E> {
    /// Creates a monitor with an empty registration table.
    pub fn new() -> Self {
        Self {
            table: RefCell::new(HashMap::new()),
        }
    }

    /// Returns `true` if `id` has at least one outstanding registration.
    pub fn is_monitored(&self, id: E::Id) -> bool {
        self.table.borrow().contains_key(&id)
    }

    /// Returns the number of distinct monitored elements.
    pub fn monitored_len(&self) -> usize {
        self.table.borrow().len()
    }

    /// Returns the origin of the last focus transition of a monitored element.
    ///
    /// `None` when the element is not monitored or currently has no focus
    /// recorded (see [`FocusMonitor::blur`]).
    pub fn origin_of(&self, id: E::Id) -> Option<FocusOrigin> {
        self.table.borrow().get(&id).and_then(|r| r.origin)
    }

    /// Returns whether `id` was monitored with `force_visible` set.
    pub fn forces_visible(&self, id: E::Id) -> bool {
        self.table
            .borrow()
            .get(&id)
            .is_some_and(|r| r.force_visible)
    }

    /// Records that `element` lost focus.
    pub fn blur(&self, element: &E) {
        if let Some(reg) = self.table.borrow_mut().get_mut(&element.id()) {
            reg.origin = None;
        }
    }
}

impl<E: MenuElement> Default for FocusMonitor<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: MenuElement> fmt::Debug for FocusMonitor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusMonitor")
            .field("table", &self.table.borrow())
            .finish()
    }
}

impl<E: MenuElement> FocusTracker<E> for FocusMonitor<E> {
    fn monitor(&self, element: &E, force_visible: bool) {
        let id = element.id();
        let mut table = self.table.borrow_mut();
        let reg = table.entry(id).or_insert(Registration {
            count: 0,
            force_visible,
            origin: None,
        });
        reg.count = reg.count.saturating_add(1);
        reg.force_visible |= force_visible;
        tracing::trace!(?id, count = reg.count, force_visible, "monitor element");
    }

    fn focus_via(&self, element: &E, origin: FocusOrigin) {
        let id = element.id();
        if let Some(reg) = self.table.borrow_mut().get_mut(&id) {
            reg.origin = Some(origin);
        }
        tracing::trace!(?id, %origin, "focus via tracker");
        // Table borrow is released: native focus may re-enter the monitor.
        element.focus();
    }

    fn stop_monitoring(&self, element: &E) {
        let id = element.id();
        let mut table = self.table.borrow_mut();
        let remaining = table.get_mut(&id).map(|reg| {
            reg.count = reg.count.saturating_sub(1);
            reg.count
        });
        match remaining {
            Some(0) => {
                table.remove(&id);
                tracing::trace!(?id, "stop monitoring element");
            }
            Some(count) => tracing::trace!(?id, count, "release element"),
            None => tracing::debug!(?id, "stop monitoring an element that is not monitored"),
        }
    }
}
