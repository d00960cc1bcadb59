// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The menu item and its builder.
//!
//! ## Lifecycle
//!
//! A [`MenuItem`] is [`Lifecycle::Live`] from [`MenuItemBuilder::build`] until
//! [`MenuItem::destroy`] (or drop), then [`Lifecycle::Destroyed`] forever.
//!
//! - Building with a focus tracker registers the element once, with
//!   `force_visible = false`.
//! - Destroying releases that registration once and closes its hover stream.
//!   Destroying again does nothing.
//!
//! ## Disabled items
//!
//! `disabled` is the only gate at this layer: a disabled item cancels clicks
//! ([`MenuItem::handle_click`]), never broadcasts hover
//! ([`MenuItem::handle_pointer_enter`]), and is skipped by sequential keyboard
//! navigation ([`MenuItem::tab_index`]).

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use crate::element::{FALLBACK_TEXT_NODE_TYPE, HostDocument, MenuElement, direct_text};
use crate::event::{InteractionEvent, Outcome};
use crate::focus::{FocusOrigin, FocusTracker};
use crate::stream::EventStream;

/// Lifecycle state of a [`MenuItem`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Interactive; the hover stream is open.
    Live,
    /// Torn down; the hover stream is closed.
    Destroyed,
}

/// Reachability of the item in sequential keyboard navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TabIndex {
    /// Reachable, in document order (`tabindex="0"`).
    Default,
    /// Not reachable (`tabindex="-1"`).
    Skip,
}

impl TabIndex {
    /// Numeric attribute value.
    pub const fn value(self) -> i32 {
        match self {
            Self::Default => 0,
            Self::Skip => -1,
        }
    }

    /// Attribute value as a string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "0",
            Self::Skip => "-1",
        }
    }
}

/// Accessibility role of the item.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    /// A plain selectable action.
    #[default]
    Item,
    /// An action with an independent checked state.
    Checkbox,
    /// An action that is one of a mutually exclusive group.
    Radio,
}

impl Role {
    /// Attribute value for the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Item => "menuitem",
            Self::Checkbox => "menuitemcheckbox",
            Self::Radio => "menuitemradio",
        }
    }
}

/// Class applied while the owning menu highlights the item.
pub const HIGHLIGHTED_CLASS: &str = "menu-item-highlighted";

/// Class applied while the item opens a submenu.
pub const SUBMENU_TRIGGER_CLASS: &str = "menu-item-submenu-trigger";

/// Snapshot of the presentation state a renderer binds on the host element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MenuItemAttributes {
    /// Accessibility role.
    pub role: Role,
    /// Keyboard reachability.
    pub tab_index: TabIndex,
    /// Value of the `aria-disabled` state.
    pub aria_disabled: bool,
    /// Whether the host carries the `disabled` attribute.
    pub disabled: bool,
    /// Whether the owning menu highlights the item.
    pub highlighted: bool,
    /// Whether the item opens a submenu.
    pub triggers_submenu: bool,
    /// Whether the renderer should skip the ripple effect.
    pub disable_ripple: bool,
}

impl MenuItemAttributes {
    /// Calls `f` with each host attribute name and value.
    ///
    /// `disabled` is a boolean attribute and is only reported when set, with an
    /// empty value.
    pub fn for_each_attr(&self, mut f: impl FnMut(&'static str, &'static str)) {
        f("role", self.role.as_str());
        f("tabindex", self.tab_index.as_str());
        f(
            "aria-disabled",
            if self.aria_disabled { "true" } else { "false" },
        );
        if self.disabled {
            f("disabled", "");
        }
    }

    /// Returns the state classes that apply to the host.
    pub fn class_list(&self) -> impl Iterator<Item = &'static str> {
        [
            (HIGHLIGHTED_CLASS, self.highlighted),
            (SUBMENU_TRIGGER_CLASS, self.triggers_submenu),
        ]
        .into_iter()
        .filter_map(|(class, on)| on.then_some(class))
    }
}

/// Builder for a [`MenuItem`].
///
/// Collaborators are optional. Without a document, text nodes are recognized
/// by [`FALLBACK_TEXT_NODE_TYPE`]; without a focus tracker, focus goes straight
/// to the element and nothing is registered.
pub struct MenuItemBuilder<E: MenuElement> {
    element: E,
    document: Option<Rc<dyn HostDocument>>,
    focus_tracker: Option<Rc<dyn FocusTracker<E>>>,
    role: Role,
    disabled: bool,
    disable_ripple: bool,
}

impl<E: MenuElement> MenuItemBuilder<E> {
    /// Starts a builder for `element`.
    pub fn new(element: E) -> Self {
        Self {
            element,
            document: None,
            focus_tracker: None,
            role: Role::Item,
            disabled: false,
            disable_ripple: false,
        }
    }

    /// Uses `document` to learn the text-node code.
    #[must_use]
    pub fn document(mut self, document: Rc<dyn HostDocument>) -> Self {
        self.document = Some(document);
        self
    }

    /// Delegates focus to `tracker` and registers the element with it on build.
    #[must_use]
    pub fn focus_tracker(mut self, tracker: Rc<dyn FocusTracker<E>>) -> Self {
        self.focus_tracker = Some(tracker);
        self
    }

    /// Sets the accessibility role.
    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Sets the initial disabled state.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Sets the initial ripple-disabled state.
    #[must_use]
    pub fn disable_ripple(mut self, disable_ripple: bool) -> Self {
        self.disable_ripple = disable_ripple;
        self
    }

    /// Builds the item, registering the element with the focus tracker if any.
    pub fn build(self) -> MenuItem<E> {
        if let Some(tracker) = &self.focus_tracker {
            tracker.monitor(&self.element, false);
            tracing::debug!(
                element = ?self.element.id(),
                "menu item registered for focus tracking"
            );
        }
        MenuItem {
            element: self.element,
            document: self.document,
            focus_tracker: self.focus_tracker,
            role: self.role,
            disabled: self.disabled,
            disable_ripple: self.disable_ripple,
            highlighted: false,
            triggers_submenu: false,
            hovered: EventStream::new(),
            lifecycle: Lifecycle::Live,
        }
    }
}

impl<E: MenuElement> fmt::Debug for MenuItemBuilder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItemBuilder")
            .field("element", &self.element.id())
            .field("document", &self.document.is_some())
            .field("focus_tracker", &self.focus_tracker.is_some())
            .field("role", &self.role)
            .field("disabled", &self.disabled)
            .field("disable_ripple", &self.disable_ripple)
            .finish()
    }
}

/// A single interactive entry of a menu.
///
/// The owning menu sets the flags, reads [`MenuItem::label`], subscribes to
/// [`MenuItem::hovered`], and calls
/// [`MenuItem::destroy`] when it removes the item. Dropping a live item
/// destroys it.
///
/// ```
/// # #[cfg(feature = "headless")]
/// # fn example() {
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use understory_menu_item::headless::HeadlessElement;
/// use understory_menu_item::{MenuItem, PointerEvent, TabIndex};
///
/// let mut item = MenuItem::new(HeadlessElement::new().with_text("Save"));
/// let hovers = Rc::new(Cell::new(0));
/// let sink = Rc::clone(&hovers);
/// item.hovered().subscribe(move |_: &MenuItem<HeadlessElement>| sink.set(sink.get() + 1));
///
/// assert!(item.handle_pointer_enter());
/// item.set_disabled(true);
/// assert!(!item.handle_pointer_enter());
/// assert_eq!(hovers.get(), 1);
///
/// let mut click = PointerEvent::new();
/// item.handle_click(&mut click);
/// assert!(click.default_prevented() && click.propagation_stopped());
/// assert_eq!(item.tab_index(), TabIndex::Skip);
/// # }
/// # #[cfg(feature = "headless")]
/// # example();
/// ```
pub struct MenuItem<E: MenuElement> {
    element: E,
    document: Option<Rc<dyn HostDocument>>,
    focus_tracker: Option<Rc<dyn FocusTracker<E>>>,
    role: Role,
    disabled: bool,
    disable_ripple: bool,
    highlighted: bool,
    triggers_submenu: bool,
    hovered: EventStream<Self>,
    lifecycle: Lifecycle,
}

impl<E: MenuElement> MenuItem<E> {
    /// Creates a live item with no collaborators and default flags.
    pub fn new(element: E) -> Self {
        MenuItemBuilder::new(element).build()
    }

    /// Starts a [`MenuItemBuilder`] for `element`.
    pub fn builder(element: E) -> MenuItemBuilder<E> {
        MenuItemBuilder::new(element)
    }

    /// Returns the underlying element.
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Returns the accessibility role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns whether the item is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enables or disables the item.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Returns whether the ripple effect is disabled.
    pub fn is_ripple_disabled(&self) -> bool {
        self.disable_ripple
    }

    /// Sets whether the renderer should skip the ripple effect.
    pub fn set_disable_ripple(&mut self, disable_ripple: bool) {
        self.disable_ripple = disable_ripple;
    }

    /// Returns whether the owning menu highlights the item.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Marks the item as highlighted by the owning menu.
    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    /// Returns whether the item opens a submenu.
    pub fn triggers_submenu(&self) -> bool {
        self.triggers_submenu
    }

    /// Marks the item as a submenu trigger.
    pub fn set_triggers_submenu(&mut self, triggers_submenu: bool) {
        self.triggers_submenu = triggers_submenu;
    }

    /// Returns the lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Returns `true` once the item has been destroyed.
    pub fn is_destroyed(&self) -> bool {
        self.lifecycle == Lifecycle::Destroyed
    }

    /// Stream of this item, emitted once per qualifying pointer enter.
    pub fn hovered(&self) -> &EventStream<Self> {
        &self.hovered
    }

    /// Focuses the element, attributing the transition to `origin`.
    ///
    /// With a focus tracker the tracker applies focus and records the origin;
    /// otherwise the element is focused directly and the origin is lost.
    pub fn focus(&self, origin: FocusOrigin) {
        match &self.focus_tracker {
            Some(tracker) => tracker.focus_via(&self.element, origin),
            None => {
                tracing::trace!(
                    element = ?self.element.id(),
                    %origin,
                    "no focus tracker, focusing element directly"
                );
                self.element.focus();
            }
        }
    }

    /// Focuses the element with [`FocusOrigin::Program`].
    pub fn focus_default(&self) {
        self.focus(FocusOrigin::Program);
    }

    /// Keyboard reachability: skipped while disabled.
    pub fn tab_index(&self) -> TabIndex {
        if self.disabled {
            TabIndex::Skip
        } else {
            TabIndex::Default
        }
    }

    /// Cancels `event` if the item is disabled.
    ///
    /// Returns [`Outcome::Stop`] when the event was cancelled, so hosts that
    /// drive their own dispatch loop can stop there.
    pub fn handle_click<V: InteractionEvent + ?Sized>(&self, event: &mut V) -> Outcome {
        if !self.disabled {
            return Outcome::Continue;
        }
        tracing::trace!(element = ?self.element.id(), "click on disabled menu item suppressed");
        event.prevent_default();
        event.stop_propagation();
        Outcome::Stop
    }

    /// Broadcasts this item on [`MenuItem::hovered`] unless it is disabled.
    ///
    /// Returns `true` if an emission happened (even with no observers).
    pub fn handle_pointer_enter(&self) -> bool {
        if self.disabled {
            tracing::trace!(element = ?self.element.id(), "hover on disabled menu item ignored");
            return false;
        }
        self.hovered.emit(self).is_ok()
    }

    /// Plain-text label: the trimmed text of the element's direct text children.
    ///
    /// Icons, nested controls, and comments are ignored.
    pub fn label(&self) -> String {
        let text_node_type = match &self.document {
            Some(document) => document.text_node_type(),
            None => FALLBACK_TEXT_NODE_TYPE,
        };
        direct_text(&self.element, text_node_type)
    }

    /// Snapshot of the presentation state for the renderer.
    pub fn attributes(&self) -> MenuItemAttributes {
        MenuItemAttributes {
            role: self.role,
            tab_index: self.tab_index(),
            aria_disabled: self.disabled,
            disabled: self.disabled,
            highlighted: self.highlighted,
            triggers_submenu: self.triggers_submenu,
            disable_ripple: self.disable_ripple,
        }
    }

    /// Releases the focus tracker registration and closes the hover stream.
    ///
    /// Calling this on a destroyed item does nothing.
    pub fn destroy(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        self.lifecycle = Lifecycle::Destroyed;
        if let Some(tracker) = &self.focus_tracker {
            tracker.stop_monitoring(&self.element);
        }
        self.hovered.close();
        tracing::debug!(element = ?self.element.id(), "menu item destroyed");
    }
}

impl<E: MenuElement> Drop for MenuItem<E> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<E: MenuElement> fmt::Debug for MenuItem<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("element", &self.element.id())
            .field("role", &self.role)
            .field("disabled", &self.disabled)
            .field("disable_ripple", &self.disable_ripple)
            .field("highlighted", &self.highlighted)
            .field("triggers_submenu", &self.triggers_submenu)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}
