// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_menu_item --heading-base-level=0

//! Understory Menu Item: the state and behavior of a single menu entry.
//!
//! This crate models one interactive item of a menu, independent of any
//! renderer or menu implementation. A [`MenuItem`] is bound to a host element
//! and exposes the small contract its owning menu relies on:
//!
//! - [`focus`]: focus the element through a [`FocusTracker`] so the focus
//!   origin (keyboard, mouse, touch, program) is known, or directly when no
//!   tracker is available.
//! - Disabled gating: a disabled item cancels clicks, never broadcasts hover,
//!   and is skipped by sequential keyboard navigation.
//! - [`stream`]: hover notifications broadcast to any number of observers,
//!   closed for good when the item is destroyed.
//! - Label extraction: the trimmed text of the element's direct text children,
//!   used for type-ahead and accessible names.
//!
//! ## Design Philosophy
//!
//! - **Headless**: the item never paints. Presentation state is exposed as a
//!   [`MenuItemAttributes`] snapshot for whatever renderer binds it.
//! - **Collaborators are optional**: a missing document or focus tracker
//!   selects a documented fallback instead of failing.
//! - **Single-threaded**: collaborators are shared through `Rc`, streams use
//!   interior mutability, and nothing locks.
//!
//! ## Usage
//!
//! ```rust
//! # #[cfg(feature = "headless")]
//! # fn example() {
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_menu_item::focus::{FocusMonitor, FocusOrigin};
//! use understory_menu_item::headless::HeadlessElement;
//! use understory_menu_item::{MenuElement, MenuItem};
//!
//! let monitor = Rc::new(FocusMonitor::<HeadlessElement>::new());
//! let element = HeadlessElement::new()
//!     .with_text("  Open ")
//!     .with_element(HeadlessElement::new().with_text("folder-icon"))
//!     .with_text("File  ");
//!
//! let mut item = MenuItem::builder(element.clone())
//!     .focus_tracker(monitor.clone())
//!     .build();
//! assert!(monitor.is_monitored(element.id()));
//!
//! // The owning menu listens for hover to move its highlight.
//! let hovered = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&hovered);
//! item.hovered().subscribe(move |item: &MenuItem<HeadlessElement>| {
//!     sink.borrow_mut().push(item.label());
//! });
//!
//! item.handle_pointer_enter();
//! assert_eq!(*hovered.borrow(), ["Open File"]);
//!
//! item.focus(FocusOrigin::Keyboard);
//! assert_eq!(monitor.origin_of(element.id()), Some(FocusOrigin::Keyboard));
//!
//! item.destroy();
//! assert!(!monitor.is_monitored(element.id()));
//! assert!(!item.handle_pointer_enter());
//! # }
//! # #[cfg(feature = "headless")]
//! # example();
//! ```
//!
//! ## Integration with Understory
//!
//! - Route pointer and keyboard events with `understory_responder`, then call
//!   [`MenuItem::handle_click`] and [`MenuItem::handle_pointer_enter`] on the
//!   target item. [`Outcome::Stop`] tells the dispatcher to stop propagating.
//! - Use `understory_focus` to pick the next item during keyboard navigation,
//!   skipping items whose [`MenuItem::tab_index`] is [`TabIndex::Skip`].
//!
//! ## Features
//!
//! - `std` (default): forward `std` to `tracing`.
//! - `headless` (default): the in-memory [`headless`] host element and document.
//!
//! This crate is `no_std` compatible (with `alloc`) for all modules.

#![no_std]

extern crate alloc;

pub mod element;
pub mod event;
pub mod focus;
#[cfg(feature = "headless")]
pub mod headless;
pub mod item;
pub mod stream;

pub use element::{ChildNode, FALLBACK_TEXT_NODE_TYPE, HostDocument, MenuElement, TEXT_NODE};
pub use event::{EventFlags, InteractionEvent, Outcome, PointerEvent};
pub use focus::{FocusMonitor, FocusOrigin, FocusTracker};
pub use item::{Lifecycle, MenuItem, MenuItemAttributes, MenuItemBuilder, Role, TabIndex};
pub use stream::{EventStream, Observer, StreamClosed, SubscriptionId};
