// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_menu_item` crate.
//!
//! These exercise the contract a menu item offers its owning menu: focus
//! delegation and fallback, disabled gating of clicks and hover, label
//! extraction, and paired registration/teardown with a focus tracker.

#![cfg(feature = "headless")]

use std::cell::RefCell;
use std::rc::Rc;

use understory_menu_item::element::ELEMENT_NODE;
use understory_menu_item::focus::{FocusMonitor, FocusOrigin, FocusTracker};
use understory_menu_item::headless::{
    HeadlessDocument, HeadlessElement, HeadlessElementId, HeadlessNode,
};
use understory_menu_item::{
    MenuElement, MenuItem, Observer, Outcome, PointerEvent, StreamClosed, TabIndex,
};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Call {
    Monitor(HeadlessElementId, bool),
    FocusVia(HeadlessElementId, FocusOrigin),
    Stop(HeadlessElementId),
}

/// Tracker double that records every call and focuses like a real one.
#[derive(Default)]
struct RecordingTracker {
    calls: RefCell<Vec<Call>>,
}

impl RecordingTracker {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl FocusTracker<HeadlessElement> for RecordingTracker {
    fn monitor(&self, element: &HeadlessElement, force_visible: bool) {
        self.calls
            .borrow_mut()
            .push(Call::Monitor(element.id(), force_visible));
    }

    fn focus_via(&self, element: &HeadlessElement, origin: FocusOrigin) {
        self.calls
            .borrow_mut()
            .push(Call::FocusVia(element.id(), origin));
        element.focus();
    }

    fn stop_monitoring(&self, element: &HeadlessElement) {
        self.calls.borrow_mut().push(Call::Stop(element.id()));
    }
}

type Item = MenuItem<HeadlessElement>;

type HoverLog = Rc<RefCell<Vec<(&'static str, HeadlessElementId)>>>;

fn hover_log(item: &Item, tag: &'static str) -> HoverLog {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    item.hovered().subscribe(move |hovered: &Item| {
        sink.borrow_mut().push((tag, hovered.element().id()));
    });
    log
}

#[test]
fn tab_index_depends_only_on_disabled() {
    for disabled in [false, true] {
        for highlighted in [false, true] {
            for submenu in [false, true] {
                for ripple in [false, true] {
                    let mut item = MenuItem::builder(HeadlessElement::new())
                        .disabled(disabled)
                        .disable_ripple(ripple)
                        .build();
                    item.set_highlighted(highlighted);
                    item.set_triggers_submenu(submenu);
                    let expected = if disabled {
                        TabIndex::Skip
                    } else {
                        TabIndex::Default
                    };
                    assert_eq!(item.tab_index(), expected);
                    assert_eq!(item.tab_index(), item.tab_index());
                }
            }
        }
    }
}

#[test]
fn click_on_disabled_item_is_cancelled() {
    let item = MenuItem::builder(HeadlessElement::new())
        .disabled(true)
        .build();
    let mut ev = PointerEvent::new();
    assert_eq!(item.handle_click(&mut ev), Outcome::Stop);
    assert!(ev.default_prevented());
    assert!(ev.propagation_stopped());
}

#[test]
fn click_on_enabled_item_passes_through() {
    let item = MenuItem::new(HeadlessElement::new());
    let mut ev = PointerEvent::new();
    assert_eq!(item.handle_click(&mut ev), Outcome::Continue);
    assert!(!ev.default_prevented());
    assert!(!ev.propagation_stopped());
}

#[test]
fn disabled_item_never_emits_hover() {
    let item = MenuItem::builder(HeadlessElement::new())
        .disabled(true)
        .build();
    let log = hover_log(&item, "a");
    assert!(!item.handle_pointer_enter());
    assert!(!item.handle_pointer_enter());
    assert!(log.borrow().is_empty());
}

#[test]
fn each_hover_emits_once_with_item_identity() {
    let element = HeadlessElement::new();
    let item = MenuItem::new(element.clone());
    let log = hover_log(&item, "a");

    assert!(item.handle_pointer_enter());
    assert_eq!(*log.borrow(), [("a", element.id())]);

    // No deduplication of repeated hovers.
    assert!(item.handle_pointer_enter());
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn two_subscribers_receive_one_event_each_in_order() {
    let element = HeadlessElement::new();
    let item = MenuItem::new(element.clone());

    let shared = Rc::new(RefCell::new(Vec::new()));
    for tag in ["first", "second"] {
        let sink = Rc::clone(&shared);
        item.hovered().subscribe(move |hovered: &Item| {
            sink.borrow_mut().push((tag, hovered.element().id()));
        });
    }

    item.handle_pointer_enter();
    assert_eq!(
        *shared.borrow(),
        [("first", element.id()), ("second", element.id())]
    );
}

#[test]
fn hover_toggles_with_disabled_flag() {
    let mut item = MenuItem::new(HeadlessElement::new());
    let log = hover_log(&item, "a");
    item.set_disabled(true);
    item.handle_pointer_enter();
    item.set_disabled(false);
    item.handle_pointer_enter();
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn label_concatenates_direct_text_and_trims() {
    let element = HeadlessElement::new()
        .with_text("  Open ")
        .with_element(HeadlessElement::new().with_text("icon"))
        .with_text("File  ");
    let item = MenuItem::new(element);
    assert_eq!(item.label(), "Open File");
    assert_eq!(item.label(), item.label());
}

#[test]
fn label_ignores_comments_and_nested_text() {
    let element = HeadlessElement::new()
        .with_comment("note")
        .with_element(HeadlessElement::new().with_text("Nested"))
        .with_text("\n Undo\t");
    assert_eq!(MenuItem::new(element).label(), "Undo");
}

#[test]
fn label_of_element_without_text_children_is_empty() {
    assert_eq!(MenuItem::new(HeadlessElement::new()).label(), "");
    let only_icon = HeadlessElement::new()
        .with_element(HeadlessElement::new().with_text("x"));
    assert_eq!(MenuItem::new(only_icon).label(), "");
}

#[test]
fn label_uses_document_text_node_code() {
    // A document that numbers text nodes differently: real text children no
    // longer match, so nothing is collected.
    let element = HeadlessElement::new().with_text("Copy");
    let item = MenuItem::builder(element)
        .document(Rc::new(HeadlessDocument::with_text_node_type(99)))
        .build();
    assert_eq!(item.label(), "");

    let element = HeadlessElement::new().with_text(" Paste ");
    let item = MenuItem::builder(element)
        .document(Rc::new(HeadlessDocument::new()))
        .build();
    assert_eq!(item.label(), "Paste");
}

#[test]
fn label_never_includes_descendant_text() {
    // Even when the document's text code matches element children, nested
    // text is not part of the label.
    let element = HeadlessElement::new()
        .with_element(HeadlessElement::new().with_text("nested"));
    let item = MenuItem::builder(element)
        .document(Rc::new(HeadlessDocument::with_text_node_type(ELEMENT_NODE)))
        .build();
    assert_eq!(item.label(), "");
}

#[test]
fn label_tracks_element_mutation() {
    let element = HeadlessElement::new().with_text("Cut");
    let item = MenuItem::new(element.clone());
    assert_eq!(item.label(), "Cut");
    element.clear();
    element.push(HeadlessNode::Text("Copy".into()));
    assert_eq!(item.label(), "Copy");
}

#[test]
fn focus_without_tracker_focuses_element_directly() {
    let element = HeadlessElement::new();
    let item = MenuItem::new(element.clone());
    item.focus(FocusOrigin::Keyboard);
    item.focus_default();
    assert_eq!(element.focus_count(), 2);
}

#[test]
fn focus_with_tracker_delegates_with_origin() {
    let tracker = Rc::new(RecordingTracker::default());
    let element = HeadlessElement::new();
    let item = MenuItem::builder(element.clone())
        .focus_tracker(tracker.clone())
        .build();

    item.focus(FocusOrigin::Touch);
    item.focus_default();

    let id = element.id();
    assert_eq!(
        tracker.calls(),
        [
            Call::Monitor(id, false),
            Call::FocusVia(id, FocusOrigin::Touch),
            Call::FocusVia(id, FocusOrigin::Program),
        ]
    );
    assert_eq!(element.focus_count(), 2);
}

#[test]
fn registration_is_paired_with_teardown() {
    let tracker = Rc::new(RecordingTracker::default());
    let element = HeadlessElement::new();
    let mut item = MenuItem::builder(element.clone())
        .focus_tracker(tracker.clone())
        .build();
    assert_eq!(tracker.calls(), [Call::Monitor(element.id(), false)]);

    item.destroy();
    item.destroy();
    drop(item);
    assert_eq!(
        tracker.calls(),
        [Call::Monitor(element.id(), false), Call::Stop(element.id())]
    );
}

#[test]
fn dropping_a_live_item_releases_registration() {
    let monitor = Rc::new(FocusMonitor::<HeadlessElement>::new());
    let element = HeadlessElement::new();
    let item = MenuItem::builder(element.clone())
        .focus_tracker(monitor.clone())
        .build();
    assert!(monitor.is_monitored(element.id()));
    assert!(!monitor.forces_visible(element.id()));
    drop(item);
    assert!(!monitor.is_monitored(element.id()));
    assert_eq!(monitor.monitored_len(), 0);
}

#[test]
fn teardown_without_tracker_is_safe() {
    let mut item = MenuItem::new(HeadlessElement::new());
    item.destroy();
    item.destroy();
    assert!(item.is_destroyed());
}

#[test]
fn no_events_after_teardown() {
    let mut item = MenuItem::new(HeadlessElement::new());
    let log = hover_log(&item, "a");
    item.destroy();

    assert!(!item.handle_pointer_enter());
    assert!(log.borrow().is_empty());
    assert_eq!(item.hovered().emit(&item), Err(StreamClosed));

    // Late subscribers receive nothing either.
    let late = hover_log(&item, "late");
    item.handle_pointer_enter();
    assert!(late.borrow().is_empty());
}

#[test]
fn teardown_completes_hover_observers() {
    struct Watch(Rc<RefCell<Vec<&'static str>>>);

    impl Observer<Item> for Watch {
        fn next(&mut self, _: &Item) {
            self.0.borrow_mut().push("next");
        }

        fn complete(&mut self) {
            self.0.borrow_mut().push("complete");
        }
    }

    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut item = MenuItem::new(HeadlessElement::new());
    item.hovered().subscribe(Watch(Rc::clone(&seen)));
    item.handle_pointer_enter();
    item.destroy();
    item.destroy();
    assert_eq!(*seen.borrow(), ["next", "complete"]);
}

#[test]
fn focus_only_moves_focus() {
    let item = MenuItem::new(HeadlessElement::new().with_text("Print"));
    let log = hover_log(&item, "a");

    item.focus_default();
    item.focus(FocusOrigin::Keyboard);

    assert!(log.borrow().is_empty());
    assert_eq!(item.element().focus_count(), 2);
    assert_eq!(item.label(), "Print");
    assert_eq!(item.tab_index(), TabIndex::Default);
}

#[test]
fn focus_after_teardown_still_reaches_element() {
    let mut item = MenuItem::new(HeadlessElement::new());
    item.destroy();
    item.focus_default();
    assert_eq!(item.element().focus_count(), 1);
}

#[test]
fn owning_menu_can_highlight_from_hover() {
    // A hover observer that records which item should be highlighted, the way
    // an owning menu drives its active item.
    let active = Rc::new(RefCell::new(None));
    let items: Vec<Item> = ["New", "Open", "Save"]
        .into_iter()
        .map(|label| MenuItem::new(HeadlessElement::new().with_text(label)))
        .collect();
    for item in &items {
        let sink = Rc::clone(&active);
        item.hovered().subscribe(move |hovered: &Item| {
            *sink.borrow_mut() = Some(hovered.label());
        });
    }

    items[1].handle_pointer_enter();
    assert_eq!(active.borrow().as_deref(), Some("Open"));
    items[2].handle_pointer_enter();
    assert_eq!(active.borrow().as_deref(), Some("Save"));
}

#[test]
fn monitor_records_origin_for_item_focus() {
    let monitor = Rc::new(FocusMonitor::<HeadlessElement>::new());
    let element = HeadlessElement::new();
    let item = MenuItem::builder(element.clone())
        .focus_tracker(monitor.clone())
        .build();

    item.focus(FocusOrigin::Mouse);
    assert_eq!(monitor.origin_of(element.id()), Some(FocusOrigin::Mouse));
    item.focus_default();
    assert_eq!(monitor.origin_of(element.id()), Some(FocusOrigin::Program));
    assert_eq!(element.focus_count(), 2);
}
