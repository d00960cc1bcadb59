// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host: a tiny retained element tree and document.
//!
//! [`HeadlessElement`] is a reference-counted handle; clones share the same
//! node. It records how often it received native focus so callers can observe
//! the fallback focus path without a platform.
//!
//! ```
//! use understory_menu_item::headless::HeadlessElement;
//! use understory_menu_item::MenuItem;
//!
//! let icon = HeadlessElement::new().with_text("save-icon");
//! let host = HeadlessElement::new()
//!     .with_text("  Open ")
//!     .with_element(icon)
//!     .with_text("File  ");
//!
//! let item = MenuItem::new(host.clone());
//! assert_eq!(item.label(), "Open File");
//!
//! item.focus_default();
//! assert_eq!(host.focus_count(), 1);
//! ```

use alloc::borrow::Cow;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::sync::atomic::{AtomicU32, Ordering};

use crate::element::{COMMENT_NODE, ChildNode, ELEMENT_NODE, HostDocument, MenuElement, TEXT_NODE};

static NEXT_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of a [`HeadlessElement`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeadlessElementId(u32);

/// A child of a [`HeadlessElement`].
#[derive(Clone, Debug)]
pub enum HeadlessNode {
    /// Character data.
    Text(String),
    /// A nested element (an icon, a badge, a nested control).
    Element(HeadlessElement),
    /// A comment; never part of any text.
    Comment(String),
}

impl HeadlessNode {
    /// Returns the node-type code for this node.
    pub fn node_type(&self) -> u16 {
        match self {
            Self::Text(_) => TEXT_NODE,
            Self::Element(_) => ELEMENT_NODE,
            Self::Comment(_) => COMMENT_NODE,
        }
    }
}

#[derive(Debug)]
struct Inner {
    id: HeadlessElementId,
    children: RefCell<Vec<HeadlessNode>>,
    focus_count: Cell<u32>,
}

/// Reference-counted in-memory element.
#[derive(Clone, Debug)]
pub struct HeadlessElement(Rc<Inner>);

impl HeadlessElement {
    /// Creates an element with no children and a fresh identity.
    pub fn new() -> Self {
        let id = HeadlessElementId(NEXT_ID.fetch_add(1, Ordering::Relaxed));
        Self(Rc::new(Inner {
            id,
            children: RefCell::new(Vec::new()),
            focus_count: Cell::new(0),
        }))
    }

    /// Appends a text child and returns `self`.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push(HeadlessNode::Text(text.into()));
        self
    }

    /// Appends an element child and returns `self`.
    #[must_use]
    pub fn with_element(self, child: Self) -> Self {
        self.push(HeadlessNode::Element(child));
        self
    }

    /// Appends a comment child and returns `self`.
    #[must_use]
    pub fn with_comment(self, text: impl Into<String>) -> Self {
        self.push(HeadlessNode::Comment(text.into()));
        self
    }

    /// Appends a child node.
    pub fn push(&self, node: HeadlessNode) {
        self.0.children.borrow_mut().push(node);
    }

    /// Removes all children.
    pub fn clear(&self) {
        self.0.children.borrow_mut().clear();
    }

    /// Returns the number of direct children.
    pub fn len(&self) -> usize {
        self.0.children.borrow().len()
    }

    /// Returns `true` if the element has no children.
    pub fn is_empty(&self) -> bool {
        self.0.children.borrow().is_empty()
    }

    /// Returns how many times native focus was requested on this element.
    pub fn focus_count(&self) -> u32 {
        self.0.focus_count.get()
    }

    /// Concatenated text of every descendant text node, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in self.0.children.borrow().iter() {
            match child {
                HeadlessNode::Text(text) => out.push_str(text),
                HeadlessNode::Element(el) => el.collect_text(out),
                HeadlessNode::Comment(_) => {}
            }
        }
    }
}

impl Default for HeadlessElement {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for HeadlessElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for HeadlessElement {}

impl MenuElement for HeadlessElement {
    type Id = HeadlessElementId;

    fn id(&self) -> HeadlessElementId {
        self.0.id
    }

    fn focus(&self) {
        let count = &self.0.focus_count;
        count.set(count.get().saturating_add(1));
    }

    fn child_nodes(&self) -> impl Iterator<Item = ChildNode<'_>> + '_ {
        // Snapshot so the borrow is released before callers run.
        let snapshot: Vec<ChildNode<'_>> = self
            .0
            .children
            .borrow()
            .iter()
            .map(|child| match child {
                HeadlessNode::Text(text) | HeadlessNode::Comment(text) => ChildNode {
                    node_type: child.node_type(),
                    text: Cow::Owned(text.clone()),
                },
                // Descendant text is not part of a direct child's text.
                HeadlessNode::Element(_) => ChildNode::opaque(ELEMENT_NODE),
            })
            .collect();
        snapshot.into_iter()
    }
}

/// In-memory document with a configurable text-node code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HeadlessDocument {
    text_node_type: u16,
}

impl HeadlessDocument {
    /// Creates a document using the DOM text-node code.
    pub const fn new() -> Self {
        Self {
            text_node_type: TEXT_NODE,
        }
    }

    /// Creates a document whose text nodes carry `code`.
    pub const fn with_text_node_type(code: u16) -> Self {
        Self {
            text_node_type: code,
        }
    }
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HostDocument for HeadlessDocument {
    fn text_node_type(&self) -> u16 {
        self.text_node_type
    }
}
