// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host element and document abstractions consumed by [`MenuItem`](crate::MenuItem).
//!
//! A menu item never renders anything itself. It only needs three things from
//! the element it is bound to:
//!
//! - a stable identity, so a focus tracker can key its registration table;
//! - a native focus operation, used when no tracker is available;
//! - the element's _direct_ child nodes, each with a node-type code and text,
//!   so the item can derive its plain-text label.
//!
//! Node-type codes follow the DOM numbering. Hosts that mirror a document
//! with a different numbering expose their text-node code through
//! [`HostDocument`]; without one, [`FALLBACK_TEXT_NODE_TYPE`] is used.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt::Debug;
use core::hash::Hash;

/// Node-type code of an element node.
pub const ELEMENT_NODE: u16 = 1;

/// Node-type code of a text node.
pub const TEXT_NODE: u16 = 3;

/// Node-type code of a comment node.
pub const COMMENT_NODE: u16 = 8;

/// Text-node code assumed when no [`HostDocument`] is available.
pub const FALLBACK_TEXT_NODE_TYPE: u16 = TEXT_NODE;

/// A direct child of a [`MenuElement`], as seen during label extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildNode<'a> {
    /// Node-type code (see [`ELEMENT_NODE`], [`TEXT_NODE`], [`COMMENT_NODE`]).
    pub node_type: u16,
    /// Text content of the node.
    ///
    /// Only read for text nodes; other kinds may leave it empty.
    pub text: Cow<'a, str>,
}

impl<'a> ChildNode<'a> {
    /// Creates a text child.
    pub fn text(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            node_type: TEXT_NODE,
            text: text.into(),
        }
    }

    /// Creates a child of the given kind with no text.
    pub fn opaque(node_type: u16) -> Self {
        Self {
            node_type,
            text: Cow::Borrowed(""),
        }
    }
}

/// The rendered element a menu item is bound to.
///
/// Implementations are usually cheap handles (for example a reference-counted
/// node in a retained tree); every method takes `&self`.
pub trait MenuElement {
    /// Identity of the element, used to key focus tracker registrations.
    type Id: Copy + Eq + Hash + Debug;

    /// Returns the identity of this element.
    fn id(&self) -> Self::Id;

    /// Moves input focus to this element with no origin information.
    fn focus(&self);

    /// Returns the direct child nodes of this element in document order.
    ///
    /// Descendants of those children must not be included.
    fn child_nodes(&self) -> impl Iterator<Item = ChildNode<'_>> + '_;
}

/// Accessor for the surrounding document.
///
/// Only used to learn which node-type code denotes a text node.
pub trait HostDocument {
    /// Returns the node-type code the document uses for text nodes.
    fn text_node_type(&self) -> u16 {
        TEXT_NODE
    }
}

/// Collects the trimmed text of the direct text children of `element`.
///
/// `text_node_type` selects which children count as text. Children are
/// concatenated in order without separators before the result is trimmed.
pub fn direct_text<E: MenuElement + ?Sized>(element: &E, text_node_type: u16) -> String {
    let mut out = String::new();
    for child in element.child_nodes() {
        if child.node_type == text_node_type {
            out.push_str(&child.text);
        }
    }
    out.trim().into()
}
