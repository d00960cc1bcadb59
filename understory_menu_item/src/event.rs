// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction events as seen by a menu item.
//!
//! A menu item does not route events. It only needs to neutralize a click on
//! a disabled item: prevent the default action and stop the event from
//! reaching ancestor handlers (such as the owning menu, which would otherwise
//! treat the click as a selection). [`InteractionEvent`] is that surface;
//! hosts implement it over their native event type.
//!
//! [`PointerEvent`] is a plain implementation that records both requests in
//! [`EventFlags`], for hosts that dispatch through their own responder chain
//! and check the flags afterwards.

/// The parts of an event a menu item may cancel.
pub trait InteractionEvent {
    /// Suppresses the default action associated with the event.
    fn prevent_default(&mut self);

    /// Stops the event from propagating to ancestor handlers.
    fn stop_propagation(&mut self);
}

bitflags::bitflags! {
    /// Cancellation state recorded on a [`PointerEvent`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EventFlags: u8 {
        /// The default action must not run.
        const DEFAULT_PREVENTED   = 0b0000_0001;
        /// Ancestor handlers must not see the event.
        const PROPAGATION_STOPPED = 0b0000_0010;
    }
}

impl Default for EventFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Propagation decision returned by a handler.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Keep propagating.
    Continue,
    /// Stop propagating.
    Stop,
}

/// Minimal pointer event carrying cancellation flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerEvent {
    flags: EventFlags,
}

impl PointerEvent {
    /// Creates an event with no cancellation requested.
    pub const fn new() -> Self {
        Self {
            flags: EventFlags::empty(),
        }
    }

    /// Returns the recorded cancellation flags.
    pub const fn flags(&self) -> EventFlags {
        self.flags
    }

    /// Returns `true` if the default action was prevented.
    pub const fn default_prevented(&self) -> bool {
        self.flags.contains(EventFlags::DEFAULT_PREVENTED)
    }

    /// Returns `true` if propagation was stopped.
    pub const fn propagation_stopped(&self) -> bool {
        self.flags.contains(EventFlags::PROPAGATION_STOPPED)
    }
}

impl InteractionEvent for PointerEvent {
    fn prevent_default(&mut self) {
        self.flags |= EventFlags::DEFAULT_PREVENTED;
    }

    fn stop_propagation(&mut self) {
        self.flags |= EventFlags::PROPAGATION_STOPPED;
    }
}

impl<E: InteractionEvent + ?Sized> InteractionEvent for &mut E {
    fn prevent_default(&mut self) {
        (**self).prevent_default();
    }

    fn stop_propagation(&mut self) {
        (**self).stop_propagation();
    }
}
