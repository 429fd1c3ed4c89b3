// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle states and the flag bits they are built from.
//!
//! Every state is a fixed bit pattern. The low byte distinguishes states that
//! share the same flags; [`StateFlags`] extracts the flags so "is the node
//! visible in the tree" is a single mask test.

bitflags::bitflags! {
    /// Orthogonal facts encoded in every [`ViewState`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct StateFlags: u16 {
        /// The node has a rendered element.
        const RENDERED = 0x0100;
        /// The node's element is inserted into a parent or host element.
        const ATTACHED = 0x0080;
        /// The node is visible in the live display (possibly mid-transition).
        const SHOWN    = 0x0040;
        /// The node is attached but hidden, on its own or by an ancestor.
        const HIDDEN   = 0x0020;
    }
}

/// The lifecycle state of a node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u16)]
pub enum ViewState {
    /// No rendered element exists.
    Unrendered = 0x0200,
    /// Rendered, but not inserted anywhere.
    Unattached = 0x0300,
    /// Inserted into its parent's element while an ancestor is not attached.
    AttachedPartial = 0x0388,
    /// Attached and hidden by its own request.
    AttachedHidden = 0x03A0,
    /// Attached, requested visible, but an ancestor is hidden.
    AttachedHiddenByParent = 0x03A8,
    /// Attached and visible.
    AttachedShown = 0x03C0,
    /// Running a show transition.
    AttachedShowing = 0x03C1,
    /// Running an enter transition.
    AttachedBuildingIn = 0x03C2,
    /// Exiting on its own; removal waits for the exit to finish.
    AttachedBuildingOut = 0x03C3,
    /// Exiting because an ancestor is being removed.
    AttachedBuildingOutByParent = 0x03C4,
    /// Running an ad hoc animation.
    AttachedShownAnimating = 0x03C5,
    /// Running a hide transition.
    AttachedHiding = 0x03C6,
}

impl ViewState {
    /// Every state, in lifecycle order.
    pub const ALL: [Self; 12] = [
        Self::Unrendered,
        Self::Unattached,
        Self::AttachedPartial,
        Self::AttachedHidden,
        Self::AttachedHiddenByParent,
        Self::AttachedShown,
        Self::AttachedShowing,
        Self::AttachedBuildingIn,
        Self::AttachedBuildingOut,
        Self::AttachedBuildingOutByParent,
        Self::AttachedShownAnimating,
        Self::AttachedHiding,
    ];

    /// Raw bit pattern.
    pub const fn bits(self) -> u16 {
        self as u16
    }

    /// The flags this state carries.
    pub const fn flags(self) -> StateFlags {
        StateFlags::from_bits_truncate(self as u16)
    }

    /// The node has a rendered element.
    pub const fn is_rendered(self) -> bool {
        self.bits() & StateFlags::RENDERED.bits() != 0
    }

    /// The node's element is inserted somewhere.
    pub const fn is_attached(self) -> bool {
        self.bits() & StateFlags::ATTACHED.bits() != 0
    }

    /// The node is visible in the live display.
    pub const fn is_shown(self) -> bool {
        self.bits() & StateFlags::SHOWN.bits() != 0
    }

    /// The node is attached but hidden.
    pub const fn is_hidden(self) -> bool {
        self.bits() & StateFlags::HIDDEN.bits() != 0
    }

    /// A transition or animation may be in flight.
    pub const fn is_transitioning(self) -> bool {
        self.is_shown() && !matches!(self, Self::AttachedShown)
    }

    /// The node is exiting, on its own or with an ancestor.
    pub const fn is_building_out(self) -> bool {
        matches!(
            self,
            Self::AttachedBuildingOut | Self::AttachedBuildingOutByParent
        )
    }
}
