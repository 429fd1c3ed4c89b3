// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the view tree: node identifiers, action results, pending updates, and configuration.

use crate::layout::{Layout, LayoutMode};

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable for the node's lifetime
/// but becomes invalid when the node is removed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// A `NodeId` is also the only way nodes refer to each other: a child's parent
/// link and a build-out participant's owner link are ids, never owning pointers.
///
/// ### Liveness
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
///
/// ### Notes
///
/// - The generation increments on slot reuse and never decreases.
/// - `u32` is ample for practical lifetimes; behavior on generation overflow is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Whether an action was valid in the node's current state.
///
/// Invalid actions are silent no-ops, never errors.
/// Callers that need an action to take effect must check the result.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[must_use = "actions may be unhandled in the node's current state"]
pub enum Handled {
    /// The action was applied (possibly starting a transition).
    Yes,
    /// The action does not apply to the node's current state; nothing changed.
    No,
}

impl Handled {
    /// Returns true for [`Handled::Yes`].
    pub const fn is_handled(self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled { Self::Yes } else { Self::No }
    }
}

/// Result of a content or layout refresh request.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Update {
    /// The refresh reached the backend immediately.
    Applied,
    /// The refresh was recorded in [`Pending`] and will be drained later.
    Deferred,
}

bitflags::bitflags! {
    /// Refreshes requested while a node could not apply them.
    ///
    /// Drained exactly once, in declaration order, when the node is attached or
    /// enters a state with [`StateFlags::SHOWN`](crate::StateFlags::SHOWN).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Pending: u8 {
        /// The node's content must be re-rendered.
        const CONTENT    = 0b0000_0001;
        /// The node's layout must be re-applied.
        const LAYOUT     = 0b0000_0010;
        /// The node's visibility style must be re-applied.
        const VISIBILITY = 0b0000_0100;
    }
}

/// Initial configuration for a node.
#[derive(Clone, Debug)]
pub struct ViewConfig {
    /// The caller's visibility intent.
    pub visible: bool,
    /// Declarative layout attributes.
    pub layout: Layout,
    /// How [`layout`](Self::layout) is interpreted.
    pub layout_mode: LayoutMode,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            visible: true,
            layout: Layout::default(),
            layout_mode: LayoutMode::Absolute,
        }
    }
}
