// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for cascades: phases, outcomes, child lookup, and recorded steps.

use alloc::vec::Vec;

/// Phases of a cascade.
///
/// Appears on each [`Step`] produced by [`Cascade::steps`](crate::cascade::Cascade::steps).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Parent-to-descendant notification, before the change settles.
    Will,
    /// Descendant-to-parent notification, after the change settled.
    Did,
}

/// Handler outcome controlling descent during the [`Will`](Phase::Will) phase.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The node is affected; descend into its children and replay it during the did phase.
    Continue,
    /// The node's subtree is already consistent; skip it entirely.
    Stop,
}

/// Look up the children of a node.
///
/// The returned list is a snapshot: the cascade iterates it even if the
/// tree's own child list changes while handlers run.
pub trait ChildLookup<K> {
    /// Returns the ordered children of `node`. Unknown nodes have no children.
    fn children_of(&self, node: &K) -> Vec<K>;
}

/// A single recorded cascade step.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Step<K> {
    /// Phase of this step.
    pub phase: Phase,
    /// Node notified in this step.
    pub node: K,
}
