// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cascade implementation.
//!
//! ## Overview
//!
//! [`Cascade::will`] walks the descendants of a root in pre-order and records the
//! nodes whose handler returned [`Outcome::Continue`].
//! [`Cascade::did`] replays that record in reverse.
//!
//! The did phase is not a generic post-order traversal: nodes pruned with
//! [`Outcome::Stop`] (and everything below them) never appear in it, and a node
//! added to the tree during the will phase below an already-visited parent is not
//! picked up.
//!
//! ## Read-only scans
//!
//! [`Cascade::scan`] runs the same pruned walk over a shared borrow. It is useful
//! to ask "would this cascade affect anything?" before committing to it.

use alloc::vec::Vec;

use crate::types::{ChildLookup, Outcome, Phase, Step};

/// The record of a will pass, ready to be replayed as a did pass.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use = "a cascade's did phase must be replayed with `did`"]
pub struct Cascade<K> {
    root: K,
    affected: Vec<K>,
}

impl<K: Copy> Cascade<K> {
    /// Run the will phase below `root`.
    ///
    /// `visit` is called once per reached descendant, parents before children and
    /// siblings in child-list order.
    pub fn will<T, F>(target: &mut T, root: K, mut visit: F) -> Self
    where
        T: ChildLookup<K> + ?Sized,
        F: FnMut(&mut T, K) -> Outcome,
    {
        let mut affected = Vec::new();
        let mut stack = target.children_of(&root);
        stack.reverse();
        while let Some(node) = stack.pop() {
            match visit(target, node) {
                Outcome::Continue => {
                    affected.push(node);
                    // Snapshot now: later edits to this list do not alter the walk.
                    stack.extend(target.children_of(&node).into_iter().rev());
                }
                Outcome::Stop => {}
            }
        }
        Self { root, affected }
    }

    /// Run the pruned pre-order walk without mutating the target.
    pub fn scan<T, F>(target: &T, root: K, mut visit: F) -> Self
    where
        T: ChildLookup<K> + ?Sized,
        F: FnMut(&T, K) -> Outcome,
    {
        let mut affected = Vec::new();
        let mut stack = target.children_of(&root);
        stack.reverse();
        while let Some(node) = stack.pop() {
            if visit(target, node) == Outcome::Continue {
                affected.push(node);
                stack.extend(target.children_of(&node).into_iter().rev());
            }
        }
        Self { root, affected }
    }

    /// Run the did phase: `visit` each affected node, deepest and last first.
    pub fn did<T, F>(self, target: &mut T, mut visit: F)
    where
        T: ?Sized,
        F: FnMut(&mut T, K),
    {
        for &node in self.affected.iter().rev() {
            visit(target, node);
        }
    }

    /// The root the cascade started from.
    pub fn root(&self) -> K {
        self.root
    }

    /// Affected nodes in will-phase order.
    pub fn affected(&self) -> &[K] {
        &self.affected
    }

    /// Number of affected nodes.
    pub fn len(&self) -> usize {
        self.affected.len()
    }

    /// Returns true if the will phase affected no node.
    pub fn is_empty(&self) -> bool {
        self.affected.is_empty()
    }

    /// The full notification sequence this cascade stands for: every will step
    /// followed by every did step.
    pub fn steps(&self) -> Vec<Step<K>> {
        let mut out = Vec::with_capacity(self.affected.len() * 2);
        for &node in &self.affected {
            out.push(Step {
                phase: Phase::Will,
                node,
            });
        }
        for &node in self.affected.iter().rev() {
            out.push(Step {
                phase: Phase::Did,
                node,
            });
        }
        out
    }
}
