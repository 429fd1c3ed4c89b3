// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build-out coordination.
//!
//! A node detached while shown may have to wait for exit transitions before its
//! element is removed. The node that initiated the detach is the *owner*.
//! Descendants that exit with it are *participants*; they refer to the owner by
//! id only, and all counting lives here, keyed by owner.

use alloc::collections::BTreeMap;

use crate::types::NodeId;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct BuildOut {
    /// Participant exits still running.
    outstanding: u32,
    /// The owner's own exit is still running.
    own_pending: bool,
}

impl BuildOut {
    fn is_ready(self) -> bool {
        self.outstanding == 0 && !self.own_pending
    }
}

/// Outstanding exit transitions per owner.
#[derive(Clone, Debug, Default)]
pub(crate) struct BuildOuts {
    active: BTreeMap<NodeId, BuildOut>,
}

impl BuildOuts {
    /// Start coordinating a removal for `owner` with a zero count.
    pub(crate) fn begin(&mut self, owner: NodeId) {
        self.active.insert(owner, BuildOut::default());
    }

    /// Stop coordinating `owner`. Returns false if it was not active.
    pub(crate) fn end(&mut self, owner: NodeId) -> bool {
        self.active.remove(&owner).is_some()
    }

    #[cfg(test)]
    pub(crate) fn is_active(&self, owner: NodeId) -> bool {
        self.active.contains_key(&owner)
    }

    /// Returns true if `owner` is active and nothing is left to wait for.
    pub(crate) fn is_ready(&self, owner: NodeId) -> bool {
        self.active.get(&owner).is_some_and(|b| b.is_ready())
    }

    /// Outstanding participant exits; zero for inactive owners.
    pub(crate) fn outstanding(&self, owner: NodeId) -> u32 {
        self.active.get(&owner).map_or(0, |b| b.outstanding)
    }

    /// A participant started its exit on behalf of `owner`.
    pub(crate) fn enlist(&mut self, owner: NodeId) {
        if let Some(b) = self.active.get_mut(&owner) {
            b.outstanding += 1;
            tracing::debug!(?owner, outstanding = b.outstanding, "build-out participant enlisted");
        }
    }

    /// Mark whether the owner's own exit is running.
    pub(crate) fn set_own_pending(&mut self, owner: NodeId, pending: bool) {
        if let Some(b) = self.active.get_mut(&owner) {
            b.own_pending = pending;
        }
    }

    /// The owner's own exit finished. Returns true if removal may proceed.
    pub(crate) fn own_done(&mut self, owner: NodeId) -> bool {
        self.set_own_pending(owner, false);
        self.is_ready(owner)
    }

    /// A participant's exit finished or was withdrawn. Returns true if removal may proceed.
    pub(crate) fn participant_done(&mut self, owner: NodeId) -> bool {
        let Some(b) = self.active.get_mut(&owner) else {
            return false;
        };
        b.outstanding = b.outstanding.saturating_sub(1);
        tracing::debug!(?owner, outstanding = b.outstanding, "build-out participant done");
        b.is_ready()
    }
}
