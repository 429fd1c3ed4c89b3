// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Informational lifecycle callbacks.
//!
//! Hooks observe the statechart; they cannot veto or delay it.
//! "Will" events reach the acting node first and then affected descendants top-down.
//! "Did" events reach affected descendants bottom-up and then the acting node.
//!
//! A hook may queue follow-up actions through [`Actions`]. They run in queue
//! order once the action that raised the event has finished its cascade, so a
//! hook can adopt or orphan children without disturbing a walk in progress.

use alloc::vec::Vec;

use crate::transition::TransitionKind;
use crate::types::NodeId;

/// A point in a node's lifecycle.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum LifecycleEvent {
    /// About to construct the element.
    WillRender,
    /// Element constructed (and, for descendants, inserted into the parent's element).
    DidRender,
    /// About to be inserted into the live tree.
    WillAttach,
    /// Inserted into the live tree.
    DidAttach,
    /// About to leave the live tree.
    WillDetach,
    /// Left the live tree.
    DidDetach,
    /// About to become visible.
    WillShow,
    /// Became visible.
    DidShow,
    /// About to become hidden.
    WillHide,
    /// Became hidden.
    DidHide,
    /// Enter transition started.
    WillBuildIn,
    /// Enter transition completed.
    DidBuildIn,
    /// Exit transition started (own or by parent).
    WillBuildOut,
    /// Exit transition completed.
    DidBuildOut,
    /// An exit was called off by a re-attach.
    BuildOutCancelled,
    /// A running transition was cancelled.
    TransitionCancelled(TransitionKind),
    /// A running ad hoc animation was cancelled.
    AnimationCancelled,
    /// About to destroy the element.
    WillDestroyLayer,
    /// Element destroyed.
    DidDestroyLayer,
    /// The node or one of its ancestors changed parent.
    AncestryDidChange,
}

/// A follow-up action queued by a hook.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Action {
    Render,
    Attach,
    Detach { immediately: bool },
    Show,
    Hide,
    DestroyLayer,
    Adopt {
        parent: NodeId,
        before: Option<NodeId>,
    },
    Orphan,
    UpdateContent { force: bool },
    UpdateLayout { force: bool },
}

/// Actions a hook asks the tree to perform after the current one.
///
/// Queued actions have the same effect as the `Tree` methods of the same name.
/// Their results are not reported back; stale ids are ignored.
#[derive(Debug, Default)]
pub struct Actions {
    pub(crate) queued: Vec<(NodeId, Action)>,
}

impl Actions {
    /// Returns true if nothing has been queued.
    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }

    /// Queue [`Tree::render`](crate::Tree::render).
    pub fn render(&mut self, id: NodeId) {
        self.queued.push((id, Action::Render));
    }

    /// Queue [`Tree::attach`](crate::Tree::attach).
    pub fn attach(&mut self, id: NodeId) {
        self.queued.push((id, Action::Attach));
    }

    /// Queue [`Tree::detach`](crate::Tree::detach).
    pub fn detach(&mut self, id: NodeId) {
        self.queued.push((id, Action::Detach { immediately: false }));
    }

    /// Queue [`Tree::detach_immediately`](crate::Tree::detach_immediately).
    pub fn detach_immediately(&mut self, id: NodeId) {
        self.queued.push((id, Action::Detach { immediately: true }));
    }

    /// Queue [`Tree::show`](crate::Tree::show).
    pub fn show(&mut self, id: NodeId) {
        self.queued.push((id, Action::Show));
    }

    /// Queue [`Tree::hide`](crate::Tree::hide).
    pub fn hide(&mut self, id: NodeId) {
        self.queued.push((id, Action::Hide));
    }

    /// Queue [`Tree::destroy_layer`](crate::Tree::destroy_layer).
    pub fn destroy_layer(&mut self, id: NodeId) {
        self.queued.push((id, Action::DestroyLayer));
    }

    /// Queue [`Tree::adopt`](crate::Tree::adopt).
    pub fn adopt(&mut self, id: NodeId, parent: NodeId, before: Option<NodeId>) {
        self.queued.push((id, Action::Adopt { parent, before }));
    }

    /// Queue [`Tree::orphan`](crate::Tree::orphan).
    pub fn orphan(&mut self, id: NodeId) {
        self.queued.push((id, Action::Orphan));
    }

    /// Queue [`Tree::update_content`](crate::Tree::update_content).
    pub fn update_content(&mut self, id: NodeId, force: bool) {
        self.queued.push((id, Action::UpdateContent { force }));
    }

    /// Queue [`Tree::update_layout`](crate::Tree::update_layout).
    pub fn update_layout(&mut self, id: NodeId, force: bool) {
        self.queued.push((id, Action::UpdateLayout { force }));
    }
}

/// Receives lifecycle events for one node.
pub trait Hooks {
    /// Called at each lifecycle point.
    fn on_lifecycle(&mut self, node: NodeId, event: LifecycleEvent, actions: &mut Actions);
}

impl<F: FnMut(NodeId, LifecycleEvent, &mut Actions)> Hooks for F {
    fn on_lifecycle(&mut self, node: NodeId, event: LifecycleEvent, actions: &mut Actions) {
        self(node, event, actions);
    }
}
