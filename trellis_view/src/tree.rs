// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: node storage, structure, queries, and plugin plumbing.
//!
//! The lifecycle actions themselves live in [`statechart`](crate::statechart).

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use kurbo::Rect;
use trellis_cascade::types::ChildLookup;

use crate::backend::{Backend, Refresh};
use crate::build_out::BuildOuts;
use crate::hooks::{Action, Actions, Hooks, LifecycleEvent};
use crate::layout::{Layout, LayoutError, LayoutMode};
use crate::state::ViewState;
use crate::transition::{
    Ticket, Transition, TransitionCx, TransitionKind, TransitionOptions, TransitionSlot,
    Transitions,
};
use crate::types::{NodeId, Pending, Update, ViewConfig};

impl<B: Backend + Default> Default for Tree<B> {
    fn default() -> Self {
        Self::new(B::default())
    }
}

/// A tree of lifecycle-managed views, driving one rendering backend.
pub struct Tree<B: Backend> {
    nodes: Vec<Option<Node<B::Element>>>, // slots
    generations: Vec<u32>,                // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    pub(crate) backend: B,
    pub(crate) build_outs: BuildOuts,
    serial: u32,
    pub(crate) deferred: VecDeque<Deferred>,
}

impl<B: Backend> core::fmt::Debug for Tree<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("build_outs", &self.build_outs)
            .finish_non_exhaustive()
    }
}

/// Nodes touched since the previous [`Tree::commit`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Commit {
    /// Nodes whose ancestry changed (adopt/orphan marks the whole subtree).
    pub ancestry_changed: Vec<NodeId>,
    /// Nodes whose layout reached the backend.
    pub layout_changed: Vec<NodeId>,
}

impl Commit {
    /// Returns true if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.ancestry_changed.is_empty() && self.layout_changed.is_empty()
    }
}

/// Work queued while an action runs and processed before it returns.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Deferred {
    /// A plugin completed synchronously from inside `run`.
    Finished(Ticket),
    /// An owner may have nothing left to wait for.
    Detach(NodeId),
    /// A follow-up queued by a hook.
    Action(NodeId, Action),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum MotionKind {
    Transition(TransitionKind),
    Animation,
}

/// The one transition or animation a node may have in flight.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Motion {
    pub(crate) serial: u32,
    pub(crate) kind: MotionKind,
}

/// Visibility of a node's surroundings.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Context {
    Shown,
    Hidden,
    Detached,
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Dirty {
    pub(crate) ancestry: bool,
    pub(crate) layout: bool,
}

pub(crate) struct Node<E> {
    generation: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) state: ViewState,
    pub(crate) visible: bool,
    pub(crate) element: Option<E>,
    /// Host element for roots inserted with `attach_to`.
    pub(crate) host: Option<E>,
    pub(crate) transitions: Transitions,
    pub(crate) motion: Option<Motion>,
    /// Serial of a completed exit whose teardown waits for the node to leave its exiting state.
    pub(crate) out_settled: Option<u32>,
    /// The exit has completed and been counted with the owner.
    pub(crate) exit_done: bool,
    pub(crate) pending: Pending,
    pub(crate) build_out_owner: Option<NodeId>,
    pub(crate) layout: Layout,
    pub(crate) layout_mode: LayoutMode,
    pub(crate) hooks: Option<Box<dyn Hooks>>,
    pub(crate) dirty: Dirty,
}

impl<E> Node<E> {
    fn new(generation: u32, config: ViewConfig) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            state: ViewState::Unrendered,
            visible: config.visible,
            element: None,
            host: None,
            transitions: Transitions::default(),
            motion: None,
            out_settled: None,
            exit_done: false,
            pending: Pending::empty(),
            build_out_owner: None,
            layout: config.layout,
            layout_mode: config.layout_mode,
            hooks: None,
            dirty: Dirty {
                ancestry: true,
                layout: true,
            },
        }
    }
}

impl<B: Backend> ChildLookup<NodeId> for Tree<B> {
    fn children_of(&self, node: &NodeId) -> Vec<NodeId> {
        self.node_opt(*node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }
}

impl<B: Backend> Tree<B> {
    /// Create a new empty tree driving `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            backend,
            build_outs: BuildOuts::default(),
            serial: 0,
            deferred: VecDeque::new(),
        }
    }

    /// Insert a new, unrendered node as a child of `parent` (or as a root if `None`).
    ///
    /// With a parent this is an [`adopt`](Self::adopt), so the node catches up
    /// with a parent that is already rendered or attached.
    pub fn insert(&mut self, parent: Option<NodeId>, config: ViewConfig) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, config));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, config)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent {
            let _ = self.adopt(id, p, None);
        }
        id
    }

    /// Destroy a node and its whole subtree.
    ///
    /// Removal is immediate: running transitions are cancelled, elements are
    /// destroyed bottom-up, and every id in the subtree goes stale.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if self.node(id).state.is_attached() {
            self.execute_detach(id);
        }
        if self.node(id).state.is_rendered() {
            let _ = self.do_destroy_layer(id);
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        self.free_subtree(id);
        self.settle();
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Iterate the ids of all live nodes.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            n.as_ref().map(|n| NodeId::new(i as u32, n.generation))
        })
    }

    /// Current lifecycle state.
    pub fn state(&self, id: NodeId) -> Option<ViewState> {
        self.node_opt(id).map(|n| n.state)
    }

    /// Parent in the data tree.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Ordered children; empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// The rendered element, present iff the node is not [`ViewState::Unrendered`].
    pub fn element(&self, id: NodeId) -> Option<B::Element> {
        self.node_opt(id).and_then(|n| n.element)
    }

    /// The host element a root was attached to with [`attach_to`](Self::attach_to).
    pub fn host(&self, id: NodeId) -> Option<B::Element> {
        self.node_opt(id).and_then(|n| n.host)
    }

    /// Returns true if the node's element is inserted into a parent or host element.
    pub fn is_inserted(&self, id: NodeId) -> bool {
        self.state(id).is_some_and(ViewState::is_attached)
    }

    /// The caller's visibility intent.
    pub fn is_visible_request(&self, id: NodeId) -> Option<bool> {
        self.node_opt(id).map(|n| n.visible)
    }

    /// Refreshes waiting for the node to become shown.
    pub fn pending(&self, id: NodeId) -> Option<Pending> {
        self.node_opt(id).map(|n| n.pending)
    }

    /// Descendant exits an owner is still waiting for; zero when not coordinating.
    pub fn build_out_count(&self, id: NodeId) -> u32 {
        self.build_outs.outstanding(id)
    }

    /// The owner a node is exiting with.
    pub fn build_out_owner(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.build_out_owner)
    }

    /// The ticket of the transition or animation in flight, if any.
    pub fn in_flight(&self, id: NodeId) -> Option<Ticket> {
        self.node_opt(id)
            .and_then(|n| n.motion)
            .map(|m| Ticket {
                node: id,
                serial: m.serial,
            })
    }

    /// Layout attributes.
    pub fn layout(&self, id: NodeId) -> Option<&Layout> {
        self.node_opt(id).map(|n| &n.layout)
    }

    /// The node's frame as computed from its layout attributes.
    ///
    /// Fails if the attributes cannot produce a frame in the node's layout mode.
    pub fn frame(&self, id: NodeId) -> Result<Option<Rect>, LayoutError> {
        let node = self.node_opt(id).ok_or(LayoutError::DeadNode)?;
        node.layout.frame(node.layout_mode)
    }

    /// Returns true if the node has a plugin for `kind`.
    pub fn has_transition(&self, id: NodeId, kind: TransitionKind) -> bool {
        self.node_opt(id).is_some_and(|n| n.transitions.has(kind))
    }

    /// Options of the node's plugin for `kind`.
    pub fn transition_options(&self, id: NodeId, kind: TransitionKind) -> Option<&TransitionOptions> {
        self.node_opt(id).and_then(|n| n.transitions.options(kind))
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Install lifecycle hooks, replacing previous ones.
    pub fn set_hooks(&mut self, id: NodeId, hooks: impl Hooks + 'static) {
        if let Some(n) = self.node_opt_mut(id) {
            n.hooks = Some(Box::new(hooks));
        }
    }

    /// Configure the plugin for one transition kind.
    ///
    /// If a transition of that kind is in flight it is completed first.
    pub fn set_transition(
        &mut self,
        id: NodeId,
        kind: TransitionKind,
        plugin: impl Transition + 'static,
        options: TransitionOptions,
    ) {
        self.replace_transition(
            id,
            kind,
            Some(TransitionSlot {
                plugin: Box::new(plugin),
                options,
            }),
        );
    }

    /// Remove the plugin for one transition kind.
    ///
    /// If a transition of that kind is in flight it is completed first.
    pub fn clear_transition(&mut self, id: NodeId, kind: TransitionKind) {
        self.replace_transition(id, kind, None);
    }

    fn replace_transition(&mut self, id: NodeId, kind: TransitionKind, slot: Option<TransitionSlot>) {
        let Some(motion) = self.node_opt(id).map(|n| n.motion) else {
            return;
        };
        if let Some(motion) = motion
            && motion.kind == MotionKind::Transition(kind)
        {
            let _ = self.complete(Ticket {
                node: id,
                serial: motion.serial,
            });
        }
        // A finished exit stays counted with its owner after the teardown.
        if kind == TransitionKind::Out
            && let Some(serial) = self.node_opt_mut(id).and_then(|n| n.out_settled.take())
        {
            self.teardown(id, kind, serial);
        }
        if let Some(n) = self.node_opt_mut(id) {
            let _ = n.transitions.set(kind, slot);
        }
        self.settle();
    }

    /// Replace the layout attributes and request a layout refresh.
    pub fn set_layout(&mut self, id: NodeId, layout: Layout) -> Update {
        let Some(n) = self.node_opt_mut(id) else {
            return Update::Deferred;
        };
        n.layout = layout;
        self.update_layout(id, false)
    }

    /// Change how the layout attributes are interpreted and request a layout refresh.
    pub fn set_layout_mode(&mut self, id: NodeId, mode: LayoutMode) -> Update {
        let Some(n) = self.node_opt_mut(id) else {
            return Update::Deferred;
        };
        n.layout_mode = mode;
        self.update_layout(id, false)
    }

    /// End-of-batch flush: report and clear everything touched since the last commit.
    pub fn commit(&mut self) -> Commit {
        let mut out = Commit::default();
        for (i, slot) in self.nodes.iter_mut().enumerate() {
            let Some(n) = slot else {
                continue;
            };
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            let id = NodeId::new(i as u32, n.generation);
            if core::mem::take(&mut n.dirty.ancestry) {
                out.ancestry_changed.push(id);
            }
            if core::mem::take(&mut n.dirty.layout) {
                out.layout_changed.push(id);
            }
        }
        out
    }

    // --- internals ---

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node<B::Element> {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<B::Element> {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node<B::Element>> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    pub(crate) fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node<B::Element>> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    pub(crate) fn link_parent(&mut self, id: NodeId, parent: NodeId, before: Option<NodeId>) {
        let parent_node = self.node_mut(parent);
        let index = before.and_then(|b| parent_node.children.iter().position(|c| *c == b));
        match index {
            Some(i) => parent_node.children.insert(i, id),
            None => {
                if let Some(before) = before {
                    tracing::warn!(node = ?id, ?parent, ?before, "`before` is not a child of the new parent; appending");
                }
                parent_node.children.push(id);
            }
        }
        self.node_mut(id).parent = Some(parent);
    }

    pub(crate) fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    /// Returns true if `ancestor` is a proper ancestor of `id`.
    pub(crate) fn is_ancestor_of(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cur = self.node(id).parent;
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.node(p).parent;
        }
        false
    }

    fn free_subtree(&mut self, id: NodeId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.free_subtree(child);
        }
        let _ = self.build_outs.end(id);
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Visibility of the node's surroundings.
    pub(crate) fn parent_context(&self, id: NodeId) -> Context {
        let node = self.node(id);
        match node.parent {
            Some(p) => {
                let state = self.node(p).state;
                if state.is_shown() {
                    Context::Shown
                } else if state.is_hidden() {
                    Context::Hidden
                } else {
                    Context::Detached
                }
            }
            // A root left attached by `orphan` is its own context.
        None if node.host.is_some() || node.state.is_attached() => Context::Shown,
            None => Context::Detached,
        }
    }

    /// The element of the first later sibling already inserted into the parent's element.
    pub(crate) fn before_element(&self, id: NodeId) -> Option<B::Element> {
        let parent = self.node(id).parent?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|c| *c == id)?;
        siblings[pos + 1..].iter().find_map(|s| {
            let n = self.node(*s);
            if n.state.is_attached() && n.host.is_none() {
                n.element
            } else {
                None
            }
        })
    }

    /// Insert a node's element into its parent node's element.
    pub(crate) fn insert_into_parent(&mut self, id: NodeId) {
        let node = self.node(id);
        let (Some(element), Some(parent)) = (node.element, node.parent) else {
            return;
        };
        let Some(parent_element) = self.node(parent).element else {
            return;
        };
        let before = self.before_element(id);
        self.backend.insert(parent_element, element, before);
    }

    pub(crate) fn notify(&mut self, id: NodeId, event: LifecycleEvent) {
        let Some(hooks) = self.node_opt_mut(id).and_then(|n| n.hooks.as_mut()) else {
            return;
        };
        let mut actions = Actions::default();
        hooks.on_lifecycle(id, event, &mut actions);
        self.deferred.extend(
            actions
                .queued
                .into_iter()
                .map(|(node, action)| Deferred::Action(node, action)),
        );
    }

    /// Move to `to`, draining pending refreshes when `to` is shown.
    pub(crate) fn set_state(&mut self, id: NodeId, to: ViewState) {
        let node = self.node_mut(id);
        let from = node.state;
        node.state = to;
        tracing::trace!(node = ?id, ?from, ?to, "view state");
        if to.is_shown() {
            self.drain_pending(id);
        }
    }

    /// Apply every pending refresh, in declaration order, and clear the set.
    pub(crate) fn drain_pending(&mut self, id: NodeId) {
        let Some(node) = self.node_opt_mut(id) else {
            return;
        };
        if node.pending.is_empty() || node.element.is_none() {
            return;
        }
        let pending = core::mem::take(&mut node.pending);
        self.refresh_now(id, pending);
    }

    pub(crate) fn refresh_now(&mut self, id: NodeId, what: Pending) {
        let Self { nodes, backend, .. } = self;
        let Some(node) = nodes.get_mut(id.idx()).and_then(|n| n.as_mut()) else {
            return;
        };
        let Some(element) = node.element else {
            return;
        };
        if what.contains(Pending::CONTENT) {
            backend.refresh(element, Refresh::Content);
        }
        if what.contains(Pending::LAYOUT) {
            backend.refresh(element, Refresh::Layout(&node.layout));
            node.dirty.layout = true;
        }
        if what.contains(Pending::VISIBILITY) {
            backend.refresh(element, Refresh::Visibility(node.visible));
        }
    }

    pub(crate) fn next_serial(&mut self) -> u32 {
        self.serial = self.serial.wrapping_add(1);
        self.serial
    }

    /// Run `f` against the node's plugin for `kind`, if configured.
    pub(crate) fn with_plugin<R>(
        &mut self,
        id: NodeId,
        kind: TransitionKind,
        serial: u32,
        f: impl FnOnce(&mut dyn Transition, &mut TransitionCx<'_>) -> R,
    ) -> Option<R> {
        let node = self.node_opt_mut(id)?;
        let Node {
            transitions,
            layout,
            layout_mode,
            ..
        } = node;
        let TransitionSlot { plugin, options } = transitions.get_mut(kind)?;
        let mut cx = TransitionCx {
            ticket: Ticket { node: id, serial },
            kind,
            options: &*options,
            layout: &*layout,
            mode: *layout_mode,
            finished: false,
        };
        Some(f(&mut **plugin, &mut cx))
    }

    /// Set up and run the node's plugin for `kind`, recording it as the node's motion.
    pub(crate) fn start_transition(&mut self, id: NodeId, kind: TransitionKind, in_place: bool) {
        let serial = self.next_serial();
        self.node_mut(id).motion = Some(Motion {
            serial,
            kind: MotionKind::Transition(kind),
        });
        tracing::trace!(node = ?id, ?kind, in_place, serial, "transition run");
        let finished = self
            .with_plugin(id, kind, serial, |plugin, cx| {
                plugin.setup(cx, in_place);
                plugin.run(cx);
                cx.finished
            })
            .unwrap_or(true);
        if finished {
            self.deferred
                .push_back(Deferred::Finished(Ticket { node: id, serial }));
        }
    }

    /// Cancel whatever the node has in flight. Returns what was cancelled.
    pub(crate) fn cancel_motion(
        &mut self,
        id: NodeId,
        mode: crate::transition::CancelMode,
    ) -> Option<MotionKind> {
        let motion = self.node_opt_mut(id)?.motion.take()?;
        match motion.kind {
            MotionKind::Transition(kind) => {
                tracing::trace!(node = ?id, ?kind, ?mode, "transition cancel");
                let _ = self.with_plugin(id, kind, motion.serial, |plugin, cx| {
                    plugin.cancel(cx, mode);
                });
                self.notify(id, LifecycleEvent::TransitionCancelled(kind));
            }
            MotionKind::Animation => self.notify(id, LifecycleEvent::AnimationCancelled),
        }
        Some(motion.kind)
    }

    pub(crate) fn teardown(&mut self, id: NodeId, kind: TransitionKind, serial: u32) {
        tracing::trace!(node = ?id, ?kind, "transition teardown");
        let _ = self.with_plugin(id, kind, serial, |plugin, cx| plugin.teardown(cx));
    }

    /// Drop the node's part in a build-out: tear down a finished exit, or
    /// withdraw a running one from its owner's count.
    pub(crate) fn release_out_transition(&mut self, id: NodeId) {
        let node = self.node_mut(id);
        let owner = node.build_out_owner.take();
        let done = core::mem::take(&mut node.exit_done);
        if let Some(serial) = node.out_settled.take() {
            self.teardown(id, TransitionKind::Out, serial);
        }
        if let Some(owner) = owner
            && !done
            && self.build_outs.participant_done(owner)
        {
            self.deferred.push_back(Deferred::Detach(owner));
        }
    }

    /// Process deferred completions and removals until none are left.
    pub(crate) fn settle(&mut self) {
        while let Some(job) = self.deferred.pop_front() {
            match job {
                Deferred::Finished(ticket) => {
                    let _ = self.complete(ticket);
                }
                Deferred::Detach(owner) => self.finish_build_out(owner),
                Deferred::Action(id, action) => self.apply(id, action),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Recorder, script, scripted};
    use alloc::vec;

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut tree = Tree::new(Recorder::default());
        let root = tree.insert(None, ViewConfig::default());
        let a = tree.insert(Some(root), ViewConfig::default());
        assert!(tree.is_alive(root));
        assert!(tree.is_alive(a));
        assert_eq!(tree.children(root), &[a]);

        tree.remove(a);
        assert!(!tree.is_alive(a));
        assert!(tree.children(root).is_empty());

        let b = tree.insert(Some(root), ViewConfig::default());
        assert!(tree.is_alive(b));
        assert!(!tree.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
        assert_eq!(tree.state(a), None);
        assert_eq!(tree.parent(a), None);
    }

    #[test]
    fn remove_frees_whole_subtree_and_destroys_elements() {
        let mut tree = Tree::new(Recorder::default());
        let root = tree.insert(None, ViewConfig::default());
        let a = tree.insert(Some(root), ViewConfig::default());
        let b = tree.insert(Some(a), ViewConfig::default());
        let _ = tree.render(root);
        let ea = tree.element(a).unwrap();
        let eb = tree.element(b).unwrap();

        tree.remove(a);
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(b));
        assert!(tree.backend().destroyed.contains(&ea));
        assert!(tree.backend().destroyed.contains(&eb));
        assert_eq!(tree.ids().collect::<Vec<_>>(), vec![root]);
    }

    #[test]
    fn insert_honors_before() {
        let mut tree = Tree::new(Recorder::default());
        let root = tree.insert(None, ViewConfig::default());
        let a = tree.insert(Some(root), ViewConfig::default());
        let c = tree.insert(Some(root), ViewConfig::default());
        let b = tree.insert(None, ViewConfig::default());
        let _ = tree.adopt(b, root, Some(c));
        assert_eq!(tree.children(root), &[a, b, c]);
    }

    #[test]
    fn children_of_is_a_snapshot() {
        let mut tree = Tree::new(Recorder::default());
        let root = tree.insert(None, ViewConfig::default());
        let a = tree.insert(Some(root), ViewConfig::default());
        let snapshot = tree.children_of(&root);
        let _ = tree.orphan(a);
        assert_eq!(snapshot, vec![a]);
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn commit_reports_and_clears() {
        let mut tree = Tree::new(Recorder::default());
        let root = tree.insert(None, ViewConfig::default());
        let a = tree.insert(Some(root), ViewConfig::default());
        let first = tree.commit();
        assert!(first.ancestry_changed.contains(&a));
        assert!(tree.commit().is_empty());

        let b = tree.insert(None, ViewConfig::default());
        let _ = tree.commit();
        let _ = tree.adopt(a, b, None);
        let second = tree.commit();
        assert_eq!(second.ancestry_changed, vec![a]);
    }

    #[test]
    fn frame_reads_layout() {
        let mut tree = Tree::new(Recorder::default());
        let n = tree.insert(
            None,
            ViewConfig {
                layout: Layout::from_rect(Rect::new(0.0, 0.0, 10.0, 20.0)),
                ..Default::default()
            },
        );
        assert_eq!(tree.frame(n), Ok(Some(Rect::new(0.0, 0.0, 10.0, 20.0))));
        let _ = tree.set_layout(
            n,
            Layout {
                height: crate::layout::Dimension::Auto,
                ..Default::default()
            },
        );
        assert_eq!(tree.frame(n), Err(LayoutError::AutoHeight));
        let _ = tree.set_layout_mode(n, LayoutMode::Static);
        assert_eq!(tree.frame(n), Ok(None));
        tree.remove(n);
        assert_eq!(tree.frame(n), Err(LayoutError::DeadNode));
    }

    #[test]
    fn transition_slots_are_queryable() {
        let log = script();
        let mut tree = Tree::new(Recorder::default());
        let n = tree.insert(None, ViewConfig::default());
        assert!(!tree.has_transition(n, TransitionKind::In));
        tree.set_transition(n, TransitionKind::In, scripted(&log), TransitionOptions::default());
        assert!(tree.has_transition(n, TransitionKind::In));
        assert!(tree.transition_options(n, TransitionKind::In).is_some());
        tree.clear_transition(n, TransitionKind::In);
        assert!(!tree.has_transition(n, TransitionKind::In));
    }
}
