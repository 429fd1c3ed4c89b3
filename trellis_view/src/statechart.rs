// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle actions.
//!
//! Every public action validates itself against the node's current
//! [`ViewState`], changes the node, drives the backend and transition plugins,
//! and cascades the consequence to descendants. Invalid actions return
//! [`Handled::No`] and leave everything untouched (apart from recording a
//! visibility request, which is always kept).
//!
//! ## Completion
//!
//! A plugin may complete from inside `run`. Such completions, and removals that
//! become possible while a cascade is still walking, are queued and processed
//! before the action returns. The tree is consistent whenever control is back
//! with the caller.
//!
//! ## Conflicts
//!
//! A node has at most one transition or animation in flight. Starting another
//! cancels the current one first: at its current position when the new one
//! takes over from there, at its start when the action is a pure revert.

use trellis_cascade::cascade::Cascade;
use trellis_cascade::types::Outcome;

use crate::backend::Backend;
use crate::hooks::{Action, LifecycleEvent};
use crate::state::ViewState;
use crate::transition::{CancelMode, Ticket, TransitionKind};
use crate::tree::{Context, Deferred, Motion, MotionKind, Tree};
use crate::types::{Handled, NodeId, Pending, Update};

use ViewState::*;

impl<B: Backend> Tree<B> {
    /// Construct the node's element and those of its unrendered descendants.
    ///
    /// Descendant elements are inserted into their parents' elements as they
    /// are built. If the node has a parent, it is attached right away.
    pub fn render(&mut self, id: NodeId) -> Handled {
        let handled = self.do_render(id);
        self.settle();
        handled
    }

    /// Insert the node's element into its parent node's element.
    pub fn attach(&mut self, id: NodeId) -> Handled {
        let handled = self.do_attach(id, None);
        self.settle();
        handled
    }

    /// Insert a root node's element into an element the tree does not manage.
    ///
    /// A node that still has a parent is orphaned first.
    pub fn attach_to(
        &mut self,
        id: NodeId,
        host: B::Element,
        before: Option<B::Element>,
    ) -> Handled {
        if !self.is_alive(id) {
            return Handled::No;
        }
        if let Some(parent) = self.node(id).parent {
            tracing::warn!(node = ?id, ?parent, "attaching to a host while parented; orphaning first");
            let _ = self.do_orphan(id);
        }
        let handled = self.do_attach(id, Some((host, before)));
        self.settle();
        handled
    }

    /// Remove the node from the live tree, letting exit transitions play.
    ///
    /// If the node or any shown descendant has an exit transition, the node
    /// enters [`ViewState::AttachedBuildingOut`] and its element is removed
    /// once every exit has completed. Otherwise removal is immediate.
    pub fn detach(&mut self, id: NodeId) -> Handled {
        let handled = self.do_detach(id, false);
        self.settle();
        handled
    }

    /// Remove the node from the live tree now, cancelling anything in flight.
    pub fn detach_immediately(&mut self, id: NodeId) -> Handled {
        let handled = self.do_detach(id, true);
        self.settle();
        handled
    }

    /// Request the node to be visible.
    pub fn show(&mut self, id: NodeId) -> Handled {
        let handled = self.do_show(id);
        self.settle();
        handled
    }

    /// Request the node to be hidden.
    pub fn hide(&mut self, id: NodeId) -> Handled {
        let handled = self.do_hide(id);
        self.settle();
        handled
    }

    /// [`show`](Self::show) or [`hide`](Self::hide).
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Handled {
        if visible { self.show(id) } else { self.hide(id) }
    }

    /// Destroy the element of an unattached node and of its rendered descendants.
    pub fn destroy_layer(&mut self, id: NodeId) -> Handled {
        let handled = self.do_destroy_layer(id);
        self.settle();
        handled
    }

    /// Move the node under `parent`, before `before` or last.
    ///
    /// The node then conforms to its new parent: it is rendered and attached as
    /// far as the parent is, and torn down if the parent is unrendered.
    /// Adopting an ancestor is refused.
    pub fn adopt(&mut self, id: NodeId, parent: NodeId, before: Option<NodeId>) -> Handled {
        let handled = self.do_adopt(id, parent, before);
        self.settle();
        handled
    }

    /// Unlink the node from its parent.
    ///
    /// An attached node keeps its element where it is and becomes a root of its
    /// own: it leaves any exit it was playing on behalf of an ancestor, and a
    /// node hidden only by its old parent is shown. A node that was only
    /// partially attached is removed from the old parent's element.
    pub fn orphan(&mut self, id: NodeId) -> Handled {
        let handled = self.do_orphan(id);
        self.settle();
        handled
    }

    /// Re-render the node's content now if it is shown (or `force` and it is
    /// rendered); otherwise remember the request.
    pub fn update_content(&mut self, id: NodeId, force: bool) -> Update {
        self.request_refresh(id, Pending::CONTENT, force)
    }

    /// Re-apply the node's layout now if it is shown (or `force` and it is
    /// rendered); otherwise remember the request.
    pub fn update_layout(&mut self, id: NodeId, force: bool) -> Update {
        self.request_refresh(id, Pending::LAYOUT, force)
    }

    /// Start an ad hoc animation on a shown node.
    ///
    /// Returns the ticket to finish it with. Lifecycle actions that conflict
    /// with the animation cancel it.
    pub fn animate(&mut self, id: NodeId) -> Option<Ticket> {
        match self.state(id)? {
            AttachedShownAnimating => {
                let _ = self.cancel_motion(id, CancelMode::AtCurrent);
            }
            AttachedShown => {}
            _ => return None,
        }
        let serial = self.next_serial();
        self.node_mut(id).motion = Some(Motion {
            serial,
            kind: MotionKind::Animation,
        });
        self.set_state(id, AttachedShownAnimating);
        Some(Ticket { node: id, serial })
    }

    /// Report that a transition or animation run has completed.
    ///
    /// Stale tickets (superseded or cancelled runs) are ignored.
    pub fn finish_transition(&mut self, ticket: Ticket) -> Handled {
        let handled = self.complete(ticket);
        self.settle();
        handled
    }

    // --- render / destroy ---

    pub(crate) fn do_render(&mut self, id: NodeId) -> Handled {
        let Some(node) = self.node_opt(id) else {
            return Handled::No;
        };
        if node.state != Unrendered {
            return Handled::No;
        }
        let parent = node.parent;
        if let Some(parent) = parent
            && !self.node(parent).state.is_rendered()
        {
            tracing::warn!(node = ?id, ?parent, "cannot render below an unrendered parent");
            return Handled::No;
        }
        self.construct(id);
        let cascade = Cascade::will(self, id, |tree, child| {
            if tree.node(child).state != Unrendered {
                return Outcome::Stop;
            }
            tree.construct(child);
            Outcome::Continue
        });
        cascade.did(self, |tree, child| {
            tree.insert_into_parent(child);
            tree.set_state(child, AttachedPartial);
            tree.notify(child, LifecycleEvent::DidRender);
        });
        self.notify(id, LifecycleEvent::DidRender);
        if parent.is_some() {
            self.execute_attach(id, None);
        }
        Handled::Yes
    }

    fn construct(&mut self, id: NodeId) {
        self.notify(id, LifecycleEvent::WillRender);
        let element = self.backend.construct(id);
        let node = self.node_mut(id);
        node.element = Some(element);
        node.pending = Pending::empty();
        self.set_state(id, Unattached);
    }

    pub(crate) fn do_destroy_layer(&mut self, id: NodeId) -> Handled {
        if self.state(id) != Some(Unattached) {
            return Handled::No;
        }
        self.notify(id, LifecycleEvent::WillDestroyLayer);
        let cascade = Cascade::will(self, id, |tree, child| {
            if !tree.node(child).state.is_rendered() {
                return Outcome::Stop;
            }
            tree.notify(child, LifecycleEvent::WillDestroyLayer);
            Outcome::Continue
        });
        cascade.did(self, Self::destroy_element);
        self.destroy_element(id);
        Handled::Yes
    }

    fn destroy_element(&mut self, id: NodeId) {
        let node = self.node_mut(id);
        let element = node.element.take();
        node.host = None;
        node.pending = Pending::empty();
        if let Some(element) = element {
            self.backend.destroy(element);
        }
        self.set_state(id, Unrendered);
        self.notify(id, LifecycleEvent::DidDestroyLayer);
    }

    // --- attach ---

    fn do_attach(&mut self, id: NodeId, host: Option<(B::Element, Option<B::Element>)>) -> Handled {
        let Some(node) = self.node_opt(id) else {
            return Handled::No;
        };
        let (state, parent, current_host) = (node.state, node.parent, node.host);
        if host.is_none() {
            match parent {
                None => {
                    tracing::warn!(node = ?id, "cannot attach a root without a host element");
                    return Handled::No;
                }
                Some(p) if !self.node(p).state.is_rendered() => {
                    tracing::warn!(node = ?id, parent = ?p, "cannot attach to an unrendered parent");
                    return Handled::No;
                }
                Some(_) => {}
            }
        }
        match state {
            Unattached => {
                self.execute_attach(id, host);
                Handled::Yes
            }
            AttachedBuildingOut => {
                match host {
                    Some((h, _)) if current_host != Some(h) => {
                        self.execute_detach(id);
                        self.execute_attach(id, host);
                    }
                    _ => self.cancel_build_out(id),
                }
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    pub(crate) fn execute_attach(&mut self, id: NodeId, host: Option<(B::Element, Option<B::Element>)>) {
        let Some(element) = self.node(id).element else {
            return;
        };
        let (target, before) = match host {
            Some(h) => h,
            None => {
                let parent = self.node(id).parent;
                let Some(parent_element) = parent.and_then(|p| self.node(p).element) else {
                    return;
                };
                (parent_element, self.before_element(id))
            }
        };
        if !self.node(id).visible {
            self.node_mut(id).pending |= Pending::VISIBILITY;
        }
        self.drain_pending(id);
        self.notify(id, LifecycleEvent::WillAttach);
        self.backend.insert(target, element, before);
        self.node_mut(id).host = host.map(|(h, _)| h);
        let resolved = self.resolve_attached(id, true);
        self.set_state(id, resolved);
        if resolved != AttachedPartial {
            let cascade = Cascade::will(self, id, Self::parent_will_attach);
            cascade.did(self, |tree, child| tree.notify(child, LifecycleEvent::DidAttach));
        }
        self.notify(id, LifecycleEvent::DidAttach);
        if resolved == AttachedBuildingIn {
            self.notify(id, LifecycleEvent::WillBuildIn);
            self.start_transition(id, TransitionKind::In, false);
        }
    }

    /// The attached state a node settles into given its surroundings.
    fn resolve_attached(&self, id: NodeId, allow_build_in: bool) -> ViewState {
        let node = self.node(id);
        match self.parent_context(id) {
            Context::Detached => AttachedPartial,
            Context::Hidden if node.visible => AttachedHiddenByParent,
            Context::Hidden => AttachedHidden,
            Context::Shown if !node.visible => AttachedHidden,
            Context::Shown if allow_build_in && node.transitions.has(TransitionKind::In) => {
                AttachedBuildingIn
            }
            Context::Shown => AttachedShown,
        }
    }

    fn parent_will_attach(&mut self, child: NodeId) -> Outcome {
        if self.node(child).state != AttachedPartial {
            return Outcome::Stop;
        }
        let resolved = self.resolve_attached(child, false);
        if resolved == AttachedPartial {
            return Outcome::Stop;
        }
        if !self.node(child).visible {
            self.node_mut(child).pending |= Pending::VISIBILITY;
        }
        self.drain_pending(child);
        self.notify(child, LifecycleEvent::WillAttach);
        self.set_state(child, resolved);
        Outcome::Continue
    }

    // --- detach ---

    fn do_detach(&mut self, id: NodeId, immediately: bool) -> Handled {
        let Some(state) = self.state(id) else {
            return Handled::No;
        };
        match state {
            Unrendered | Unattached => Handled::No,
            AttachedPartial | AttachedHidden | AttachedHiddenByParent => {
                self.execute_detach(id);
                Handled::Yes
            }
            AttachedBuildingOut => {
                if immediately {
                    self.execute_detach(id);
                }
                Handled::Yes
            }
            AttachedBuildingOutByParent => {
                if immediately {
                    self.execute_detach(id);
                } else {
                    self.take_over_build_out(id);
                }
                Handled::Yes
            }
            _ => {
                if immediately || !self.builds_out(id) {
                    self.execute_detach(id);
                } else {
                    self.build_out(id);
                }
                Handled::Yes
            }
        }
    }

    /// Returns true if detaching the node would play at least one exit transition.
    fn builds_out(&self, id: NodeId) -> bool {
        if self.node(id).transitions.has(TransitionKind::Out) {
            return true;
        }
        let scan = Cascade::scan(self, id, |tree, child| {
            let state = tree.node(child).state;
            if state.is_shown() && !state.is_building_out() {
                Outcome::Continue
            } else {
                Outcome::Stop
            }
        });
        scan.affected()
            .iter()
            .any(|c| self.node(*c).transitions.has(TransitionKind::Out))
    }

    fn build_out(&mut self, id: NodeId) {
        let in_place = self.cancel_motion(id, CancelMode::AtCurrent).is_some();
        let own = self.node(id).transitions.has(TransitionKind::Out);
        self.build_outs.begin(id);
        self.build_outs.set_own_pending(id, own);
        self.notify(id, LifecycleEvent::WillBuildOut);
        self.set_state(id, AttachedBuildingOut);
        let _ = Cascade::will(self, id, |tree, child| tree.parent_will_build_out(child, id));
        tracing::debug!(owner = ?id, outstanding = self.build_outs.outstanding(id), own, "build-out started");
        if own {
            self.start_transition(id, TransitionKind::Out, in_place);
        } else if self.build_outs.is_ready(id) {
            self.deferred.push_back(Deferred::Detach(id));
        }
    }

    fn parent_will_build_out(&mut self, child: NodeId, owner: NodeId) -> Outcome {
        let state = self.node(child).state;
        if !state.is_shown() || state.is_building_out() {
            return Outcome::Stop;
        }
        if self.node(child).transitions.has(TransitionKind::Out) {
            let in_place = self.cancel_motion(child, CancelMode::AtCurrent).is_some();
            self.node_mut(child).build_out_owner = Some(owner);
            self.build_outs.enlist(owner);
            self.notify(child, LifecycleEvent::WillBuildOut);
            self.set_state(child, AttachedBuildingOutByParent);
            self.start_transition(child, TransitionKind::Out, in_place);
        }
        Outcome::Continue
    }

    /// A participant detached on its own becomes the owner of its exit.
    fn take_over_build_out(&mut self, id: NodeId) {
        let node = self.node_mut(id);
        let owner = node.build_out_owner.take();
        let done = core::mem::take(&mut node.exit_done);
        let running = node.motion.is_some();
        self.build_outs.begin(id);
        self.build_outs.set_own_pending(id, running);
        self.set_state(id, AttachedBuildingOut);
        if let Some(owner) = owner
            && !done
            && self.build_outs.participant_done(owner)
        {
            self.deferred.push_back(Deferred::Detach(owner));
        }
        if !running {
            self.deferred.push_back(Deferred::Detach(id));
        }
    }

    /// Remove the element once an owner has nothing left to wait for.
    pub(crate) fn finish_build_out(&mut self, owner: NodeId) {
        if self.state(owner) != Some(AttachedBuildingOut) || !self.build_outs.is_ready(owner) {
            return;
        }
        tracing::debug!(?owner, "build-out complete");
        self.execute_detach(owner);
    }

    /// Physically remove the node's element. Attached descendants go partial.
    pub(crate) fn execute_detach(&mut self, id: NodeId) {
        self.notify(id, LifecycleEvent::WillDetach);
        let _ = self.cancel_motion(id, CancelMode::AtCurrent);
        let _ = self.build_outs.end(id);
        let cascade = Cascade::will(self, id, Self::parent_will_detach);
        self.release_out_transition(id);
        if let Some(element) = self.node(id).element {
            self.backend.remove(element);
        }
        self.node_mut(id).host = None;
        self.set_state(id, Unattached);
        cascade.did(self, |tree, child| tree.notify(child, LifecycleEvent::DidDetach));
        self.notify(id, LifecycleEvent::DidDetach);
    }

    fn parent_will_detach(&mut self, child: NodeId) -> Outcome {
        let state = self.node(child).state;
        if !state.is_attached() || state == AttachedPartial {
            return Outcome::Stop;
        }
        self.notify(child, LifecycleEvent::WillDetach);
        let _ = self.cancel_motion(child, CancelMode::AtCurrent);
        let _ = self.build_outs.end(child);
        self.release_out_transition(child);
        self.set_state(child, AttachedPartial);
        Outcome::Continue
    }

    /// Call off a build-out: the owner and its participants return to shown.
    fn cancel_build_out(&mut self, id: NodeId) {
        let has_in = self.node(id).transitions.has(TransitionKind::In);
        let mode = if has_in {
            CancelMode::AtCurrent
        } else {
            CancelMode::AtStart
        };
        let was_running = self.cancel_motion(id, mode).is_some();
        if !was_running {
            self.release_out_transition(id);
        }
        let _ = self.build_outs.end(id);
        tracing::debug!(owner = ?id, "build-out cancelled");
        self.notify(id, LifecycleEvent::BuildOutCancelled);
        let cascade = Cascade::will(self, id, |tree, child| {
            tree.parent_did_cancel_build_out(child, id)
        });
        cascade.did(self, Self::conceal_if_hidden);
        if !self.node(id).visible {
            self.notify(id, LifecycleEvent::WillHide);
            self.conceal(id);
        } else if has_in {
            self.set_state(id, AttachedBuildingIn);
            self.notify(id, LifecycleEvent::WillBuildIn);
            self.start_transition(id, TransitionKind::In, was_running);
        } else {
            self.set_state(id, AttachedShown);
        }
    }

    fn parent_did_cancel_build_out(&mut self, child: NodeId, owner: NodeId) -> Outcome {
        let node = self.node(child);
        let state = node.state;
        if state == AttachedBuildingOutByParent && node.build_out_owner == Some(owner) {
            if self.cancel_motion(child, CancelMode::AtStart).is_none() {
                self.release_out_transition(child);
            }
            self.node_mut(child).build_out_owner = None;
            self.notify(child, LifecycleEvent::BuildOutCancelled);
            self.set_state(child, AttachedShown);
            Outcome::Continue
        } else if state.is_shown() && !state.is_building_out() {
            Outcome::Continue
        } else {
            Outcome::Stop
        }
    }

    /// Withdraw the node and its shown descendants from exits owned above them.
    fn leave_build_outs(&mut self, id: NodeId) {
        if self.parent_will_leave_build_out(id) == Outcome::Stop {
            return;
        }
        let cascade = Cascade::will(self, id, Self::parent_will_leave_build_out);
        cascade.did(self, Self::conceal_if_hidden);
        self.conceal_if_hidden(id);
    }

    fn parent_will_leave_build_out(&mut self, child: NodeId) -> Outcome {
        let state = self.node(child).state;
        if state == AttachedBuildingOutByParent {
            let _ = self.cancel_motion(child, CancelMode::AtStart);
            self.release_out_transition(child);
            self.notify(child, LifecycleEvent::BuildOutCancelled);
            self.set_state(child, AttachedShown);
            Outcome::Continue
        } else if state.is_shown() && !state.is_building_out() {
            Outcome::Continue
        } else {
            Outcome::Stop
        }
    }

    /// Hide a node that returned to shown while its request was hidden.
    fn conceal_if_hidden(&mut self, id: NodeId) {
        let node = self.node(id);
        if node.state == AttachedShown && !node.visible {
            self.notify(id, LifecycleEvent::WillHide);
            self.conceal(id);
        }
    }

    // --- show / hide ---

    fn do_show(&mut self, id: NodeId) -> Handled {
        let Some(node) = self.node_opt_mut(id) else {
            return Handled::No;
        };
        node.visible = true;
        let state = node.state;
        match state {
            Unattached | AttachedPartial => {
                node.pending |= Pending::VISIBILITY;
                Handled::No
            }
            AttachedHidden => {
                if self.parent_context(id) == Context::Shown {
                    self.reveal(id);
                } else {
                    self.node_mut(id).pending |= Pending::VISIBILITY;
                    self.set_state(id, AttachedHiddenByParent);
                }
                Handled::Yes
            }
            AttachedHiding => {
                self.notify(id, LifecycleEvent::WillShow);
                if self.node(id).transitions.has(TransitionKind::Show) {
                    let _ = self.cancel_motion(id, CancelMode::AtCurrent);
                    self.set_state(id, AttachedShowing);
                    self.start_transition(id, TransitionKind::Show, true);
                } else {
                    let _ = self.cancel_motion(id, CancelMode::AtStart);
                    self.set_state(id, AttachedShown);
                    self.notify(id, LifecycleEvent::DidShow);
                }
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn reveal(&mut self, id: NodeId) {
        self.notify(id, LifecycleEvent::WillShow);
        let node = self.node_mut(id);
        node.pending |= Pending::VISIBILITY;
        let has_show = node.transitions.has(TransitionKind::Show);
        self.set_state(id, if has_show { AttachedShowing } else { AttachedShown });
        let cascade = Cascade::will(self, id, |tree, child| {
            if tree.node(child).state != AttachedHiddenByParent {
                return Outcome::Stop;
            }
            tree.notify(child, LifecycleEvent::WillShow);
            tree.set_state(child, AttachedShown);
            Outcome::Continue
        });
        cascade.did(self, |tree, child| tree.notify(child, LifecycleEvent::DidShow));
        if has_show {
            self.start_transition(id, TransitionKind::Show, false);
        } else {
            self.notify(id, LifecycleEvent::DidShow);
        }
    }

    fn do_hide(&mut self, id: NodeId) -> Handled {
        let Some(node) = self.node_opt_mut(id) else {
            return Handled::No;
        };
        node.visible = false;
        let state = node.state;
        match state {
            Unattached | AttachedPartial => {
                node.pending |= Pending::VISIBILITY;
                Handled::No
            }
            AttachedHiddenByParent => {
                node.pending |= Pending::VISIBILITY;
                self.set_state(id, AttachedHidden);
                Handled::Yes
            }
            AttachedShown | AttachedShownAnimating => {
                let _ = self.cancel_motion(id, CancelMode::AtCurrent);
                self.begin_hide(id, false);
                Handled::Yes
            }
            AttachedShowing | AttachedBuildingIn => {
                let has_hide = self.node(id).transitions.has(TransitionKind::Hide);
                let mode = if has_hide {
                    CancelMode::AtCurrent
                } else {
                    CancelMode::AtStart
                };
                let _ = self.cancel_motion(id, mode);
                self.begin_hide(id, has_hide);
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn begin_hide(&mut self, id: NodeId, in_place: bool) {
        self.notify(id, LifecycleEvent::WillHide);
        if self.node(id).transitions.has(TransitionKind::Hide) {
            self.set_state(id, AttachedHiding);
            self.start_transition(id, TransitionKind::Hide, in_place);
        } else {
            self.conceal(id);
        }
    }

    /// Settle into hidden and take shown descendants with it.
    fn conceal(&mut self, id: NodeId) {
        self.set_state(id, AttachedHidden);
        self.refresh_now(id, Pending::VISIBILITY);
        let cascade = Cascade::will(self, id, Self::parent_will_hide);
        cascade.did(self, |tree, child| tree.notify(child, LifecycleEvent::DidHide));
        self.notify(id, LifecycleEvent::DidHide);
    }

    fn parent_will_hide(&mut self, child: NodeId) -> Outcome {
        let state = self.node(child).state;
        if !state.is_shown() {
            return Outcome::Stop;
        }
        if state == AttachedBuildingOut {
            self.execute_detach(child);
            return Outcome::Stop;
        }
        let _ = self.cancel_motion(child, CancelMode::AtCurrent);
        if state == AttachedBuildingOutByParent {
            self.release_out_transition(child);
        }
        self.notify(child, LifecycleEvent::WillHide);
        let to = if self.node(child).visible {
            AttachedHiddenByParent
        } else {
            AttachedHidden
        };
        self.set_state(child, to);
        Outcome::Continue
    }

    // --- structure ---

    fn do_adopt(&mut self, id: NodeId, parent: NodeId, before: Option<NodeId>) -> Handled {
        if !self.is_alive(id) || !self.is_alive(parent) {
            return Handled::No;
        }
        if id == parent || self.is_ancestor_of(id, parent) {
            tracing::warn!(node = ?id, ?parent, "adopting would create a cycle");
            return Handled::No;
        }
        if let Some(old) = self.node(id).parent {
            self.unlink_parent(id, old);
        }
        self.link_parent(id, parent, before);
        self.ancestry_changed(id);
        self.conform_to_parent(id);
        Handled::Yes
    }

    fn conform_to_parent(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).parent else {
            return;
        };
        let state = self.node(id).state;
        if !self.node(parent).state.is_rendered() {
            if state.is_attached() {
                self.execute_detach(id);
            }
            let _ = self.do_destroy_layer(id);
            return;
        }
        if state == Unrendered {
            let _ = self.do_render(id);
            return;
        }
        if state.is_attached() {
            self.execute_detach(id);
        }
        self.execute_attach(id, None);
    }

    fn do_orphan(&mut self, id: NodeId) -> Handled {
        let Some(parent) = self.parent(id) else {
            return Handled::No;
        };
        self.unlink_parent(id, parent);
        self.ancestry_changed(id);
        self.conform_to_root(id);
        Handled::Yes
    }

    /// Settle the states that only held below the old parent.
    fn conform_to_root(&mut self, id: NodeId) {
        let state = self.node(id).state;
        match state {
            AttachedPartial => self.execute_detach(id),
            AttachedHiddenByParent => self.reveal(id),
            AttachedBuildingOut => {}
            _ if state.is_shown() => self.leave_build_outs(id),
            _ => {}
        }
    }

    fn ancestry_changed(&mut self, id: NodeId) {
        self.node_mut(id).dirty.ancestry = true;
        let cascade = Cascade::will(self, id, |tree, child| {
            tree.node_mut(child).dirty.ancestry = true;
            Outcome::Continue
        });
        cascade.did(self, |tree, child| {
            tree.notify(child, LifecycleEvent::AncestryDidChange);
        });
        self.notify(id, LifecycleEvent::AncestryDidChange);
    }

    // --- refresh ---

    fn request_refresh(&mut self, id: NodeId, what: Pending, force: bool) -> Update {
        let Some(node) = self.node_opt_mut(id) else {
            return Update::Deferred;
        };
        if node.state.is_shown() || (force && node.state.is_rendered()) {
            self.refresh_now(id, what);
            Update::Applied
        } else {
            node.pending |= what;
            Update::Deferred
        }
    }

    /// Run an action a hook queued.
    pub(crate) fn apply(&mut self, id: NodeId, action: Action) {
        tracing::trace!(node = ?id, ?action, "queued action");
        let _ = match action {
            Action::Render => self.do_render(id),
            Action::Attach => self.do_attach(id, None),
            Action::Detach { immediately } => self.do_detach(id, immediately),
            Action::Show => self.do_show(id),
            Action::Hide => self.do_hide(id),
            Action::DestroyLayer => self.do_destroy_layer(id),
            Action::Adopt { parent, before } => self.do_adopt(id, parent, before),
            Action::Orphan => self.do_orphan(id),
            Action::UpdateContent { force } => {
                let _ = self.request_refresh(id, Pending::CONTENT, force);
                Handled::Yes
            }
            Action::UpdateLayout { force } => {
                let _ = self.request_refresh(id, Pending::LAYOUT, force);
                Handled::Yes
            }
        };
    }

    // --- completion ---

    pub(crate) fn complete(&mut self, ticket: Ticket) -> Handled {
        let id = ticket.node;
        let Some(node) = self.node_opt_mut(id) else {
            return Handled::No;
        };
        let kind = match node.motion {
            Some(m) if m.serial == ticket.serial => m.kind,
            _ => {
                tracing::trace!(node = ?id, serial = ticket.serial, "stale ticket ignored");
                return Handled::No;
            }
        };
        node.motion = None;
        let state = node.state;
        tracing::trace!(node = ?id, ?kind, "transition done");
        match kind {
            MotionKind::Animation => {
                if state == AttachedShownAnimating {
                    self.set_state(id, AttachedShown);
                }
            }
            MotionKind::Transition(TransitionKind::In) => {
                self.teardown(id, TransitionKind::In, ticket.serial);
                if state == AttachedBuildingIn {
                    self.set_state(id, AttachedShown);
                    self.notify(id, LifecycleEvent::DidBuildIn);
                }
            }
            MotionKind::Transition(TransitionKind::Show) => {
                self.teardown(id, TransitionKind::Show, ticket.serial);
                if state == AttachedShowing {
                    self.set_state(id, AttachedShown);
                    self.notify(id, LifecycleEvent::DidShow);
                }
            }
            MotionKind::Transition(TransitionKind::Hide) => {
                self.teardown(id, TransitionKind::Hide, ticket.serial);
                if state == AttachedHiding {
                    self.conceal(id);
                }
            }
            MotionKind::Transition(TransitionKind::Out) => {
                let node = self.node_mut(id);
                node.out_settled = Some(ticket.serial);
                node.exit_done = true;
                self.notify(id, LifecycleEvent::DidBuildOut);
                match state {
                    AttachedBuildingOut => {
                        if self.build_outs.own_done(id) {
                            self.finish_build_out(id);
                        }
                    }
                    AttachedBuildingOutByParent => {
                        if let Some(owner) = self.node(id).build_out_owner
                            && self.build_outs.participant_done(owner)
                        {
                            self.finish_build_out(owner);
                        }
                    }
                    _ => {}
                }
            }
        }
        Handled::Yes
    }
}
