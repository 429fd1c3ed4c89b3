// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording doubles shared by the unit tests.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::backend::{Backend, Refresh};
use crate::hooks::{Actions, LifecycleEvent};
use crate::state::ViewState;
use crate::transition::{CancelMode, Ticket, Transition, TransitionCx, TransitionKind};
use crate::tree::Tree;
use crate::types::NodeId;

/// An element the tests pretend is the page; never constructed by the tree.
pub(crate) const HOST: u32 = 0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Op {
    Construct(NodeId, u32),
    Destroy(u32),
    Insert {
        parent: u32,
        child: u32,
        before: Option<u32>,
    },
    Remove(u32),
    Refresh(u32, &'static str),
}

/// Backend with `u32` elements that logs every primitive and tracks child order.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    next: u32,
    pub(crate) ops: Vec<Op>,
    pub(crate) destroyed: Vec<u32>,
    children: BTreeMap<u32, Vec<u32>>,
}

impl Recorder {
    pub(crate) fn children_of(&self, element: u32) -> Vec<u32> {
        self.children.get(&element).cloned().unwrap_or_default()
    }

    fn unlink(&mut self, element: u32) {
        for list in self.children.values_mut() {
            list.retain(|e| *e != element);
        }
    }
}

impl Backend for Recorder {
    type Element = u32;

    fn construct(&mut self, node: NodeId) -> u32 {
        self.next += 1;
        self.ops.push(Op::Construct(node, self.next));
        self.next
    }

    fn destroy(&mut self, element: u32) {
        self.unlink(element);
        self.children.remove(&element);
        self.destroyed.push(element);
        self.ops.push(Op::Destroy(element));
    }

    fn insert(&mut self, parent: u32, child: u32, before: Option<u32>) {
        self.unlink(child);
        let list = self.children.entry(parent).or_default();
        match before.and_then(|b| list.iter().position(|e| *e == b)) {
            Some(i) => list.insert(i, child),
            None => list.push(child),
        }
        self.ops.push(Op::Insert {
            parent,
            child,
            before,
        });
    }

    fn remove(&mut self, element: u32) {
        self.unlink(element);
        self.ops.push(Op::Remove(element));
    }

    fn refresh(&mut self, element: u32, refresh: Refresh<'_>) {
        let what = match refresh {
            Refresh::Content => "content",
            Refresh::Layout(_) => "layout",
            Refresh::Visibility(_) => "visibility",
        };
        self.ops.push(Op::Refresh(element, what));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    Setup { kind: TransitionKind, in_place: bool },
    Run(TransitionKind),
    Cancel(TransitionKind, CancelMode),
    Teardown(TransitionKind),
}

/// Everything the scripted plugins saw, across all nodes.
#[derive(Debug, Default)]
pub(crate) struct Script {
    pub(crate) calls: Vec<(NodeId, Call)>,
    /// Tickets of every run, in start order.
    pub(crate) tickets: Vec<Ticket>,
}

impl Script {
    pub(crate) fn count(&self, node: NodeId, call: Call) -> usize {
        self.calls
            .iter()
            .filter(|(n, c)| *n == node && *c == call)
            .count()
    }

    pub(crate) fn last_ticket(&self) -> Ticket {
        *self.tickets.last().expect("no transition has run")
    }
}

pub(crate) type SharedScript = Rc<RefCell<Script>>;

pub(crate) fn script() -> SharedScript {
    SharedScript::default()
}

/// A plugin that records its calls and completes only when told to.
#[derive(Debug)]
pub(crate) struct Scripted {
    log: SharedScript,
    sync: bool,
}

/// A scripted plugin that waits for [`Tree::finish_transition`].
pub(crate) fn scripted(log: &SharedScript) -> Scripted {
    Scripted {
        log: Rc::clone(log),
        sync: false,
    }
}

/// A scripted plugin that completes from inside `run`.
pub(crate) fn instant(log: &SharedScript) -> Scripted {
    Scripted {
        log: Rc::clone(log),
        sync: true,
    }
}

impl Transition for Scripted {
    fn setup(&mut self, cx: &TransitionCx<'_>, in_place: bool) {
        self.log.borrow_mut().calls.push((
            cx.node(),
            Call::Setup {
                kind: cx.kind(),
                in_place,
            },
        ));
    }

    fn run(&mut self, cx: &mut TransitionCx<'_>) {
        let mut log = self.log.borrow_mut();
        log.calls.push((cx.node(), Call::Run(cx.kind())));
        log.tickets.push(cx.ticket());
        if self.sync {
            cx.finish();
        }
    }

    fn cancel(&mut self, cx: &TransitionCx<'_>, mode: CancelMode) {
        self.log
            .borrow_mut()
            .calls
            .push((cx.node(), Call::Cancel(cx.kind(), mode)));
    }

    fn teardown(&mut self, cx: &TransitionCx<'_>) {
        self.log
            .borrow_mut()
            .calls
            .push((cx.node(), Call::Teardown(cx.kind())));
    }
}

pub(crate) type EventLog = Rc<RefCell<Vec<(NodeId, LifecycleEvent)>>>;

/// Record lifecycle events of `nodes` into one shared log.
pub(crate) fn events<B: Backend>(tree: &mut Tree<B>, nodes: &[NodeId]) -> EventLog {
    let log = EventLog::default();
    for &n in nodes {
        let log = Rc::clone(&log);
        tree.set_hooks(n, move |id: NodeId, event: LifecycleEvent, _: &mut Actions| {
            log.borrow_mut().push((id, event));
        });
    }
    log
}

/// Check the invariants every public action must leave behind.
pub(crate) fn assert_consistent<B: Backend>(tree: &Tree<B>) {
    for id in tree.ids() {
        let state = tree.state(id).expect("live node has a state");
        assert_eq!(
            tree.element(id).is_some(),
            state.is_rendered(),
            "{id:?} in {state:?}: element presence"
        );
        if state.is_shown() {
            assert!(
                tree.pending(id).is_some_and(|p| p.is_empty()),
                "{id:?} in {state:?}: pending refreshes while shown"
            );
            let mut cur = tree.parent(id);
            while let Some(p) = cur {
                let ps = tree.state(p).expect("parent is live");
                assert!(
                    ps.is_attached() && ps.is_shown(),
                    "{id:?} in {state:?} below {p:?} in {ps:?}"
                );
                cur = tree.parent(p);
            }
        }
        match tree.build_out_owner(id) {
            Some(owner) => {
                assert_eq!(state, ViewState::AttachedBuildingOutByParent, "{id:?}: owner link");
                assert_eq!(
                    tree.state(owner),
                    Some(ViewState::AttachedBuildingOut),
                    "{id:?}: owner {owner:?} is not exiting"
                );
                assert!(
                    tree.is_ancestor_of(owner, id),
                    "{id:?}: owner {owner:?} is not an ancestor"
                );
            }
            None => assert_ne!(
                state,
                ViewState::AttachedBuildingOutByParent,
                "{id:?}: participant without owner"
            ),
        }
        if state == ViewState::AttachedBuildingOut {
            let running = tree
                .ids()
                .filter(|p| tree.build_out_owner(*p) == Some(id) && !tree.node(*p).exit_done)
                .count();
            assert_eq!(
                tree.build_out_count(id),
                u32::try_from(running).unwrap(),
                "{id:?}: count disagrees with running participants"
            );
        }
    }
}
