// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transition plugin contract.
//!
//! ## Protocol
//!
//! For every transition the tree starts it calls [`Transition::setup`] and then
//! [`Transition::run`]. The plugin reports completion exactly once per run,
//! either synchronously with [`TransitionCx::finish`] or later by handing the
//! run's [`Ticket`] to [`Tree::finish_transition`](crate::Tree::finish_transition).
//!
//! A run that is superseded before it completes gets exactly one
//! [`Transition::cancel`]; its ticket goes stale and a late completion with it
//! is ignored.
//!
//! A plugin that never completes parks its node in the transitional state.
//! The tree has no timeout.

use alloc::boxed::Box;
use core::time::Duration;

use kurbo::Rect;

use crate::layout::{Layout, LayoutError, LayoutMode};
use crate::types::NodeId;

/// The four lifecycle transitions a node can be configured with.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TransitionKind {
    /// Entering the tree.
    In,
    /// Leaving the tree.
    Out,
    /// Becoming visible.
    Show,
    /// Becoming hidden.
    Hide,
}

impl TransitionKind {
    /// Every kind.
    pub const ALL: [Self; 4] = [Self::In, Self::Out, Self::Show, Self::Hide];

    const fn slot(self) -> usize {
        match self {
            Self::In => 0,
            Self::Out => 1,
            Self::Show => 2,
            Self::Hide => 3,
        }
    }
}

/// Where a cancelled transition leaves the node.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CancelMode {
    /// Freeze at the current position; a competing transition takes over from here.
    AtCurrent,
    /// Revert to the starting position.
    AtStart,
}

/// Easing curve hint for plugins.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Timing {
    /// Constant speed.
    Linear,
    /// Accelerate then decelerate.
    #[default]
    Ease,
    /// Accelerate.
    EaseIn,
    /// Decelerate.
    EaseOut,
    /// Accelerate and decelerate symmetrically.
    EaseInOut,
}

/// The options bag handed to a plugin.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionOptions {
    /// Run length.
    pub duration: Duration,
    /// Wait before starting.
    pub delay: Duration,
    /// Easing curve.
    pub timing: Timing,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(250),
            delay: Duration::ZERO,
            timing: Timing::default(),
        }
    }
}

/// Identifies one run of a transition or ad hoc animation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Ticket {
    pub(crate) node: NodeId,
    pub(crate) serial: u32,
}

impl Ticket {
    /// The node the run belongs to.
    pub fn node(self) -> NodeId {
        self.node
    }
}

/// What a plugin sees while the tree drives it.
#[derive(Debug)]
pub struct TransitionCx<'a> {
    pub(crate) ticket: Ticket,
    pub(crate) kind: TransitionKind,
    pub(crate) options: &'a TransitionOptions,
    pub(crate) layout: &'a Layout,
    pub(crate) mode: LayoutMode,
    pub(crate) finished: bool,
}

impl TransitionCx<'_> {
    /// The animated node.
    pub fn node(&self) -> NodeId {
        self.ticket.node
    }

    /// Which transition is running.
    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// The ticket to complete this run with.
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// The slot's options.
    pub fn options(&self) -> &TransitionOptions {
        self.options
    }

    /// The node's layout attributes as of this call.
    pub fn layout(&self) -> &Layout {
        self.layout
    }

    /// The node's frame as of this call.
    ///
    /// Fails if the node's layout cannot produce a frame in its current mode.
    pub fn frame(&self) -> Result<Option<Rect>, LayoutError> {
        self.layout.frame(self.mode)
    }

    /// Report completion from inside [`Transition::run`].
    ///
    /// The tree processes it before the action that started the run returns.
    pub fn finish(&mut self) {
        self.finished = true;
    }
}

/// An injected strategy that animates one lifecycle change.
pub trait Transition {
    /// Prepare the node. `in_place` is true when a cancelled transition of
    /// another kind left the node mid-way and this one continues from there.
    fn setup(&mut self, cx: &TransitionCx<'_>, in_place: bool) {
        let _ = (cx, in_place);
    }

    /// Start animating.
    fn run(&mut self, cx: &mut TransitionCx<'_>);

    /// Stop a run that has not completed.
    fn cancel(&mut self, cx: &TransitionCx<'_>, mode: CancelMode);

    /// Undo any temporary styling once the run's effect is no longer needed.
    fn teardown(&mut self, cx: &TransitionCx<'_>) {
        let _ = cx;
    }
}

pub(crate) struct TransitionSlot {
    pub(crate) plugin: Box<dyn Transition>,
    pub(crate) options: TransitionOptions,
}

/// The four optional plugin slots of a node.
#[derive(Default)]
pub(crate) struct Transitions {
    slots: [Option<TransitionSlot>; 4],
}

impl Transitions {
    pub(crate) fn has(&self, kind: TransitionKind) -> bool {
        self.slots[kind.slot()].is_some()
    }

    pub(crate) fn get_mut(&mut self, kind: TransitionKind) -> Option<&mut TransitionSlot> {
        self.slots[kind.slot()].as_mut()
    }

    pub(crate) fn set(
        &mut self,
        kind: TransitionKind,
        slot: Option<TransitionSlot>,
    ) -> Option<TransitionSlot> {
        core::mem::replace(&mut self.slots[kind.slot()], slot)
    }

    pub(crate) fn options(&self, kind: TransitionKind) -> Option<&TransitionOptions> {
        self.slots[kind.slot()].as_ref().map(|s| &s.options)
    }
}

impl core::fmt::Debug for Transitions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut list = f.debug_list();
        for kind in TransitionKind::ALL {
            if self.has(kind) {
                list.entry(&kind);
            }
        }
        list.finish()
    }
}
