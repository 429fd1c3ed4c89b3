// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis View: a lifecycle statechart for trees of UI views.
//!
//! Every view moves through a twelve-state lifecycle: unrendered, rendered,
//! attached (partially or fully), shown or hidden, and a handful of
//! transitional states in which an injected animation plays. This crate keeps
//! that lifecycle consistent across a whole tree, even under rapid and
//! contradictory requests (show, hide, show again before anything finished).
//!
//! - [`Tree`] owns the nodes and runs the nine lifecycle actions.
//! - [`Backend`] turns nodes into concrete elements and arranges them.
//! - [`Transition`] plugins animate entering, leaving, showing, and hiding.
//! - [`Hooks`] observe each lifecycle point without being able to veto it, and
//!   may queue follow-up [`Actions`].
//!
//! ## Not a renderer
//!
//! Element construction, insertion, and styling are delegated to the backend.
//! Animation timing is delegated to plugins, which report completion with a
//! [`Ticket`]. The tree decides *when* things happen; it never draws.
//!
//! ## States
//!
//! [`ViewState`] is encoded as bit flags ([`StateFlags`]) so "is this node
//! rendered / attached / shown" are single tests. The tree consistency
//! invariant holds whenever control returns to the caller: a shown node has
//! only attached, shown ancestors.
//!
//! ## Removal with exit transitions
//!
//! Detaching a shown node whose subtree has exit transitions does not remove it
//! at once. The node becomes the *owner* of a build-out, every shown descendant
//! with an exit transition plays it, and the owner's element is removed when
//! the last one completes. Re-attaching the owner in the meantime calls the
//! whole build-out off.
//!
//! ## Batching
//!
//! Actions apply synchronously. [`Tree::commit`] reports which nodes changed
//! ancestry or layout since the previous commit.
//!
//! ## Minimal usage
//!
//! ```
//! use trellis_view::{Backend, Handled, NodeId, Tree, ViewConfig, ViewState};
//!
//! #[derive(Default)]
//! struct Counter {
//!     next: u32,
//!     inserted: Vec<(u32, u32)>,
//! }
//!
//! impl Backend for Counter {
//!     type Element = u32;
//!     fn construct(&mut self, _node: NodeId) -> u32 {
//!         self.next += 1;
//!         self.next
//!     }
//!     fn destroy(&mut self, _element: u32) {}
//!     fn insert(&mut self, parent: u32, child: u32, _before: Option<u32>) {
//!         self.inserted.push((parent, child));
//!     }
//!     fn remove(&mut self, element: u32) {
//!         self.inserted.retain(|(_, c)| *c != element);
//!     }
//! }
//!
//! let mut tree = Tree::new(Counter::default());
//! let root = tree.insert(None, ViewConfig::default());
//! let child = tree.insert(Some(root), ViewConfig::default());
//!
//! assert_eq!(tree.render(root), Handled::Yes);
//! assert_eq!(tree.state(child), Some(ViewState::AttachedPartial));
//!
//! // Element 0 stands in for a host the tree does not manage.
//! assert_eq!(tree.attach_to(root, 0, None), Handled::Yes);
//! assert_eq!(tree.state(child), Some(ViewState::AttachedShown));
//!
//! assert_eq!(tree.hide(root), Handled::Yes);
//! assert_eq!(tree.state(child), Some(ViewState::AttachedHiddenByParent));
//!
//! assert_eq!(tree.detach(child), Handled::Yes);
//! assert_eq!(tree.state(child), Some(ViewState::Unattached));
//! assert_eq!(tree.backend().inserted.len(), 1);
//! ```
//!
//! ## Exit transitions
//!
//! ```
//! use trellis_view::{
//!     Backend, CancelMode, Handled, NodeId, Transition, TransitionCx, TransitionKind,
//!     TransitionOptions, Tree, ViewConfig, ViewState,
//! };
//!
//! # #[derive(Default)]
//! # struct Counter(u32);
//! # impl Backend for Counter {
//! #     type Element = u32;
//! #     fn construct(&mut self, _node: NodeId) -> u32 { self.0 += 1; self.0 }
//! #     fn destroy(&mut self, _element: u32) {}
//! #     fn insert(&mut self, _parent: u32, _child: u32, _before: Option<u32>) {}
//! #     fn remove(&mut self, _element: u32) {}
//! # }
//! // A fade that an external animation driver completes later.
//! struct Fade;
//! impl Transition for Fade {
//!     fn run(&mut self, _cx: &mut TransitionCx<'_>) {}
//!     fn cancel(&mut self, _cx: &TransitionCx<'_>, _mode: CancelMode) {}
//! }
//!
//! let mut tree = Tree::new(Counter::default());
//! let root = tree.insert(None, ViewConfig::default());
//! let panel = tree.insert(Some(root), ViewConfig::default());
//! let item = tree.insert(Some(panel), ViewConfig::default());
//! tree.set_transition(item, TransitionKind::Out, Fade, TransitionOptions::default());
//! let _ = tree.render(root);
//! let _ = tree.attach_to(root, 0, None);
//!
//! assert_eq!(tree.detach(panel), Handled::Yes);
//! assert_eq!(tree.state(panel), Some(ViewState::AttachedBuildingOut));
//! assert_eq!(tree.build_out_count(panel), 1);
//!
//! let ticket = tree.in_flight(item).unwrap();
//! let _ = tree.finish_transition(ticket);
//! assert_eq!(tree.state(panel), Some(ViewState::Unattached));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod backend;
mod build_out;
mod hooks;
mod layout;
mod state;
mod statechart;
mod transition;
mod tree;
mod types;

#[cfg(test)]
mod test_support;

pub use backend::{Backend, Refresh};
pub use hooks::{Actions, Hooks, LifecycleEvent};
pub use layout::{Dimension, Layout, LayoutError, LayoutMode};
pub use state::{StateFlags, ViewState};
pub use transition::{
    CancelMode, Ticket, Timing, Transition, TransitionCx, TransitionKind, TransitionOptions,
};
pub use tree::{Commit, Tree};
pub use types::{Handled, NodeId, Pending, Update, ViewConfig};
