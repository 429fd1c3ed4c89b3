// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Cascade: deterministic, `no_std` propagation of state changes through a tree.
//!
//! ## Overview
//!
//! A cascade carries one state-changing event from a root node to its descendants.
//! It runs in two phases:
//!
//! 1) **Will**: a pre-order (parent first) walk of the root's descendants.
//!    The handler for each node returns an [`Outcome`](crate::types::Outcome):
//!    [`Continue`](crate::types::Outcome::Continue) marks the node as affected and descends into its children,
//!    [`Stop`](crate::types::Outcome::Stop) leaves the node and its whole subtree alone because it is already consistent.
//! 2) **Did**: a replay of exactly the affected nodes, in reverse order.
//!    Every child finishes settling before its parent's handler runs.
//!
//! The root itself is never visited; callers notify it before and after the cascade.
//!
//! ## Children
//!
//! Implement [`ChildLookup`](crate::types::ChildLookup) for your tree.
//! Child lists are snapshotted when a node is descended into, so a handler may mutate the tree
//! (for example adopt or orphan further children) without invalidating the walk in progress.
//!
//! ## Example
//!
//! ```
//! use trellis_cascade::cascade::Cascade;
//! use trellis_cascade::types::{ChildLookup, Outcome};
//!
//! struct Tree {
//!     children: Vec<Vec<usize>>,
//!     hidden: Vec<bool>,
//!     log: Vec<String>,
//! }
//!
//! impl ChildLookup<usize> for Tree {
//!     fn children_of(&self, node: &usize) -> Vec<usize> {
//!         self.children[*node].clone()
//!     }
//! }
//!
//! // 0 ─┬─ 1 ── 3
//! //    └─ 2 (hidden on its own)
//! let mut tree = Tree {
//!     children: vec![vec![1, 2], vec![3], vec![], vec![]],
//!     hidden: vec![false, false, true, false],
//!     log: Vec::new(),
//! };
//!
//! let cascade = Cascade::will(&mut tree, 0, |t, n| {
//!     if t.hidden[n] {
//!         return Outcome::Stop;
//!     }
//!     t.log.push(format!("will {n}"));
//!     Outcome::Continue
//! });
//! cascade.did(&mut tree, |t, n| t.log.push(format!("did {n}")));
//!
//! assert_eq!(tree.log, ["will 1", "will 3", "did 3", "did 1"]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod cascade;
pub mod types;
