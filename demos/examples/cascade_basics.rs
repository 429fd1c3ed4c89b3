// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cascade basics.
//!
//! Runs a "will" pass that stops at subtrees already in the target state and a
//! "did" pass that replays the affected nodes bottom-up.
//!
//! Run:
//! - `cargo run -p trellis_demos --example cascade_basics`

use trellis_cascade::cascade::Cascade;
use trellis_cascade::types::{ChildLookup, Outcome};

struct Outline {
    children: Vec<Vec<usize>>,
    folded: Vec<bool>,
}

impl ChildLookup<usize> for Outline {
    fn children_of(&self, node: &usize) -> Vec<usize> {
        self.children[*node].clone()
    }
}

fn main() {
    // 0 ─┬─ 1 ─┬─ 3
    //    │     └─ 4
    //    └─ 2 (already folded) ── 5
    let mut outline = Outline {
        children: vec![vec![1, 2], vec![3, 4], vec![5], vec![], vec![], vec![]],
        folded: vec![false, false, true, false, false, false],
    };

    let cascade = Cascade::will(&mut outline, 0, |o, node| {
        if o.folded[node] {
            println!("  will: {node} already folded, stop");
            return Outcome::Stop;
        }
        println!("  will: fold {node}");
        o.folded[node] = true;
        Outcome::Continue
    });

    println!("== Steps ==");
    for step in cascade.steps() {
        println!("  {:?} {}", step.phase, step.node);
    }

    cascade.did(&mut outline, |_, node| println!("  did: {node} folded"));
}
