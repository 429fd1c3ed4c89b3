// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle basics.
//!
//! Builds a small tree over a printing backend, walks it through render,
//! attach, hide, show, and detach, and prints the lifecycle events one node
//! receives along the way.
//!
//! Run:
//! - `cargo run -p trellis_demos --example lifecycle_basics`

use kurbo::Rect;
use trellis_view::{
    Actions, Backend, Layout, LifecycleEvent, NodeId, Refresh, Tree, ViewConfig, ViewState,
};

/// Prints every primitive; elements are plain counters.
#[derive(Default)]
struct Printer {
    next: u32,
}

impl Backend for Printer {
    type Element = u32;

    fn construct(&mut self, node: NodeId) -> u32 {
        self.next += 1;
        println!("  backend: construct e{} for {node:?}", self.next);
        self.next
    }

    fn destroy(&mut self, element: u32) {
        println!("  backend: destroy e{element}");
    }

    fn insert(&mut self, parent: u32, child: u32, before: Option<u32>) {
        match before {
            Some(b) => println!("  backend: insert e{child} into e{parent} before e{b}"),
            None => println!("  backend: insert e{child} into e{parent}"),
        }
    }

    fn remove(&mut self, element: u32) {
        println!("  backend: remove e{element}");
    }

    fn refresh(&mut self, element: u32, refresh: Refresh<'_>) {
        println!("  backend: refresh e{element} {refresh:?}");
    }
}

fn print_states(tree: &Tree<Printer>, names: &[(&str, NodeId)]) {
    for (name, id) in names {
        let state = tree.state(*id).unwrap_or(ViewState::Unrendered);
        println!("  {name:>6}: {state:?}");
    }
}

fn main() {
    let mut tree = Tree::new(Printer::default());

    let page = tree.insert(None, ViewConfig::default());
    let header = tree.insert(
        Some(page),
        ViewConfig {
            layout: Layout::from_rect(Rect::new(0.0, 0.0, 800.0, 64.0)),
            ..Default::default()
        },
    );
    let body = tree.insert(Some(page), ViewConfig::default());
    let names = [("page", page), ("header", header), ("body", body)];

    tree.set_hooks(header, |node: NodeId, event: LifecycleEvent, _: &mut Actions| {
        println!("  hook: {node:?} {event:?}");
    });

    println!("== Render ==");
    let _ = tree.render(page);
    print_states(&tree, &names);

    println!("== Attach to host e0 ==");
    let _ = tree.attach_to(page, 0, None);
    print_states(&tree, &names);
    println!("  header frame: {:?}", tree.frame(header));

    println!("== Hide page; header follows ==");
    let _ = tree.hide(page);
    print_states(&tree, &names);

    println!("== Content update while hidden is deferred ==");
    println!("  update: {:?}", tree.update_content(header, false));
    println!("  pending: {:?}", tree.pending(header));

    println!("== Show page; pending updates drain ==");
    let _ = tree.show(page);
    print_states(&tree, &names);

    println!("== Detach body ==");
    let _ = tree.detach(body);
    print_states(&tree, &names);

    let commit = tree.commit();
    println!("== Commit ==");
    println!("  ancestry changed: {:?}", commit.ancestry_changed);
    println!("  layout changed:   {:?}", commit.layout_changed);
}
