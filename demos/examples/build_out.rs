// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build-out: removal that waits for exit transitions.
//!
//! A list is detached while two of its rows fade out. The list stays in the
//! tree until a toy frame clock completes both fades. A second round re-attaches
//! the list halfway through, which calls the whole exit off.
//!
//! Run:
//! - `cargo run -p trellis_demos --example build_out`

use std::cell::RefCell;
use std::rc::Rc;

use trellis_view::{
    Backend, CancelMode, NodeId, Ticket, Transition, TransitionCx, TransitionKind,
    TransitionOptions, Tree, ViewConfig,
};

#[derive(Default)]
struct Elements(u32);

impl Backend for Elements {
    type Element = u32;
    fn construct(&mut self, _node: NodeId) -> u32 {
        self.0 += 1;
        self.0
    }
    fn destroy(&mut self, _element: u32) {}
    fn insert(&mut self, _parent: u32, _child: u32, _before: Option<u32>) {}
    fn remove(&mut self, element: u32) {
        println!("  backend: remove e{element}");
    }
}

/// Running fades: ticket and frames left.
type Clock = Rc<RefCell<Vec<(Ticket, u32)>>>;

struct Fade {
    clock: Clock,
}

impl Transition for Fade {
    fn setup(&mut self, cx: &TransitionCx<'_>, in_place: bool) {
        println!("  fade {:?}: setup {:?} in_place={in_place}", cx.node(), cx.kind());
    }

    fn run(&mut self, cx: &mut TransitionCx<'_>) {
        let frames = u32::try_from(cx.options().duration.as_millis() / 16).unwrap_or(u32::MAX);
        self.clock.borrow_mut().push((cx.ticket(), frames));
    }

    fn cancel(&mut self, cx: &TransitionCx<'_>, mode: CancelMode) {
        println!("  fade {:?}: cancel {mode:?}", cx.node());
        self.clock.borrow_mut().retain(|(t, _)| *t != cx.ticket());
    }

    fn teardown(&mut self, cx: &TransitionCx<'_>) {
        println!("  fade {:?}: teardown", cx.node());
    }
}

/// Advance every fade by one frame; return the tickets that finished.
fn tick(clock: &Clock) -> Vec<Ticket> {
    let mut running = clock.borrow_mut();
    for (_, left) in running.iter_mut() {
        *left = left.saturating_sub(1);
    }
    let done = running.iter().filter(|(_, left)| *left == 0).map(|(t, _)| *t).collect();
    running.retain(|(_, left)| *left > 0);
    done
}

fn main() {
    let clock = Clock::default();
    let mut tree = Tree::new(Elements::default());
    let page = tree.insert(None, ViewConfig::default());
    let list = tree.insert(Some(page), ViewConfig::default());
    let rows: Vec<_> = (0..3)
        .map(|_| tree.insert(Some(list), ViewConfig::default()))
        .collect();
    for (i, row) in rows.iter().enumerate().take(2) {
        let options = TransitionOptions {
            duration: std::time::Duration::from_millis(48 * (i as u64 + 1)),
            ..Default::default()
        };
        let fade = Fade {
            clock: Rc::clone(&clock),
        };
        tree.set_transition(*row, TransitionKind::Out, fade, options);
    }
    let _ = tree.render(page);
    let _ = tree.attach_to(page, 0, None);

    println!("== Detach list ==");
    let _ = tree.detach(list);
    println!("  list: {:?}, waiting for {}", tree.state(list), tree.build_out_count(list));

    let mut frame = 0;
    while tree.build_out_count(list) > 0 {
        frame += 1;
        for ticket in tick(&clock) {
            println!("  frame {frame}: {:?} finished", ticket.node());
            let _ = tree.finish_transition(ticket);
        }
    }
    println!("  list: {:?}", tree.state(list));

    println!("== Attach, detach, and re-attach mid-fade ==");
    let _ = tree.attach(list);
    let _ = tree.detach(list);
    let _ = tick(&clock);
    let _ = tree.attach(list);
    for row in &rows {
        println!("  {row:?}: {:?}", tree.state(*row));
    }
    println!("  list: {:?}", tree.state(list));
}
