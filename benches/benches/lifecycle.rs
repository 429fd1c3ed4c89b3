// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use trellis_view::{
    Backend, CancelMode, NodeId, Transition, TransitionCx, TransitionKind, TransitionOptions,
    Tree, ViewConfig,
};

#[derive(Default)]
struct Null(u32);

impl Backend for Null {
    type Element = u32;
    fn construct(&mut self, _node: NodeId) -> u32 {
        self.0 += 1;
        self.0
    }
    fn destroy(&mut self, _element: u32) {}
    fn insert(&mut self, _parent: u32, _child: u32, _before: Option<u32>) {}
    fn remove(&mut self, _element: u32) {}
}

/// Completes from inside `run`.
struct Instant;

impl Transition for Instant {
    fn run(&mut self, cx: &mut TransitionCx<'_>) {
        cx.finish();
    }
    fn cancel(&mut self, _cx: &TransitionCx<'_>, _mode: CancelMode) {}
}

/// A shown root with `fanout` children, each with `fanout` children.
fn gen_tree(fanout: usize, with_exits: bool) -> (Tree<Null>, NodeId, Vec<NodeId>) {
    let mut tree = Tree::new(Null::default());
    let root = tree.insert(None, ViewConfig::default());
    let mut mids = Vec::with_capacity(fanout);
    for _ in 0..fanout {
        let mid = tree.insert(Some(root), ViewConfig::default());
        for _ in 0..fanout {
            let leaf = tree.insert(Some(mid), ViewConfig::default());
            if with_exits {
                tree.set_transition(leaf, TransitionKind::Out, Instant, TransitionOptions::default());
            }
        }
        mids.push(mid);
    }
    let _ = tree.render(root);
    let _ = tree.attach_to(root, 0, None);
    (tree, root, mids)
}

fn bench_hide_show(c: &mut Criterion) {
    let mut group = c.benchmark_group("hide_show");
    for &fanout in &[8usize, 32] {
        group.throughput(Throughput::Elements((fanout * fanout) as u64));
        group.bench_function(format!("root_fanout{}", fanout), |b| {
            b.iter_batched(
                || gen_tree(fanout, false),
                |(mut tree, root, _)| {
                    let _ = tree.hide(root);
                    let _ = tree.show(root);
                    black_box(tree.state(root));
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_build_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_out");
    for &fanout in &[8usize, 32] {
        group.throughput(Throughput::Elements((fanout * fanout) as u64));
        group.bench_function(format!("detach_sync_exits_fanout{}", fanout), |b| {
            b.iter_batched(
                || gen_tree(fanout, true),
                |(mut tree, root, _)| {
                    let _ = tree.detach(root);
                    black_box(tree.state(root));
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("reparent_mids_fanout{}", fanout), |b| {
            b.iter_batched(
                || gen_tree(fanout, false),
                |(mut tree, root, mids)| {
                    for mid in mids.iter().rev() {
                        let _ = tree.adopt(*mid, root, None);
                    }
                    black_box(tree.commit());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hide_show, bench_build_out);
criterion_main!(benches);
