// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use trellis_cascade::cascade::Cascade;
use trellis_cascade::types::{ChildLookup, Outcome};

struct Flat {
    children: Vec<Vec<u32>>,
    marked: Vec<bool>,
}

impl ChildLookup<u32> for Flat {
    fn children_of(&self, node: &u32) -> Vec<u32> {
        self.children[*node as usize].clone()
    }
}

/// Complete tree with `fanout` children per node and `depth` levels below the root.
fn gen_tree(fanout: usize, depth: usize) -> Flat {
    let mut children = vec![Vec::new()];
    let mut level = vec![0_u32];
    for _ in 0..depth {
        let mut next = Vec::with_capacity(level.len() * fanout);
        for &parent in &level {
            for _ in 0..fanout {
                let id = children.len() as u32;
                children.push(Vec::new());
                children[parent as usize].push(id);
                next.push(id);
            }
        }
        level = next;
    }
    let marked = vec![false; children.len()];
    Flat { children, marked }
}

/// A single chain of `len` nodes.
fn gen_chain(len: usize) -> Flat {
    let mut children: Vec<Vec<u32>> = (1..len as u32).map(|i| vec![i]).collect();
    children.push(Vec::new());
    let marked = vec![false; len];
    Flat { children, marked }
}

fn mark(tree: &mut Flat, node: u32) -> Outcome {
    let slot = &mut tree.marked[node as usize];
    if *slot {
        return Outcome::Stop;
    }
    *slot = true;
    Outcome::Continue
}

fn bench_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide");
    for &fanout in &[8usize, 32, 128] {
        let tree = gen_tree(fanout, 2);
        group.throughput(Throughput::Elements(tree.children.len() as u64));
        group.bench_function(format!("will_did_fanout{}", fanout), |b| {
            b.iter_batched(
                || Flat {
                    children: tree.children.clone(),
                    marked: tree.marked.clone(),
                },
                |mut t| {
                    let cascade = Cascade::will(&mut t, 0, mark);
                    let mut n = 0_usize;
                    cascade.did(&mut t, |_, _| n += 1);
                    black_box(n);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep");
    for &len in &[64usize, 1024, 8192] {
        let tree = gen_chain(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_function(format!("will_did_chain{}", len), |b| {
            b.iter_batched(
                || Flat {
                    children: tree.children.clone(),
                    marked: tree.marked.clone(),
                },
                |mut t| {
                    let cascade = Cascade::will(&mut t, 0, mark);
                    black_box(cascade.len());
                    cascade.did(&mut t, |_, _| {});
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_pruned(c: &mut Criterion) {
    let mut group = c.benchmark_group("pruned");
    let tree = gen_tree(16, 3);
    // Half of the first level is already marked: their subtrees are skipped.
    let mut marked = tree.marked.clone();
    for &child in tree.children[0].iter().step_by(2) {
        marked[child as usize] = true;
    }
    group.bench_function("scan_half_pruned", |b| {
        let t = Flat {
            children: tree.children.clone(),
            marked: marked.clone(),
        };
        b.iter(|| {
            let scan = Cascade::scan(&t, 0, |t, node| {
                if t.marked[node as usize] {
                    Outcome::Stop
                } else {
                    Outcome::Continue
                }
            });
            black_box(scan.len())
        })
    });
    group.finish();
}

criterion_group!(benches, bench_wide, bench_deep, bench_pruned);
criterion_main!(benches);
