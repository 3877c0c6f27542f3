// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use mindline::model::NodeId;

mod fixtures;
mod profiler;

use fixtures::Case;

// Benchmark identity (keep stable):
// - Group name in this file: `timeline.transitions`
// - Case IDs: `{operation}_{fixtures::Case::id()}`.
fn benches_timeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline.transitions");

    for case in [Case::Small, Case::Medium, Case::LargeWide] {
        let template = fixtures::timeline(case, 2);
        let subtree = fixtures::node_id(1);
        let target = fixtures::date(1);

        group.bench_function(format!("move_subtree_{}", case.id()), {
            let template = template.clone();
            let subtree = subtree.clone();
            move |b| {
                b.iter_batched(
                    || template.clone(),
                    |mut state| {
                        let moved =
                            state.move_node_to_date(black_box(&subtree), black_box(&target));
                        black_box((moved, fixtures::checksum_state(&state)))
                    },
                    BatchSize::LargeInput,
                )
            }
        });

        group.bench_function(format!("remove_subtree_{}", case.id()), {
            let template = template.clone();
            let subtree = subtree.clone();
            move |b| {
                b.iter_batched(
                    || template.clone(),
                    |mut state| black_box(state.remove_node(black_box(&subtree))),
                    BatchSize::LargeInput,
                )
            }
        });

        group.bench_function(format!("add_child_{}", case.id()), {
            let template = template.clone();
            move |b| {
                b.iter_batched(
                    || template.clone(),
                    |mut state| black_box(state.add_child_node(black_box(&NodeId::root()))),
                    BatchSize::LargeInput,
                )
            }
        });

        group.bench_function(format!("check_invariants_{}", case.id()), move |b| {
            b.iter(|| black_box(template.check_invariants().is_ok()))
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_timeline
}
criterion_main!(benches);
