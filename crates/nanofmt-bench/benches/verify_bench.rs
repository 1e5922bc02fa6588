//! Benchmarks for the standalone verifier (no binding or rendering),
//! isolating spec.md's two-pass inference cost from the rest of the
//! pipeline.

use criterion::{Criterion, criterion_group, criterion_main};

use nanofmt_core::verify::verify;

const CAP: usize = 16;

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");

    group.bench_function("short_matching_format", |b| {
        b.iter(|| {
            let ok = verify::<u8, CAP>(
                criterion::black_box(b"%d %s"),
                Some(criterion::black_box(b"%d %s")),
            );
            criterion::black_box(ok);
        });
    });

    group.bench_function("positional_reordered_format", |b| {
        b.iter(|| {
            let ok = verify::<u8, CAP>(
                criterion::black_box(b"%1$d %2$s %3$f"),
                Some(criterion::black_box(b"%3$f %1$d %2$s")),
            );
            criterion::black_box(ok);
        });
    });

    group.bench_function("reference_only_ten_directives", |b| {
        let reference: Vec<u8> = "%d ".repeat(10).into_bytes();
        b.iter(|| {
            let ok = verify::<u8, CAP>(criterion::black_box(&reference), None);
            criterion::black_box(ok);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_verify);
criterion_main!(benches);
