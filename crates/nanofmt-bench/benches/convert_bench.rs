//! Benchmarks for the two reverse-digit converters in isolation,
//! independent of the directive-parsing/padding overhead `render_bench`
//! measures end to end.

use criterion::{Criterion, criterion_group, criterion_main};

use nanofmt_core::floatconv::render_float_rev;
use nanofmt_core::intconv::render_uint_rev;

fn bench_intconv(c: &mut Criterion) {
    let mut group = c.benchmark_group("intconv");

    group.bench_function("decimal_u64_max", |b| {
        b.iter(|| {
            let mut buf = [0u8; 32];
            let n = render_uint_rev(criterion::black_box(u64::MAX), 10, false, &mut buf);
            criterion::black_box(n);
        });
    });

    group.bench_function("hex_u64_max", |b| {
        b.iter(|| {
            let mut buf = [0u8; 32];
            let n = render_uint_rev(criterion::black_box(u64::MAX), 16, true, &mut buf);
            criterion::black_box(n);
        });
    });

    group.finish();
}

fn bench_floatconv(c: &mut Criterion) {
    let mut group = c.benchmark_group("floatconv");

    group.bench_function("pi_precision_6", |b| {
        b.iter(|| {
            let mut buf = [0u8; 32];
            let r = render_float_rev(&mut buf, 6, false, false, criterion::black_box(core::f64::consts::PI));
            criterion::black_box(r);
        });
    });

    group.bench_function("small_fraction_precision_15", |b| {
        b.iter(|| {
            let mut buf = [0u8; 32];
            let r = render_float_rev(&mut buf, 15, false, false, criterion::black_box(0.000_123_456));
            criterion::black_box(r);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_intconv, bench_floatconv);
criterion_main!(benches);
