//! Differential render benchmarks: nanofmt-core's engine against the
//! host libc's own `snprintf`, the way the teacher's own placeholder
//! `stdio_bench.rs` ("Will benchmark printf formatting ... once
//! implemented") always intended its stdio benchmarks to work.

use std::ffi::CString;
use std::os::raw::c_char;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use nanofmt_core::render::render_to_buffer;
use nanofmt_core::source::{SliceArgPuller, SlotValue};

const CAP: usize = 8;

fn bench_integer_directive(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_integer");

    group.bench_function("nanofmt", |b| {
        b.iter(|| {
            let mut slots = [SlotValue::<u8>::Int(criterion::black_box(-1234567))];
            let mut puller = SliceArgPuller::new(&mut slots);
            let mut buf = [0u8; 32];
            let n = render_to_buffer::<u8, _, CAP>(&mut buf, b"%+08d", None, &mut puller, None);
            criterion::black_box(n);
        });
    });

    group.bench_function("libc_snprintf", |b| {
        let fmt = CString::new("%+08d").unwrap();
        b.iter(|| {
            let mut buf = [0 as c_char; 32];
            let n = unsafe {
                libc::snprintf(
                    buf.as_mut_ptr(),
                    buf.len(),
                    fmt.as_ptr(),
                    criterion::black_box(-1234567i32),
                )
            };
            criterion::black_box(n);
        });
    });

    group.finish();
}

fn bench_string_directive(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_string");
    let payload = "the quick brown fox jumps over the lazy dog";

    group.bench_function("nanofmt", |b| {
        b.iter(|| {
            let mut slots = [SlotValue::<u8>::Str(criterion::black_box(payload.as_bytes()))];
            let mut puller = SliceArgPuller::new(&mut slots);
            let mut buf = [0u8; 64];
            let n = render_to_buffer::<u8, _, CAP>(&mut buf, b"%.20s", None, &mut puller, None);
            criterion::black_box(n);
        });
    });

    group.bench_function("libc_snprintf", |b| {
        let fmt = CString::new("%.20s").unwrap();
        let arg = CString::new(payload).unwrap();
        b.iter(|| {
            let mut buf = [0 as c_char; 64];
            let n = unsafe {
                libc::snprintf(buf.as_mut_ptr(), buf.len(), fmt.as_ptr(), arg.as_ptr())
            };
            criterion::black_box(n);
        });
    });

    group.finish();
}

fn bench_mixed_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_mixed");
    let sizes: &[usize] = &[1, 4, 8];

    for &count in sizes {
        group.bench_with_input(BenchmarkId::new("nanofmt_repeated_d", count), &count, |b, &n| {
            let format: String = "%d ".repeat(n);
            let format = format.as_bytes();
            b.iter(|| {
                let mut slots: [SlotValue<u8>; CAP] = core::array::from_fn(|i| SlotValue::Int(i as i64));
                let mut puller = SliceArgPuller::new(&mut slots[..n]);
                let mut buf = [0u8; 256];
                let written = render_to_buffer::<u8, _, CAP>(&mut buf, format, None, &mut puller, None);
                criterion::black_box(written);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_integer_directive, bench_string_directive, bench_mixed_format);
criterion_main!(benches);
