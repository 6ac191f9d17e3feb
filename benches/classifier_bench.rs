//! Performance benchmarks for frame classification.
//!
//! Classification sits on the host poll path, so it should stay trivially
//! cheap next to the 25 ms framing gap.
//!
//! Run benchmarks with:
//! ```sh
//! cargo bench --bench classifier_bench
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gatekey_decoder::classifier::classify;
use gatekey_decoder::frame::Frame;
use gatekey_decoder::keypad::KeyAccumulator;
use std::hint::black_box;

/// Benchmark classification across the four supported frame widths.
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    group.throughput(Throughput::Elements(1));

    let frames = [
        ("key4", Frame::new(0x5, 4)),
        ("key8", Frame::new(0xA5, 8)),
        ("tag26", Frame::new(0x2AA_AAAA, 26)),
        ("tag34", Frame::new(0xDEAD_BEEF, 34)),
        ("invalid", Frame::new(0x1FFF, 13)),
    ];

    for (name, frame) in frames {
        group.bench_with_input(BenchmarkId::from_parameter(name), &frame, |b, &frame| {
            b.iter(|| classify(black_box(frame)));
        });
    }

    group.finish();
}

/// Benchmark a complete six-digit PIN entry with confirm.
fn bench_pin_entry(c: &mut Criterion) {
    let mut group = c.benchmark_group("pin_entry");
    group.throughput(Throughput::Elements(7));

    group.bench_function("six_digits_and_confirm", |b| {
        b.iter(|| {
            let mut acc = KeyAccumulator::new();
            for digit in [1u8, 2, 3, 4, 5, 6] {
                acc.push(black_box(digit));
            }
            black_box(acc.push(11))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_classify, bench_pin_entry);
criterion_main!(benches);
