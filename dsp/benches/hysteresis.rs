#![allow(clippy::items_after_statements)]

use criterion::{criterion_group, criterion_main, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    use sirena::signal::{self, Signal, SignalTake};
    use tape_dsp::hysteresis::{Attributes, Hysteresis, Makeup, SignalApplyHysteresis};

    const BUFFER_SIZE: usize = 32;
    const FS: f32 = 48_000.0;
    const FREQ: f32 = 100.0;

    let attributes = Attributes {
        drive: 0.5,
        saturation: 0.5,
        width: 0.5,
    };

    let mut group = c.benchmark_group("hysteresis");

    group.bench_function("tick", |b| {
        let mut input = signal::sine(FS, FREQ);
        let mut hysteresis = Hysteresis::new(FS, attributes, Makeup::Fitted).unwrap();
        b.iter(|| {
            let _buffer: [f32; BUFFER_SIZE] = input
                .by_ref()
                .apply_hysteresis(&mut hysteresis)
                .take(BUFFER_SIZE)
                .collect::<Vec<_>>()
                .as_slice()
                .try_into()
                .unwrap();
        });
    });

    group.bench_function("process_block", |b| {
        let input: Vec<f32> = signal::sine(FS, FREQ).take(4096).collect();
        let mut hysteresis = Hysteresis::new(FS, attributes, Makeup::Fitted).unwrap();
        b.iter(|| {
            let mut buffer = input.clone();
            hysteresis.process_block(&mut buffer);
        });
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
