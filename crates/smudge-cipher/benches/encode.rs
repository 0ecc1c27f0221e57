//! Micro-benchmarks for the cipher transform.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench encode
//! ```

use std::hint;

use criterion::{Criterion, criterion_group, criterion_main};
use smudge_cipher::{EncodeOptions, Engine, Mode};
use smudge_core::KeyGraph;

const PHRASE: &str = "jackdaws love my big sphinx of quartz";

fn bench_build(c: &mut Criterion) {
    let spec = smudge_layouts::QWERTY.spec(smudge_core::layout::LATIN_ALPHABET);
    c.bench_function("build_qwerty", |b| {
        b.iter(|| KeyGraph::build(hint::black_box(&spec)).unwrap());
    });
}

fn bench_encode(c: &mut Criterion) {
    let spec = smudge_layouts::QWERTY.spec(smudge_core::layout::LATIN_ALPHABET);
    let graph = KeyGraph::build(&spec).unwrap();
    let engine = Engine::new(&graph);

    let modes = [
        ("reversible", Mode::Reversible),
        ("encrypt", Mode::Encrypt),
        ("decipher", Mode::Decipher),
    ];
    for (name, mode) in modes {
        let options = EncodeOptions {
            drop_unknown: true,
            mode,
            ..EncodeOptions::default()
        };
        c.bench_function(&format!("encode_{name}"), |b| {
            b.iter(|| engine.encode_text(hint::black_box(PHRASE), &options));
        });
    }

    let randomized = EncodeOptions {
        drop_unknown: true,
        randomize: true,
        max_outputs: 8,
        ..EncodeOptions::default()
    };
    c.bench_function("encode_randomized_seeded", |b| {
        b.iter(|| engine.encode_text_seeded(hint::black_box(PHRASE), &randomized, 42));
    });
}

criterion_group!(benches, bench_build, bench_encode);
criterion_main!(benches);
