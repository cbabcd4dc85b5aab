use criterion::{Criterion, criterion_group, criterion_main};
use pdf_chat::splitter::{SplitterConfig, split_text};
use std::hint::black_box;

fn sample_text() -> String {
    // Roughly the size of a 40-page extracted PDF
    "The quick brown fox jumps over the lazy dog. Retrieval augmented \
     generation grounds a language model in documents it has never seen. "
        .repeat(800)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let text = sample_text();
    let config = SplitterConfig::default();
    c.bench_function("splitting", |b| {
        b.iter(|| split_text(black_box(&text), black_box(&config)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
