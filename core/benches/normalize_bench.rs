use criterion::{criterion_group, criterion_main, Criterion};
use phrase_core::{normalize, split_sentences};

const TEXT: &str = "The cat sat on the mat. Dogs bark loudly at night! \
Search engines split documents into sentences, weigh every term by how rare it is, \
and compare the query against each sentence. Could you please find the running shoes? \
In 2024 the library moved to a new building on Main St. near the river.";

fn bench_normalize(c: &mut Criterion) {
    let sentences = split_sentences(&TEXT.repeat(50));
    c.bench_function("split_sentences", |b| b.iter(|| split_sentences(TEXT)));
    c.bench_function("normalize_sentences", |b| {
        b.iter(|| sentences.iter().map(|s| normalize(s)).collect::<Vec<_>>())
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
