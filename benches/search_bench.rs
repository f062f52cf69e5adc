use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sri::build::Variant;
use sri::index::Index;

fn generate_text(size: usize) -> Vec<u8> {
    let words = [
        "the ", "quick ", "brown ", "fox ", "jumps ", "over ", "lazy ", "dog ", "alice ", "bob ", "server ",
        "request ", "response ", "error ", "data ", "cache ", "index ", "search ", "query ", "result ",
    ];
    let mut text = Vec::with_capacity(size);
    let mut i = 0;
    while text.len() < size {
        let word = words[i % words.len()].as_bytes();
        text.extend_from_slice(word);
        i += 1;
    }
    text.truncate(size);
    text
}

fn bench_build_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_index");

    for size in [1_000, 10_000, 50_000] {
        let text = generate_text(size);
        group.bench_with_input(BenchmarkId::new("bytes", size), &text, |b, text| {
            b.iter(|| Index::build(black_box(text), 4, Variant::ValidArea, 256))
        });
    }
    group.finish();
}

fn bench_count(c: &mut Criterion) {
    let text = generate_text(100_000);
    let index = Index::build(&text, 4, Variant::ValidArea, 256).unwrap();

    let mut group = c.benchmark_group("count");

    for pattern in ["fox", "the quick", "server request response"] {
        group.bench_with_input(BenchmarkId::new("pattern", pattern), pattern.as_bytes(), |b, pat| {
            b.iter(|| index.count(black_box(pat)))
        });
    }
    group.finish();
}

fn bench_occurrences(c: &mut Criterion) {
    let text = generate_text(100_000);
    let index = Index::build(&text, 4, Variant::ValidArea, 256).unwrap();

    c.bench_function("occurrences_hit", |b| b.iter(|| index.occurrences(black_box(b"fox"))));

    c.bench_function("occurrences_miss", |b| {
        b.iter(|| index.occurrences(black_box(b"zzzzz")))
    });
}

fn bench_locate(c: &mut Criterion) {
    let text = generate_text(100_000);
    let index = Index::build(&text, 4, Variant::ValidArea, 256).unwrap();

    c.bench_function("locate_all_fox", |b| {
        b.iter(|| {
            let positions = index.locate(black_box(b"fox"));
            black_box(positions.len())
        })
    });

    c.bench_function("locate_all_the", |b| {
        b.iter(|| {
            let positions = index.locate(black_box(b"the"));
            black_box(positions.len())
        })
    });
}

fn bench_subsample_rate(c: &mut Criterion) {
    let text = generate_text(100_000);
    let mut group = c.benchmark_group("locate_by_rate");

    for rate in [1usize, 4, 16, 64] {
        let variant = if rate == 1 { Variant::Plain } else { Variant::ValidArea };
        let index = Index::build(&text, rate, variant, 256).unwrap();
        group.bench_with_input(BenchmarkId::new("rate", rate), &index, |b, index| {
            b.iter(|| index.locate(black_box(b"fox")).len())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_build_index,
    bench_count,
    bench_occurrences,
    bench_locate,
    bench_subsample_rate,
);
criterion_main!(benches);
