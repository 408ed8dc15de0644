use criterion::{Criterion, criterion_group, criterion_main};
use draftwright_engine::model::encode_doc;
use draftwright_engine::parsing::{inline::parse_inline, parse_markdown};
mod common;

fn bench_parse_markdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(20);

    let content = common::generate_markdown_content(100);
    group.bench_function("mixed_blocks", |b| {
        b.iter(|| {
            let doc = parse_markdown(std::hint::black_box(&content));
            std::hint::black_box(doc);
        });
    });

    let large = common::generate_large_document();
    group.bench_function("large_document", |b| {
        b.iter(|| {
            let doc = parse_markdown(std::hint::black_box(&large));
            std::hint::black_box(doc);
        });
    });

    group.finish();
}

fn bench_inline(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline");

    let line = common::generate_inline_heavy_line(50);
    group.bench_function("inline_heavy_line", |b| {
        b.iter(|| {
            let nodes = parse_inline(std::hint::black_box(&line));
            std::hint::black_box(nodes);
        });
    });

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    group.sample_size(20);

    let doc = parse_markdown(&common::generate_markdown_content(100));
    group.bench_function("encode_doc", |b| {
        b.iter(|| {
            let value = encode_doc(std::hint::black_box(&doc));
            std::hint::black_box(value);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse_markdown, bench_inline, bench_encode);
criterion_main!(benches);
