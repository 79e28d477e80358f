// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mustekala::http::{rebuild, Headers};
use mustekala::pipeline::run_chain;
use mustekala::{codec, BodyRewriter, PluginRegistry, WebData};

fn codec_benchmark(c: &mut Criterion) {
    let body = "<html><head><title>t</title></head><body>".to_string() + &"x".repeat(16 * 1024)
        + "</body></html>";
    let wire = codec::encode(&body);

    c.bench_function("decode_16k_body", |b| {
        b.iter(|| codec::decode(black_box(&wire), true).unwrap())
    });

    c.bench_function("encode_16k_body", |b| {
        b.iter(|| codec::encode(black_box(&body)))
    });
}

fn rebuild_benchmark(c: &mut Criterion) {
    let headers = Headers::from_pairs([
        ("Server", "nginx"),
        ("Content-Type", "text/html; charset=utf-8"),
        ("Content-Length", "2"),
        ("Date", "Mon, 01 Jan 2024 00:00:00 GMT"),
        ("Cache-Control", "no-store"),
    ]);
    let body = "x".repeat(16 * 1024);

    c.bench_function("rebuild_response", |b| {
        b.iter(|| rebuild(200, black_box(&headers), black_box(&body)))
    });
}

fn mutation_chain_benchmark(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let registry = PluginRegistry::new()
        .with_mutator("one", BodyRewriter::new("alpha", "beta"))
        .with_mutator("two", BodyRewriter::new("beta", "gamma"));
    let body = "alpha ".repeat(1024);

    c.bench_function("mutation_chain_two_rewriters", |b| {
        b.iter(|| {
            let data = WebData::new(
                body.clone(),
                Headers::new(),
                "Document",
                "https://target.example/",
            );
            rt.block_on(run_chain(registry.mutators(), black_box(data)))
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    codec_benchmark,
    rebuild_benchmark,
    mutation_chain_benchmark
);
criterion_main!(benches);
