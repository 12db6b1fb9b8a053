// Throughput of the linear-scan operations over a synthetic catalog
use concierge_core::{
    Catalog, Engine, GalleryRequest, InspirationRequest, PropertyRecord, RecommendRequest,
    SearchRequest,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use std::sync::Arc;

const PREFECTURES: &[&str] = &["Kyoto", "Nagano", "Osaka", "Hokkaido", "Okinawa", "Tokyo"];
const WORDS: &[&str] = &["quiet", "mountain", "onsen", "garden", "river", "historic", "modern", "family"];

fn generate_catalog(size: usize) -> Catalog {
    let mut rng = rand::rng();
    let records = (0..size)
        .map(|i| {
            let description: Vec<&str> = (0..12).map(|_| *WORDS.choose(&mut rng).unwrap()).collect();
            PropertyRecord::new(
                format!("Property {}", i),
                *PREFECTURES.choose(&mut rng).unwrap(),
                rng.random_range(0..500),
            )
            .with_description(description.join(" "))
        })
        .collect();
    Catalog::from_records(records)
}

fn benchmark_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [1_000, 10_000].iter() {
        let engine = Engine::new(Arc::new(generate_catalog(*size)));
        let request = SearchRequest {
            query: Some("onsen".to_string()),
            destination: Some("kyoto".to_string()),
        };
        group.bench_with_input(BenchmarkId::new("facets", size), size, |b, _| {
            b.iter(|| black_box(engine.search(&request).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_ranked(c: &mut Criterion) {
    let engine = Engine::new(Arc::new(generate_catalog(10_000)));

    c.bench_function("inspiration_top_10", |b| {
        let request = InspirationRequest {
            destination: None,
            limit: Some(10),
        };
        b.iter(|| black_box(engine.inspiration(&request).unwrap()));
    });

    c.bench_function("gallery_sample_5", |b| {
        let request = GalleryRequest {
            style: Some("garden".to_string()),
            count: Some(5),
        };
        b.iter(|| black_box(engine.gallery(&request).unwrap()));
    });

    c.bench_function("recommend_all_intents", |b| {
        let request = RecommendRequest {
            query: Some("recommend a hotel guests review well".to_string()),
            destination: Some("Nagano".to_string()),
        };
        b.iter(|| black_box(engine.recommend(&request).unwrap()));
    });
}

criterion_group!(benches, benchmark_search, benchmark_ranked);
criterion_main!(benches);
