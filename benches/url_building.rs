//! Benchmark for request URL building and response decoding

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use opensds_client::urls::{root_url, tenant_url};
use opensds_client::{ListFilter, SortDir, VolumeSpec};

fn bench_tenant_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("urls");
    group.throughput(Throughput::Elements(1));

    group.bench_function("tenant_url", |b| {
        let mut counter = 0u64;
        b.iter(|| {
            counter += 1;
            let volume_id = format!("vol-{}", counter);
            tenant_url(
                black_box("http://localhost:50040/"),
                black_box("e93b4c0934da416eb9c8d120c5d04d96"),
                &["block", "volumes", &volume_id],
            )
        });
    });

    group.bench_function("root_url", |b| {
        let endpoint = "http://localhost:50040";
        b.iter(|| root_url(black_box(endpoint), &["v1beta"]));
    });

    group.finish();
}

fn bench_list_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("urls");

    let filter = ListFilter::new()
        .with("status", "available")
        .with("poolId", "pool 1")
        .limit(50)
        .offset(100)
        .sort("createdAt", SortDir::Desc);

    group.bench_function("list_query", |b| {
        b.iter(|| black_box(&filter).to_query());
    });

    group.finish();
}

fn bench_decode_volumes(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(1000));

    let body = serde_json::to_vec(
        &(0..1000)
            .map(|i| {
                serde_json::json!({
                    "id": format!("vol-{:04}", i),
                    "createdAt": "2026-01-01T00:00:00",
                    "name": format!("volume-{}", i),
                    "size": 1 + i % 100,
                    "status": "available",
                    "poolId": "pool-1",
                    "profileId": "profile-1"
                })
            })
            .collect::<Vec<_>>(),
    )
    .unwrap();

    group.bench_function("volume_list_1k", |b| {
        b.iter(|| {
            let volumes: Vec<VolumeSpec> = serde_json::from_slice(black_box(&body)).unwrap();
            volumes
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_tenant_url,
    bench_list_query,
    bench_decode_volumes
);
criterion_main!(benches);
