//! Performance benchmarks for item projection and tool dispatch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};

use jellyfin_mcp::backend::{Backend, Query};
use jellyfin_mcp::projection::Projection;
use jellyfin_mcp::types::RawItem;
use jellyfin_mcp::{JellyfinConfig, JellyfinTools};

struct StaticBackend(Value);

impl Backend for StaticBackend {
    fn get(&self, _path: &str, _query: &Query<'_>) -> jellyfin_mcp::Result<Value> {
        Ok(self.0.clone())
    }
}

fn config() -> JellyfinConfig {
    JellyfinConfig::new("http://jellyfin.local:8096", "bench-api-key", "bench-user")
}

fn raw_tracks(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "Id": format!("{:032x}", i),
                "Name": format!("Track {}", i),
                "Type": "Audio",
                "Artists": ["Queen", "David Bowie"],
                "AlbumArtist": "Queen",
                "Album": "Hot Space",
                "ProductionYear": 1982,
                "Genres": ["Rock", "Pop"],
                "IndexNumber": i % 12 + 1,
                "RunTimeTicks": 2_100_000_000i64 + i as i64 * 10_000_000,
                "Overview": "Verbose text the compact projections drop.",
                "MediaSources": [{"Path": "/music/queen/track.flac", "Container": "flac"}]
            })
        })
        .collect()
}

fn bench_projection(c: &mut Criterion) {
    let cfg = config();
    let items: Vec<RawItem> = raw_tracks(100)
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect();

    let mut group = c.benchmark_group("projection");
    group.throughput(Throughput::Elements(items.len() as u64));

    for projection in [
        Projection::SearchAudio,
        Projection::AlbumTrack,
        Projection::Favorite,
        Projection::StreamInfo,
    ] {
        group.bench_with_input(
            BenchmarkId::new("apply", format!("{:?}", projection)),
            &projection,
            |b, projection| {
                b.iter(|| {
                    for raw in &items {
                        black_box(projection.apply(raw, &cfg));
                    }
                })
            },
        );
    }

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    for size in [10, 50] {
        let tools = JellyfinTools::new(
            config(),
            StaticBackend(json!({"TotalRecordCount": size, "Items": raw_tracks(size)})),
        );
        group.bench_with_input(BenchmarkId::new("search_media", size), &size, |b, &size| {
            b.iter(|| {
                black_box(tools.call_tool(
                    "search_media",
                    json!({"query": "queen", "limit": size}),
                ))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_projection, bench_dispatch);
criterion_main!(benches);
