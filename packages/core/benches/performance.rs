//! Connection resolution benchmarks
//!
//! Measures resolve latency over a large seeded collection, with and
//! without a filter, to keep an eye on the chain query path.

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::json;

use sitegraph_core::db::Store;
use sitegraph_core::models::{ConnectionArgs, Node};
use sitegraph_core::schema::{CollectionSchema, FilterField, SchemaRegistry};
use sitegraph_core::services::ConnectionService;

fn seeded_service(count: usize) -> ConnectionService {
    tokio_test::block_on(async {
        let store = Arc::new(Store::new());
        let posts = store.add_collection("Post").await;
        for index in 0..count {
            posts
                .insert(
                    Node::new()
                        .with_title(format!("Post {index}"))
                        .with_path(format!("/posts/{index}"))
                        .with_date(format!("2020-{:02}-{:02}", index % 12 + 1, index % 28 + 1))
                        .with_field("author", json!({ "id": format!("u{}", index % 50) }))
                        .with_field("rating", json!(index % 5)),
                )
                .await
                .unwrap();
        }

        let mut schemas = SchemaRegistry::new();
        schemas.register(
            "Post",
            CollectionSchema::new()
                .with_field("author", FilterField::Reference)
                .with_field("rating", FilterField::Leaf),
        );
        ConnectionService::new(store, schemas)
    })
}

fn bench_resolve(c: &mut Criterion) {
    let service = seeded_service(10_000);

    c.bench_function("resolve_unfiltered_page", |b| {
        let args = ConnectionArgs::default();
        b.iter(|| {
            tokio_test::block_on(service.resolve("Post", &args)).unwrap();
        });
    });

    c.bench_function("resolve_filtered_page", |b| {
        let args = ConnectionArgs {
            filter: Some(json!({
                "author": { "equals": "u7" },
                "rating": { "gte": 2 }
            })),
            ..Default::default()
        };
        b.iter(|| {
            tokio_test::block_on(service.resolve("Post", &args)).unwrap();
        });
    });
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
