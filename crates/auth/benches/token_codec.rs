use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use signet_auth::{Role, SigningKey, StaticKeys, TokenCodec, TokenRequest};
use signet_core::{Environment, UserId};

fn bench_codec() -> TokenCodec {
    TokenCodec::new(Arc::new(StaticKeys::new(
        Environment::Test,
        SigningKey::new("benchmark-signing-key"),
    )))
}

fn bench_request() -> TokenRequest {
    TokenRequest::web(
        UserId::new(42),
        "Ada",
        "Lovelace",
        "ada@example.com",
        Role::Developer,
        Environment::Test,
        false,
    )
}

fn bench_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_755_000_000, 0).unwrap()
}

fn bench_issue(c: &mut Criterion) {
    let codec = bench_codec();
    let request = bench_request();
    let now = bench_now();

    let mut group = c.benchmark_group("token_issue");
    group.throughput(Throughput::Elements(1));

    group.bench_function("web_session", |b| {
        b.iter(|| codec.issue(black_box(&request), now).unwrap())
    });

    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let codec = bench_codec();
    let now = bench_now();
    let token = codec.issue(&bench_request(), now).unwrap();

    let mut group = c.benchmark_group("token_verify");
    group.throughput(Throughput::Elements(1));

    group.bench_function("verify_and_decode", |b| {
        b.iter(|| codec.verify_and_decode(black_box(&token), now).unwrap())
    });

    group.bench_function("is_expired_probe", |b| {
        b.iter(|| codec.is_expired(black_box(&token), now))
    });

    group.finish();
}

criterion_group!(benches, bench_issue, bench_verify);
criterion_main!(benches);
