// ABOUTME: Criterion benchmarks for token encoding and decoding
// ABOUTME: Measures AES-GCM sealing, opening, and strict claims parsing per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the token codec.

#![allow(clippy::unwrap_used, missing_docs)]

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use verbum_server::crypto::TokenKey;
use verbum_server::tokens::{AuthClaims, ResetClaims, TokenCodec};

fn codec() -> TokenCodec {
    TokenCodec::with_default_lifetime(&TokenKey::from_bytes([42u8; 32]))
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_encode");
    let codec = codec();
    let now = Utc::now();

    group.bench_function("auth", |b| {
        b.iter(|| {
            codec.issue_auth(
                black_box("5f0c1e9a-6a43-4d4e-9f7a-0d7c9b1f2e33"),
                black_box("reader@example.com"),
                black_box("$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNoaGFzaA"),
                now,
            )
        });
    });

    group.bench_function("reset", |b| {
        b.iter(|| {
            codec.issue_reset(
                black_box("5f0c1e9a-6a43-4d4e-9f7a-0d7c9b1f2e33"),
                black_box("reader@example.com"),
                black_box("password_reset"),
                now,
            )
        });
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_decode");
    let codec = codec();
    let now = Utc::now();

    let auth = codec
        .issue_auth("5f0c1e9a", "reader@example.com", "$argon2id$hash", now)
        .unwrap();
    group.throughput(Throughput::Bytes(auth.len() as u64));
    group.bench_function("auth", |b| {
        b.iter(|| codec.decode::<AuthClaims>(black_box(&auth)));
    });

    let reset = codec
        .issue_reset("5f0c1e9a", "reader@example.com", "password_reset", now)
        .unwrap();
    group.bench_function("reset", |b| {
        b.iter(|| codec.decode::<ResetClaims>(black_box(&reset)));
    });

    let mut tampered = auth.into_bytes();
    tampered[20] = if tampered[20] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap();
    group.bench_function("auth_tampered", |b| {
        b.iter(|| codec.decode::<AuthClaims>(black_box(&tampered)));
    });

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
