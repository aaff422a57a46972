// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Cost of one update cycle.
//
// Run with:
//   cargo bench --bench update_cycle
//
// Groups:
//   float_16      — 16 float pins, bit-preserving
//   typed_256     — 256 pins, bit+s32 in, bit+s32+float out on every pin
//   disconnected  — the short-circuit path

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pinbridge::{
    Bridge, BridgeConfig, Direction, EndpointKind, FloatBridge, PeerRegion, PinRegistry,
    TypedBridge, ValueType,
};

fn bench_float(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("pins.shm");
    let _peer = PeerRegion::create(&path, 16).expect("peer");
    let mut bridge: FloatBridge =
        Bridge::start(&BridgeConfig::new(&path), PinRegistry::new().expect("registry"))
            .expect("bridge");

    c.bench_function("float_16", |b| {
        b.iter(|| {
            bridge.update();
            black_box(bridge.status())
        });
    });
}

fn bench_typed(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("pins.shm");
    let _peer = PeerRegion::create(&path, 256).expect("peer");

    let mut reg = PinRegistry::new().expect("registry");
    reg.register_all(&[
        EndpointKind::new(ValueType::Bit, Direction::In),
        EndpointKind::new(ValueType::S32, Direction::In),
        EndpointKind::new(ValueType::Bit, Direction::Out),
        EndpointKind::new(ValueType::S32, Direction::Out),
        EndpointKind::new(ValueType::Float, Direction::Out),
    ])
    .expect("register");
    let mut bridge: TypedBridge =
        Bridge::start(&BridgeConfig::new(&path), reg).expect("bridge");

    c.bench_function("typed_256", |b| {
        b.iter(|| {
            bridge.update();
            black_box(bridge.status())
        });
    });
}

fn bench_disconnected(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut bridge: FloatBridge = Bridge::start(
        &BridgeConfig::new(dir.path().join("absent.shm")),
        PinRegistry::new().expect("registry"),
    )
    .expect("bridge");

    c.bench_function("disconnected", |b| {
        b.iter(|| {
            bridge.update();
            black_box(bridge.status())
        });
    });
}

criterion_group!(benches, bench_float, bench_typed, bench_disconnected);
criterion_main!(benches);
