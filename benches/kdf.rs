//! benches/kdf.rs
//! PBKDF2-HMAC-MD5 primitive: scalar vs lock-step lanes
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pbkdf2_md5_rs::consts::LANE_WIDTH;
use pbkdf2_md5_rs::{derive_pbkdf2_md5, derive_pbkdf2_md5_lanes};
use std::hint::black_box;
use std::time::Duration;

fn kdf_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("KDF");
    group.measurement_time(Duration::from_secs(8));
    group.sample_size(20);

    let salt = [0x42u8; 16];
    let passwords: [&[u8]; LANE_WIDTH] = [b"benchmark-0", b"benchmark-1", b"benchmark-2", b"benchmark-3"];

    for &rounds in &[1_000u32, 10_000, 100_000] {
        group.throughput(Throughput::Elements(LANE_WIDTH as u64));

        group.bench_with_input(BenchmarkId::new("scalar", rounds), &rounds, |b, &rounds| {
            b.iter(|| {
                let mut out = [[0u8; 16]; LANE_WIDTH];
                for (pw, o) in passwords.iter().zip(out.iter_mut()) {
                    derive_pbkdf2_md5(black_box(pw), black_box(&salt), rounds, o).unwrap();
                }
                black_box(out);
            });
        });

        group.bench_with_input(BenchmarkId::new("lanes", rounds), &rounds, |b, &rounds| {
            b.iter(|| {
                let mut out = [[0u8; 16]; LANE_WIDTH];
                let mut outs: Vec<&mut [u8]> = out.iter_mut().map(|o| o.as_mut_slice()).collect();
                derive_pbkdf2_md5_lanes(black_box(&passwords), black_box(&salt), rounds, &mut outs)
                    .unwrap();
                black_box(out);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, kdf_benches);
criterion_main!(benches);
