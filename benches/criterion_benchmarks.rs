use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use nanozip::codec::{CompressOptions, decode_all, encode_all};
use nanozip::hash::compare::{forward_match, forward_match_word};
use nanozip::hash::matching::MatchFinder;
use std::fs;
use std::path::Path;

fn gen_data(size: usize, seed: u64) -> Vec<u8> {
    let mut s = seed;
    let mut out = Vec::with_capacity(size);
    for _ in 0..size {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        out.push((s >> 33) as u8);
    }
    out
}

/// Random data with a copy of an earlier block every `stride` bytes.
fn gen_repetitive(size: usize, stride: usize, seed: u64) -> Vec<u8> {
    let mut out = gen_data(size, seed);
    let mut pos = stride;
    while pos + 64 < size {
        let back = (pos / 3).min(60_000);
        out.copy_within(pos - back..pos - back + 64, pos);
        pos += stride;
    }
    out
}

fn encode(data: &[u8], window: usize) -> Vec<u8> {
    encode_all(data, &CompressOptions::with_window(window)).unwrap()
}

fn write_ratio_snapshot() {
    let data = gen_repetitive(2 * 1024 * 1024, 128, 123);
    let mut csv = String::from("window,compressed_bytes,input_bytes,ratio\n");
    for window in [1024usize, 4096, 16384, 65535] {
        let packed = encode(&data, window);
        let ratio = packed.len() as f64 / data.len() as f64;
        csv.push_str(&format!("{window},{},{},{}\n", packed.len(), data.len(), ratio));
    }
    let out_dir = Path::new("target/criterion/custom_reports");
    let _ = fs::create_dir_all(out_dir);
    let _ = fs::write(out_dir.join("ratio_snapshot.csv"), csv);
}

fn bench_compress_speed(c: &mut Criterion) {
    let mut g = c.benchmark_group("compress_speed_mb_s");
    for size in [64 * 1024usize, 1024 * 1024, 4 * 1024 * 1024] {
        let data = gen_repetitive(size, 256, 1);
        g.throughput(Throughput::Bytes(size as u64));
        g.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(encode(black_box(&data), 0)));
        });
    }
    g.finish();
}

fn bench_decompress_speed(c: &mut Criterion) {
    let mut g = c.benchmark_group("decompress_speed_mb_s");
    for size in [64 * 1024usize, 1024 * 1024, 4 * 1024 * 1024] {
        let data = gen_repetitive(size, 256, 2);
        let packed = encode(&data, 0);
        g.throughput(Throughput::Bytes(size as u64));
        g.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(decode_all(black_box(&packed)).unwrap()));
        });
    }
    g.finish();
}

fn bench_ratio_vs_window(c: &mut Criterion) {
    write_ratio_snapshot();
    let mut g = c.benchmark_group("compression_ratio_vs_window");
    let data = gen_repetitive(1024 * 1024, 128, 3);
    for window in [1024usize, 4096, 16384, 65535] {
        g.bench_with_input(BenchmarkId::from_parameter(window), &window, |b, window| {
            b.iter(|| {
                let packed = encode(&data, *window);
                black_box(packed.len() as f64 / data.len() as f64);
            });
        });
    }
    g.finish();
}

fn bench_match_finder(c: &mut Criterion) {
    let mut g = c.benchmark_group("match_finder");
    let data: Vec<u8> = b"the quick brown fox jumps over the lazy dog "
        .iter()
        .copied()
        .cycle()
        .take(256 * 1024)
        .collect();
    g.throughput(Throughput::Bytes(data.len() as u64));
    g.bench_function("greedy_scan", |b| {
        b.iter(|| {
            let mut finder = MatchFinder::new(65535);
            let mut pos = 0;
            let mut matches = 0usize;
            while pos < data.len() {
                match finder.find(&data, pos) {
                    Some(m) => {
                        matches += 1;
                        pos += m.length;
                    }
                    None => pos += 1,
                }
            }
            black_box(matches);
        });
    });
    g.finish();
}

fn bench_comparators(c: &mut Criterion) {
    let mut g = c.benchmark_group("forward_match");
    let a = vec![0x5Au8; 258];
    let mut b_same = a.clone();
    b_same[257] = 0;
    g.throughput(Throughput::Bytes(258));
    g.bench_function("dispatched", |b| {
        b.iter(|| black_box(forward_match(black_box(&a), black_box(&b_same), 258)));
    });
    g.bench_function("portable_word", |b| {
        b.iter(|| black_box(forward_match_word(black_box(&a), black_box(&b_same), 258)));
    });
    g.finish();
}

fn bench_real_world_scenarios(c: &mut Criterion) {
    let mut g = c.benchmark_group("real_world_scenarios");
    let scenarios: [(&str, Vec<u8>); 4] = [
        (
            "text_alphabet",
            (0..1024 * 1024).map(|i| b'A' + (i % 26) as u8).collect(),
        ),
        ("binary_ascending", (0..1024 * 1024).map(|i| i as u8).collect()),
        ("random_incompressible", gen_data(1024 * 1024, 77)),
        ("zeros", vec![0u8; 1024 * 1024]),
    ];

    for (name, data) in &scenarios {
        g.throughput(Throughput::Bytes(data.len() as u64));
        g.bench_function(*name, |b| {
            b.iter(|| {
                let packed = encode(data, 0);
                black_box(decode_all(&packed).unwrap());
            });
        });
    }
    g.finish();
}

criterion_group!(
    benches,
    bench_compress_speed,
    bench_decompress_speed,
    bench_ratio_vs_window,
    bench_match_finder,
    bench_comparators,
    bench_real_world_scenarios
);
criterion_main!(benches);
