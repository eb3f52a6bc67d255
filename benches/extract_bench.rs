use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use sonic_dna::{DnaConfig, ExtractOptions, extract_dna_batch, extract_dna_with_config};

const SHORT: &str = r#"s("bass").slow(2).distort(5).lpf(500)"#;
const LAYERED: &str = r#"stack(
  s("bd*4").bank("RolandTR909"),
  s("hh*8").gain(0.6).pan(sine.range(0.2, 0.8)),
  note("c2 c2 eb2 g1").s("sawtooth").lpf(300).lpq(2).gain(0.8),
  s("~ cp").room(0.2).delay(0.25)
).fast(2).distort(2)"#;

fn extract_bench(c: &mut Criterion) {
    let cfg = DnaConfig::default();
    let opts = ExtractOptions::default().with_salt("bench");
    let mut group = c.benchmark_group("extract_dna");

    for (name, source) in [("short", SHORT), ("layered", LAYERED)] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let record = extract_dna_with_config(black_box(source), &cfg, &opts)
                    .expect("bench extraction");
                black_box(record);
            });
        });
    }

    // Fresh salt per call: includes the OS CSPRNG read.
    let fresh = ExtractOptions::default();
    group.bench_function("short_fresh_salt", |b| {
        b.iter(|| black_box(extract_dna_with_config(SHORT, &cfg, &fresh).expect("bench")));
    });

    group.finish();
}

fn batch_bench(c: &mut Criterion) {
    let cfg = DnaConfig::default();
    let opts = ExtractOptions::default().with_salt("bench");
    let sources: Vec<&str> = (0..64)
        .map(|i| if i % 2 == 0 { SHORT } else { LAYERED })
        .collect();

    let mut group = c.benchmark_group("extract_dna_batch");
    group.throughput(Throughput::Elements(sources.len() as u64));
    group.bench_function("mixed_64", |b| {
        b.iter(|| black_box(extract_dna_batch(black_box(&sources), &cfg, &opts)));
    });
    group.finish();
}

criterion_group!(benches, extract_bench, batch_bench);
criterion_main!(benches);
