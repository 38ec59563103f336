use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pdatastructs::countminsketch::CountMinSketch as ReferenceCountMinSketch;
use precision_hh::frequency::{CountMinSketch, FrequencySketch};
use precision_hh::prng::Prng;

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_min_update");

    group.bench_function("precision_hh", |b| {
        let mut prng = Prng::new(1, 1);
        let mut sketch = CountMinSketch::new(0.01, 0.1, &mut prng).unwrap();
        let mut counter = 0u32;
        b.iter(|| {
            sketch.update(black_box(counter % 10_000), 1);
            counter += 1;
        });
    });

    group.bench_function("pdatastructs", |b| {
        let mut sketch = ReferenceCountMinSketch::<u32, u64>::with_params(2000, 7);
        let mut counter = 0u32;
        b.iter(|| {
            sketch.add(&black_box(counter % 10_000));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_point_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_min_point_query");

    let mut prng = Prng::new(2, 2);
    let mut sketch = CountMinSketch::new(0.01, 0.1, &mut prng).unwrap();
    for uid in 0..10_000u32 {
        sketch.update(uid, 1);
    }

    group.bench_with_input(BenchmarkId::new("precision_hh", "10k_items"), &sketch, |b, sketch| {
        let mut counter = 0u32;
        b.iter(|| {
            black_box(sketch.point_query(counter % 10_000));
            counter += 1;
        });
    });

    let mut reference = ReferenceCountMinSketch::<u32, u64>::with_params(2000, 7);
    for uid in 0..10_000u32 {
        reference.add(&uid);
    }

    group.bench_with_input(
        BenchmarkId::new("pdatastructs", "10k_items"),
        &reference,
        |b, reference| {
            let mut counter = 0u32;
            b.iter(|| {
                black_box(reference.query_point(&(counter % 10_000)));
                counter += 1;
            });
        },
    );

    group.finish();
}

criterion_group!(benches, bench_update, bench_point_query);
criterion_main!(benches);
