use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kvengine_storage::{Store, Value};

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_insert");
    for size in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut store = Store::new(0x9747_b28c);
                for i in 0..size {
                    store.insert(format!("key-{i}"), Value::String(format!("value-{i}")));
                }
                black_box(&store);
            });
        });
    }
    group.finish();
}

fn bench_get_hit(c: &mut Criterion) {
    let mut store = Store::new(0x9747_b28c);
    for i in 0..10_000 {
        store.insert(format!("key-{i}"), Value::String(format!("value-{i}")));
    }
    c.bench_function("store_get_hit", |b| {
        b.iter(|| black_box(store.get(black_box("key-5000"))));
    });
}

fn bench_rehash_steps(c: &mut Criterion) {
    c.bench_function("store_rehash_to_quiescence", |b| {
        b.iter(|| {
            let mut store = Store::new(0x9747_b28c);
            for i in 0..2_000 {
                store.insert(format!("key-{i}"), Value::String("v".into()));
            }
            for _ in 0..400 {
                store.maintenance();
            }
            black_box(&store);
        });
    });
}

fn bench_keys_matching(c: &mut Criterion) {
    let mut store = Store::new(1);
    for i in 0..5_000 {
        store.insert(format!("user:{i}"), Value::String("v".into()));
    }
    c.bench_function("store_keys_glob", |b| {
        b.iter(|| black_box(store.keys_matching(black_box("user:1*"))));
    });
}

criterion_group!(benches, bench_insert, bench_get_hit, bench_rehash_steps, bench_keys_matching);
criterion_main!(benches);
