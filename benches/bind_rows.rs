//! Benchmark: compiled binding vs hand-written row construction.
//!
//! Groups:
//! - entities: named binding through the compiled shape table
//! - tuples: positional binding, no name resolution at all
//! - manual: hand-written construction from the same rows (baseline)

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use rowbind::{BindRows, Entity, Mapper, Row, Value};

#[derive(Debug, Default, Clone, Entity)]
struct Reading {
    sensor_id: i64,
    channel: i32,
    value: f64,
    ok: bool,
}

fn generate_rows(n: usize) -> Vec<Row> {
    let names: std::sync::Arc<[String]> = vec![
        "sensor_id".to_string(),
        "channel".to_string(),
        "value".to_string(),
        "ok".to_string(),
    ]
    .into();
    (0..n)
        .map(|i| {
            Row::new(
                std::sync::Arc::clone(&names),
                vec![
                    Value::I64(i as i64),
                    Value::I32((i % 16) as i32),
                    Value::F64(i as f64 * 0.5),
                    Value::Bool(i % 2 == 0),
                ],
            )
        })
        .collect()
}

fn manual_bind(row: &Row) -> Reading {
    let mut out = Reading::default();
    if let Some(Value::I64(x)) = row.get(0) {
        out.sensor_id = *x;
    }
    if let Some(Value::I32(x)) = row.get(1) {
        out.channel = *x;
    }
    if let Some(Value::F64(x)) = row.get(2) {
        out.value = *x;
    }
    if let Some(Value::Bool(x)) = row.get(3) {
        out.ok = *x;
    }
    out
}

fn bench_bind(c: &mut Criterion) {
    const N: usize = 10_000;
    let rows = generate_rows(N);

    let mut group = c.benchmark_group("bind_rows");
    group.throughput(Throughput::Elements(N as u64));

    group.bench_function("entities", |b| {
        b.iter(|| {
            let mut binder = Mapper::new().entities::<Reading>();
            for row in &rows {
                black_box(binder.bind_row(row.clone()).unwrap());
            }
        });
    });

    group.bench_function("tuples", |b| {
        b.iter(|| {
            let mut binder = Mapper::new().tuples::<(i64, i32, f64, bool)>().unwrap();
            for row in &rows {
                black_box(binder.bind_row(row.clone()).unwrap());
            }
        });
    });

    group.bench_function("manual", |b| {
        b.iter(|| {
            for row in &rows {
                black_box(manual_bind(row));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_bind);
criterion_main!(benches);
