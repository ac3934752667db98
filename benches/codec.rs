use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dent::{from_str, reflect, to_string};

#[derive(Debug, PartialEq, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

reflect! {
    User {
        id: u32,
        name: String,
        email: String,
        active: bool,
    }
}

#[derive(Debug, PartialEq, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

reflect! {
    Product {
        sku: String,
        name: String,
        price: f64,
        quantity: u32,
    }
}

#[derive(Debug, PartialEq, Clone)]
struct Metadata {
    created: String,
    updated: String,
    version: u32,
}

reflect! {
    Metadata {
        created: String,
        updated: String,
        version: u32,
    }
}

#[derive(Debug, PartialEq, Clone)]
struct NestedData {
    id: u32,
    metadata: Metadata,
    tags: Vec<String>,
}

reflect! {
    NestedData {
        id: u32,
        metadata: Metadata,
        tags: Vec<String>,
    }
}

fn sample_user() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    }
}

fn sample_products(count: u32) -> Vec<Product> {
    (0..count)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
        })
        .collect()
}

fn bench_encode_simple(c: &mut Criterion) {
    let user = sample_user();
    c.bench_function("encode_simple_record", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn bench_decode_simple(c: &mut Criterion) {
    let text = to_string(&sample_user()).unwrap();
    c.bench_function("decode_simple_record", |b| {
        b.iter(|| from_str::<User>(black_box(&text)))
    });
}

fn bench_encode_sequences(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_sequence");
    for size in [10, 50, 100, 500] {
        let products = sample_products(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &products, |b, p| {
            b.iter(|| to_string(black_box(p)))
        });
    }
    group.finish();
}

fn bench_decode_sequences(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_sequence");
    for size in [10, 50, 100, 500] {
        let text = to_string(&sample_products(size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, t| {
            b.iter(|| from_str::<Vec<Product>>(black_box(t)))
        });
    }
    group.finish();
}

fn bench_nested(c: &mut Criterion) {
    let data = NestedData {
        id: 42,
        metadata: Metadata {
            created: "2023-01-01".to_string(),
            updated: "2023-12-31".to_string(),
            version: 3,
        },
        tags: vec![
            "important".to_string(),
            "verified".to_string(),
            "production".to_string(),
        ],
    };
    c.bench_function("encode_nested_record", |b| {
        b.iter(|| to_string(black_box(&data)))
    });

    let text = to_string(&data).unwrap();
    c.bench_function("decode_nested_record", |b| {
        b.iter(|| from_str::<NestedData>(black_box(&text)))
    });
}

fn bench_roundtrip(c: &mut Criterion) {
    let user = sample_user();
    c.bench_function("roundtrip_simple_record", |b| {
        b.iter(|| {
            let text = to_string(black_box(&user)).unwrap();
            let _back: User = from_str(black_box(&text)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_encode_simple,
    bench_decode_simple,
    bench_encode_sequences,
    bench_decode_sequences,
    bench_nested,
    bench_roundtrip
);
criterion_main!(benches);
