use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gl_codec::DictionaryCodec;

fn generate_document(size_kb: usize) -> String {
    let base = "### **📜 Constitutional Framework**\n**Historical Analysis**\n\
The constitutional framework of the federal government establishes the separation of powers. \
- **Judicial Review**: The supreme court interprets the constitutional framework. \
Legislative authority remains with the federal government and its representative institutions.\n\n";
    let mut text = String::with_capacity(size_kb * 1024);
    while text.len() < size_kb * 1024 {
        text.push_str(base);
    }
    text
}

fn bench_build(c: &mut Criterion) {
    let doc = generate_document(10);
    c.bench_function("build_dictionaries_10kb", |b| {
        b.iter(|| {
            let mut codec = DictionaryCodec::standard().unwrap();
            black_box(codec.build_dictionaries(black_box(&doc)).unwrap().total_entries())
        })
    });
}

fn bench_roundtrip(c: &mut Criterion) {
    for size in [1, 10, 100] {
        let doc = generate_document(size);
        let mut codec = DictionaryCodec::standard().unwrap();
        codec.build_dictionaries(&doc).unwrap();
        c.bench_function(&format!("compress_{size}kb"), |b| {
            b.iter(|| black_box(codec.compress(black_box(&doc)).unwrap()))
        });

        let compressed = codec.compress(&doc).unwrap().output;
        c.bench_function(&format!("decompress_{size}kb"), |b| {
            b.iter(|| black_box(codec.decompress(black_box(&compressed)).unwrap()))
        });
    }
}

criterion_group!(benches, bench_build, bench_roundtrip);
criterion_main!(benches);
