use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn sample_text(len: usize) -> Vec<u8> {
    let words = b"the quick brown fox jumps over the lazy dog while huffman codes pack bits ";
    words.iter().copied().cycle().take(len).collect()
}

fn huffman_compression(c: &mut Criterion) {
    let input = sample_text(64 * 1024);

    let mut group = c.benchmark_group("huffman");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("compress", |b| {
        b.iter(|| huffpack::compress(black_box(&input)))
    });
    group.finish();
}

fn huffman_decompression(c: &mut Criterion) {
    let input = sample_text(64 * 1024);
    let compressed = huffpack::compress(&input).unwrap();

    let mut group = c.benchmark_group("huffman");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("decompress", |b| {
        b.iter(|| huffpack::decompress(black_box(&compressed)))
    });
    group.finish();
}

criterion_group!(benches, huffman_compression, huffman_decompression);
criterion_main!(benches);
