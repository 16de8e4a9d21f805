use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ply::mem::{InMemorySink, InMemorySource};
use ply::{NullSink, RecordReader, RecordWriter};

/// Builds a synthetic `vertex`/`face` ASCII mesh with `n` vertices and
/// `n` quad faces, the same grid-mesh shape used to exercise the reader and
/// writer elsewhere in this repo's test suite.
fn synthetic_mesh_ascii(n: usize) -> Vec<u8> {
    let mut out = String::new();
    out.push_str("ply\rformat ascii 1.0\r");
    out.push_str(&format!("element vertex {n}\r"));
    out.push_str("property float x\rproperty float y\rproperty float z\r");
    out.push_str(&format!("element face {n}\r"));
    out.push_str("property list uchar int vertex_indices\r");
    out.push_str("end_header\r");
    for i in 0..n {
        out.push_str(&format!("{} {} {}\r", i as f32, i as f32 * 0.5, 0.0));
    }
    for i in 0..n {
        let a = i as i32;
        let b = ((i + 1) % n) as i32;
        let c = ((i + 2) % n) as i32;
        let d = ((i + 3) % n) as i32;
        out.push_str(&format!("4 {a} {b} {c} {d}\r"));
    }
    out.into_bytes()
}

fn parse_header_grid(c: &mut Criterion) {
    let bytes = synthetic_mesh_ascii(256);
    c.bench_function("parse_header_grid256", |b| b.iter(|| ply::parse_header(black_box(&bytes))));
}

fn read_all_grid(c: &mut Criterion) {
    let bytes = synthetic_mesh_ascii(256);
    c.bench_function("read_all_grid256", |b| {
        b.iter(|| {
            let mut sink = NullSink;
            RecordReader::read_all_from_slice(black_box(&bytes), &mut sink)
        })
    });
}

fn round_trip_grid(c: &mut Criterion) {
    let bytes = synthetic_mesh_ascii(256);
    let mut sink = InMemorySink::default();
    RecordReader::read_all_from_slice(&bytes, &mut sink).unwrap();
    let header = sink.header.clone().unwrap();
    c.bench_function("round_trip_grid256", |b| {
        b.iter(|| {
            let mut source = InMemorySource::new(header.clone(), sink.rows.clone());
            let mut out = Vec::new();
            RecordWriter::write_ascii(black_box(&mut out), &mut source)
        })
    });
}

criterion_group!(benches, parse_header_grid, read_all_grid, round_trip_grid);
criterion_main!(benches);
