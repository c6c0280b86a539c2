use criterion::{Criterion, criterion_group, criterion_main};
use polarview::{BBox, build_mesh};
use std::hint::black_box;

fn mesh_builder_benchmark(c: &mut Criterion) {
    let bbox = BBox::new(170.0, 60.0, -170.0, 80.0);
    c.bench_function("mesh_builder", |b| {
        b.iter(|| build_mesh(black_box(&bbox), 5000.0, 1000));
    });

    let cap = BBox::new(-180.0, -90.0, 180.0, -60.0);
    c.bench_function("polar_cap_mesh", |b| {
        b.iter(|| build_mesh(black_box(&cap), 5000.0, 1000));
    });
}

criterion_group!(benches, mesh_builder_benchmark);
criterion_main!(benches);
