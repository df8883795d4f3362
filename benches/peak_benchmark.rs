use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Vector3;
use std::hint::black_box;

use tas_lattice::lattice::{LatticePlane, UnitCell};
use tas_lattice::peaks::{generate_peaks, AtomPos, LatticeCommon};
use tas_lattice::symmetries::find_by_name;

fn xy_plane() -> LatticePlane {
    LatticePlane::new(
        Vector3::zeros(),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
    )
}

/// Benchmark the full per-pass pipeline at realistic search bounds, with and
/// without symmetry filtering and structure factors.
fn bench_peak_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("peak_generation");

    let lattice = UnitCell::cubic(5.0).unwrap();
    let recip = lattice.reciprocal().unwrap();

    let plain = LatticeCommon::calc(
        lattice.clone(),
        recip.clone(),
        xy_plane(),
        xy_plane(),
        None,
        &[],
    )
    .unwrap();

    let sg = find_by_name("Fm-3m").unwrap();
    let atoms = [
        AtomPos::new("Fe", Vector3::zeros()),
        AtomPos::new("O", Vector3::new(0.5, 0.5, 0.5)),
    ];
    let symmetric = LatticeCommon::calc(lattice, recip, xy_plane(), xy_plane(), Some(sg), &atoms)
        .unwrap();

    for max_index in [5, 10] {
        group.bench_function(format!("plain_index_{}", max_index), |b| {
            b.iter(|| generate_peaks(black_box(&plain), false, black_box(max_index)))
        });
        group.bench_function(format!("symmetry_atoms_index_{}", max_index), |b| {
            b.iter(|| generate_peaks(black_box(&symmetric), false, black_box(max_index)))
        });
        group.bench_function(format!("powder_index_{}", max_index), |b| {
            b.iter(|| generate_peaks(black_box(&plain), true, black_box(max_index)))
        });
    }

    group.finish();
}

fn bench_common_derivation(c: &mut Criterion) {
    let lattice = UnitCell::cubic(5.0).unwrap();
    let recip = lattice.reciprocal().unwrap();
    let sg = find_by_name("Fm-3m").unwrap();
    let atoms = [AtomPos::new("Fe", Vector3::new(0.1, 0.2, 0.3))];

    c.bench_function("lattice_common_calc", |b| {
        b.iter(|| {
            LatticeCommon::calc(
                black_box(lattice.clone()),
                black_box(recip.clone()),
                xy_plane(),
                xy_plane(),
                Some(sg),
                black_box(&atoms),
            )
        })
    });
}

criterion_group!(benches, bench_peak_generation, bench_common_derivation);
criterion_main!(benches);
