use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use nalgebra::{matrix, vector};

use latsym::base::{AngleTolerance, Cell, Lattice};
use latsym::get_symmetry;

fn cell_for_benchmark(n: usize) -> Cell {
    let mut positions = vec![];
    let mut numbers = vec![];
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                positions.push(vector![
                    i as f64 / n as f64,
                    j as f64 / n as f64,
                    k as f64 / n as f64
                ]);
                numbers.push(0);
            }
        }
    }

    Cell::new(
        Lattice::new(matrix![
            n as f64, 0.0, 0.0;
            0.0, n as f64, 0.0;
            0.0, 0.0, n as f64;
        ]),
        positions,
        numbers,
    )
}

pub fn benchmark(c: &mut Criterion) {
    let symprec = 1e-5;
    let mut group = c.benchmark_group("symmetry search");
    for n in 1..=4 {
        let cell = cell_for_benchmark(n);
        group.throughput(Throughput::Elements(cell.num_atoms() as u64));
        group.bench_with_input(BenchmarkId::new("get_symmetry", n), &cell, |b, cell| {
            b.iter(|| get_symmetry(cell, symprec, AngleTolerance::Default));
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
