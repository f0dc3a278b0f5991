//! Benchmarks for raster assembly.
//!
//! Run with: cargo bench --package clim-raster --bench assemble_benchmarks

use clim_common::HeaderAccessor;
use clim_raster::{
    assemble, coordinate_pairs, normalize, scan_order, RasterConfig, RasterPipeline,
    ReduceAggregator,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use test_utils::{create_ensemble_climatology, create_multigrid_climatology, regular_coordinates};

// =============================================================================
// SCAN ORDER BENCHMARKS
// =============================================================================

fn bench_scan_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_order");

    for &(nlat, nlon) in &[(90, 180), (180, 360), (361, 720)] {
        let pairs = coordinate_pairs(&regular_coordinates(nlat, nlon));
        group.throughput(Throughput::Elements(pairs.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", nlat, nlon)),
            &pairs,
            |b, pairs| b.iter(|| black_box(scan_order(pairs))),
        );
    }

    group.finish();
}

// =============================================================================
// ASSEMBLY BENCHMARKS
// =============================================================================

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");
    let accessor = HeaderAccessor;

    for &members in &[1usize, 10, 40] {
        let grid = create_ensemble_climatology(members, 180, 360);
        let class = clim_raster::classify(&grid, &accessor).unwrap();

        for parallel in [false, true] {
            let config = RasterConfig {
                parallel,
                ..Default::default()
            };
            let normalized = normalize(&grid, &class, &accessor, &ReduceAggregator, &config).unwrap();
            let label = if parallel { "parallel" } else { "sequential" };

            group.throughput(Throughput::Elements((members * 180 * 360) as u64));
            group.bench_with_input(
                BenchmarkId::new(label, members),
                &normalized.grid,
                |b, grid| b.iter(|| black_box(assemble(grid, &accessor, &config).unwrap())),
            );
        }
    }

    group.finish();
}

// =============================================================================
// END-TO-END BENCHMARKS
// =============================================================================

fn bench_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare");
    let pipeline = RasterPipeline::new(RasterConfig::default()).unwrap();

    let ensemble = create_ensemble_climatology(20, 180, 360);
    group.bench_function("ensemble_20x180x360", |b| {
        b.iter(|| black_box(pipeline.prepare(&ensemble).unwrap()))
    });

    let multigrid = create_multigrid_climatology(4, Some(10), 180, 360);
    group.bench_function("multigrid_4x10x180x360", |b| {
        b.iter(|| black_box(pipeline.prepare(&multigrid).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_scan_order, bench_assemble, bench_prepare);
criterion_main!(benches);
