//! Ray casting and voxelization benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voxel_sculpt::{shapes, ConvertMonitor, Ray, SurfaceTracer, VoxelizeConfig, Voxelizer};

/// Rays from a shell of radius `from` aimed near the origin.
fn inward_rays(count: usize, from: f64, seed: u64) -> Vec<Ray> {
  let mut rng = StdRng::seed_from_u64(seed);
  (0..count)
    .map(|_| {
      let origin = DVec3::new(
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
      )
      .normalize()
        * from;
      let target = DVec3::new(
        rng.random_range(-0.2..0.2),
        rng.random_range(-0.2..0.2),
        rng.random_range(-0.2..0.2),
      ) * from;
      Ray::new(origin, target - origin)
    })
    .collect()
}

fn bench_tracer(c: &mut Criterion) {
  let mut group = c.benchmark_group("tracer");

  for depth in [6u32, 8] {
    let width = (1u32 << depth) as f64;
    // world = grid - W/2
    let grid = shapes::sphere_grid(depth, width * 0.3, width).unwrap();
    let tracer = SurfaceTracer::new(&grid);
    let rays = inward_rays(1024, width * 0.45, 2);

    group.bench_with_input(BenchmarkId::new("initialize", depth), &depth, |b, _| {
      b.iter(|| black_box(SurfaceTracer::new(&grid)))
    });

    group.bench_with_input(BenchmarkId::new("sequential_1024", depth), &depth, |b, _| {
      b.iter(|| {
        rays
          .iter()
          .filter_map(|ray| tracer.find_ray_intersection(&grid, ray))
          .sum::<f64>()
      })
    });

    group.bench_with_input(BenchmarkId::new("batch_1024", depth), &depth, |b, _| {
      b.iter(|| black_box(tracer.trace_batch(&grid, &rays)))
    });
  }

  group.finish();
}

fn bench_voxelize(c: &mut Criterion) {
  let mut group = c.benchmark_group("voxelize");
  group.sample_size(10);

  for accuracy in [0.05, 0.02] {
    let mesh = shapes::icosphere(1.0, 4);
    let voxelizer = Voxelizer::new(VoxelizeConfig::new(accuracy));
    group.bench_with_input(
      BenchmarkId::new("icosphere_4", format!("a={}", accuracy)),
      &accuracy,
      |b, _| b.iter(|| black_box(voxelizer.convert(&mesh, &ConvertMonitor::new()).unwrap())),
    );
  }

  group.finish();
}

criterion_group!(benches, bench_tracer, bench_voxelize);
criterion_main!(benches);
